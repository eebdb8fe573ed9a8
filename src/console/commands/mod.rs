mod callable;
pub mod user;

pub use callable::*;
