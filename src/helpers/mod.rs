mod error;
pub mod token;

pub use error::ViewError;
