mod movie;
mod review;
mod review_kind;
mod suggestion;
pub mod user;

pub use movie::*;
pub use review::*;
pub use review_kind::*;
pub use suggestion::*;
pub use user::User;
