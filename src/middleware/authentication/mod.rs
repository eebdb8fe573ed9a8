mod getheader;
mod logged_user;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::*;
pub use logged_user::*;
pub use manager::*;
pub use manager_middleware::*;
