mod errors;
pub mod movie;
pub mod review;
pub mod suggestion;

pub use errors::*;
pub use movie::MovieForm;
pub use review::ReviewForm;
pub use suggestion::SuggestionForm;
