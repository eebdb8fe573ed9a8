pub mod health_checks;
pub mod home;
pub mod movie;
pub mod review;
pub mod suggestion;

pub use health_checks::*;

use actix_web::{http::header, HttpResponse};

/// 303 to `location`, the answer to every successful form post.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
