use crate::db::RepositoryError;
use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};

/// Failure of a page handler, rendered as a bare HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("not found")]
    NotFound,
    /// Anonymous request to a page that needs a user; holds the redirect target.
    #[error("login required")]
    LoginRequired(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("misconfigured: {0}")]
    Misconfigured(&'static str),
}

impl ResponseError for ViewError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::LoginRequired(_) => StatusCode::SEE_OTHER,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Repository(_) | Self::Template(_) | Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let Self::LoginRequired(location) = self {
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location.as_str()))
                .finish();
        }
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(format!(
                "<!DOCTYPE html>\n<html><head><title>{code} {reason}</title></head>\
                 <body><h1>{reason}</h1></body></html>",
                code = status.as_u16(),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_map_to_404() {
        assert_eq!(ViewError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ViewError::Repository(RepositoryError::NotFound("movie")).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn login_required_redirects() {
        let response = ViewError::LoginRequired("/accounts/login/?next=%2F".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/accounts/login/?next=%2F"
        );
    }
}
