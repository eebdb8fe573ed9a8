use crate::configuration::Settings;
use crate::helpers::ViewError;
use crate::models;
use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

/// The authenticated user of a page that requires one. Anonymous requests
/// are redirected to the login page with the current path as `next`.
#[derive(Debug, Clone)]
pub struct LoggedUser(pub Arc<models::User>);

impl Deref for LoggedUser {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for LoggedUser {
    type Error = ViewError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Arc<models::User>>() {
            return ready(Ok(Self(user.clone())));
        }

        let login_url = req
            .app_data::<web::Data<Settings>>()
            .map(|settings| settings.login_url.clone())
            .unwrap_or_else(|| "/accounts/login/".to_string());
        let location = format!("{login_url}?next={}", urlencoding::encode(req.path()));
        tracing::debug!("Anonymous request to {}, redirecting to login", req.path());

        ready(Err(ViewError::LoginRequired(location)))
    }
}
