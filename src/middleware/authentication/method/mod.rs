mod f_anonym;
mod f_bearer;
mod f_cookie;

pub use f_anonym::anonym;
pub use f_bearer::try_bearer;
pub use f_cookie::try_cookie;

use crate::db::Repository;
use crate::helpers::ViewError;
use crate::models;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use std::sync::Arc;

/// Looks the token up and attaches the user to the request.
/// `Ok(false)` when no user holds the token.
async fn attach_user(req: &mut ServiceRequest, token: &str) -> Result<bool, ViewError> {
    let repository = req
        .app_data::<web::Data<dyn Repository>>()
        .cloned()
        .ok_or(ViewError::Misconfigured("repository is not registered"))?;

    let token_hash = models::user::hash_token(token);
    let user = match repository.fetch_user_by_token_hash(&token_hash).await? {
        Some(user) => user,
        None => return Ok(false),
    };

    tracing::debug!(username = %user.username, "Authenticated");
    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err(ViewError::Unauthorized);
    }

    Ok(true)
}
