use super::attach_user;
use crate::helpers::ViewError;
use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;

#[tracing::instrument(name = "Authenticate with bearer token", skip_all)]
pub async fn try_bearer(req: &mut ServiceRequest) -> Result<bool, ViewError> {
    let authorization = get_header::<String>(req, "authorization").map_err(|err| {
        tracing::debug!("{}", err);
        ViewError::Unauthorized
    })?;
    let authorization = match authorization {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = match authorization.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => token.trim().to_string(),
        _ => return Err(ViewError::Unauthorized),
    };

    // an explicit credential that matches nobody is an error, not anonymity
    match attach_user(req, &token).await? {
        true => Ok(true),
        false => Err(ViewError::Unauthorized),
    }
}
