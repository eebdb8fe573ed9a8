use super::attach_user;
use crate::helpers::ViewError;
use actix_web::dev::ServiceRequest;

#[tracing::instrument(name = "Authenticate with cookie", skip_all)]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, ViewError> {
    let token = match req.cookie("access_token") {
        Some(cookie) => cookie.value().to_string(),
        None => return Ok(false),
    };

    tracing::debug!("Found access_token in cookies");
    let attached = attach_user(req, &token).await?;
    if !attached {
        tracing::debug!("Stale access_token cookie, continuing anonymously");
    }

    Ok(attached)
}
