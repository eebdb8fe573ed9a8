use crate::helpers::ViewError;
use crate::views::Templates;
use actix_web::{get, web, HttpResponse};
use tera::Context;

#[tracing::instrument(name = "Home page.", skip_all)]
#[get("/")]
pub async fn home_handler(templates: web::Data<Templates>) -> Result<HttpResponse, ViewError> {
    templates.render("home.html", &Context::new())
}
