//! Page rendering.
//!
//! Templates are embedded at compile time and registered once at startup;
//! handlers hand a `tera::Context` to [`Templates::render`]. The structs in
//! the submodules are what templates see of movies and reviews.

pub mod movie;
pub mod review;

pub use movie::{MovieFormField, MovieItem};
pub use review::ReviewItem;

use crate::helpers::ViewError;
use actix_web::HttpResponse;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 11] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("review_list.html", include_str!("../../templates/review_list.html")),
    ("review_detail.html", include_str!("../../templates/review_detail.html")),
    ("review_form.html", include_str!("../../templates/review_form.html")),
    (
        "review_confirm_delete.html",
        include_str!("../../templates/review_confirm_delete.html"),
    ),
    ("movie_list.html", include_str!("../../templates/movie_list.html")),
    ("movie_detail.html", include_str!("../../templates/movie_detail.html")),
    ("movie_form.html", include_str!("../../templates/movie_form.html")),
    (
        "movie_confirm_delete.html",
        include_str!("../../templates/movie_confirm_delete.html"),
    ),
    ("suggestion_form.html", include_str!("../../templates/suggestion_form.html")),
];

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // registered together so `extends "base.html"` resolves
        tera.add_raw_templates(TEMPLATES.to_vec())?;

        Ok(Self { tera })
    }

    pub fn render_string(&self, name: &str, context: &Context) -> Result<String, ViewError> {
        self.tera.render(name, context).map_err(|err| {
            tracing::error!("Failed to render {}: {:?}", name, err);
            ViewError::from(err)
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<HttpResponse, ViewError> {
        let body = self.render_string(name, context)?;
        Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body))
    }
}
