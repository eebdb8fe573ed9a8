use crate::configuration::Settings;
use crate::db::Repository;
use crate::middleware;
use crate::routes;
use crate::services::ReviewFeed;
use crate::views::Templates;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Everything handlers extract with `web::Data`.
#[derive(Clone)]
pub struct AppData {
    settings: web::Data<Settings>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    templates: web::Data<Templates>,
}

impl AppData {
    pub fn new(settings: Settings, repository: Arc<dyn Repository>) -> Result<Self, tera::Error> {
        Ok(Self {
            settings: web::Data::new(settings),
            feed: web::Data::new(ReviewFeed::new(repository.clone())),
            repository: web::Data::from(repository),
            templates: web::Data::new(Templates::new()?),
        })
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        let form_config = web::FormConfig::default().error_handler(|err, req| {
            tracing::debug!("Malformed form posted to {}: {}", req.path(), err);
            error::InternalError::new(err.to_string(), http::StatusCode::BAD_REQUEST).into()
        });

        cfg.app_data(self.settings.clone())
            .app_data(self.repository.clone())
            .app_data(self.feed.clone())
            .app_data(self.templates.clone())
            .app_data(form_config);
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::home::home_handler)
        .service(routes::suggestion::form_handler)
        .service(routes::suggestion::submit_handler)
        .service(web::scope("/health_check").service(routes::health_check))
        .service(
            web::scope("/review")
                .service(routes::review::feed_handler)
                .service(routes::review::search_handler)
                .service(routes::review::by_reviewer_handler)
                .service(routes::movie::list_handler)
                .service(routes::movie::add_form_handler)
                .service(routes::movie::add_handler)
                .service(routes::movie::item_handler)
                .service(routes::movie::update_form_handler)
                .service(routes::movie::update_handler)
                .service(routes::movie::delete_form_handler)
                .service(routes::movie::delete_handler)
                .service(routes::review::add_form_handler)
                .service(routes::review::add_handler)
                .service(routes::review::edit_form_handler)
                .service(routes::review::edit_handler)
                .service(routes::review::item_handler)
                .service(routes::review::delete_form_handler)
                .service(routes::review::delete_handler),
        );
}

pub async fn run(
    listener: TcpListener,
    repository: Arc<dyn Repository>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let app_data = AppData::new(settings, repository)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(TracingLogger::default())
            .configure(|cfg| app_data.register(cfg))
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
