mod config;
mod db;
mod services;

use crate::config::AdminConfig;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the admin client shell. Paths under `/admin/` map onto the bundled
/// `dist` files; anything unknown falls back to `index.html` so client-side
/// routes load the shell.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let path = path.strip_prefix("admin").unwrap_or(path).trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AdminConfig::from_env();

    match db::open(&config.database).and_then(|conn| db::seed(&conn)) {
        Ok(()) => info!("Using database {}", config.database.display()),
        Err(e) => {
            error!("Cannot open database {}: {}", config.database.display(), e);
            return Err(std::io::Error::other(e));
        }
    }

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Admin running at {}", url);

    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(config.clone())
            .route(
                "/admin/client-config",
                web::get().to(services::client_config::process),
            )
            .service(services::pages::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await
}
