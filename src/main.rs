use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;

use regis_school::config::AppConfig;
use regis_school::models::AppStartTime;
use regis_school::routes;
use regis_school::runtime::lifetime;
use regis_school::utils::{json_error_handler, query_error_handler};

/// Stdout logging: file and line in development, JSON lines elsewhere.
/// The guard must live until shutdown so buffered lines are flushed.
fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_level(true)
                .with_ansi(true),
        );

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _log_guard = init_tracing(config);

    warn!(
        "{} is starting\n        Project: {}\n        Version: {}\n        Environment: {}",
        config.app.school_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage;
    let cache = startup.cache;

    debug!(
        "Startup preparation took {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );
    warn!("Running {} worker(s)", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(config.cors.max_age),
            )
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add((
                        "Keep-Alive",
                        format!("timeout={}", config.server.timeouts.keep_alive),
                    ))
                    .add(("Cache-Control", "no-store")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(routes::configure_routes)
    })
    .keep_alive(Duration::from_secs(config.server.timeouts.keep_alive))
    .client_request_timeout(Duration::from_millis(config.server.timeouts.client_request))
    .client_disconnect_timeout(Duration::from_millis(config.server.timeouts.client_disconnect))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Listening on Unix socket {}", socket_path);
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            warn!("Listening on http://{}", config.server_bind_address());
            server.bind(config.server_bind_address())?
        }
    };
    #[cfg(not(unix))]
    let server = {
        warn!("Listening on http://{}", config.server_bind_address());
        server.bind(config.server_bind_address())?
    };
    let server = server.run();

    tokio::select! {
        res = server => res?,
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Server stopped");
        }
    }

    Ok(())
}
