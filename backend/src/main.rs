mod bulk;
mod config;
mod error;
mod services;
mod store;

use crate::config::ServerConfig;
use crate::store::Store;
use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "formbuilder", version, about = "Dynamic form builder server and template tools")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "FORMBUILDER_DATABASE", default_value = "formbuilder.sqlite")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve(ServerConfig),
    /// Import form templates from a JSON file (list of templates)
    Import {
        /// Path to JSON file containing templates
        path: PathBuf,
    },
    /// Export all form templates to a JSON file (list)
    Export {
        /// Output path for JSON file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let store = match Store::open(&cli.database) {
        Ok(store) => store,
        Err(e) => {
            error!("Cannot open database {}: {}", cli.database.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Serve(config) => actix_web::rt::System::new()
            .block_on(serve(config, store))
            .map_err(|e| format!("Server failed: {}", e)),
        Command::Import { path } => bulk::import_templates(&store, &path)
            .map(|_| ())
            .map_err(|e| format!("Import failed: {}", e)),
        Command::Export { path } => bulk::export_templates(&store, &path)
            .map(|_| ())
            .map_err(|e| format!("Export failed: {}", e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: ServerConfig, store: Store) -> std::io::Result<()> {
    info!(
        "Server running at {} (database {})",
        config.url(),
        store.path().display()
    );
    let limit = config.payload_limit;

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::PayloadConfig::new(limit))
            .app_data(web::JsonConfig::default().limit(limit))
            .app_data(web::Data::new(store.clone()))
            .service(services::forms::configure_routes())
            .service(services::templates::configure_routes())
            .default_service(web::route().to(services::assets::serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
