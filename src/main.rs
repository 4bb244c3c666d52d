use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use netguardian::analyst::gateway::AnalystGateway;
use netguardian::api::ChatState;
use netguardian::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use netguardian::config::AppConfig;
use netguardian::threat::feed::{self, BoardHandle, ThreatBoard};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

async fn index() -> impl Responder {
    let html = include_str!("../static/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, cli.config).await;
        return Ok(());
    }

    info!("Starting NetGuardian core server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let gateway = AnalystGateway::from_config(&config);
    if gateway.is_online() {
        info!("Gemini analyst connected");
    } else {
        info!("No Gemini API key configured. Running in offline mode");
    }

    let chat_state = web::Data::new(ChatState::new());
    let gateway = web::Data::new(gateway);
    let board: BoardHandle = Arc::new(Mutex::new(ThreatBoard::new()));

    // Background simulator feeding the live threat table
    feed::spawn_simulator(board.clone(), config.feed.clone());

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(chat_state.clone())
            .app_data(gateway.clone())
            .app_data(web::Data::new(board.clone()))
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health))
            .configure(netguardian::api::routes::configure)
            .configure(netguardian::api::websocket::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
