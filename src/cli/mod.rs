pub mod commands;

use std::io::{self, Write};

use crate::analyst::gateway::AnalystGateway;
use crate::cli::commands::Commands;
use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::threat::models::ThreatEvent;

pub async fn run_cli(command: Commands, config_path: String) {
    let config = AppConfig::load(&config_path).expect("Failed to load config");
    let gateway = AnalystGateway::from_config(&config);

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::Chat => {
            run_repl(gateway).await;
        }
        Commands::Analyze { path } => {
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path, e);
                    return;
                }
            };
            let event: ThreatEvent = match serde_json::from_str(&raw) {
                Ok(event) => event,
                Err(e) => {
                    eprintln!("Invalid threat event JSON: {}", e);
                    return;
                }
            };
            println!("{}", gateway.analyze_threat(&event).await);
        }
        Commands::Rule { pattern } => {
            println!("{}", gateway.generate_waf_rule(&pattern).await);
        }
    }
}

async fn run_repl(gateway: AnalystGateway) {
    let mut store = SessionStore::new();

    println!("--- NetGuardian Analyst Chat ---");
    if !gateway.is_online() {
        println!("(offline mode: no Gemini API key configured)");
    }
    println!("Type /exit to quit, /reset to clear the transcript.");
    println!("--------------------------------");
    if let Some(greeting) = store.transcript().first() {
        println!("\nAnalyst> {}", greeting.content);
    }

    loop {
        print!("\nUser> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
            break;
        }
        let text = input.trim();

        if text.is_empty() {
            continue;
        }
        if text == "/exit" || text == "/quit" {
            break;
        }
        if text == "/reset" {
            store.reset();
            println!("Transcript cleared.");
            continue;
        }

        // History snapshot precedes the user turn; the utterance goes
        // separately. The loop is serial, so no in-flight guard is needed.
        let history = store.transcript().to_vec();
        store.push_user(text);

        let reply = gateway.chat(text, &history).await;
        println!("\nAnalyst> {}", reply);
        store.push_assistant(reply);
    }
}
