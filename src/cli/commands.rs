use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "netguardian", version, about = "NetGuardian Security Dashboard Core", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API and WebSocket server
    Serve,

    /// Chat with the AI security analyst in the terminal
    Chat,

    /// Run a one-shot AI assessment of a threat event JSON file
    Analyze {
        /// Path to a JSON file containing one threat event
        path: String,
    },

    /// Generate a blocking WAF rule for an attack pattern
    Rule {
        /// The attack pattern to block
        pattern: String,
    },
}
