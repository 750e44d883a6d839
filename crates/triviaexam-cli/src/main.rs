//! triviaexam CLI — serve the exam, self-check question banks, grade offline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "triviaexam", version, about = "Multiple-choice trivia exam grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the exam over HTTP
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Question bank TOML file (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Check a question bank for shape errors
    Validate {
        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// List the questions in a bank
    Questions {
        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Grade a JSON answer file
    Grade {
        /// JSON object mapping question ids to labels
        #[arg(long)]
        answers: PathBuf,

        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the result to this path (.json or .html)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create a starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triviaexam=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            bank,
        } => commands::serve::execute(config, host, port, bank).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Questions { bank } => commands::questions::execute(bank),
        Commands::Grade {
            answers,
            bank,
            format,
            output,
        } => commands::grade::execute(answers, bank, format, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
