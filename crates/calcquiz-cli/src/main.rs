//! calcquiz CLI: interactive calculus quizzes with error diagnosis.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use calcquiz_core::model::{Difficulty, Topic};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "calcquiz",
    version,
    about = "Calculus quizzes with step-by-step error diagnosis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz in the terminal
    Play {
        /// Question endpoint URL
        #[arg(long, conflicts_with_all = ["file", "topic"])]
        url: Option<String>,

        /// Local question payload (JSON)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Topic: derivatives, integrals, limits, criticalpoints, general, personalized.
        /// With --file, overrides the topic implied by the file path
        #[arg(long)]
        topic: Option<Topic>,

        /// Difficulty: easy, medium, hard, mixed (default from config).
        /// With --file, overrides the difficulty implied by the file path
        #[arg(long, conflicts_with = "url")]
        difficulty: Option<Difficulty>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not post the result to the server
        #[arg(long)]
        no_save: bool,
    },

    /// Check a question payload file for problems
    Validate {
        /// Path to a question payload (JSON)
        #[arg(long)]
        file: PathBuf,
    },

    /// Diagnose a single wrong answer
    Classify {
        /// Topic of the question
        #[arg(long)]
        topic: Topic,

        /// Difficulty of the question
        #[arg(long, default_value = "mixed")]
        difficulty: Difficulty,

        /// Question text
        #[arg(long)]
        question: String,

        /// The chosen answer
        #[arg(long)]
        answer: String,

        /// The correct answer
        #[arg(long)]
        correct: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create starter config and an example question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calcquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            url,
            file,
            topic,
            difficulty,
            config,
            no_save,
        } => commands::play::execute(url, file, topic, difficulty, config, no_save).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Classify {
            topic,
            difficulty,
            question,
            answer,
            correct,
            json,
        } => commands::classify::execute(topic, difficulty, question, answer, correct, json),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
