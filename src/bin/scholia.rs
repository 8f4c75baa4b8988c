//! scholia: AI tutoring CLI
//!
//! Runs the tutoring operations against the configured provider chain.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use scholia::{CompletionResult, CompletionSource, NoteType, Tutor, TutorConfig, Turn};

/// Scholia tutoring CLI
#[derive(Parser)]
#[command(name = "scholia")]
#[command(version = scholia::version::PKG_VERSION)]
#[command(about = "AI tutoring over a chain of fallback language models")]
struct Args {
    /// Config file (default: ~/.scholia/config.toml, then /etc/scholia/config.toml)
    #[arg(short, long, env = "SCHOLIA_CONFIG")]
    config: Option<PathBuf>,

    /// Move this provider to the front of the chain
    #[arg(short, long)]
    preferred: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Chapter being studied.
#[derive(ClapArgs)]
struct Chapter {
    /// Chapter title
    #[arg(short, long, default_value = "")]
    title: String,
    /// Chapter content (combined with stdin when both are given)
    #[arg(long)]
    content: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a chapter as JSON
    Summary {
        #[command(flatten)]
        chapter: Chapter,
    },

    /// Ask a question about a chapter
    Ask {
        /// The question
        question: String,
        #[command(flatten)]
        chapter: Chapter,
        /// Earlier turns, alternating user / assistant, oldest first
        #[arg(long = "turn")]
        turns: Vec<String>,
    },

    /// Generate study notes
    Notes {
        #[command(flatten)]
        chapter: Chapter,
        /// comprehensive, summary, key-points, study-guide or flashcards
        #[arg(short = 'k', long = "type", default_value = "comprehensive")]
        note_type: NoteType,
        /// Extra instructions for the note writer
        #[arg(long)]
        prompt: Option<String>,
    },

    /// List providers in the order they are tried
    Providers,

    /// Show build information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    // Commands that don't need a provider chain
    if let Command::Version = args.command {
        println!("scholia {}", scholia::version::version_string());
        return Ok(());
    }

    let mut config = TutorConfig::load(args.config.as_deref())?;
    if args.preferred.is_some() {
        config.preferred = args.preferred;
    }
    let tutor = Tutor::from_config(config)?;

    match args.command {
        Command::Summary { chapter } => {
            let content = resolve_text(chapter.content, "summary")?;
            let summary = tutor.generate_summary(&chapter.title, &content).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Ask {
            question,
            chapter,
            turns,
        } => {
            let content = resolve_text(chapter.content, "ask")?;
            let history = to_history(turns);
            let result = tutor
                .answer_question(&question, &chapter.title, &content, &history)
                .await;
            print_result(&result);
        }

        Command::Notes {
            chapter,
            note_type,
            prompt,
        } => {
            let content = resolve_text(chapter.content, "notes")?;
            let result = tutor
                .generate_notes(&chapter.title, &content, note_type, prompt.as_deref())
                .await;
            print_result(&result);
        }

        Command::Providers => {
            for (i, name) in tutor.provider_names().iter().enumerate() {
                println!("{i}: {name}");
            }
        }

        Command::Version => unreachable!("handled above"),
    }

    Ok(())
}

/// Resolve text input from an optional CLI argument and/or stdin.
///
/// - arg only → arg
/// - stdin only → stdin
/// - both → `"{arg}\n\n{stdin}"`
/// - neither → error
fn resolve_text(arg: Option<String>, command: &str) -> Result<String, Box<dyn std::error::Error>> {
    let stdin_is_pipe = !io::stdin().is_terminal();
    let stdin_text = if stdin_is_pipe {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    } else {
        None
    };

    match (arg, stdin_text) {
        (Some(a), Some(s)) => Ok(format!("{a}\n\n{s}")),
        (Some(a), None) => Ok(a),
        (None, Some(s)) => Ok(s),
        (None, None) => Err(format!(
            "{command}: no chapter content (pass --content or pipe it via stdin)"
        )
        .into()),
    }
}

fn to_history(turns: Vec<String>) -> Vec<Turn> {
    turns
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            if i % 2 == 0 {
                Turn::user(text)
            } else {
                Turn::assistant(text)
            }
        })
        .collect()
}

/// Content on stdout, provenance on stderr.
fn print_result(result: &CompletionResult) {
    println!("{}", result.content);
    let source = match &result.source {
        CompletionSource::Provider(name) => name.as_str(),
        CompletionSource::Cache => "cache",
        CompletionSource::Fallback => "fallback",
    };
    eprintln!("source: {source}");
}
