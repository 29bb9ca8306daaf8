//! linksuggest CLI — inline link suggestions for Markdown vaults
//!
//! Commands: index, suggest, type, repl

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use linksuggest_core::{Position, Span, Suggestion, SuggestConfig};
use linksuggest_engine::{HighlightSet, Session, TextBuffer};
use linksuggest_index::{IndexStats, SharedIndex};
use linksuggest_vault::{Vault, VaultWatcher};

#[derive(Parser)]
#[command(name = "linksuggest")]
#[command(version)]
#[command(about = "Inline link suggestions for Markdown vaults")]
struct Cli {
    /// Config file (defaults to <vault>/.linksuggest.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build the name index and print its statistics
    Index {
        vault: PathBuf,
    },
    /// Suggest links for one line of text
    #[command(alias = "s")]
    Suggest {
        vault: PathBuf,
        #[arg(long)]
        text: String,
        /// Cursor column (defaults to the end of the text)
        #[arg(long)]
        cursor: Option<usize>,
    },
    /// Type text key by key through a session and print the result
    #[command(alias = "t")]
    Type {
        vault: PathBuf,
        #[arg(long)]
        text: String,
    },
    /// Type lines from stdin, rebuilding the index when the vault changes
    Repl {
        vault: PathBuf,
    },
}

#[derive(Serialize)]
struct TypeOutput<'a> {
    text: String,
    highlights: &'a [Span],
    suggestions: &'a [Suggestion],
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>, vault: &Path) -> Result<SuggestConfig> {
    let config = match explicit {
        Some(path) => SuggestConfig::load(path),
        None => SuggestConfig::discover(vault),
    };
    config.context("failed to load config")
}

fn open_index(vault: &Vault) -> Result<SharedIndex> {
    let shared = SharedIndex::default();
    shared
        .rebuild_from(vault)
        .with_context(|| format!("failed to index {}", vault.root().display()))?;
    Ok(shared)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_index(vault: &Vault) -> Result<()> {
    let shared = open_index(vault)?;
    let stats: IndexStats = shared.stats();
    print_json(&stats)
}

fn cmd_suggest(vault: &Vault, config: SuggestConfig, text: &str, cursor: Option<usize>) -> Result<()> {
    let shared = open_index(vault)?;
    let mut buffer = TextBuffer::from_text(text);
    if let Some(ch) = cursor {
        buffer.set_cursor(Position::new(buffer.position().line, ch));
    }
    let mut session = Session::new(config);
    let mut sink = HighlightSet::new();
    session.find_on_cursor(&buffer, &shared.snapshot(), &mut sink);
    print_json(&session.suggestions())
}

fn type_into(
    session: &mut Session,
    buffer: &mut TextBuffer,
    sink: &mut HighlightSet,
    shared: &SharedIndex,
    text: &str,
) {
    let index = shared.snapshot();
    for c in text.chars() {
        let key = if c == '\n' { "Enter".to_string() } else { c.to_string() };
        session.press(&key, buffer, &index, sink);
    }
}

fn cmd_type(vault: &Vault, config: SuggestConfig, text: &str) -> Result<()> {
    let shared = open_index(vault)?;
    let mut session = Session::new(config);
    let mut buffer = TextBuffer::new();
    let mut sink = HighlightSet::new();
    type_into(&mut session, &mut buffer, &mut sink, &shared, text);

    print_json(&TypeOutput {
        text: buffer.text(),
        highlights: sink.spans(),
        suggestions: session.suggestions(),
    })
}

fn cmd_repl(vault: &Vault, config: SuggestConfig) -> Result<()> {
    let shared = Arc::new(open_index(vault)?);
    let watcher = VaultWatcher::start(vault).context("failed to watch vault")?;
    let done = Arc::new(AtomicBool::new(false));

    let rebuild = {
        let shared = Arc::clone(&shared);
        let done = Arc::clone(&done);
        let vault = vault.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let batch = watcher.next_batch(Duration::from_millis(250), Duration::from_millis(100));
                if batch.is_empty() {
                    continue;
                }
                tracing::info!(changes = batch.len(), "vault changed, rebuilding");
                if let Err(e) = shared.rebuild_from(&vault) {
                    tracing::warn!(error = %e, "rebuild failed, keeping previous index");
                }
            }
        })
    };

    let mut session = Session::new(config);
    let mut buffer = TextBuffer::new();
    let mut sink = HighlightSet::new();
    let stdin = std::io::stdin();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if n > 0 {
            type_into(&mut session, &mut buffer, &mut sink, &shared, "\n");
        }
        type_into(&mut session, &mut buffer, &mut sink, &shared, &line);
        println!("{}", serde_json::to_string(&session.suggestions())?);
    }

    done.store(true, Ordering::Relaxed);
    if rebuild.join().is_err() {
        tracing::warn!("rebuild thread panicked");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let vault_path = match &cli.command {
        Commands::Index { vault }
        | Commands::Suggest { vault, .. }
        | Commands::Type { vault, .. }
        | Commands::Repl { vault } => vault.clone(),
    };
    let vault = Vault::open(&vault_path)?;
    let config = load_config(cli.config.as_deref(), &vault_path)?;

    match cli.command {
        Commands::Index { .. } => cmd_index(&vault),
        Commands::Suggest { text, cursor, .. } => cmd_suggest(&vault, config, &text, cursor),
        Commands::Type { text, .. } => cmd_type(&vault, config, &text),
        Commands::Repl { .. } => cmd_repl(&vault, config),
    }
}
