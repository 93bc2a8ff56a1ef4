//! corefview - coreference resolution demo
//!
//! # Usage
//!
//! ```bash
//! # Serve the interactive page on http://127.0.0.1:8501
//! corefview serve
//!
//! # Resolve text from the command line
//! corefview resolve "My sister has a dog. She loves him."
//!
//! # Resolve one of the built-in example paragraphs, as JSON
//! corefview resolve --example 8 --format json
//!
//! # Read from stdin
//! echo "Ana and Tom are siblings." | corefview resolve
//!
//! # List the example paragraphs
//! corefview examples
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use corefview::form::validate_params;
use corefview::render::{cluster_listing, highlight_text};
use corefview::server::{self, AppState};
use corefview::{Config, CorefParams, Demo, Error, ModelSize, ModelStore, Rendering, EXAMPLE_PARAGRAPHS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Coreference resolution demo: highlight coreferent mentions, show the
/// resolved text and the clusters
#[derive(Parser)]
#[command(name = "corefview", author, version)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: <config dir>/corefview/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory with <size>.json lexicon extensions
    #[arg(long, global = true, value_name = "DIR")]
    lexicon_dir: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive page
    Serve(ServeArgs),

    /// Resolve coreferences in a paragraph
    #[command(visible_alias = "r")]
    Resolve(ResolveArgs),

    /// List the built-in example paragraphs
    Examples,

    /// Show the effective configuration
    Config,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address (host:port)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,

    /// Model size
    #[arg(short, long, value_name = "SIZE")]
    model: Option<ModelSize>,
}

#[derive(Parser)]
struct ResolveArgs {
    /// Text to resolve (read from stdin when omitted)
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,

    /// Resolve example paragraph N (see `corefview examples`)
    #[arg(short, long, value_name = "N", conflicts_with = "text")]
    example: Option<usize>,

    /// Link threshold is 1 - greedyness [0.0, 1.0]
    #[arg(long, value_name = "FLOAT")]
    greedyness: Option<f64>,

    /// Mentions to look back for antecedents [25, 100]
    #[arg(long, value_name = "N")]
    max_dist: Option<usize>,

    /// Look-back for mentions sharing a head noun [250, 1000]
    #[arg(long, value_name = "N")]
    max_dist_match: Option<usize>,

    /// Model size
    #[arg(short, long, value_name = "SIZE")]
    model: Option<ModelSize>,

    /// Resolve first- and second-person pronouns too
    #[arg(long)]
    no_blacklist: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Highlighted text, resolved text, clusters
    Text,
    /// Results section as HTML
    Html,
    /// Rendering as JSON
    Json,
}

// ============================================================================
// Helpers
// ============================================================================

fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn init_logging(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config, Error> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.lexicon_dir {
        config.lexicon_dir = Some(dir.clone());
    }
    Ok(config)
}

fn model_store(config: &Config) -> ModelStore {
    match &config.lexicon_dir {
        Some(dir) => ModelStore::with_lexicon_dir(dir),
        None => ModelStore::new(),
    }
}

fn read_input(args: &ResolveArgs) -> Result<String, Error> {
    if let Some(n) = args.example {
        return EXAMPLE_PARAGRAPHS
            .get(n)
            .map(|s| (*s).to_string())
            .ok_or_else(|| Error::invalid_input(format!("example must be below {}, got {n}", EXAMPLE_PARAGRAPHS.len())));
    }
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }
    if io::stdin().is_terminal() {
        return Err(Error::invalid_input(
            "no input provided. Pass text, --example N, or pipe text on stdin",
        ));
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_serve(config: Config, args: ServeArgs) -> Result<(), Error> {
    let mut config = config;
    if let Some(addr) = args.addr {
        config.addr = addr;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    let addr = config.socket_addr()?;
    let state = AppState::from_config(&config, Arc::new(model_store(&config)));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, state))
}

fn cmd_resolve(config: Config, args: ResolveArgs) -> Result<(), Error> {
    let text = read_input(&args)?;
    let defaults = config.defaults;
    let params = CorefParams {
        greedyness: args.greedyness.unwrap_or(defaults.greedyness),
        max_dist: args.max_dist.unwrap_or(defaults.max_dist),
        max_dist_match: args.max_dist_match.unwrap_or(defaults.max_dist_match),
        blacklist: defaults.blacklist && !args.no_blacklist,
    };
    validate_params(&params)?;

    let size = args.model.unwrap_or(config.model);
    let demo = Demo::new(Arc::new(model_store(&config)), size);
    let doc = demo.resolve(&text, params)?;
    let rendering = Rendering::from_document(&doc);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rendering)?),
        OutputFormat::Html => print!("{}", rendering.results_html()),
        OutputFormat::Text => {
            let found = if rendering.found {
                color("1;32", "YES")
            } else {
                color("1;31", "NO")
            };
            println!("Any coreferences found? {found}");
            println!();
            println!("{}", color("1", "Resolution:"));
            println!("{}", highlight_text(&doc, io::stdout().is_terminal()));
            println!();
            println!("{}", color("1", "Resolved Text:"));
            println!("{}", rendering.resolved_text);
            if rendering.found {
                println!();
                println!("{}", color("1", "Coreference Clusters:"));
                println!("{}", cluster_listing(&rendering.clusters));
            }
        }
    }
    Ok(())
}

fn cmd_examples() -> Result<(), Error> {
    for (i, text) in EXAMPLE_PARAGRAPHS.iter().enumerate() {
        println!("{} {}", color("1;36", &format!("{i:>2}")), text);
    }
    Ok(())
}

fn cmd_config(explicit: Option<&Path>, config: &Config) -> Result<(), Error> {
    let source = match (explicit, Config::default_path()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(path)) if path.is_file() => path.display().to_string(),
        (None, Some(path)) => format!("built-in defaults ({} not found)", path.display()),
        (None, None) => "built-in defaults".to_string(),
    };
    println!("# {source}");
    print!("{}", config.to_toml()?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level, cli.verbose);

    let result = load_config(&cli).and_then(|config| match cli.command {
        Commands::Serve(args) => cmd_serve(config, args),
        Commands::Resolve(args) => cmd_resolve(config, args),
        Commands::Examples => cmd_examples(),
        Commands::Config => cmd_config(cli.config.as_deref(), &config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
