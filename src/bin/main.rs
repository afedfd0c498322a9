use clap::{Parser, Subcommand, ValueEnum};
use jumpblock::analysis::NavigationOp;
use jumpblock::config;
use jumpblock::domain::{Point, Selection};
use jumpblock::error::{JumpError, JumpResult};
use jumpblock::request::{JumpRequest, JumpService};
use jumpblock::server::{self, SelectionResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{stdin, stdout};

/// Structural selection navigation over tree-sitter syntax trees
#[derive(Parser)]
#[command(name = "jumpblock")]
#[command(version)]
#[command(about = "Move an editor selection between syntactic blocks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file layered over the user configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. debug, jumpblock::navigation=trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer JSON-lines requests on stdin (the default)
    Serve,
    /// Run one movement and print the resulting selection as JSON
    Jump {
        /// Direction to move
        direction: Direction,

        /// Language id of the source (e.g., cpp, python)
        #[arg(long)]
        language: String,

        /// Source file; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,

        /// Cursor end of the selection, as ROW:COLUMN
        #[arg(long)]
        active: Point,

        /// Fixed end of the selection, as ROW:COLUMN (defaults to --active)
        #[arg(long)]
        anchor: Option<Point>,
    },
    /// List the supported language ids
    Languages,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    Out,
}

impl From<Direction> for NavigationOp {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => NavigationOp::Up,
            Direction::Down => NavigationOp::Down,
            Direction::Out => NavigationOp::Out,
        }
    }
}

fn init_logging(filter: Option<&str>) {
    // stdout carries the protocol, so logs always go to stderr
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn read_source(file: Option<&Path>) -> JumpResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn run_jump(
    service: &JumpService,
    direction: Direction,
    language: String,
    file: Option<&Path>,
    active: Point,
    anchor: Option<Point>,
) -> JumpResult<String> {
    let source = read_source(file)?;
    let selection = Selection::new(active, anchor.unwrap_or(active));
    let request = JumpRequest::new(language, source, selection);
    let result = SelectionResult::from(service.jump(direction.into(), &request)?);
    serde_json::to_string(&result).map_err(|e| JumpError::Io(std::io::Error::other(e)))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let service = config::load_settings(cli.config.as_deref())
        .and_then(|settings| JumpService::from_settings(&settings))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = server::serve(Arc::new(service), stdin(), stdout()).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Jump {
            direction,
            language,
            file,
            active,
            anchor,
        } => match run_jump(&service, direction, language, file.as_deref(), active, anchor) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error [{}]: {}", e.code(), e);
                std::process::exit(1);
            }
        },
        Commands::Languages => {
            for id in service.registry().language_ids() {
                println!("{}", id);
            }
        }
    }
}
