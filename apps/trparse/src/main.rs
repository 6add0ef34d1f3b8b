mod output;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use trparse_model::{ReportFile, Route, TraceTarget};
use trparse_trace::{parse_output, split_header};

#[derive(Parser)]
#[command(name = "trparse", version, about = "Parse traceroute output into structured hops")]
struct Cli {
    /// Log parser activity to stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Parse(ParseArgs),
    Check(CheckArgs),
}

#[derive(Args)]
#[command(about = "Parse a transcript and write the hops as JSON or canonical lines")]
struct ParseArgs {
    /// Transcript file; stdin when omitted or `-`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args)]
#[command(about = "Validate a transcript without writing it out")]
struct CheckArgs {
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Lines,
}

struct Transcript {
    source: String,
    target: Option<TraceTarget>,
    routes: Vec<Route>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse(args) => run_parse(args),
        Commands::Check(args) => run_check(args),
    }
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let transcript = load_transcript(args.in_path)?;

    let data = match args.format {
        OutputFormat::Json => output::to_json(&ReportFile {
            version: 1,
            source: transcript.source,
            parsed_at_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            target: transcript.target,
            routes: transcript.routes,
        })?,
        OutputFormat::Lines => render_lines(&transcript.routes).into_bytes(),
    };

    output::emit(args.out.as_deref(), &data)
}

fn run_check(args: CheckArgs) -> Result<()> {
    let transcript = load_transcript(args.in_path)?;
    println!("ok: {} routes", transcript.routes.len());
    Ok(())
}

fn load_transcript(in_path: Option<PathBuf>) -> Result<Transcript> {
    let (source, raw) = match in_path.filter(|path| path.as_os_str() != "-") {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read input {:?}", path))?;
            (path.display().to_string(), raw)
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            ("-".to_string(), raw)
        }
    };

    let (target, body) = split_header(&raw);
    if let Some(target) = &target {
        debug!(host = %target.host, "found traceroute header");
    }

    let body = trim_final_newline(body);
    let routes = if body.is_empty() {
        warn!(source = %source, "transcript has no hop lines");
        Vec::new()
    } else {
        parse_output(body).with_context(|| format!("failed to parse {source}"))?
    };

    Ok(Transcript {
        source,
        target,
        routes,
    })
}

/// Drops the single line terminator files usually end with, which would
/// otherwise reach the parser as an empty line.
fn trim_final_newline(text: &str) -> &str {
    match text.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => text,
    }
}

fn render_lines(routes: &[Route]) -> String {
    let mut out = String::new();
    for route in routes {
        out.push_str(&route.to_string());
        out.push('\n');
    }
    out
}
