mod script;

use clap::{Args, Parser, Subcommand};
use mindview_core::{MindmapDocument, Viewer, ViewerConfig};
use script::Step;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Mindview(#[from] mindview_core::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid --set `{0}`: expected <dotted.path>=<json value>")]
    BadSet(String),
}

/// Headless mind-map viewer: ingest a document, replay interactions, print the render model.
#[derive(Debug, Parser)]
#[command(name = "mindview-cli", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level (otherwise `RUST_LOG`, defaulting to `warn`).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the render model after replaying the given steps.
    View {
        #[command(flatten)]
        common: CommonArgs,

        /// Interaction step, applied in order: toggle:<id>, click[:<id>], click-at:<x>,<y>,
        /// select:<id>, deselect, reveal:<id>, expand-all, collapse-all.
        #[arg(short, long = "step", value_name = "STEP")]
        steps: Vec<Step>,
    },
    /// Print the ingestion diagnostics of a document.
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Document path; stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// JSON file with viewer config overrides.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Config override, e.g. `layout.xSpacing=300`. Repeatable.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    sets: Vec<String>,

    /// Keep the first of duplicate node ids instead of failing.
    #[arg(long)]
    lenient: bool,

    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOut<'a> {
    nodes: usize,
    connections: usize,
    root: Option<&'a str>,
    diagnostics: Vec<DiagnosticOut<'a>>,
}

#[derive(Serialize)]
struct DiagnosticOut<'a> {
    #[serde(flatten)]
    diagnostic: &'a mindview_core::Diagnostic,
    message: String,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    std::io::Write::write_all(&mut out, b"\n")?;
    Ok(())
}

fn build_config(common: &CommonArgs) -> Result<ViewerConfig, CliError> {
    let mut config = match &common.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            ViewerConfig::from_value(&serde_json::from_str(&text)?)?
        }
        None => ViewerConfig::default(),
    };
    for set in &common.sets {
        let Some((path, raw)) = set.split_once('=') else {
            return Err(CliError::BadSet(set.clone()));
        };
        let path = path.trim();
        if path.is_empty() {
            return Err(CliError::BadSet(set.clone()));
        }
        // Bare words are taken as strings so `--set strict=false` and `--set a.b=text` both work.
        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| serde_json::Value::String(raw.trim().to_string()));
        config.set_value(path, value)?;
    }
    if common.lenient {
        config.strict = false;
    }
    Ok(config)
}

fn load_viewer(common: &CommonArgs) -> Result<Viewer, CliError> {
    let config = build_config(common)?;
    let text = read_input(common.input.as_ref())?;
    let document = MindmapDocument::from_json_str(&text)?;
    let viewer = Viewer::from_document(document, config)?;
    for diagnostic in viewer.diagnostics() {
        tracing::info!(%diagnostic, "document diagnostic");
    }
    Ok(viewer)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::View { common, steps } => {
            let mut viewer = load_viewer(&common)?;
            for step in &steps {
                script::apply(&mut viewer, step);
            }
            write_json(&viewer.view(), common.pretty)
        }
        Command::Check { common } => {
            let viewer = load_viewer(&common)?;
            let out = CheckOut {
                nodes: viewer.graph().len(),
                connections: viewer.connections().len(),
                root: viewer.graph().root().map(|r| r.as_str()),
                diagnostics: viewer
                    .diagnostics()
                    .iter()
                    .map(|d| DiagnosticOut {
                        diagnostic: d,
                        message: d.to_string(),
                    })
                    .collect(),
            };
            write_json(&out, common.pretty)
        }
    }
}

fn main() {
    // Usage errors exit with 2 via clap.
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
