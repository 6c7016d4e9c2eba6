use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing::level_filters::LevelFilter;

use oxlore::utils::{InputSource, OutputDestination, parse_input, parse_output};
use oxlore::{ChartGenerator, GeneratorConfig};

#[derive(Debug, Parser)]
#[command(
    name = "oxlore",
    version,
    about = "Generate random fantasy-location flowcharts as Mermaid text."
)]
pub struct GenerateArgs {
    /// Explicit anchors and routes, e.g. "Keep; Gate -- Old Road --> Keep".
    #[arg(short = 'r', long = "routes", conflicts_with = "input")]
    routes: Option<String>,

    /// Read explicit anchors and routes from a file. Use '-' to read from stdin.
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Path to the output file. Use '-' (or omit) to write to stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// JSON configuration file (defaults to the per-user config, if any).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed for a reproducible chart.
    #[arg(short = 'S', long = "seed")]
    seed: Option<u64>,

    /// Give anchors resistance, prefer lightly connected merge endpoints and
    /// widen the edge budget for anchors.
    #[arg(long = "anchor-aware", action = ArgAction::SetTrue)]
    anchor_aware: bool,

    /// Touches an anchor absorbs before its weight grows (anchor-aware only).
    #[arg(long = "anchor-resistance")]
    anchor_resistance: Option<u32>,

    /// Resample generated labels that collide with existing ones.
    #[arg(long = "unique-labels", action = ArgAction::SetTrue)]
    unique_labels: bool,

    /// Chance that a generated route is drawn dotted.
    #[arg(long = "dotted-probability")]
    dotted_probability: Option<f64>,

    /// Emit a JSON summary (nodes, routes and chart text) instead of the chart.
    #[arg(long = "summary", action = ArgAction::SetTrue)]
    summary: bool,

    /// Suppress informational output.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

pub fn dispatch() -> Result<()> {
    let args = GenerateArgs::parse();
    init_tracing(args.verbose, args.quiet);
    run_generate(args)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let output_dest = parse_output(args.output.as_deref())?;
    let explicit = load_explicit(&args)?;

    debug!(?config, "resolved configuration");
    let mut generator = ChartGenerator::new(config).context("invalid generator configuration")?;
    let chart = generator
        .generate(explicit.as_deref())
        .context("failed to generate chart")?;

    let output = if args.summary {
        let mut json = chart.to_json().context("failed to serialize chart summary")?;
        json.push('\n');
        json
    } else {
        chart.text
    };

    write_output(output_dest, output.as_bytes(), args.quiet)
}

fn resolve_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => GeneratorConfig::discover().context("failed to load default config")?,
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.anchor_aware {
        config.anchor_aware = true;
    }
    if let Some(resistance) = args.anchor_resistance {
        config.anchor_resistance = resistance;
    }
    if args.unique_labels {
        config.unique_labels = true;
    }
    if let Some(probability) = args.dotted_probability {
        config.dotted_probability = probability;
    }

    Ok(config)
}

fn load_explicit(args: &GenerateArgs) -> Result<Option<String>> {
    if let Some(routes) = &args.routes {
        return Ok(Some(routes.clone()));
    }

    let Some(input) = args.input.as_deref() else {
        return Ok(None);
    };

    match parse_input(input)? {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            if buffer.trim().is_empty() {
                Err(anyhow!("no routes supplied on stdin"))
            } else {
                Ok(Some(join_lines(&buffer)))
            }
        }
        InputSource::File(path) => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            if contents.trim().is_empty() {
                Err(anyhow!("input file '{}' was empty", path.display()))
            } else {
                Ok(Some(join_lines(&contents)))
            }
        }
    }
}

// one expression per line reads the same as ';'-separated
fn join_lines(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(";")
}

fn write_output(dest: OutputDestination, bytes: &[u8], quiet: bool) -> Result<()> {
    match dest {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        OutputDestination::File(path) => {
            fs::write(&path, bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            if !quiet {
                println!("Generated diagram -> {}", path.display());
            }
        }
    }
    Ok(())
}
