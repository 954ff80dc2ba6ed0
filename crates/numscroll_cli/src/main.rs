//! numscroll CLI
//!
//! Replay gesture scripts against number scrollers and format values.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod replay;
mod template;

use config::Script;
use replay::Frame;

#[derive(Parser)]
#[command(name = "numscroll")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drag-controlled number scroller toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script and print the scroller state after each input
    Run {
        /// Script file
        script: PathBuf,

        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a gesture script without replaying it
    Check {
        /// Script file
        script: PathBuf,
    },

    /// Format a value at the precision of a step
    Format {
        #[arg(allow_hyphen_values = true)]
        value: f32,

        /// Step size that sets the number of decimals
        #[arg(short, long, default_value = "1")]
        step: f32,
    },

    /// Create a new gesture script
    New {
        /// Output path
        path: PathBuf,

        /// Template to use (single, detached, far-scroll)
        #[arg(short, long, default_value = "single")]
        template: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { script, json } => cmd_run(&script, json),
        Commands::Check { script } => cmd_check(&script),
        Commands::Format { value, step } => cmd_format(value, step),
        Commands::New { path, template } => cmd_new(&path, &template),
    }
}

fn cmd_run(path: &Path, json: bool) -> Result<()> {
    let script = Script::load(path)?;
    info!("Replaying {} ({} inputs)", script.title(), script.events.len());

    let frames = replay::run(&script)
        .with_context(|| format!("Cannot replay {}", path.display()))?;

    let ignored = frames.iter().filter(|frame| !frame.handled).count();
    if ignored > 0 {
        warn!("{} inputs were ignored by the scroller", ignored);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
    } else {
        for frame in &frames {
            println!("{}", render_frame(frame));
        }
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let script = Script::load(path)?;
    replay::Replay::new(&script).with_context(|| format!("Invalid script {}", path.display()))?;
    info!(
        "{}: {} targets, {} inputs",
        script.title(),
        script.targets.len(),
        script.events.len()
    );
    println!("ok");
    Ok(())
}

fn cmd_format(value: f32, step: f32) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        anyhow::bail!("Step must be greater than 0, got {}", step);
    }
    println!("{}", numscroll_core::format_value(value, step));
    Ok(())
}

fn cmd_new(path: &Path, template: &str) -> Result<()> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("script");

    template::create_script(path, name, template)?;
    info!("Created {} from the {} template", path.display(), template);
    println!("Run it with: numscroll run {}", path.display());
    Ok(())
}

/// One line per frame: time, input, values, indicator and selection
fn render_frame(frame: &Frame) -> String {
    let values = frame
        .values
        .iter()
        .map(|view| match view.target {
            Some(id) => format!("#{}={}", id, view.text),
            None => view.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut line = format!(
        "{:>6}ms  {:<20} {}  line={:.1}",
        frame.at, frame.input, values, frame.indicator_offset
    );
    if let Some(id) = frame.selected {
        line.push_str(&format!("  selected=#{}", id));
    }
    if let Some(id) = frame.editing {
        line.push_str(&format!("  editing=#{}", id));
    }
    if !frame.handled {
        line.push_str("  (ignored)");
    }
    line
}
