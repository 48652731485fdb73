//! Training chart renderer
//!
//! Renders the charts declared in a JSON request file, prints their
//! configurations, or builds the training-hours graphs from a sessions file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use trainchart::analysis::{default_start_date, TrainingSession};
use trainchart::app::{App, RenderRequest};
use trainchart::ColorRamp;

/// Build and render chart configurations for training statistics
#[derive(Parser, Debug)]
#[command(name = "trainchart")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every chart in a request file
    Render {
        /// Path to the JSON render request
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Directory that relative surface paths are written to
        #[arg(short, long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
    },
    /// Print the chart configurations of a request file as JSON
    Config {
        /// Path to the JSON render request
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
    },
    /// Print a color ramp
    Ramp {
        /// Number of colors
        #[arg(value_name = "COUNT")]
        count: usize,
    },
    /// Render the total and weekly training-hours graphs
    Training {
        /// JSON array of training sessions
        #[arg(value_name = "SESSIONS")]
        sessions: PathBuf,

        /// First day of the graphs (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start: Option<NaiveDate>,

        /// Last day of the graphs (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE")]
        end: Option<NaiveDate>,

        /// Directory the images are written to
        #[arg(short, long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
    },
}

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_module("trainchart", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Render { request, out_dir } => {
            let mut app = App::new(out_dir);
            app.load_request(load_request(&request)?);
            for chart in app.render_all()? {
                println!("{}", chart.surface.path.display());
            }
        }
        Command::Config { request } => {
            let mut app = App::default();
            app.load_request(load_request(&request)?);
            println!("{}", serde_json::to_string_pretty(&app.configs_json()?)?);
        }
        Command::Ramp { count } => {
            for color in ColorRamp::default().generate(count) {
                println!("{color}");
            }
        }
        Command::Training {
            sessions,
            start,
            end,
            out_dir,
        } => {
            let contents = fs::read_to_string(&sessions)
                .with_context(|| format!("reading sessions from {}", sessions.display()))?;
            let sessions: Vec<TrainingSession> =
                serde_json::from_str(&contents).context("parsing training sessions")?;

            let start = start.unwrap_or_else(default_start_date);
            let end = end.unwrap_or_else(|| Local::now().date_naive());

            let mut app = App::new(out_dir);
            app.add_training_graphs(&sessions, start, end);
            for chart in app.render_all()? {
                println!("{}", chart.surface.path.display());
            }
        }
    }
    Ok(())
}

fn load_request(path: &Path) -> Result<RenderRequest> {
    RenderRequest::from_path(path).with_context(|| format!("loading render request {}", path.display()))
}
