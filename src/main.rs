//! tinyraster: render OBJ meshes and test patterns to PNG

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, Level};

use tinyraster::config::RenderConfig;
use tinyraster::rasterizer::Color;
use tinyraster::scene::{checkerboard, render_model_with_progress, Model};
use tinyraster::VERSION;

#[derive(Parser, Debug)]
#[command(name = "tinyraster", version = VERSION, about = "CPU software rasterizer with PNG output")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a Wavefront OBJ model
    Render {
        /// Path to the .obj file
        model: PathBuf,
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,
        /// RON render config
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Outline triangles in white unless the config sets a color
        #[arg(long)]
        wireframe: bool,
    },
    /// Write the checkerboard test pattern
    Checkerboard {
        #[arg(short, long, default_value = "checkerboard.png")]
        output: PathBuf,
        #[arg(long, default_value_t = 100)]
        size: u32,
        #[arg(long, default_value_t = 10)]
        cell: u32,
    },
}

fn face_progress(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{spinner} rasterizing [{bar:40}] {pos}/{len} faces")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

fn run(cli: Cli) -> tinyraster::Result<()> {
    match cli.command {
        Command::Render {
            model,
            output,
            config,
            width,
            height,
            wireframe,
        } => {
            let mut cfg = match config {
                Some(path) => RenderConfig::load(path)?,
                None => RenderConfig::default(),
            };
            if let Some(w) = width {
                cfg.width = w;
            }
            if let Some(h) = height {
                cfg.height = h;
            }
            if wireframe && cfg.wireframe.is_none() {
                cfg.wireframe = Some(Color::WHITE);
            }

            let mesh = Model::load_obj(&model)?;
            info!(vertices = mesh.vertices().len(), faces = mesh.faces().len(), "model loaded");

            let pb = face_progress(mesh.faces().len());
            let fb = render_model_with_progress(&mesh, &cfg, |_| pb.inc(1));
            pb.finish_and_clear();

            fb?.save_png(&output)?;
            info!(path = %output.display(), "saved");
        }
        Command::Checkerboard { output, size, cell } => {
            checkerboard(size, size, cell)?.save_png(&output)?;
            info!(path = %output.display(), "saved");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
