#![deny(unsafe_code)]
//! CLI binary for simviz.
//!
//! Subcommands:
//! - `render <engine>`: run an engine, color its field, write PNG frames
//! - `list`: print available engines

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use log::{info, warn};
use simviz_core::{
    cancel_all, join_all, start_thread, Dispatch, Engine, HostThread, RunConfig, VizError,
};
use simviz_engines::snapshot::write_png;
use simviz_engines::EngineKind;
use std::collections::VecDeque;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;

type Encoder = HostThread<Result<(), VizError>>;

#[derive(Parser)]
#[command(name = "simviz", about = "Run field simulations and color them into PNGs")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an engine and write one PNG per frame.
    Render {
        /// Engine name (e.g. "heat"). Ignored when --config is given.
        #[arg(default_value = "heat")]
        engine: String,

        /// Grid width in cells.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: usize,

        /// Grid height in cells.
        #[arg(short = 'H', long, default_value_t = 256)]
        height: usize,

        /// Engine steps before each frame.
        #[arg(short, long, default_value_t = 10)]
        steps: usize,

        /// Number of frames. More than one writes frame_NNNN.png into --output.
        #[arg(long, default_value_t = 1)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Color pixels on the calling thread instead of the thread pool.
        #[arg(long)]
        serial: bool,

        /// Output file, or directory when rendering several frames.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Read the whole run from a JSON config instead of the flags above.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective run config as JSON to this path.
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
    /// List available engines.
    List,
}

/// Where frame `index` of `frames` is written.
fn frame_path(output: &Path, index: usize, frames: usize) -> PathBuf {
    if frames == 1 {
        output.to_path_buf()
    } else {
        output.join(format!("frame_{index:04}.png"))
    }
}

/// Encoders allowed to run at once; each holds a copy of its frame.
fn max_in_flight() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Waits for the oldest encoder and surfaces its result.
fn finish_oldest(encoders: &mut VecDeque<Encoder>) -> Result<(), CliError> {
    match encoders.pop_front() {
        Some(encoder) => Ok(encoder.join()??),
        None => Ok(()),
    }
}

/// Steps the engine and hands each frame to its own encoder thread, so
/// PNG encoding overlaps with the next frame's simulation. At most
/// `limit` encoders are in flight; the oldest is joined to make room.
fn render_frames<E: Engine>(
    engine: &mut E,
    config: &RunConfig,
    output: &Path,
    limit: usize,
    encoders: &mut VecDeque<Encoder>,
) -> Result<(), CliError> {
    for frame in 0..config.frames {
        (0..config.steps).try_for_each(|_| engine.step())?;
        while encoders.len() >= limit.max(1) {
            finish_oldest(encoders)?;
        }
        let field = engine.field().clone();
        let path = frame_path(output, frame, config.frames);
        let dispatch = config.dispatch;
        let encoder = start_thread(&format!("png-{frame}"), move |token| {
            if token.is_cancelled() {
                return Ok(());
            }
            write_png(&field, dispatch, &path)
        })?;
        encoders.push_back(encoder);
        info!("frame {}/{} queued", frame + 1, config.frames);
    }
    Ok(())
}

fn render(config: &RunConfig, output: &Path) -> Result<(), CliError> {
    config.grid()?;
    if config.frames > 1 {
        fs::create_dir_all(output)?;
    }

    let mut engine = EngineKind::from_name(
        &config.engine,
        config.width,
        config.height,
        config.seed,
        &config.params,
    )?;
    render_engine(&mut engine, config, output, max_in_flight())
}

/// Runs `engine` through every frame of `config`. On failure, encoders that
/// have not started writing are cancelled and the rest are waited for, so
/// no PNG is left half-written.
fn render_engine<E: Engine>(
    engine: &mut E,
    config: &RunConfig,
    output: &Path,
    limit: usize,
) -> Result<(), CliError> {
    let mut encoders = VecDeque::new();
    if let Err(e) = render_frames(engine, config, output, limit, &mut encoders) {
        if let Err(encoder_err) = cancel_all(encoders) {
            warn!("encoder failed while cancelling: {encoder_err}");
        }
        return Err(e);
    }

    join_all(encoders)?
        .into_iter()
        .collect::<Result<Vec<()>, VizError>>()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let info = serde_json::json!({ "engines": engines });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            engine,
            width,
            height,
            steps,
            frames,
            seed,
            serial,
            output,
            params,
            config,
            save_config,
        } => {
            let config = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)?;
                    RunConfig::from_json_str(&text)
                        .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))?
                }
                None => {
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    RunConfig {
                        engine,
                        width,
                        height,
                        params,
                        seed,
                        steps,
                        frames: frames.max(1),
                        dispatch: if serial {
                            Dispatch::Serial
                        } else {
                            Dispatch::Parallel
                        },
                    }
                }
            };

            render(&config, &output)?;

            if let Some(path) = save_config {
                fs::write(&path, config.to_json_string()?)?;
            }

            if cli.json {
                let info = serde_json::json!({
                    "config": config,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frame(s) of {} steps, seed {}) -> {}",
                    config.engine,
                    config.width,
                    config.height,
                    config.frames,
                    config.steps,
                    config.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
