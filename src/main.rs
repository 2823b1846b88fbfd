//! `chemx` command-line tool: inspect, validate, normalize and headlessly
//! play `.chemx` reaction animations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chemx::animation::{AnimationEngine, FrameState};
use chemx::codec;
use chemx::keyframes::{validate_keyframes, KeyframeStore};
use chemx::options::Options;
use chemx::util::FrameTiming;
use chemx::ChemxError;
use clap::{Parser, Subcommand};
use web_time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    name = "chemx",
    about = "Validate, inspect, normalize and play chemical-reaction \
             keyframe animations.",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// TOML options file. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a file and report every referential-integrity problem.
    Validate {
        /// Input `.chemx` file.
        file: PathBuf,
    },
    /// Print document metadata and a per-keyframe summary.
    Info {
        /// Input `.chemx` file.
        file: PathBuf,
    },
    /// Play a document headlessly, logging each emitted frame.
    Play {
        /// Input `.chemx` file.
        file: PathBuf,
        /// Frames per second.
        #[arg(long, default_value_t = 30)]
        fps: u32,
        /// Wall-clock seconds to play for.
        #[arg(long, default_value_t = 5.0)]
        seconds: f64,
    },
    /// Re-export a document with fixed-interval timestamps and compact ids.
    Normalize {
        /// Input `.chemx` file.
        input: PathBuf,
        /// Output `.chemx` file.
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, ChemxError> {
    let options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    match cli.command {
        Command::Validate { file } => validate(&file),
        Command::Info { file } => info(&file).map(|()| ExitCode::SUCCESS),
        Command::Play { file, fps, seconds } => {
            play(&file, &options, fps, seconds).map(|()| ExitCode::SUCCESS)
        }
        Command::Normalize { input, output } => {
            normalize(&input, &output, &options).map(|()| ExitCode::SUCCESS)
        }
    }
}

fn validate(path: &Path) -> Result<ExitCode, ChemxError> {
    let doc = codec::read_file(path)?;
    let report = validate_keyframes(&doc.keyframes);
    let mut out = io::stdout().lock();
    if report.is_valid() {
        writeln!(
            out,
            "{}: ok ({} keyframes)",
            path.display(),
            doc.keyframes.len()
        )?;
        return Ok(ExitCode::SUCCESS);
    }
    for issue in report.issues() {
        writeln!(out, "{issue}")?;
    }
    log::warn!("{} issue(s) in {}", report.issues().len(), path.display());
    Ok(ExitCode::FAILURE)
}

fn info(path: &Path) -> Result<(), ChemxError> {
    let doc = codec::read_file(path)?;
    let mut out = io::stdout().lock();
    writeln!(out, "name:        {}", doc.metadata.name)?;
    writeln!(out, "description: {}", doc.metadata.description)?;
    writeln!(out, "version:     {}", doc.version)?;
    writeln!(out, "created:     {}", doc.metadata.created)?;
    writeln!(out, "duration:    {} ms", doc.duration)?;
    writeln!(out, "keyframes:   {}", doc.keyframes.len())?;
    for (i, kf) in doc.keyframes.iter().enumerate() {
        writeln!(
            out,
            "  [{i:>2}] t={:>6} ms  atoms={:<3} bonds={}",
            kf.timestamp,
            kf.atoms.len(),
            kf.bonds.len()
        )?;
    }
    Ok(())
}

fn play(
    path: &Path,
    options: &Options,
    fps: u32,
    seconds: f64,
) -> Result<(), ChemxError> {
    let doc = codec::read_file(path)?;
    doc.ensure_playable()?;

    let on_frame = Box::new(|frame: &FrameState| {
        log::info!(
            "frame: {} atoms, {} bonds",
            frame.atoms.len(),
            frame.bonds.len()
        );
    });
    let mut engine =
        AnimationEngine::new(doc, options.animation.clone(), on_frame);

    let start = Instant::now();
    let stop = Duration::try_from_secs_f64(seconds.max(0.0))
        .ok()
        .and_then(|d| start.checked_add(d));
    let mut timing = FrameTiming::new(fps, start);
    engine.reset();
    engine.play(start);
    loop {
        let wait = timing.until_next(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        let now = Instant::now();
        if stop.is_some_and(|stop| now >= stop) {
            break;
        }
        engine.tick(now);
        let _ = timing.end_frame(now);
    }
    engine.pause();
    log::info!(
        "played {} frames at {:.1} fps, stopped at t={:.0} ms",
        timing.frames(),
        timing.fps(),
        engine.current_time()
    );
    Ok(())
}

fn normalize(
    input: &Path,
    output: &Path,
    options: &Options,
) -> Result<(), ChemxError> {
    let doc = codec::read_file(input)?;
    let metadata = doc.metadata.clone();
    let mut store = KeyframeStore::new();
    store.load_document(doc)?;
    let normalized = store.to_document(metadata, &options.export)?;
    codec::write_file(output, &normalized)?;
    log::info!("wrote {}", output.display());
    Ok(())
}
