use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crack_detector::audio::synth::{
    frames_for_duration, generate, interleave_stereo, write_pcm16, SyntheticPattern, SyntheticSpec,
};
use crack_detector::config::AppConfig;
use crack_detector::{AnalysisResult, Analyzer, EstimatorStrategy};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "crack_cli",
    about = "Offline crack/noise analysis for display audio clips"
)]
struct Cli {
    /// JSON config file (defaults to assets/analyzer_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level regardless of the configured level
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one or more WAV clips and print a JSON report
    Analyze {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Override the configured estimator strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Write a synthetic 16-bit PCM clip
    Generate {
        #[arg(long, value_enum, default_value_t = PatternArg::Sine)]
        pattern: PatternArg,
        #[arg(long, default_value_t = 1_000.0)]
        frequency: f32,
        #[arg(long, default_value_t = 0.5)]
        amplitude: f32,
        #[arg(long, default_value_t = 500)]
        duration_ms: u32,
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=2))]
        channels: u16,
        #[arg(long, default_value_t = 0x5EED)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    Spectral,
    Temporal,
}

impl From<StrategyArg> for EstimatorStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Spectral => EstimatorStrategy::Spectral,
            StrategyArg::Temporal => EstimatorStrategy::Temporal,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PatternArg {
    Sine,
    WhiteNoise,
    Silence,
    ImpulseTrain,
}

impl From<PatternArg> for SyntheticPattern {
    fn from(value: PatternArg) -> Self {
        match value {
            PatternArg::Sine => SyntheticPattern::Sine,
            PatternArg::WhiteNoise => SyntheticPattern::WhiteNoise,
            PatternArg::Silence => SyntheticPattern::Silence,
            PatternArg::ImpulseTrain => SyntheticPattern::ImpulseTrain,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config.logging.max_level()
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Commands::Analyze {
            paths,
            strategy,
            output,
            pretty,
        } => {
            let strategy = strategy
                .map(EstimatorStrategy::from)
                .unwrap_or(config.analysis.strategy);
            run_analyze(strategy, &paths, output, pretty)
        }
        Commands::Generate {
            pattern,
            frequency,
            amplitude,
            duration_ms,
            sample_rate,
            channels,
            seed,
            output,
        } => {
            let spec = SyntheticSpec::new(pattern.into())
                .with_frequency(frequency)
                .with_amplitude(amplitude)
                .with_seed(seed);
            run_generate(&spec, duration_ms, sample_rate, channels, output)
        }
    }
}

fn run_analyze(
    strategy: EstimatorStrategy,
    paths: &[PathBuf],
    output_path: Option<PathBuf>,
    pretty: bool,
) -> Result<ExitCode> {
    let analyzer = Analyzer::new(strategy);
    let results = paths
        .iter()
        .map(|path| FileReport {
            path: path.display().to_string(),
            result: analyzer.analyze(path),
        })
        .collect();

    let report = AnalysisReport {
        strategy: strategy.as_str(),
        results,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(ExitCode::from(0))
}

fn run_generate(
    spec: &SyntheticSpec,
    duration_ms: u32,
    sample_rate: u32,
    channels: u16,
    output_path: PathBuf,
) -> Result<ExitCode> {
    let frames = frames_for_duration(duration_ms, sample_rate);
    let mono = generate(spec, sample_rate, frames);
    let interleaved = if channels == 2 {
        interleave_stereo(&mono, &mono)
    } else {
        mono
    };

    write_pcm16(&output_path, sample_rate, channels, &interleaved)
        .with_context(|| format!("generating {}", output_path.display()))?;
    println!(
        "Wrote {} ({} frames, {} channel(s) @ {} Hz)",
        output_path.display(),
        frames,
        channels,
        sample_rate
    );
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    strategy: &'a str,
    results: Vec<FileReport>,
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    #[serde(flatten)]
    result: AnalysisResult,
}
