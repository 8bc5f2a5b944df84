use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use leakscope::synth::{
    synthesize_spectrum, synthesize_time_frequency, synthesize_waveform,
};
use leakscope::{
    DemoConfig, DemoEngine, LeakClass, ResolutionProfile, SampleCatalog, StageId, StagePlan,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "leakscope_cli",
    about = "Staged hydrophone leak-detection demo pipeline"
)]
struct Cli {
    /// Override configuration file (defaults to built-in values)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the analysis pipeline for a catalog sample, streaming events to stdout
    Analyze {
        #[arg(long)]
        sample: u32,
        /// Collapsed five-stage schedule instead of the canonical seven
        #[arg(long)]
        collapsed: bool,
        /// Compress stage delays for quick inspection
        #[arg(long)]
        fast: bool,
    },
    /// Synthesize a single artifact for a leak class and print it as JSON
    Synthesize {
        #[arg(long)]
        class: String,
        #[arg(long, value_enum, default_value_t = Artifact::Waveform)]
        artifact: Artifact,
    },
    /// List the sample catalog
    Samples,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Artifact {
    Waveform,
    Spectrum,
    Baseline,
    Sharp,
    Difference,
}

fn main() -> ExitCode {
    env_logger::init();
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
    let config = match cli.config {
        Some(path) => DemoConfig::load_from_file(path),
        None => DemoConfig::default(),
    };

    match cli.command {
        Commands::Analyze {
            sample,
            collapsed,
            fast,
        } => run_analyze(config, sample, collapsed, fast),
        Commands::Synthesize { class, artifact } => run_synthesize(&config, &class, artifact),
        Commands::Samples => run_samples(),
    }
}

fn run_analyze(
    mut config: DemoConfig,
    sample: u32,
    collapsed: bool,
    fast: bool,
) -> Result<ExitCode> {
    if fast {
        compress_delays(&mut config);
    }
    let plan = if collapsed {
        StagePlan::five_stage(&config.pipeline)
    } else {
        StagePlan::seven_stage(&config.pipeline)
    };

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async {
        let engine = DemoEngine::with_plan(config, plan);
        let mut events = engine.events_stream();
        engine
            .analyze(sample)
            .with_context(|| format!("starting analysis for sample {}", sample))?;

        while let Some(event) = events.next().await {
            let event = event.context("event stream lagged")?;
            println!("{}", serde_json::to_string(&event)?);
            if event.stage == StageId::Complete {
                break;
            }
        }
        Ok(ExitCode::from(0))
    })
}

/// Divide every stage delay by 100 so a full run takes under 200ms
fn compress_delays(config: &mut DemoConfig) {
    let pipeline = &mut config.pipeline;
    for delay in [
        &mut pipeline.stage_delay_raw_ms,
        &mut pipeline.stage_delay_spectrum_ms,
        &mut pipeline.stage_delay_baseline_ms,
        &mut pipeline.stage_delay_sharp_ms,
        &mut pipeline.stage_delay_difference_ms,
        &mut pipeline.stage_delay_sliding_start_ms,
        &mut pipeline.sliding_tick_ms,
        &mut pipeline.final_settle_ms,
    ] {
        *delay = (*delay / 100).max(1);
    }
}

fn run_synthesize(config: &DemoConfig, class: &str, artifact: Artifact) -> Result<ExitCode> {
    let class: LeakClass = class
        .parse()
        .with_context(|| format!("parsing class label {:?}", class))?;
    let synthesis = &config.synthesis;

    let json = match artifact {
        Artifact::Waveform => serde_json::to_string(&synthesize_waveform(class, synthesis))?,
        Artifact::Spectrum => serde_json::to_string(&synthesize_spectrum(class, synthesis))?,
        Artifact::Baseline => serde_json::to_string(&synthesize_time_frequency(
            class,
            ResolutionProfile::Baseline,
            synthesis,
        ))?,
        Artifact::Sharp => serde_json::to_string(&synthesize_time_frequency(
            class,
            ResolutionProfile::Sharp,
            synthesis,
        ))?,
        Artifact::Difference => {
            let baseline = synthesize_time_frequency(class, ResolutionProfile::Baseline, synthesis);
            let sharp = synthesize_time_frequency(class, ResolutionProfile::Sharp, synthesis);
            let difference = leakscope::synth::compute_difference(&sharp, &baseline)
                .context("computing difference grid")?;
            serde_json::to_string(&difference)?
        }
    };
    println!("{json}");
    Ok(ExitCode::from(0))
}

fn run_samples() -> Result<ExitCode> {
    let catalog = SampleCatalog::new();
    for sample in catalog.samples() {
        let row = SampleRow {
            id: sample.id,
            class: sample.class,
            display_name: &sample.display_name,
            source_file: &sample.source_file,
            confidence_percent: sample.canned_result.confidence_percent,
        };
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct SampleRow<'a> {
    id: u32,
    class: LeakClass,
    display_name: &'a str,
    source_file: &'a str,
    confidence_percent: f32,
}
