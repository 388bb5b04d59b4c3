use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrolly", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a story JSON file and print a summary.
    Validate(ValidateArgs),
    /// Replay a scroll script against recording backends and dump what the engine did.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll script JSON: `[{ "at_ms": 0, "step": 1 }, { "at_ms": 900, "resize": true }]`.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Without a script, enter every step in order this many milliseconds apart.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Output JSON path (stdout when absent).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
struct ScriptEntry {
    at_ms: u64,
    #[serde(default)]
    step: Option<u32>,
    #[serde(default)]
    resize: bool,
}

#[derive(serde::Serialize)]
struct SimulationLog<'a> {
    state: scrolly::EngineState,
    stage: &'a [scrolly::StageOp],
    map: &'a [scrolly::MapCall],
    trigger: &'a scrolly::RecordingTrigger,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn report(err: scrolly::ScrollyError) -> anyhow::Error {
    if let Some(failure) = err.validation_failure() {
        eprintln!("error: {}", failure.message);
        eprintln!("action: {}", failure.action);
        if let Some(hint) = &failure.hint {
            eprintln!("hint: {hint}");
        }
    }
    anyhow::Error::new(err)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let story = scrolly::Story::from_json_file(&args.in_path)
        .with_context(|| format!("load story '{}'", args.in_path.display()))?;
    let records = story.validate().map_err(report)?;

    let mut per_medium = BTreeMap::<scrolly::Medium, usize>::new();
    for r in &records {
        *per_medium.entry(r.content_type()).or_default() += 1;
    }

    println!("story: {}", story.story.title);
    println!("steps: {}", records.len());
    for (medium, n) in per_medium {
        println!("  {medium}: {n}");
    }
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptEntry>> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let mut entries: Vec<ScriptEntry> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    entries.sort_by_key(|e| e.at_ms);
    Ok(entries)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let story = scrolly::Story::from_json_file(&args.in_path)
        .with_context(|| format!("load story '{}'", args.in_path.display()))?;
    let config = match &args.config {
        Some(p) => scrolly::EngineConfig::from_json_file(p)?,
        None => scrolly::EngineConfig::default(),
    };

    let mut runner = scrolly::StoryRunner::start(
        &story,
        config,
        scrolly::RecordingStage::new(),
        scrolly::RecordingMap::new(),
        scrolly::RecordingTrigger::new(),
    )
    .map_err(report)?;

    let script = match &args.script {
        Some(p) => read_script(p)?,
        None => (1..=runner.records().len())
            .map(|i| ScriptEntry {
                at_ms: (i as u64 - 1) * args.interval_ms,
                step: Some(i as u32),
                resize: false,
            })
            .collect(),
    };

    for entry in &script {
        runner.advance_to(scrolly::Millis(entry.at_ms))?;
        let event = match (entry.step, entry.resize) {
            (Some(step), false) => scrolly::TriggerEvent::StepEnter {
                element: scrolly::StepElement {
                    step: scrolly::StepIndex::new(step)
                        .with_context(|| format!("script entry at {}ms", entry.at_ms))?,
                },
            },
            (None, true) => scrolly::TriggerEvent::Resize,
            _ => anyhow::bail!(
                "script entry at {}ms must have exactly one of 'step' or 'resize'",
                entry.at_ms
            ),
        };
        runner.handle(event)?;
    }
    runner.run_until_idle()?;

    let (trigger, tracker) = runner.into_parts();
    let log = SimulationLog {
        state: tracker.state(),
        stage: tracker.stage().ops(),
        map: tracker.map().calls(),
        trigger: &trigger,
    };

    match &args.out {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &log)?;
            w.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &log)?;
            writeln!(w)?;
        }
    }
    Ok(())
}
