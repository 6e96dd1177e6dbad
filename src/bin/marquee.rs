use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use marquee::{
    DrawCall, Engine, EngineConfig, EngineState, Event as _, HeadlessHost, ManifestLoader,
    ObjectNode as _, RawInput, RecordingSurface, SceneDescription, Signal, signal_names,
};

#[derive(Parser, Debug)]
#[command(name = "marquee", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log engine internals to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene headlessly for a number of ticks.
    Run(RunArgs),
    /// Parse and validate a scene description.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Scene description JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resource manifest JSON (array of entries).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Override the configured frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Simulated display refresh rate driving frame callbacks.
    #[arg(long, default_value_t = 120.0)]
    display_hz: f64,

    /// Scripted input JSON: `[{"frame": 3, "input": {...}}, ...]`.
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// What to print to stdout when the run ends.
    #[arg(long, value_enum, default_value_t = Dump::Summary)]
    dump: Dump,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Scene description JSON.
    #[arg(long)]
    scene: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dump {
    /// Engine state, tick count, and the layer tree.
    Summary,
    /// Draw calls of the last rendered frame.
    Calls,
    /// Every signal emitted during the run.
    Signals,
}

#[derive(Debug, serde::Deserialize)]
struct ScriptedInput {
    frame: u64,
    input: RawInput,
}

#[derive(Debug, serde::Serialize)]
struct Summary {
    state: EngineState,
    ticks: u64,
    last_tick: Option<f64>,
    hovered: Option<String>,
    layers: Vec<LayerSummary>,
}

#[derive(Debug, serde::Serialize)]
struct LayerSummary {
    id: String,
    visible: bool,
    nodes: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn read_scene(path: &Path) -> anyhow::Result<SceneDescription> {
    let json = read_text(path, "scene")?;
    SceneDescription::from_json_str(&json).with_context(|| "parse scene JSON")
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.scene)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", args.scene.display()))?;
    let nodes: usize = scene.layers.iter().map(|l| l.nodes.len()).sum();
    eprintln!("ok: {} layer(s), {nodes} node(s)", scene.layers.len());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if !(args.display_hz.is_finite() && args.display_hz > 0.0) {
        anyhow::bail!("--display-hz must be finite and > 0");
    }

    let scene = read_scene(&args.scene)?;
    let stage = scene
        .build()
        .with_context(|| format!("build scene '{}'", args.scene.display()))?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_str(&read_text(path, "config")?)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(fps) = args.fps {
        config = config.with_frame_rate(fps);
    }

    let loader = match &args.manifest {
        Some(path) => ManifestLoader::from_json_str(&read_text(path, "manifest")?)
            .with_context(|| format!("parse manifest '{}'", path.display()))?,
        None => ManifestLoader::empty(),
    };

    let mut script: Vec<ScriptedInput> = match &args.inputs {
        Some(path) => serde_json::from_str(&read_text(path, "inputs")?)
            .with_context(|| format!("parse inputs '{}'", path.display()))?,
        None => Vec::new(),
    };
    script.sort_by_key(|s| s.frame);
    let mut script = script.into_iter().peekable();

    let mut engine = Engine::start(config, RecordingSurface::new(), HeadlessHost::new(), loader)?;

    let signals = Rc::new(RefCell::new(Vec::<serde_json::Value>::new()));
    if matches!(args.dump, Dump::Signals) {
        for name in [
            signal_names::LOADING,
            signal_names::READY,
            signal_names::UPDATE,
            signal_names::FAULT,
            signal_names::SHUTDOWN,
            signal_names::MOUSE_DOWN,
            signal_names::MOUSE_UP,
            signal_names::MOUSE_MOVE,
            signal_names::MOUSE_ENTER,
            signal_names::MOUSE_LEAVE,
            signal_names::TOUCH_START,
            signal_names::TOUCH_END,
            signal_names::TOUCH_MOVE,
            signal_names::TOUCH_CANCEL,
            signal_names::KEY_DOWN,
            signal_names::KEY_UP,
        ] {
            let signals = signals.clone();
            engine.on(name, move |_stage, signal| {
                signals.borrow_mut().push(describe(signal));
            });
        }
    }
    engine.on(signal_names::FAULT, |_stage, signal| {
        if let Signal::Fault { reason } = signal {
            eprintln!("fault: {reason}");
        }
    });

    if engine.finish_loading()? != EngineState::Ready {
        anyhow::bail!("resource loading failed");
    }
    engine.replace_stage(stage);
    engine.run()?;

    let step = 1000.0 / args.display_hz;
    let mut now = 0.0;
    while engine.tick_count() < args.frames && engine.host_mut().take_frame_request() {
        let ticks = engine.tick_count();
        while let Some(next) = script.next_if(|s| s.frame <= ticks) {
            engine
                .handle_input(&next.input)
                .with_context(|| format!("deliver input for frame {}", next.frame))?;
        }
        if engine.on_frame(now)? && engine.tick_count() < args.frames {
            engine.surface_mut().clear();
        }
        now += step;
    }

    let calls: Vec<DrawCall> = engine.surface_mut().take_calls();
    let summary = summarize(&engine);
    engine.shutdown()?;

    let out = match args.dump {
        Dump::Summary => serde_json::to_string_pretty(&summary)?,
        Dump::Calls => serde_json::to_string_pretty(&calls)?,
        Dump::Signals => serde_json::to_string_pretty(&*signals.borrow())?,
    };
    println!("{out}");
    eprintln!("ran {} tick(s) over {now:.1} ms", summary.ticks);
    Ok(())
}

fn describe(signal: &Signal<'_>) -> serde_json::Value {
    let mut value = serde_json::json!({ "signal": signal.name() });
    match signal {
        Signal::Loading { progress } => value["progress"] = serde_json::json!(progress),
        Signal::Update { timestamp } => value["timestamp"] = serde_json::json!(timestamp),
        Signal::Fault { reason } => value["reason"] = serde_json::json!(reason),
        Signal::Mouse(ev) => {
            value["x"] = serde_json::json!(ev.position().x);
            value["y"] = serde_json::json!(ev.position().y);
            value["target"] = serde_json::json!(ev.header().target().map(|t| t.as_str()));
        }
        Signal::Touch(ev) => {
            value["target"] = serde_json::json!(ev.header().target().map(|t| t.as_str()));
        }
        Signal::Keyboard(ev) => value["key"] = serde_json::json!(ev.key()),
        _ => {}
    }
    value
}

fn summarize(engine: &Engine<RecordingSurface, HeadlessHost>) -> Summary {
    Summary {
        state: engine.state(),
        ticks: engine.tick_count(),
        last_tick: engine.last_tick(),
        hovered: engine.hovered().map(|id| id.to_string()),
        layers: engine
            .stage()
            .layers()
            .map(|layer| LayerSummary {
                id: layer.id().to_string(),
                visible: layer.is_visible(),
                nodes: layer.nodes().map(|n| n.id().to_string()).collect(),
            })
            .collect(),
    }
}
