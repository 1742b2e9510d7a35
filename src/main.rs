use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ducky::engine::{DEFAULT_MAX_IMPORT_DEPTH, Engine, EngineOptions, Outcome};
use ducky::hid::{GadgetKeyboard, GadgetMouse, Hid, Indicator, NullIndicator, Recorder, SysfsLed};
use ducky::selector::{Settings, list_payloads, select_payload};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

#[derive(Parser, Debug)]
#[command(
    name = "ducky",
    about = "Replay DuckyScript payloads as USB keyboard and mouse input",
    version
)]
struct Cli {
    /// Log filter, e.g. `info` or `ducky=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a payload script
    Run(RunArgs),
    /// List the payload scripts in a directory
    List(ListArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// Record HID events in memory and log them
    DryRun,
    /// Write reports to Linux USB HID gadget devices
    Gadget,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Script to run; defaults to the payload selected in the settings file,
    /// which only runs when the settings enable `auto_execute`
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Settings file naming the selected payload
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Directory holding payload scripts
    #[arg(long, default_value = "payloads")]
    payloads: PathBuf,

    /// Directory relative script and IMPORT paths resolve against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[arg(long, value_enum, default_value_t = Backend::DryRun)]
    backend: Backend,

    /// Keyboard gadget device
    #[arg(long, default_value = "/dev/hidg0")]
    keyboard: PathBuf,

    /// Mouse gadget device
    #[arg(long, default_value = "/dev/hidg1")]
    mouse: PathBuf,

    /// Name of the LED under /sys/class/leds
    #[arg(long)]
    led: Option<String>,

    #[arg(long, default_value_t = DEFAULT_MAX_IMPORT_DEPTH)]
    max_import_depth: usize,

    /// Skip the LED fade before and after the script
    #[arg(long)]
    no_feedback: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Directory holding payload scripts
    #[arg(long, default_value = "payloads")]
    payloads: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::List(args) => list(&args),
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    registry()
        .with(filter)
        .with(fmt::layer().without_time())
        .try_init()
        .ok();
}

async fn run(args: RunArgs) -> Result<()> {
    let script = match &args.script {
        Some(script) => script.clone(),
        None => {
            let auto_execute = Settings::load(&args.settings).is_ok_and(|s| s.auto_execute);
            if !auto_execute {
                info!(
                    "Auto-execute is disabled in {}; pass --script to run a payload",
                    args.settings.display()
                );
                return Ok(());
            }
            select_payload(&args.settings, &args.payloads)
        }
    };

    let recorder = Recorder::new();
    let hid = match args.backend {
        Backend::DryRun => recorder.hid(),
        Backend::Gadget => open_gadget(&args)?,
    };

    let options = EngineOptions {
        script_root: args.root.clone(),
        max_import_depth: args.max_import_depth,
        ..Default::default()
    };
    let mut engine = Engine::new(hid).with_options(options);

    info!("Executing payload: {}", script.display());
    let outcome = if args.no_feedback {
        engine.run(&script).await
    } else {
        engine.run_payload(&script).await
    };
    match outcome {
        Outcome::Completed => info!("Payload execution completed successfully"),
        Outcome::Skipped(_) => warn!("Payload skipped: {}", script.display()),
        Outcome::Aborted(_) => warn!("Payload aborted: {}", script.display()),
    }
    if matches!(args.backend, Backend::DryRun) {
        info!("{} HID events recorded", recorder.events().len());
    }

    engine.shutdown().context("Failed to release HID devices")?;
    Ok(())
}

fn open_gadget(args: &RunArgs) -> Result<Hid> {
    let keyboard = GadgetKeyboard::open(&args.keyboard)
        .with_context(|| format!("Failed to open keyboard device: {}", args.keyboard.display()))?;
    let mouse = GadgetMouse::open(&args.mouse)
        .with_context(|| format!("Failed to open mouse device: {}", args.mouse.display()))?;
    let indicator: Box<dyn Indicator> = match &args.led {
        Some(name) => Box::new(
            SysfsLed::open(name).with_context(|| format!("Failed to open LED: {name}"))?,
        ),
        None => Box::new(NullIndicator::default()),
    };
    Ok(Hid {
        keyboard: Box::new(keyboard),
        pointer: Box::new(mouse),
        indicator,
    })
}

fn list(args: &ListArgs) -> Result<()> {
    let payloads = list_payloads(&args.payloads)
        .with_context(|| format!("Failed to list payloads in {}", args.payloads.display()))?;
    if payloads.is_empty() {
        println!("No .dd files found in {}", args.payloads.display());
    }
    for payload in payloads {
        println!("{payload}");
    }
    Ok(())
}
