use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aarohan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step a JSON scene and write the resulting event log and style snapshot.
    Simulate(SimulateArgs),
    /// Resolve a path against the site's route table.
    Route(RouteArgs),
    /// Show or flip the persisted theme.
    Theme(ThemeArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Frame count. Defaults to the scene duration.
    #[arg(long)]
    frames: Option<u64>,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Durable storage file the theme is read from and persisted to.
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RouteArgs {
    path: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum ThemeAction {
    #[default]
    Show,
    Toggle,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    #[arg(value_enum, default_value_t = ThemeAction::Show)]
    action: ThemeAction,

    /// Durable storage file.
    #[arg(long, default_value = "aarohan-storage.json")]
    store: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Route(args) => cmd_route(args),
        Command::Theme(args) => cmd_theme(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene = aarohan_motion::Scene::load(&args.in_path)?;
    let fps = aarohan_motion::Fps::new(args.fps, 1)?;
    let storage: Box<dyn aarohan_motion::Storage> = match &args.store {
        Some(path) => Box::new(aarohan_motion::JsonFileStorage::new(path)),
        None => Box::new(aarohan_motion::MemoryStorage::new()),
    };
    let run = scene.run(fps, args.frames, storage)?;
    let json = serde_json::to_string_pretty(&run).context("serialize scene run")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_route(args: RouteArgs) -> anyhow::Result<()> {
    let route = aarohan_motion::Route::parse(&args.path);
    let json = serde_json::to_string_pretty(&route).context("serialize route")?;
    println!("{json}");
    if route.is_not_found() {
        eprintln!("no page at {}", route.path());
    }
    Ok(())
}

fn cmd_theme(args: ThemeArgs) -> anyhow::Result<()> {
    let mut storage = aarohan_motion::JsonFileStorage::new(&args.store);
    let config = aarohan_motion::theme::theme::ThemeConfig::default();
    let mut theme = aarohan_motion::theme::theme::ThemeController::new(config);
    let current = theme.hydrate(&storage)?;
    match args.action {
        ThemeAction::Show => println!("{current}"),
        ThemeAction::Toggle => {
            // Run the ripple to completion; the swap persists the value.
            let viewport = aarohan_motion::Viewport::new(1440.0, 900.0)?;
            theme.toggle(0.0, None, viewport)?;
            theme
                .update(config.clear_at, &mut storage)
                .with_context(|| format!("persist theme to '{}'", args.store.display()))?;
            println!("{}", theme.theme());
        }
    }
    Ok(())
}
