use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use vitrine::geometry::Size;
use vitrine::icons::IconField;
use vitrine::manifest::Manifest;
use vitrine::viewport::Breakpoint;
use vitrine_config::Config;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to config file (default: `vitrine/config.kdl` in the system
    /// config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the config file, and optionally a track manifest.
    Validate {
        /// Path to a manifest JSON file to check as well.
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Compute the icon layout for a viewport.
    Plan {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        /// Print the layout as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("vitrine=debug"));
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Validate { manifest } => validate(&path, manifest.as_deref()),
        Command::Plan {
            width,
            height,
            json,
        } => plan(&path, Size::new(width, height), json),
    }
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "vitrine")
        .context("error retrieving the project directories")?;
    Ok(dirs.config_dir().join("config.kdl"))
}

fn load_config(path: &std::path::Path) -> anyhow::Result<Config> {
    if !path.exists() {
        debug!("no config at {path:?}, using the defaults");
        return Ok(Config::default());
    }

    // The miette report carries the annotated snippet; keep it intact.
    Config::load(path).map_err(|err| anyhow::anyhow!("{err:?}"))
}

fn validate(path: &std::path::Path, manifest: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = load_config(path)?;
    println!(
        "config OK: {} icons, {} apps",
        config.icons.len(),
        config.apps.len()
    );

    // Window icons that point at unregistered components still work (the
    // host renders the placeholder), but it's almost always a typo.
    for icon in &config.icons {
        if let Some(vitrine_config::Launch::Window(component)) = icon.launch() {
            if config.app(component).is_none() {
                warn!(
                    "icon {:?} launches component {component:?} with no app entry",
                    icon.id.0
                );
            }
        }
    }

    if let Some(path) = manifest {
        let manifest = Manifest::load(path)?;
        let problems = manifest.lint();
        for problem in &problems {
            eprintln!("manifest: {problem}");
        }
        if !problems.is_empty() {
            bail!("manifest has {} problem(s)", problems.len());
        }
        println!(
            "manifest OK: {} tracks, {} streaming links",
            manifest.tracks.len(),
            manifest.streaming_links.iter().count()
        );
    }

    Ok(())
}

fn plan(path: &std::path::Path, view_size: Size, json: bool) -> anyhow::Result<()> {
    let config = std::rc::Rc::new(load_config(path)?);
    let breakpoint = Breakpoint::from_width(view_size.w, &config.breakpoints);
    let field = IconField::new(view_size, config);

    if json {
        let out = serde_json::to_string_pretty(field.icons())?;
        println!("{out}");
        return Ok(());
    }

    println!("# {}x{} ({})", view_size.w, view_size.h, breakpoint.name());
    for icon in field.icons() {
        println!(
            "{:<12} {:<14} at {:>7.1},{:>7.1}  box {}x{}",
            icon.id, icon.title, icon.pos.x, icon.pos.y, icon.size.w, icon.size.h
        );
    }
    Ok(())
}
