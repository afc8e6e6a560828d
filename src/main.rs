mod app;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deps_explorer::packages::{PackageGraph, load_graph_file, resolve_data_file};
use deps_explorer::util::format_timestamp;
use deps_explorer::views::ViewMode;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding package snapshot files
    #[arg(long, env = "DEPS_EXPLORER_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Snapshot to open on start-up (a name inside the data directory, or a path)
    #[arg(long, env = "DEPS_EXPLORER_FILE")]
    file: Option<String>,

    /// View shown first
    #[arg(long, value_enum, default_value_t = ViewMode::List)]
    view: ViewMode,

    /// Print package counts and orphans for --file, then exit
    #[arg(long, requires = "file")]
    summary: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = match args.verbose {
        0 if args.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(name: &str, graph: &PackageGraph) {
    let counts = graph.counts();
    println!("{name}");
    if let Some(info) = graph.info() {
        println!(
            "host: {} ({}), collected {}",
            info.hostname,
            info.os,
            format_timestamp(&info.timestamp)
        );
    }
    println!(
        "{} packages ({} explicit, {} dependencies)",
        counts.total, counts.explicit, counts.dependency
    );
    println!("{} links", graph.links().len());

    let orphans = graph.orphaned();
    println!("{} orphaned", orphans.len());
    for orphan in orphans {
        println!("  {} {}", orphan.id, orphan.version);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    if args.summary {
        let name = args.file.as_deref().context("--summary needs --file")?;
        let path = resolve_data_file(&args.data_dir, name);
        let graph = load_graph_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        print_summary(name, &graph);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };
    let app_options = app::AppOptions {
        data_dir: args.data_dir,
        file: args.file,
        view: args.view,
    };

    eframe::run_native(
        "Package Dependency Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(app::DepsExplorerApp::new(cc, app_options)))),
    )
    .map_err(|error| anyhow!("failed to start the window: {error}"))
}
