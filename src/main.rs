#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use projectmap::browser::Browser;
use projectmap::cli::{Args, LogDestination};
use projectmap::output::{save_tree, SaveTarget};
use projectmap::render::render_text;
use projectmap::tree::{absolute_path, apply_collapse_set, build_collapse_set, build_tree};
use projectmap::{event_loop, terminal};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("projectmap: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_logging(&args)?;

    let root_path = absolute_path(&args.path)
        .with_context(|| format!("{}: failed to resolve path", args.path.display()))?;

    let mut tree = build_tree(&root_path)?;

    let collapse = build_collapse_set(&args.collapse, args.collapse_common);
    let collapsed = apply_collapse_set(&mut tree, &collapse);
    if collapsed > 0 {
        info!(collapsed, "folders collapsed by pattern");
    }

    let target = match &args.output {
        Some(path) => SaveTarget::File(path.clone()),
        None => SaveTarget::Directory(args.trees_dir.clone()),
    };

    if args.interactive {
        let (term_width, _) = terminal::terminal_size();
        terminal::set_title(&root_path, term_width as usize);

        let mut browser = Browser::new(tree, root_path, !args.no_color);
        let mut guard = terminal::TerminalGuard::new().context("failed to initialize terminal")?;
        event_loop::run(&mut guard.terminal, &mut browser, &target)?;
        return Ok(());
    }

    let text = render_text(&tree, &root_path);
    if args.stdout {
        println!("{text}");
        return Ok(());
    }

    let dest = target.resolve(&tree.node(tree.root()).name, Local::now().naive_local());
    save_tree(&text, &dest)?;
    if !args.quiet {
        eprintln!("projectmap: saved {}", dest.display());
    }
    Ok(())
}

/// Install the subscriber. `RUST_LOG` overrides the flag-derived level.
/// The browser owns the screen, so it never logs to stderr.
fn init_logging(args: &Args) -> Result<()> {
    let rust_log = std::env::var_os("RUST_LOG").is_some();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    let (writer, ansi) = match args.log_destination(rust_log) {
        None => (BoxMakeWriter::new(std::io::stderr), true),
        Some(LogDestination::Discard) => (BoxMakeWriter::new(std::io::sink), false),
        Some(LogDestination::File(path)) => {
            let file = File::create(&path)
                .with_context(|| format!("{}: failed to create log file", path.display()))?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    Ok(())
}
