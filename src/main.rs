//! Marknote - A terminal markdown note editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! marknote
//! marknote journal
//! marknote --dir ~/notes --fg white --bg black todo.md
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use marknote::app::App;
use marknote::config::{
    ConfigFlags, clear_config_flags, default_notes_dir, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use marknote::ui::style::pane_style;

/// A terminal markdown note editor with live preview
#[derive(Parser, Debug)]
#[command(name = "marknote", version, about, long_about = None)]
struct Cli {
    /// Note to open (created on first save if it doesn't exist)
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Directory holding the notes
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Pane text color (name, #rrggbb or 0-255)
    #[arg(long, value_name = "COLOR")]
    fg: Option<String>,

    /// Pane background color (name, #rrggbb or 0-255)
    #[arg(long, value_name = "COLOR")]
    bg: Option<String>,

    /// Start with only the preview pane
    #[arg(long)]
    preview: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// Flags given on this command line, in saved-defaults form.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            dir: self.dir.clone(),
            fg: self.fg.clone(),
            bg: self.bg.clone(),
            preview: self.preview,
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;
    tracing::debug!(?effective, "effective flags");

    let notes_dir = effective.dir.clone().unwrap_or_else(default_notes_dir);

    // Run the application
    let mut app = App::new(notes_dir)
        .with_initial_note(cli.name)
        .with_preview_only(effective.preview)
        .with_pane_style(pane_style(effective.fg.as_deref(), effective.bg.as_deref()))
        .with_config_path(Some(global_path));

    app.run().context("Application error")
}
