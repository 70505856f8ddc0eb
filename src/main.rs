//! Resumark - a terminal resume editor.
//!
//! # Usage
//!
//! ```bash
//! resumark
//! resumark --name "Ada Lovelace" cv.md
//! resumark --improve-cmd "llm -s 'Improve this resume text'" --guard-edits
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use resumark::app::App;
use resumark::config::{
    ConfigFlags, clear_config_flags, default_log_path, global_config_path, load_config_flags,
    local_override_path, open_log_file, save_config_flags,
};
use resumark::document::SyncPolicy;
use resumark::services::{
    CommandImprover, FilePersistence, HtmlRenderer, PageFormat, RenderOptions, Services,
    TextImprovementService, UnconfiguredImprover,
};

/// A terminal resume editor with a markdown view
#[derive(Parser, Debug)]
#[command(name = "resumark", version, about, long_about = None)]
struct Cli {
    /// Markdown file to load and save
    #[arg(value_name = "FILE", default_value = "resume.md")]
    file: PathBuf,

    /// Name shown in the contact header (falls back to RESUMARK_NAME)
    #[arg(long)]
    name: Option<String>,

    /// Shell command that rewrites entry descriptions (JSON on stdin, text on stdout)
    #[arg(long, value_name = "CMD")]
    improve_cmd: Option<String>,

    /// Directory for exported files
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Ask before form changes replace hand-edited markdown
    #[arg(long)]
    guard_edits: bool,

    /// Page size for export
    #[arg(long, value_enum)]
    page_format: Option<PageFormat>,

    /// Page margin for export, in millimetres
    #[arg(long, value_name = "MM")]
    margin_mm: Option<f32>,

    /// Write logs to this file instead of the default beside the config
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
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            name: self.name.clone(),
            improve_cmd: self.improve_cmd.clone(),
            out_dir: self.out_dir.clone(),
            guard_edits: self.guard_edits,
            page_format: self.page_format,
            margin_mm: self.margin_mm,
            log_file: self.log_file.clone(),
        }
    }
}

/// Install the subscriber. Events never reach the terminal: without
/// `--log-file` they go to the default log file, or are dropped if it cannot
/// be opened.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let file = match log_file {
        Some(path) => Some(open_log_file(path)?),
        None => open_log_file(&default_log_path()).ok(),
    };
    match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
    Ok(())
}

fn build_services(flags: &ConfigFlags, file: &Path) -> Services {
    let improver: Arc<dyn TextImprovementService> = match &flags.improve_cmd {
        Some(cmd) => Arc::new(CommandImprover::new(cmd.clone())),
        None => Arc::new(UnconfiguredImprover),
    };
    let out_dir = flags.out_dir.clone().unwrap_or_else(|| {
        file.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    });
    let mut options = RenderOptions::default();
    if let Some(format) = flags.page_format {
        options.page_format = format;
    }
    if let Some(margin) = flags.margin_mm {
        options.margins = [margin, margin];
    }
    Services::new(
        improver,
        Arc::new(FilePersistence::new(file.to_path_buf())),
        Arc::new(HtmlRenderer::new(out_dir)),
    )
    .with_render_options(options)
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

    init_logging(effective.log_file.as_deref())?;

    let display_name = effective
        .name
        .clone()
        .or_else(|| std::env::var("RESUMARK_NAME").ok())
        .unwrap_or_default();
    let policy = if effective.guard_edits {
        SyncPolicy::Confirm
    } else {
        SyncPolicy::Overwrite
    };
    let services = build_services(&effective, &cli.file);
    tracing::info!(
        file = %cli.file.display(),
        ?policy,
        options = ?services.render_options,
        "starting"
    );

    // Run the application
    let mut app = App::new(cli.file, services)
        .with_display_name(display_name)
        .with_sync_policy(policy)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
