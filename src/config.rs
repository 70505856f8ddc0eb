//! Saved command-line defaults.
//!
//! Defaults live in flag files: one flag per line, with any value taking the
//! rest of the line so names and commands may contain spaces. The global file
//! is merged with a local `.resumarkrc`, then with the flags on the command
//! line; later sources win for valued options.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::services::PageFormat;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub name: Option<String>,
    pub improve_cmd: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub guard_edits: bool,
    pub page_format: Option<PageFormat>,
    pub margin_mm: Option<f32>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            name: other.name.clone().or_else(|| self.name.clone()),
            improve_cmd: other
                .improve_cmd
                .clone()
                .or_else(|| self.improve_cmd.clone()),
            out_dir: other.out_dir.clone().or_else(|| self.out_dir.clone()),
            guard_edits: self.guard_edits || other.guard_edits,
            page_format: other.page_format.or(self.page_format),
            margin_mm: other.margin_mm.or(self.margin_mm),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("resumark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("resumark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("resumark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("resumark")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".resumarkrc")
}

/// Where logs go when `--log-file` is not given: beside the global config.
pub fn default_log_path() -> PathBuf {
    global_config_path().with_file_name("resumark.log")
}

/// Create or truncate a log file, making its directory first.
pub fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    fs::File::create(path).with_context(|| format!("Failed to open log file {}", path.display()))
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) => vec![flag.to_owned(), value.trim().to_owned()],
            None => vec![line.to_owned()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# resumark defaults (saved with --save)".to_string());
    if let Some(name) = &flags.name {
        lines.push(format!("--name {name}"));
    }
    if let Some(cmd) = &flags.improve_cmd {
        lines.push(format!("--improve-cmd {cmd}"));
    }
    if let Some(dir) = &flags.out_dir {
        lines.push(format!("--out-dir {}", dir.display()));
    }
    if flags.guard_edits {
        lines.push("--guard-edits".to_string());
    }
    if let Some(format) = flags.page_format
        && let Some(value) = format.to_possible_value()
    {
        lines.push(format!("--page-format {}", value.get_name()));
    }
    if let Some(margin) = flags.margin_mm {
        lines.push(format!("--margin-mm {margin}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

const VALUED_FLAGS: [&str; 6] = [
    "--name",
    "--improve-cmd",
    "--out-dir",
    "--page-format",
    "--margin-mm",
    "--log-file",
];

/// Pick the known flags out of a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--guard-edits" {
            flags.guard_edits = true;
        } else if let Some((flag, value)) = token.split_once('=') {
            apply_valued_flag(&mut flags, flag, value.to_string());
        } else if VALUED_FLAGS.contains(&token)
            && let Some(value) = tokens.get(i + 1)
        {
            apply_valued_flag(&mut flags, token, value.clone());
            i += 1;
        }
        i += 1;
    }
    flags
}

fn apply_valued_flag(flags: &mut ConfigFlags, flag: &str, value: String) {
    match flag {
        "--name" => flags.name = Some(value),
        "--improve-cmd" => flags.improve_cmd = Some(value),
        "--out-dir" => flags.out_dir = Some(PathBuf::from(value)),
        "--page-format" => flags.page_format = PageFormat::from_str(&value, true).ok(),
        "--margin-mm" => flags.margin_mm = value.parse().ok(),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
