//! Saved default flags.
//!
//! Defaults live in plain-text files holding the same tokens the command
//! line accepts, one or more per line, with `#` comments. A global file sits
//! in the platform config directory and a `.marknoterc` in the working
//! directory overrides it; explicit command-line flags win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Directory holding the notes.
    pub dir: Option<PathBuf>,
    /// Pane foreground color (ratatui color syntax).
    pub fg: Option<String>,
    /// Pane background color (ratatui color syntax).
    pub bg: Option<String>,
    /// Start with the preview pane only.
    pub preview: bool,
    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets, letting `other` win for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            dir: other.dir.clone().or_else(|| self.dir.clone()),
            fg: other.fg.clone().or_else(|| self.fg.clone()),
            bg: other.bg.clone().or_else(|| self.bg.clone()),
            preview: self.preview || other.preview,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("marknote").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("marknote")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("marknote").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("marknote")
                .join("config");
        }
    }

    PathBuf::from(".marknoterc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".marknoterc")
}

/// Directory notes are stored in when no `--dir` is given.
pub fn default_notes_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("marknote").join("notes");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Documents").join("marknote");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("marknote").join("notes");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("marknote")
                .join("notes");
        }
    }

    PathBuf::from("notes")
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
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# marknote defaults (saved with --save)".to_string()];
    if let Some(dir) = &flags.dir {
        lines.push(format!("--dir {}", dir.display()));
    }
    if let Some(fg) = &flags.fg {
        lines.push(format!("--fg {fg}"));
    }
    if let Some(bg) = &flags.bg {
        lines.push(format!("--bg {bg}"));
    }
    if flags.preview {
        lines.push("--preview".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
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

/// Extract known flags from a token list, ignoring anything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--preview" {
            flags.preview = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued(&mut flags, name, value);
        } else if is_valued(token)
            && let Some(next) = tokens.get(i + 1)
        {
            apply_valued(&mut flags, token, next);
            i += 1;
        }
        i += 1;
    }
    flags
}

fn is_valued(name: &str) -> bool {
    matches!(name, "--dir" | "--fg" | "--bg" | "--log-file")
}

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--dir" => flags.dir = Some(PathBuf::from(value)),
        "--fg" => flags.fg = Some(value.to_string()),
        "--bg" => flags.bg = Some(value.to_string()),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
