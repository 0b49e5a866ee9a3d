use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::catalogs::SERVER_SECTION;
use crate::error::{Error, Result};
use crate::types::{SettingMap, SettingValue};
use crate::units::parse_size;

// --- Regex patterns ---

/// Leading `| ` left by tabular status dumps.
static RE_BAR_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|\s+").unwrap());
static RE_BAR_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\|\s*$").unwrap());
static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s=|]+").unwrap());
static RE_UNIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[KMG]$").unwrap());

/// Read an option file from disk and extract its server settings.
pub fn read_settings(path: &Path) -> Result<SettingMap> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read option file");
    Ok(parse_string(&content))
}

/// Extract `name value` / `name = value` pairs from option file text.
///
/// In a file with any `[section]` header, only lines under `[mysqld]` count,
/// including none of those above the first header. A file without headers
/// is read in full.
pub fn parse_string(content: &str) -> SettingMap {
    let mut settings = SettingMap::new();
    let section_mode = content.lines().any(|l| l.starts_with('['));
    let mut in_server = false;

    for (idx, raw) in content.lines().enumerate() {
        let line_num = idx + 1;

        if raw.starts_with('[') {
            in_server = raw.starts_with(&format!("[{SERVER_SECTION}]"));
            debug!(line = line_num, header = raw.trim(), in_server, "section header");
            continue;
        }
        if section_mode && !in_server {
            trace!(line = line_num, "outside [mysqld]");
            continue;
        }

        let line = RE_BAR_PREFIX.replace(raw, "");
        if line.starts_with('#') {
            trace!(line = line_num, "comment");
            continue;
        }

        let Some((name, value)) = split_pair(&line) else {
            trace!(line = line_num, "no value");
            continue;
        };

        let value = normalize_value(&value);
        if name.ends_with("buffer") {
            debug!(line = line_num, name = %name, "recording {name}_size alias");
            settings.insert(format!("{name}_size"), value.clone());
        }
        settings.insert(name, value);
    }

    settings
}

/// Split a line on whitespace, `=` and `|` into its first two pieces.
/// Option names have dashes folded to underscores, as the server does.
fn split_pair(line: &str) -> Option<(String, String)> {
    let mut parts = RE_SEPARATOR.split(line).filter(|p| !p.is_empty());
    let name = parts.next()?;
    let value = parts.next()?;
    let value = RE_BAR_SUFFIX.replace(value, "");
    Some((name.replace('-', "_"), value.into_owned()))
}

fn normalize_value(value: &str) -> SettingValue {
    if RE_UNIT_SUFFIX.is_match(value) {
        if let Some(bytes) = parse_size(value) {
            return SettingValue::Bytes(bytes);
        }
    }
    SettingValue::Text(value.to_string())
}
