use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::catalogs::{DEFAULT_MACHINE_MEMORY, DEFAULT_SYSTEM_MEMORY};
use crate::error::Error;
use crate::units::{coerce_integer, parse_size};

// ---------------------------------------------------------------------------
// Settings read from an option file
// ---------------------------------------------------------------------------

/// A setting value: either a size already normalized to bytes, or the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bytes(u64),
    Text(String),
}

impl SettingValue {
    /// Numeric value used in arithmetic. Text is coerced leniently, so
    /// non-numeric content counts as zero.
    pub fn as_bytes(&self) -> u64 {
        match self {
            SettingValue::Bytes(n) => *n,
            SettingValue::Text(s) => coerce_integer(s),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bytes(n) => write!(f, "{n}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

/// Setting name to value, built once by the reader.
pub type SettingMap = BTreeMap<String, SettingValue>;

// ---------------------------------------------------------------------------
// Operator-supplied memory sizes
// ---------------------------------------------------------------------------

/// A memory size given as `digits[K|M|G]`, keeping the text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorySize {
    pub text: String,
    pub bytes: u64,
}

impl FromStr for MemorySize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let bytes = parse_size(text).ok_or_else(|| Error::InvalidSize(s.to_string()))?;
        Ok(MemorySize {
            text: text.to_string(),
            bytes,
        })
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOptions {
    /// Physical memory of the host; the safety ceiling.
    pub machine_memory: MemorySize,
    /// Allowance reserved for the OS and other processes.
    pub system_memory: MemorySize,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            machine_memory: builtin_size(DEFAULT_MACHINE_MEMORY),
            system_memory: builtin_size(DEFAULT_SYSTEM_MEMORY),
        }
    }
}

fn builtin_size(text: &str) -> MemorySize {
    MemorySize {
        text: text.to_string(),
        bytes: parse_size(text).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferLine {
    pub name: String,
    pub bytes: u64,
}

/// Result of the minimal memory formula for one option file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryReport {
    pub global_buffers: Vec<BufferLine>,
    pub thread_buffers: Vec<BufferLine>,
    pub global_buffer_size: u64,
    pub thread_buffer_size: u64,
    pub max_connections: u64,
    pub minimal_memory: u64,
    pub system_memory: MemorySize,
    pub total_memory: u64,
    pub machine_memory: MemorySize,
    pub verdict: Verdict,
}
