use std::fs;
use std::path::Path;

use serde::Deserialize;

use mymemcheck_core::{Error, MemorySize};

/// Profile looked up next to the option file being checked.
pub const PROFILE_FILE: &str = "mymemcheck.config.yaml";

/// Host memory defaults from mymemcheck.config.yaml.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub machine_memory: Option<ProfileSize>,
    pub system_memory: Option<ProfileSize>,
}

/// A size written either as `16G` or as a plain byte count.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileSize {
    Bytes(u64),
    Text(String),
}

impl ProfileSize {
    pub fn to_memory_size(&self) -> Result<MemorySize, Error> {
        match self {
            ProfileSize::Bytes(n) => n.to_string().parse(),
            ProfileSize::Text(s) => s.parse(),
        }
    }
}

/// Read the profile from `dir` if one exists.
pub fn read_profile(dir: &Path) -> Result<Option<Profile>, Error> {
    let path = dir.join(PROFILE_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(Profile::default()));
    }

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::Profile {
            path,
            message: e.to_string(),
        })
}
