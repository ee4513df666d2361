use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::builder::FrameOptions;
use crate::hull::HullOptions;
use crate::pip::JoinOptions;

/// File-based configuration; every table and field is optional
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub frame: FrameOptions,
    pub join: JoinOptions,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Hull output is tagged with the same CRS frames are built in
    pub fn hull(&self) -> HullOptions {
        HullOptions {
            crs: self.frame.crs,
        }
    }
}
