use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::arch::VtypeLayout;
use crate::common::{ConfigError, InstructionType};
use crate::graph::{SelectionFilter, DEFAULT_MAX_NODES};

const DEFAULT_COMPUTATIONAL: &str = "computational_graph.json";
const DEFAULT_AGGREGATED: &str = "aggregated_computational_graph.json";
const DEFAULT_EXECUTION: &str = "execution_graph.json";
const DEFAULT_VTYPE_LAYOUT: &str = "trace-viewer";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub graphs: GraphsConfig,
    #[serde(default)]
    pub select: SelectConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
}

impl Config {
    /// Reads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decode.layout()?;
        self.select.filter()?;
        Ok(())
    }
}

/// Where `build` writes each graph variant.
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_computational")]
    pub computational: String,

    #[serde(default = "default_aggregated")]
    pub aggregated: String,

    #[serde(default = "default_execution")]
    pub execution: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            computational: default_computational(),
            aggregated: default_aggregated(),
            execution: default_execution(),
        }
    }
}

fn default_computational() -> String {
    DEFAULT_COMPUTATIONAL.to_string()
}

fn default_aggregated() -> String {
    DEFAULT_AGGREGATED.to_string()
}

fn default_execution() -> String {
    DEFAULT_EXECUTION.to_string()
}

/// Which graph variants `build` produces.
#[derive(Debug, Deserialize, Clone)]
pub struct GraphsConfig {
    #[serde(default = "enabled")]
    pub standard: bool,

    #[serde(default = "enabled")]
    pub aggregated: bool,

    #[serde(default = "enabled")]
    pub execution: bool,
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            standard: true,
            aggregated: true,
            execution: true,
        }
    }
}

fn enabled() -> bool {
    true
}

/// Default window of the `select` command.
#[derive(Debug, Deserialize, Clone)]
pub struct SelectConfig {
    #[serde(default)]
    pub start: u64,

    #[serde(default)]
    pub end: Option<u64>,

    /// Short type names: `reg`, `csr`, `ls`.
    #[serde(default)]
    pub types: Option<Vec<String>>,

    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            types: None,
            max_nodes: default_max_nodes(),
        }
    }
}

fn default_max_nodes() -> usize {
    DEFAULT_MAX_NODES
}

impl SelectConfig {
    /// Converts the section into a selection filter.
    pub fn filter(&self) -> Result<SelectionFilter, ConfigError> {
        if let Some(end) = self.end {
            if end <= self.start {
                return Err(ConfigError::Invalid(format!(
                    "select.end ({}) must be greater than select.start ({})",
                    end, self.start
                )));
            }
        }
        let types = match &self.types {
            Some(names) => Some(parse_types(names)?),
            None => None,
        };
        Ok(SelectionFilter {
            start: self.start,
            end: self.end,
            types,
            max_nodes: self.max_nodes,
        })
    }
}

fn parse_types(names: &[String]) -> Result<BTreeSet<InstructionType>, ConfigError> {
    names
        .iter()
        .map(|name| {
            InstructionType::from_str(name, true)
                .map_err(|_| ConfigError::Invalid(format!("unknown instruction type '{}'", name)))
        })
        .collect()
}

/// Decoder settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DecodeConfig {
    /// `trace-viewer` or `rvv-1.0`.
    #[serde(default = "default_vtype_layout")]
    pub vtype_layout: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            vtype_layout: default_vtype_layout(),
        }
    }
}

fn default_vtype_layout() -> String {
    DEFAULT_VTYPE_LAYOUT.to_string()
}

impl DecodeConfig {
    pub fn layout(&self) -> Result<VtypeLayout, ConfigError> {
        VtypeLayout::from_name(&self.vtype_layout).ok_or_else(|| {
            ConfigError::Invalid(format!("unknown vtype layout '{}'", self.vtype_layout))
        })
    }
}
