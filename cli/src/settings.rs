use std::path::Path;

use anyhow::{bail, Context, Result};
use graph_rank_core::MAX_CAPACITY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 10;
pub const MAX_TOP_N: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Effective settings: config file values with command-line overrides applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Vertex capacity for every loaded graph. Unset = size each graph to its
    /// distinct label count.
    pub capacity: Option<usize>,
    /// Rows shown by `rank`.
    pub top_n: usize,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: None,
            top_n: DEFAULT_TOP_N,
            format: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Read a TOML settings file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides; flags win over file values.
    pub fn with_overrides(
        mut self,
        capacity: Option<usize>,
        top_n: Option<usize>,
        json: bool,
    ) -> Result<Self> {
        if capacity.is_some() {
            self.capacity = capacity;
        }
        if let Some(n) = top_n {
            self.top_n = n;
        }
        if json {
            self.format = OutputFormat::Json;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if let Some(capacity) = self.capacity {
            if capacity == 0 || capacity > MAX_CAPACITY {
                bail!("capacity must be between 1 and {}, got {}", MAX_CAPACITY, capacity);
            }
        }
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            bail!("top_n must be between 1 and {}, got {}", MAX_TOP_N, self.top_n);
        }
        Ok(())
    }
}
