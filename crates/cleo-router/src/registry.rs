// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent registries backed by the built-in catalogue, inline config, and an
//! optional agents file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cleo_config::model::{AgentSpecConfig, CleoConfig};
use cleo_core::{AgentOrigin, AgentRecord, AgentRegistry, CleoError};
use serde::Deserialize;
use tracing::debug;

use crate::agents::BUILTIN_SPECIALISTS;

fn record_from_config(agent: &AgentSpecConfig) -> AgentRecord {
    AgentRecord {
        id: agent.id.clone(),
        name: agent.name.clone(),
        description: agent.description.clone(),
        tags: agent.tags.clone(),
        tools: agent.tools.clone(),
        origin: AgentOrigin::Custom,
    }
}

/// A fixed, in-memory list of agents.
pub struct StaticRegistry {
    agents: Vec<AgentRecord>,
}

impl StaticRegistry {
    pub fn new(agents: Vec<AgentRecord>) -> Self {
        Self { agents }
    }

    /// Built-in specialists only.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_SPECIALISTS.iter().map(AgentRecord::from).collect())
    }

    /// Built-in specialists followed by the `[[agents]]` entries of `config`.
    pub fn from_config(config: &CleoConfig) -> Self {
        let mut agents: Vec<AgentRecord> =
            BUILTIN_SPECIALISTS.iter().map(AgentRecord::from).collect();
        agents.extend(config.agents.iter().map(record_from_config));
        Self::new(agents)
    }
}

#[async_trait]
impl AgentRegistry for StaticRegistry {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError> {
        Ok(self.agents.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AgentsFile {
    #[serde(default)]
    agents: Vec<AgentSpecConfig>,
}

/// Reads custom agents from a TOML file with `[[agents]]` entries.
///
/// The file is re-read on every call so edits apply without a restart.
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AgentRegistry for FileRegistry {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CleoError::Registry {
                message: format!("failed to read agents file {}", self.path.display()),
                source: Some(Box::new(e)),
            })?;

        let file: AgentsFile = toml::from_str(&content).map_err(|e| CleoError::Registry {
            message: format!("failed to parse agents file {}", self.path.display()),
            source: Some(Box::new(e)),
        })?;

        debug!(
            path = %self.path.display(),
            count = file.agents.len(),
            "loaded agents file"
        );
        Ok(file.agents.iter().map(record_from_config).collect())
    }
}

/// Concatenates several registries, keeping the first record per id.
///
/// Any failing layer fails the whole load.
pub struct LayeredRegistry {
    layers: Vec<Arc<dyn AgentRegistry>>,
}

impl LayeredRegistry {
    pub fn new(layers: Vec<Arc<dyn AgentRegistry>>) -> Self {
        Self { layers }
    }
}

#[async_trait]
impl AgentRegistry for LayeredRegistry {
    fn name(&self) -> &str {
        "layered"
    }

    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError> {
        let mut seen = HashSet::new();
        let mut agents = Vec::new();
        for layer in &self.layers {
            for agent in layer.get_all_agents().await? {
                if seen.insert(agent.id.clone()) {
                    agents.push(agent);
                }
            }
        }
        Ok(agents)
    }
}

/// Build the registry described by `config`: built-ins and inline agents,
/// plus the agents file when one is configured.
pub fn registry_from_config(config: &CleoConfig) -> Arc<dyn AgentRegistry> {
    let base: Arc<dyn AgentRegistry> = Arc::new(StaticRegistry::from_config(config));
    match &config.registry.agents_file {
        Some(path) => Arc::new(LayeredRegistry::new(vec![
            base,
            Arc::new(FileRegistry::new(path)),
        ])),
        None => base,
    }
}
