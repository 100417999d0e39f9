// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock agent registries for deterministic testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cleo_core::{AgentRecord, AgentRegistry, CleoError};

/// A registry serving a configurable agent list and counting loads.
///
/// Clones share the agent list and the counter, so a test can keep one
/// handle while the decider owns another.
#[derive(Clone, Default)]
pub struct MockRegistry {
    agents: Arc<Mutex<Vec<AgentRecord>>>,
    calls: Arc<AtomicUsize>,
}

impl MockRegistry {
    /// Create a registry with no agents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the given agents.
    pub fn with_agents(agents: Vec<AgentRecord>) -> Self {
        Self {
            agents: Arc::new(Mutex::new(agents)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Append an agent.
    pub async fn add_agent(&self, agent: AgentRecord) {
        self.agents.lock().await.push(agent);
    }

    /// Number of `get_all_agents` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRegistry for MockRegistry {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.agents.lock().await.clone())
    }
}

/// A registry whose every load fails.
#[derive(Clone, Default)]
pub struct FailingRegistry {
    calls: Arc<AtomicUsize>,
}

impl FailingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRegistry for FailingRegistry {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CleoError::registry("mock registry unavailable"))
    }
}
