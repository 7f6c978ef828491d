//! Catalog listings served next to the negotiate endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Agents known to the backend, name to description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDirectory {
    /// AI negotiation agents.
    #[serde(default)]
    pub ai_agents: BTreeMap<String, String>,

    /// Rule-based agents kept for the legacy routing endpoint.
    #[serde(default)]
    pub legacy_agents: BTreeMap<String, String>,
}

/// A store agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

/// A service agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoresResponse {
    pub stores: Vec<StoreInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServicesResponse {
    pub services: Vec<ServiceInfo>,
}
