//! Declarative API graphs for inspecting resolution without real factories.
//!
//! ```toml
//! upstream = ["logger"]
//! transfer = ["logger"]
//!
//! [[factory]]
//! id = "db"
//! deps = { log = "logger" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use scopekit_core::{
    AnyApiRef, ApiDeps, ApiError, ApiFactory, ApiInstance, ApiInstances, ApiItem, resolver,
};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid graph file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Resolve(#[from] ApiError),
}

/// A graph file: the ids available upstream, the ids to transfer from there,
/// and the factories to order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphFile {
    #[serde(default)]
    pub upstream: Vec<AnyApiRef>,

    #[serde(default)]
    pub transfer: Vec<AnyApiRef>,

    #[serde(default, rename = "factory")]
    pub factories: Vec<FactoryDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryDecl {
    pub id: AnyApiRef,

    #[serde(default)]
    pub deps: BTreeMap<String, AnyApiRef>,
}

impl FactoryDecl {
    /// A factory with the declared shape that produces its own id.
    fn to_factory(&self) -> ApiFactory {
        let id = self.id.id().to_string();
        ApiFactory::from_parts(
            self.id.clone(),
            self.deps.clone(),
            Arc::new(move |_: &ApiDeps| Ok(Arc::new(id.clone()) as ApiInstance)),
        )
    }
}

impl GraphFile {
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, GraphError> {
        Ok(toml::from_str(content)?)
    }

    /// Placeholder instances for the upstream ids.
    pub fn upstream_instances(&self) -> ApiInstances {
        self.upstream
            .iter()
            .map(|api| (api.id(), Arc::new(()) as ApiInstance))
            .collect()
    }

    /// Transfers first, then factories in declaration order.
    pub fn items(&self) -> Vec<ApiItem> {
        self.transfer
            .iter()
            .cloned()
            .map(ApiItem::from)
            .chain(self.factories.iter().map(|decl| ApiItem::from(decl.to_factory())))
            .collect()
    }

    /// Run the planning pass against the upstream set.
    pub fn plan(&self) -> Result<PlanSummary, GraphError> {
        let previous = self.upstream_instances();
        let items = self.items();
        let plan = resolver::plan(&items, Some(&previous))?;

        let summary = PlanSummary {
            transfers: plan.transfers().iter().map(|api| api.id().to_string()).collect(),
            build_order: plan.build_order().into_iter().map(str::to_string).collect(),
        };
        debug!(
            transfers = summary.transfers.len(),
            factories = summary.build_order.len(),
            "Planned graph"
        );
        Ok(summary)
    }
}

/// Result of planning a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub transfers: Vec<String>,
    pub build_order: Vec<String>,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "transfer:")?;
        for id in &self.transfers {
            writeln!(f, "  {id}")?;
        }
        writeln!(f, "build order:")?;
        for (step, id) in self.build_order.iter().enumerate() {
            writeln!(f, "  {}. {id}", step + 1)?;
        }
        Ok(())
    }
}
