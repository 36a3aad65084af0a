//! API resolution.
//!
//! Turns a list of references and factories into a new [`ApiInstances`] set:
//!
//! 1. References are transferred from the previous set unchanged.
//! 2. Factories are ordered depth-first so providers come before dependents.
//! 3. Factories are invoked in that order.
//!
//! The resulting order depends only on the dependency graph, never on the
//! order of the input list.

use std::collections::{BTreeMap, HashMap};
use std::iter;

use scopekit_protocols::{AnyApiRef, ApiDeps, ApiError, ApiFactory, ApiInstances, ApiItem};
use tracing::{debug, trace};

/// Transfers and factory build order computed for a set of items.
#[derive(Debug)]
pub struct ResolutionPlan<'a> {
    transfers: Vec<&'a AnyApiRef>,
    queue: Vec<&'a ApiFactory>,
}

impl<'a> ResolutionPlan<'a> {
    /// References carried over from the previous set.
    pub fn transfers(&self) -> &[&'a AnyApiRef] {
        &self.transfers
    }

    /// Factories in invocation order.
    pub fn factories(&self) -> &[&'a ApiFactory] {
        &self.queue
    }

    /// Ids of the factories in invocation order.
    pub fn build_order(&self) -> Vec<&'a str> {
        self.queue.iter().map(|factory| factory.api().id()).collect()
    }

    fn execute(&self, previous: Option<&ApiInstances>) -> Result<ApiInstances, ApiError> {
        let mut result = ApiInstances::new();

        for api in &self.transfers {
            let instance = previous
                .and_then(|set| set.get_raw(api.id()))
                .ok_or_else(|| ApiError::MissingParentInstance(api.id().to_string()))?;
            trace!(api = %api, "Transferring API instance");
            result.insert(api.id(), instance.clone());
        }

        for factory in &self.queue {
            let id = factory.api().id();
            let mut deps = BTreeMap::new();

            for (name, dep) in factory.deps() {
                // Instances produced in this resolution win over the previous set.
                let instance = result
                    .get_raw(dep.id())
                    .or_else(|| previous.and_then(|set| set.get_raw(dep.id())))
                    .ok_or_else(|| ApiError::UnresolvedDependency {
                        path: vec![id.to_string(), dep.id().to_string()],
                    })?;
                deps.insert(name.clone(), instance.clone());
            }

            trace!(api = %id, deps = deps.len(), "Producing API instance");
            let instance = factory.produce(&ApiDeps::new(id, deps))?;
            result.insert(id, instance);
        }

        debug!(
            transferred = self.transfers.len(),
            produced = self.queue.len(),
            total = result.len(),
            "Resolved API instances"
        );
        Ok(result)
    }
}

/// Compute the transfers and factory order for `items` without invoking any factory.
pub fn plan<'a>(
    items: &'a [ApiItem],
    previous: Option<&ApiInstances>,
) -> Result<ResolutionPlan<'a>, ApiError> {
    let mut transfers = Vec::new();
    for item in items {
        if let ApiItem::Ref(api) = item {
            if !previous.is_some_and(|set| set.contains(api.id())) {
                return Err(ApiError::MissingParentInstance(api.id().to_string()));
            }
            transfers.push(api);
        }
    }

    let factories: Vec<&'a ApiFactory> = items.iter().filter_map(ApiItem::as_factory).collect();

    let mut providers = HashMap::new();
    for (index, factory) in factories.iter().enumerate() {
        providers.entry(factory.api().id()).or_insert(index);
    }

    let mut walk = DepthFirst {
        factories: &factories,
        providers,
        previous,
        queued: vec![false; factories.len()],
        queue: Vec::with_capacity(factories.len()),
    };
    for (index, factory) in factories.iter().enumerate() {
        walk.enqueue(index, vec![factory.api().id()])?;
    }

    let queue = walk.queue.iter().map(|&index| factories[index]).collect();
    Ok(ResolutionPlan { transfers, queue })
}

/// Create a new set of API instances, transferring referenced instances from
/// `previous` and producing the rest from their factories.
///
/// Any error discards the whole resolution.
pub fn resolve(
    items: &[ApiItem],
    previous: Option<&ApiInstances>,
) -> Result<ApiInstances, ApiError> {
    plan(items, previous)?.execute(previous)
}

struct DepthFirst<'f, 'a, 'p> {
    factories: &'f [&'a ApiFactory],
    providers: HashMap<&'a str, usize>,
    previous: Option<&'p ApiInstances>,
    queued: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> DepthFirst<'_, 'a, '_> {
    /// Queue the factory at `index` after everything it depends on.
    ///
    /// `seen` is the dependency path leading here, starting at the top-level factory.
    fn enqueue(&mut self, index: usize, seen: Vec<&'a str>) -> Result<(), ApiError> {
        if self.queued[index] {
            return Ok(());
        }

        let factory = self.factories[index];
        for dep in factory.deps().values() {
            let id = dep.id();

            if seen.contains(&id) {
                return Err(ApiError::CircularDependency {
                    path: chain(&seen, id),
                });
            }

            if let Some(&provider) = self.providers.get(id) {
                let mut path = seen.clone();
                path.push(id);
                self.enqueue(provider, path)?;
            } else if !self.previous.is_some_and(|set| set.contains(id)) {
                return Err(ApiError::UnresolvedDependency {
                    path: chain(&seen, id),
                });
            }
        }

        self.queued[index] = true;
        self.queue.push(index);
        Ok(())
    }
}

fn chain(seen: &[&str], last: &str) -> Vec<String> {
    seen.iter()
        .copied()
        .chain(iter::once(last))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
