//! Graph resolver: memoized, cache-aware asset resolution.

use crate::error::{Error, Result};
use crate::fetcher::FileFetcher;
use crate::parents::Parents;
use crate::Asset;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One asset identity in the dependency graph.
#[derive(Debug, Clone, Copy)]
struct NodeMeta {
    tid: TypeId,
    name: &'static str,
}

/// Orchestrates resolution of an asset and its transitive dependencies.
///
/// The store walks the declared dependency graph, instantiates at most one
/// asset per identity (the concrete asset type), orders the graph so every
/// dependency resolves before its dependents, and then materializes each
/// asset exactly once: reconstitution from the state cache when the asset's
/// `load` reports a hit, `generate` otherwise.
///
/// Resolved instances stay memoized for the lifetime of the store, so a
/// later `resolve` call reuses them without re-running `load` or `generate`.
///
/// A cache hit never short-circuits dependency resolution: dependents further
/// up the graph may need the in-memory state of this asset's dependencies
/// even though the asset itself was satisfied from disk. The
/// resolve-dependencies-then-try-cache order is deliberate and load-bearing.
pub struct Store<C> {
    fetcher: Box<dyn FileFetcher>,
    resolved: HashMap<TypeId, Arc<dyn Asset<C>>>,
}

impl<C: 'static> Store<C> {
    /// Create a store reading cached artifacts through `fetcher`.
    #[must_use]
    pub fn new(fetcher: Box<dyn FileFetcher>) -> Self {
        Self {
            fetcher,
            resolved: HashMap::new(),
        }
    }

    /// Resolve asset type `T` and its full dependency subgraph, returning the
    /// memoized instance.
    ///
    /// # Errors
    ///
    /// Fails fast on the first cycle, load, or generate error anywhere in the
    /// subgraph; no partially resolved state is reported as success.
    pub fn resolve<T: Asset<C> + Default>(&mut self, ctx: &C) -> Result<&T> {
        self.resolve_asset(ctx, Box::new(T::default()))?;
        self.get::<T>()
            .ok_or_else(|| Error::missing_parent(std::any::type_name::<T>()))
    }

    /// Look up the memoized instance of asset type `T`, if it has been
    /// resolved by an earlier call.
    #[must_use]
    pub fn get<T: Asset<C>>(&self) -> Option<&T> {
        self.resolved.get(&TypeId::of::<T>()).and_then(|asset| {
            let any: &dyn Any = &**asset;
            any.downcast_ref::<T>()
        })
    }

    /// Resolve a caller-constructed root asset and its dependency subgraph.
    pub fn resolve_asset(&mut self, ctx: &C, root: Box<dyn Asset<C>>) -> Result<()> {
        let root_name = root.name();
        if self.resolved.contains_key(&type_id_of(&*root)) {
            debug!("asset '{}' already resolved, reusing", root_name);
            return Ok(());
        }
        debug!("resolving asset '{}'", root_name);

        // Phase 1: walk declared dependencies, one unresolved instance per
        // identity. Identities resolved by an earlier call are satisfied
        // leaves and stay out of the graph.
        let mut pending: HashMap<TypeId, Box<dyn Asset<C>>> = HashMap::new();
        let mut deps_of: HashMap<TypeId, Vec<TypeId>> = HashMap::new();
        let mut graph: DiGraph<NodeMeta, ()> = DiGraph::new();
        let mut nodes: HashMap<TypeId, NodeIndex> = HashMap::new();

        let mut queue = vec![root];
        while let Some(asset) = queue.pop() {
            let tid = type_id_of(&*asset);
            if pending.contains_key(&tid) || self.resolved.contains_key(&tid) {
                continue;
            }
            let deps = asset.dependencies();
            deps_of.insert(tid, deps.iter().map(|dep| type_id_of(&**dep)).collect());
            nodes.insert(
                tid,
                graph.add_node(NodeMeta {
                    tid,
                    name: asset.name(),
                }),
            );
            debug!("added asset node '{}'", asset.name());
            pending.insert(tid, asset);
            queue.extend(deps);
        }

        // Phase 2: edges run dependency -> dependent so topological order
        // yields dependencies first.
        for (tid, deps) in &deps_of {
            let Some(&dependent) = nodes.get(tid) else {
                continue;
            };
            for dep in deps {
                if let Some(&dependency) = nodes.get(dep) {
                    graph.add_edge(dependency, dependent, ());
                }
            }
        }

        // Phase 3: a cycle is a programming error in the asset definitions;
        // report the offending path by name.
        let order = toposort(&graph, None).map_err(|_| Error::cycle(&cycle_path(&graph)))?;

        // Phase 4: materialize each identity exactly once, dependencies
        // always before dependents, cache reconstitution before generation.
        for index in order {
            let meta = graph[index];
            let Some(mut asset) = pending.remove(&meta.tid) else {
                continue;
            };

            let mut parents = Parents::new();
            if let Some(deps) = deps_of.get(&meta.tid) {
                for dep in deps {
                    if let Some(resolved) = self.resolved.get(dep) {
                        parents.insert(Arc::clone(resolved));
                    }
                }
            }

            let found = asset
                .load(&*self.fetcher)
                .map_err(|source| Error::Load {
                    asset: meta.name,
                    source,
                })?;
            if found {
                debug!("reusing persisted state for asset '{}'", meta.name);
            } else {
                asset
                    .generate(ctx, &parents)
                    .map_err(|source| Error::Generate {
                        asset: meta.name,
                        source,
                    })?;
                debug!("generated asset '{}'", meta.name);
            }
            self.resolved.insert(meta.tid, Arc::from(asset));
        }

        Ok(())
    }
}

fn type_id_of<C: 'static>(asset: &dyn Asset<C>) -> TypeId {
    let any: &dyn Any = asset;
    any.type_id()
}

/// Extract the asset names along one cycle of a graph that failed to sort.
fn cycle_path(graph: &DiGraph<NodeMeta, ()>) -> Vec<&'static str> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    fn visit(
        graph: &DiGraph<NodeMeta, ()>,
        node: NodeIndex,
        marks: &mut [Mark],
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<&'static str>> {
        marks[node.index()] = Mark::Gray;
        path.push(node);
        for next in graph.neighbors(node) {
            match marks[next.index()] {
                Mark::Gray => {
                    let start = path.iter().position(|&n| n == next).unwrap_or(0);
                    let mut names: Vec<&'static str> =
                        path[start..].iter().map(|&n| graph[n].name).collect();
                    names.push(graph[next].name);
                    return Some(names);
                }
                Mark::White => {
                    if let Some(cycle) = visit(graph, next, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Black => {}
            }
        }
        path.pop();
        marks[node.index()] = Mark::Black;
        None
    }

    let mut marks = vec![Mark::White; graph.node_count()];
    let mut path = Vec::new();
    for node in graph.node_indices() {
        if marks[node.index()] == Mark::White {
            if let Some(cycle) = visit(graph, node, &mut marks, &mut path) {
                return cycle;
            }
        }
    }
    Vec::new()
}
