//! Dependency graph of module variants.
//!
//! Nodes are variant indices into the workspace. Edges point from a
//! dependency to its dependent, so a topological order visits every
//! dependency before the modules that use it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

/// Resolved dependency edges of the active variants.
pub struct ModuleGraph {
  graph: DiGraph<usize, ()>,
  nodes: Vec<Option<NodeIndex>>,
  /// Per variant: resolved dependency indices, in declaration order.
  deps: Vec<Vec<usize>>,
  /// Per variant: dependency names that resolved to nothing.
  missing: Vec<Vec<String>>,
}

impl ModuleGraph {
  /// Build the graph over `active` variants out of `total`.
  ///
  /// `resolve` maps a variant and one of its dependency names to the index of
  /// the dependency variant, if it exists.
  pub fn new<F>(total: usize, active: &[usize], dependencies: impl Fn(usize) -> Vec<String>, resolve: F) -> Self
  where
    F: Fn(usize, &str) -> Option<usize>,
  {
    let mut graph = DiGraph::new();
    let mut nodes = vec![None; total];
    for &index in active {
      nodes[index] = Some(graph.add_node(index));
    }

    let mut deps = vec![Vec::new(); total];
    let mut missing = vec![Vec::new(); total];
    for &index in active {
      for name in dependencies(index) {
        match resolve(index, &name).filter(|dep| nodes[*dep].is_some()) {
          Some(dep) => deps[index].push(dep),
          None => missing[index].push(name),
        }
      }
    }

    for &index in active {
      for &dep in &deps[index] {
        if let (Some(from), Some(to)) = (nodes[dep], nodes[index]) {
          graph.add_edge(from, to, ());
        }
      }
    }

    Self {
      graph,
      nodes,
      deps,
      missing,
    }
  }

  pub fn dependencies(&self, index: usize) -> &[usize] {
    &self.deps[index]
  }

  pub fn missing(&self, index: usize) -> &[String] {
    &self.missing[index]
  }

  /// Active variants ordered so dependencies come first.
  ///
  /// Among variants whose dependencies are all placed, the lowest index goes
  /// next, so the order follows declaration order wherever the graph allows.
  /// On a cycle, returns the index of a variant on it.
  pub fn order(&self) -> Result<Vec<usize>, usize> {
    toposort(&self.graph, None).map_err(|cycle| self.graph[cycle.node_id()])?;

    let mut in_degree: Vec<usize> = vec![0; self.nodes.len()];
    let mut ready = BinaryHeap::new();
    for (index, node) in self.nodes.iter().enumerate() {
      if let Some(node) = node {
        in_degree[index] = self.graph.neighbors_directed(*node, Direction::Incoming).count();
        if in_degree[index] == 0 {
          ready.push(Reverse(index));
        }
      }
    }

    let mut order = Vec::with_capacity(self.graph.node_count());
    while let Some(Reverse(index)) = ready.pop() {
      order.push(index);
      let Some(node) = self.nodes[index] else {
        continue;
      };
      for dependent in self.graph.neighbors_directed(node, Direction::Outgoing) {
        let dependent = self.graph[dependent];
        in_degree[dependent] -= 1;
        if in_degree[dependent] == 0 {
          ready.push(Reverse(dependent));
        }
      }
    }
    Ok(order)
  }
}
