use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::error::{GraphError, Result};
use super::types::{Edge, EdgeId, Node, NodeId, Reachability, TraversalKind};

/// Vertex and edge arenas plus the two indices kept in lockstep with them:
/// node -> incident edge ids, and node -> neighbour ids (symmetric closure of the edge set).
///
/// Ids are handed out monotonically, so iterating the node arena yields insertion order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: BTreeMap<NodeId, Node>,
	edges: BTreeMap<EdgeId, Edge>,
	incident: BTreeMap<NodeId, BTreeSet<EdgeId>>,
	adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
	next_node: u32,
	next_edge: u32,
}

impl Graph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts an isolated node and returns its fresh id.
	pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
		let id = NodeId(self.next_node);
		self.next_node += 1;
		self.nodes.insert(id, Node::new(id, label.into()));
		self.incident.insert(id, BTreeSet::new());
		self.adjacency.insert(id, BTreeSet::new());
		debug!("added node {id}");
		id
	}

	/// Links `start` to `end`. Parallel edges are not rejected here.
	pub fn add_edge(&mut self, start: NodeId, end: NodeId, weight: i32) -> Result<EdgeId> {
		self.require_live(start)?;
		self.require_live(end)?;
		if start == end {
			return Err(GraphError::SelfLoop(start));
		}

		let id = EdgeId(self.next_edge);
		self.next_edge += 1;
		self.edges.insert(
			id,
			Edge {
				id,
				start,
				end,
				weight,
			},
		);
		for (node, other) in [(start, end), (end, start)] {
			self.incident.entry(node).or_default().insert(id);
			self.adjacency.entry(node).or_default().insert(other);
		}
		debug!("added edge {id} ({start} -> {end}, weight {weight})");
		Ok(id)
	}

	/// Removes a node and every edge touching it. A node that was already removed is a no-op.
	pub fn remove_node(&mut self, id: NodeId) -> Result<Option<Node>> {
		if !self.nodes.contains_key(&id) {
			return self.issued_node(id).map(|_| None);
		}

		let incident = self.incident.remove(&id).unwrap_or_default();
		for edge in incident {
			self.detach_edge(edge);
		}
		self.adjacency.remove(&id);
		for neighbours in self.adjacency.values_mut() {
			neighbours.remove(&id);
		}
		debug!("removed node {id}");
		Ok(self.nodes.remove(&id))
	}

	/// Removes a single edge. An edge that was already removed is a no-op.
	pub fn remove_edge(&mut self, id: EdgeId) -> Result<Option<Edge>> {
		if id.0 >= self.next_edge {
			return Err(GraphError::UnknownEdge(id));
		}
		Ok(self.detach_edge(id))
	}

	/// Drops every edge; nodes survive with empty incident and adjacency sets.
	pub fn remove_all_edges(&mut self) {
		for edges in self.incident.values_mut() {
			edges.clear();
		}
		for neighbours in self.adjacency.values_mut() {
			neighbours.clear();
		}
		self.edges.clear();
		debug!("removed all edges");
	}

	/// With `directed`, only an edge stored as `a -> b` matches. Otherwise any edge joining
	/// the pair does; if parallel edges exist the lowest edge id wins.
	pub fn find_edge(&self, a: NodeId, b: NodeId, directed: bool) -> Option<&Edge> {
		self.incident
			.get(&a)?
			.iter()
			.filter_map(|id| self.edges.get(id))
			.find(|edge| {
				if directed {
					edge.start == a && edge.end == b
				} else {
					edge.other(a) == Some(b)
				}
			})
	}

	/// `None` once the node is removed.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(&id)
	}

	pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(&id)
	}

	/// `None` once the edge is removed.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(&id)
	}

	pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
		self.edges.get_mut(&id)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.values()
	}

	/// Ids of live nodes, ascending.
	pub fn node_ids(&self) -> Vec<NodeId> {
		self.nodes.keys().copied().collect()
	}

	/// Edges in creation order.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.values()
	}

	/// Live nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Live edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether `id` names a live node.
	pub fn contains_node(&self, id: NodeId) -> bool {
		self.nodes.contains_key(&id)
	}

	/// Whether `id` names a live edge.
	pub fn contains_edge(&self, id: EdgeId) -> bool {
		self.edges.contains_key(&id)
	}

	/// Undirected neighbour set, `None` for a node not in the graph.
	pub fn adjacency(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
		self.adjacency.get(&id)
	}

	/// Edges touching `id` at either end; empty for an unknown node.
	pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
		self.incident.get(&id).into_iter().flatten().copied()
	}

	/// Whether some edge joins `a` and `b`, ignoring direction.
	pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
		self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
	}

	/// Neighbours in ascending id order.
	pub fn neighbors(&self, id: NodeId, reach: Reachability) -> Vec<NodeId> {
		match reach {
			Reachability::Undirected => self
				.adjacency
				.get(&id)
				.map(|n| n.iter().copied().collect())
				.unwrap_or_default(),
			Reachability::Directed => self
				.incident_edges(id)
				.filter_map(|e| self.edges.get(&e))
				.filter(|edge| edge.start == id)
				.map(|edge| edge.end)
				.collect::<BTreeSet<_>>()
				.into_iter()
				.collect(),
		}
	}

	/// Clears the `kind` flag on every node.
	pub fn reset_visited(&mut self, kind: TraversalKind) {
		for node in self.nodes.values_mut() {
			node.set_visited(kind, false);
		}
	}

	/// Reports the first broken structural invariant, if any.
	pub fn check_invariants(&self) -> std::result::Result<(), String> {
		for edge in self.edges.values() {
			for node in [edge.start, edge.end] {
				if !self.nodes.contains_key(&node) {
					return Err(format!("edge {} references missing node {node}", edge.id));
				}
				if !self.incident.get(&node).is_some_and(|s| s.contains(&edge.id)) {
					return Err(format!("edge {} missing from incident set of {node}", edge.id));
				}
			}
			if !self.is_adjacent(edge.start, edge.end) || !self.is_adjacent(edge.end, edge.start) {
				return Err(format!("edge {} not mirrored in adjacency", edge.id));
			}
		}
		for (node, neighbours) in &self.adjacency {
			if !self.nodes.contains_key(node) {
				return Err(format!("adjacency entry for missing node {node}"));
			}
			for other in neighbours {
				if self.find_edge(*node, *other, false).is_none() {
					return Err(format!("adjacency {node} -> {other} has no backing edge"));
				}
			}
		}
		for (node, edges) in &self.incident {
			if !self.nodes.contains_key(node) {
				return Err(format!("incident entry for missing node {node}"));
			}
			if let Some(edge) = edges.iter().find(|e| !self.edges.contains_key(*e)) {
				return Err(format!("node {node} lists missing edge {edge}"));
			}
		}
		Ok(())
	}

	fn issued_node(&self, id: NodeId) -> Result<()> {
		if id.0 < self.next_node {
			Ok(())
		} else {
			Err(GraphError::UnknownNode(id))
		}
	}

	fn require_live(&self, id: NodeId) -> Result<()> {
		self.issued_node(id)?;
		if self.nodes.contains_key(&id) {
			Ok(())
		} else {
			Err(GraphError::RemovedNode(id))
		}
	}

	fn detach_edge(&mut self, id: EdgeId) -> Option<Edge> {
		let edge = self.edges.remove(&id)?;
		for node in [edge.start, edge.end] {
			if let Some(edges) = self.incident.get_mut(&node) {
				edges.remove(&id);
			}
		}
		// A parallel edge may still join the pair.
		if self.find_edge(edge.start, edge.end, false).is_none() {
			for (node, other) in [(edge.start, edge.end), (edge.end, edge.start)] {
				if let Some(neighbours) = self.adjacency.get_mut(&node) {
					neighbours.remove(&other);
				}
			}
		}
		debug!("removed edge {id}");
		Some(edge)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn path(labels: &[&str]) -> (Graph, Vec<NodeId>) {
		let mut graph = Graph::new();
		let ids: Vec<_> = labels.iter().map(|l| graph.add_node(*l)).collect();
		for pair in ids.windows(2) {
			graph.add_edge(pair[0], pair[1], 1).unwrap();
		}
		(graph, ids)
	}

	#[test]
	fn add_edge_is_symmetric() {
		let (graph, ids) = path(&["A", "B"]);
		assert_eq!(graph.edge_count(), 1);
		assert!(graph.adjacency(ids[0]).unwrap().contains(&ids[1]));
		assert!(graph.adjacency(ids[1]).unwrap().contains(&ids[0]));
		graph.check_invariants().unwrap();
	}

	#[test]
	fn removing_middle_of_path_leaves_no_edges() {
		let (mut graph, ids) = path(&["A", "B", "C"]);
		let removed = graph.remove_node(ids[1]).unwrap().unwrap();
		assert_eq!(removed.label, "B");
		assert_eq!(graph.edge_count(), 0);
		assert!(graph.adjacency(ids[0]).unwrap().is_empty());
		assert!(graph.adjacency(ids[2]).unwrap().is_empty());
		assert_eq!(graph.node_ids(), vec![ids[0], ids[2]]);
		assert_eq!(graph.incident_edges(ids[0]).count(), 0);
		graph.check_invariants().unwrap();
	}

	#[test]
	fn stale_and_foreign_handles() {
		let (mut graph, ids) = path(&["A", "B"]);
		graph.remove_node(ids[0]).unwrap();
		assert_eq!(graph.remove_node(ids[0]), Ok(None));
		assert_eq!(graph.remove_node(NodeId(99)), Err(GraphError::UnknownNode(NodeId(99))));
		assert_eq!(graph.add_edge(ids[0], ids[1], 1), Err(GraphError::RemovedNode(ids[0])));
		assert_eq!(graph.remove_edge(EdgeId(0)), Ok(None));
		assert_eq!(graph.remove_edge(EdgeId(5)), Err(GraphError::UnknownEdge(EdgeId(5))));
	}

	#[test]
	fn self_loop_rejected() {
		let mut graph = Graph::new();
		let a = graph.add_node("A");
		assert_eq!(graph.add_edge(a, a, 1), Err(GraphError::SelfLoop(a)));
		assert_eq!(graph.edge_count(), 0);
	}

	#[test]
	fn find_edge_orientation() {
		let (graph, ids) = path(&["A", "B"]);
		let (a, b) = (ids[0], ids[1]);
		assert!(graph.find_edge(a, b, true).is_some());
		assert!(graph.find_edge(b, a, true).is_none());
		assert_eq!(graph.find_edge(b, a, false).map(Edge::start), Some(a));
	}

	#[test]
	fn parallel_edge_keeps_pair_adjacent() {
		let (mut graph, ids) = path(&["A", "B"]);
		let second = graph.add_edge(ids[1], ids[0], 3).unwrap();
		assert_eq!(graph.find_edge(ids[0], ids[1], false).map(Edge::id), Some(EdgeId(0)));
		graph.remove_edge(EdgeId(0)).unwrap();
		assert!(graph.is_adjacent(ids[0], ids[1]));
		graph.check_invariants().unwrap();
		graph.remove_edge(second).unwrap();
		assert!(!graph.is_adjacent(ids[0], ids[1]));
		graph.check_invariants().unwrap();
	}

	#[test]
	fn remove_all_edges_twice() {
		let (mut graph, ids) = path(&["A", "B", "C"]);
		graph.remove_all_edges();
		graph.remove_all_edges();
		assert_eq!(graph.edge_count(), 0);
		assert_eq!(graph.node_count(), 3);
		assert!(ids.iter().all(|id| graph.adjacency(*id).unwrap().is_empty()));
		graph.check_invariants().unwrap();
	}

	#[test]
	fn directed_neighbours_follow_arrows() {
		let (graph, ids) = path(&["A", "B", "C"]);
		assert_eq!(graph.neighbors(ids[1], Reachability::Directed), vec![ids[2]]);
		assert_eq!(graph.neighbors(ids[1], Reachability::Undirected), vec![ids[0], ids[2]]);
		assert!(graph.neighbors(ids[2], Reachability::Directed).is_empty());
	}
}
