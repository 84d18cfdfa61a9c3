//! Depth- and breadth-first visitation over a [`Graph`].
//!
//! Each kind keeps its own visited flag on the nodes, so a DFS run leaves BFS state alone
//! and vice versa. Neighbours are explored in ascending id order. The `visit` hook runs
//! once per node in visitation order and must not mutate the graph.

use std::collections::VecDeque;

use log::info;

use super::model::Graph;
use super::types::{NodeId, Reachability, TraversalKind};

struct Frame {
	neighbours: Vec<NodeId>,
	next: usize,
}

/// Depth-first from `root`, marking `visited_dfs`. Nodes already marked are skipped.
/// Returns the visitation order; empty if `root` is absent or not in the graph.
pub fn dfs(
	graph: &mut Graph,
	root: Option<NodeId>,
	reach: Reachability,
	mut visit: impl FnMut(NodeId),
) -> Vec<NodeId> {
	let mut order = Vec::new();
	let Some(root) = root.filter(|r| graph.contains_node(*r)) else {
		return order;
	};
	if mark(graph, root, TraversalKind::Dfs) {
		return order;
	}
	visit(root);
	order.push(root);

	// Explicit frames reproduce the recursive order without recursion depth limits.
	let mut stack = vec![Frame {
		neighbours: graph.neighbors(root, reach),
		next: 0,
	}];
	while let Some(frame) = stack.last_mut() {
		let Some(&next) = frame.neighbours.get(frame.next) else {
			stack.pop();
			continue;
		};
		frame.next += 1;
		if mark(graph, next, TraversalKind::Dfs) {
			continue;
		}
		visit(next);
		order.push(next);
		stack.push(Frame {
			neighbours: graph.neighbors(next, reach),
			next: 0,
		});
	}
	info!("dfs from {root} visited {} nodes", order.len());
	order
}

/// Breadth-first from `root`, marking `visited_bfs` when a node is enqueued.
/// The hook fires as each node is dequeued.
pub fn bfs(
	graph: &mut Graph,
	root: Option<NodeId>,
	reach: Reachability,
	mut visit: impl FnMut(NodeId),
) -> Vec<NodeId> {
	let mut order = Vec::new();
	let Some(root) = root.filter(|r| graph.contains_node(*r)) else {
		return order;
	};
	if mark(graph, root, TraversalKind::Bfs) {
		return order;
	}

	let mut queue = VecDeque::from([root]);
	while let Some(vertex) = queue.pop_front() {
		visit(vertex);
		order.push(vertex);
		for next in graph.neighbors(vertex, reach) {
			if !mark(graph, next, TraversalKind::Bfs) {
				queue.push_back(next);
			}
		}
	}
	info!("bfs from {root} visited {} nodes", order.len());
	order
}

/// Sets the flag and reports whether it was already set.
fn mark(graph: &mut Graph, id: NodeId, kind: TraversalKind) -> bool {
	match graph.node_mut(id) {
		Some(node) if node.visited(kind) => true,
		Some(node) => {
			node.set_visited(kind, true);
			false
		}
		None => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// A - B - C - D
	fn path() -> (Graph, Vec<NodeId>) {
		let mut graph = Graph::new();
		let ids: Vec<_> = ["A", "B", "C", "D"].iter().map(|l| graph.add_node(*l)).collect();
		for pair in ids.windows(2) {
			graph.add_edge(pair[0], pair[1], 1).unwrap();
		}
		(graph, ids)
	}

	#[test]
	fn path_orders_match() {
		let (mut graph, ids) = path();
		let mut hooked = Vec::new();
		let depth = dfs(&mut graph, Some(ids[0]), Reachability::Undirected, |n| hooked.push(n));
		assert_eq!(depth, ids);
		assert_eq!(hooked, ids);
		let breadth = bfs(&mut graph, Some(ids[0]), Reachability::Undirected, |_| {});
		assert_eq!(breadth, ids);
	}

	#[test]
	fn absent_root_is_noop() {
		let (mut graph, _) = path();
		let mut calls = 0;
		assert!(dfs(&mut graph, None, Reachability::Undirected, |_| calls += 1).is_empty());
		assert!(bfs(&mut graph, None, Reachability::Undirected, |_| calls += 1).is_empty());
		assert_eq!(calls, 0);
		assert!(graph.nodes().all(|n| !n.visited_dfs && !n.visited_bfs));
	}

	#[test]
	fn flags_do_not_interfere() {
		let (mut graph, ids) = path();
		dfs(&mut graph, Some(ids[0]), Reachability::Undirected, |_| {});
		assert!(graph.nodes().all(|n| n.visited_dfs && !n.visited_bfs));
		let order = bfs(&mut graph, Some(ids[3]), Reachability::Undirected, |_| {});
		assert_eq!(order, vec![ids[3], ids[2], ids[1], ids[0]]);
	}

	#[test]
	fn dfs_goes_deep_before_wide() {
		//   B - D
		//  /
		// A
		//  \
		//   C
		let mut graph = Graph::new();
		let a = graph.add_node("A");
		let b = graph.add_node("B");
		let c = graph.add_node("C");
		let d = graph.add_node("D");
		graph.add_edge(a, b, 1).unwrap();
		graph.add_edge(a, c, 1).unwrap();
		graph.add_edge(b, d, 1).unwrap();
		assert_eq!(
			dfs(&mut graph, Some(a), Reachability::Undirected, |_| {}),
			vec![a, b, d, c]
		);
		assert_eq!(
			bfs(&mut graph, Some(a), Reachability::Undirected, |_| {}),
			vec![a, b, c, d]
		);
	}

	#[test]
	fn directed_reach_respects_arrows() {
		let (mut graph, ids) = path();
		let order = dfs(&mut graph, Some(ids[2]), Reachability::Directed, |_| {});
		assert_eq!(order, vec![ids[2], ids[3]]);
		let order = bfs(&mut graph, Some(ids[3]), Reachability::Directed, |_| {});
		assert_eq!(order, vec![ids[3]]);
	}

	#[test]
	fn rerun_without_reset_visits_nothing() {
		let (mut graph, ids) = path();
		dfs(&mut graph, Some(ids[0]), Reachability::Undirected, |_| {});
		assert!(dfs(&mut graph, Some(ids[0]), Reachability::Undirected, |_| {}).is_empty());
		graph.reset_visited(TraversalKind::Dfs);
		assert_eq!(dfs(&mut graph, Some(ids[1]), Reachability::Undirected, |_| {}).len(), 4);
	}
}
