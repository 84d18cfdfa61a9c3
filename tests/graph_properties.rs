// Dependencies of the wasm app are linked into every test target.
#![allow(unused_crate_dependencies)]

use std::collections::{BTreeMap, HashSet};

use graph_sketch::graph::{Graph, NodeId, Reachability, traversal};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

#[derive(Clone, Debug)]
enum Op {
	AddNode,
	AddEdge(usize, usize),
	RemoveNode(usize),
	RemoveEdge(usize),
	RemoveAllEdges,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => Just(Op::AddNode),
		4 => (0..16usize, 0..16usize).prop_map(|(a, b)| Op::AddEdge(a, b)),
		1 => (0..16usize).prop_map(Op::RemoveNode),
		1 => (0..16usize).prop_map(Op::RemoveEdge),
		1 => Just(Op::RemoveAllEdges),
	]
}

fn apply(graph: &mut Graph, op: &Op, removed: &mut Vec<NodeId>) -> Result<(), TestCaseError> {
	let nodes = graph.node_ids();
	match *op {
		Op::AddNode => {
			graph.add_node("n");
		}
		Op::AddEdge(a, b) if !nodes.is_empty() => {
			let (a, b) = (nodes[a % nodes.len()], nodes[b % nodes.len()]);
			if a != b {
				graph
					.add_edge(a, b, 1)
					.map_err(|err| TestCaseError::fail(err.to_string()))?;
			}
		}
		Op::RemoveNode(i) if !nodes.is_empty() => {
			let id = nodes[i % nodes.len()];
			graph
				.remove_node(id)
				.map_err(|err| TestCaseError::fail(err.to_string()))?;
			removed.push(id);
		}
		Op::RemoveEdge(i) => {
			let edges: Vec<_> = graph.edges().map(|e| e.id()).collect();
			if !edges.is_empty() {
				graph
					.remove_edge(edges[i % edges.len()])
					.map_err(|err| TestCaseError::fail(err.to_string()))?;
			}
		}
		Op::RemoveAllEdges => graph.remove_all_edges(),
		_ => {}
	}
	Ok(())
}

/// Hop distances from `root` by repeated relaxation, independent of the traversal code.
fn distances(graph: &Graph, root: NodeId) -> BTreeMap<NodeId, usize> {
	let mut dist = BTreeMap::from([(root, 0usize)]);
	for _ in 0..graph.node_count() {
		for edge in graph.edges() {
			for (from, to) in [(edge.start(), edge.end()), (edge.end(), edge.start())] {
				if let Some(&d) = dist.get(&from) {
					let entry = dist.entry(to).or_insert(usize::MAX);
					*entry = (*entry).min(d + 1);
				}
			}
		}
	}
	dist
}

fn random_graph(n: usize, extra: &[(usize, usize)], connected: bool) -> (Graph, Vec<NodeId>) {
	let mut graph = Graph::new();
	let ids: Vec<_> = (0..n).map(|i| graph.add_node(i.to_string())).collect();
	if connected {
		for i in 1..n {
			let parent = extra.get(i).map_or(0, |(p, _)| p % i);
			if !graph.is_adjacent(ids[i], ids[parent]) {
				let _ = graph.add_edge(ids[parent], ids[i], 1);
			}
		}
	}
	for &(a, b) in extra {
		let (a, b) = (ids[a % n], ids[b % n]);
		if a != b && !graph.is_adjacent(a, b) {
			let _ = graph.add_edge(a, b, 1);
		}
	}
	(graph, ids)
}

proptest! {
	#[test]
	fn prop_mutations_keep_indices_consistent(ops in prop::collection::vec(op(), 1..60)) {
		let mut graph = Graph::new();
		let mut removed = Vec::new();
		for op in &ops {
			apply(&mut graph, op, &mut removed)?;
			graph.check_invariants().map_err(TestCaseError::fail)?;
			for edge in graph.edges() {
				prop_assert!(graph.adjacency(edge.start()).is_some_and(|n| n.contains(&edge.end())));
				prop_assert!(graph.adjacency(edge.end()).is_some_and(|n| n.contains(&edge.start())));
			}
			for gone in &removed {
				prop_assert!(!graph.contains_node(*gone));
				prop_assert!(graph.edges().all(|e| !e.touches(*gone)));
				let unreferenced = graph
					.node_ids()
					.iter()
					.all(|n| graph.adjacency(*n).is_some_and(|adj| !adj.contains(gone)));
				prop_assert!(unreferenced, "{} still listed as a neighbour", gone);
			}
		}
	}

	#[test]
	fn prop_dfs_visits_connected_graph_once(
		n in 1..12usize,
		extra in prop::collection::vec((0..12usize, 0..12usize), 0..20),
		root in 0..12usize,
	) {
		let (mut graph, ids) = random_graph(n, &extra, true);
		let order = traversal::dfs(&mut graph, Some(ids[root % n]), Reachability::Undirected, |_| {});
		prop_assert_eq!(order.len(), n);
		let unique: HashSet<_> = order.iter().collect();
		prop_assert_eq!(unique.len(), n);
		prop_assert!(graph.nodes().all(|node| node.visited_dfs && !node.visited_bfs));
	}

	#[test]
	fn prop_bfs_is_level_ordered(
		n in 1..12usize,
		extra in prop::collection::vec((0..12usize, 0..12usize), 0..20),
		root in 0..12usize,
	) {
		let (mut graph, ids) = random_graph(n, &extra, false);
		let root = ids[root % n];
		let dist = distances(&graph, root);
		let mut hooked = Vec::new();
		let order = traversal::bfs(&mut graph, Some(root), Reachability::Undirected, |v| hooked.push(v));
		prop_assert_eq!(&order, &hooked);
		prop_assert_eq!(order.len(), dist.len());
		let levels: Vec<_> = order.iter().map(|n| dist[n]).collect();
		prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]), "levels {:?}", levels);
	}

	#[test]
	fn prop_remove_all_edges_is_idempotent(
		n in 1..10usize,
		extra in prop::collection::vec((0..10usize, 0..10usize), 0..20),
	) {
		let (mut graph, ids) = random_graph(n, &extra, true);
		graph.remove_all_edges();
		let once: Vec<_> = ids.iter().map(|id| graph.adjacency(*id).cloned()).collect();
		graph.remove_all_edges();
		let twice: Vec<_> = ids.iter().map(|id| graph.adjacency(*id).cloned()).collect();
		prop_assert_eq!(once, twice);
		prop_assert_eq!(graph.edge_count(), 0);
		prop_assert_eq!(graph.node_ids(), ids);
	}
}
