//! The editing state machine that sits between UI gestures and [`Graph`].
//!
//! Invalid requests (self edges, duplicate edges, missing targets) are absorbed as no-ops.
//! Everything the renderer needs to react to is queued as a [`GraphEvent`] and drained once
//! per frame.

use log::{debug, info, warn};

use super::error::GraphError;
use super::model::Graph;
use super::traversal;
use super::types::{Edge, EdgeId, NodeId, Point, Reachability, TraversalKind};

/// What taps on the canvas do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
	/// Background taps create nodes.
	#[default]
	AddNodes,
	/// Tapping two nodes connects them.
	AddEdges,
	/// Node taps toggle selection.
	Select,
	/// Nothing reacts, not even drags.
	ViewOnly,
}

/// Startup configuration for an [`Editor`].
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSettings {
	/// Mode the editor starts in.
	pub initial_mode: EditorMode,
	/// Draw arrowheads.
	pub directed: bool,
	/// Show and edit weights.
	pub weighted: bool,
	/// Weight given to every new edge.
	pub default_weight: i32,
	/// Which edges traversals may walk.
	pub traversal_reach: Reachability,
	/// Lower bound for edge weights; `None` lets them go negative.
	pub min_weight: Option<i32>,
}

impl Default for EditorSettings {
	fn default() -> Self {
		Self {
			initial_mode: EditorMode::AddNodes,
			directed: true,
			weighted: true,
			default_weight: 1,
			traversal_reach: Reachability::Undirected,
			min_weight: None,
		}
	}
}

/// Notifications for the rendering side.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// A node was created where the user tapped.
	NodeAdded {
		/// The new node.
		node: NodeId,
		/// Where it should be drawn.
		at: Point,
	},
	/// A node is gone; its edges were reported first.
	NodeRemoved(NodeId),
	/// An edge was created.
	EdgeAdded(EdgeId),
	/// An edge is gone.
	EdgeRemoved(EdgeId),
	/// A node entered or left the selection.
	SelectionChanged {
		/// The toggled node.
		node: NodeId,
		/// Its new state.
		selected: bool,
	},
	/// `node` moved; these edges need redrawing.
	GeometryChanged {
		/// The dragged node.
		node: NodeId,
		/// Edges touching it.
		edges: Vec<EdgeId>,
	},
	/// A traversal reached `node`, in visit order.
	Visited {
		/// The visited node.
		node: NodeId,
		/// Which traversal visited it.
		kind: TraversalKind,
	},
	/// Every flag of this kind was cleared.
	TraversalReset(TraversalKind),
	/// An edge weight was edited.
	WeightChanged {
		/// The edited edge.
		edge: EdgeId,
		/// Its weight after clamping.
		weight: i32,
	},
	/// Weights were shown or hidden.
	WeightedChanged(bool),
	/// Arrowheads were turned on or off.
	DirectedChanged(bool),
	/// The editor switched mode.
	ModeChanged(EditorMode),
	/// The graph was replaced by an empty one; drop anything keyed by old ids.
	GraphCleared,
}

/// Owns the graph and turns gestures into graph edits, keeping selection and mode state.
#[derive(Debug)]
pub struct Editor {
	graph: Graph,
	settings: EditorSettings,
	mode: EditorMode,
	directed: bool,
	weighted: bool,
	dfs_active: bool,
	bfs_active: bool,
	selection: Vec<NodeId>,
	next_label: u32,
	events: Vec<GraphEvent>,
}

impl Default for Editor {
	fn default() -> Self {
		Self::new(EditorSettings::default())
	}
}

impl Editor {
	/// An empty graph in `settings.initial_mode`.
	pub fn new(settings: EditorSettings) -> Self {
		Self {
			graph: Graph::new(),
			mode: settings.initial_mode,
			directed: settings.directed,
			weighted: settings.weighted,
			dfs_active: false,
			bfs_active: false,
			selection: Vec::new(),
			next_label: 1,
			events: Vec::new(),
			settings,
		}
	}

	/// Read-only view of the graph; edits go through the editor.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Current interaction mode.
	pub fn mode(&self) -> EditorMode {
		self.mode
	}

	/// Whether edges are drawn with arrowheads.
	pub fn is_directed(&self) -> bool {
		self.directed
	}

	/// Whether weights are shown and editable.
	pub fn is_weighted(&self) -> bool {
		self.weighted
	}

	/// Whether the last toggle of `kind` switched it on and it ran.
	pub fn traversal_active(&self, kind: TraversalKind) -> bool {
		match kind {
			TraversalKind::Dfs => self.dfs_active,
			TraversalKind::Bfs => self.bfs_active,
		}
	}

	/// Selected nodes, oldest first.
	pub fn selection(&self) -> &[NodeId] {
		&self.selection
	}

	/// The edge joining exactly two selected nodes, in either direction.
	pub fn selected_edge(&self) -> Option<&Edge> {
		match self.selection.as_slice() {
			[a, b] => self.graph.find_edge(*a, *b, false),
			_ => None,
		}
	}

	/// Takes every notification queued since the last call.
	pub fn drain_events(&mut self) -> Vec<GraphEvent> {
		std::mem::take(&mut self.events)
	}

	/// Switches mode. Leaving [`EditorMode::Select`] clears the selection.
	pub fn set_mode(&mut self, mode: EditorMode) {
		if self.mode == mode {
			return;
		}
		if self.mode == EditorMode::Select {
			self.deselect_all();
		}
		self.mode = mode;
		debug!("mode -> {mode:?}");
		self.events.push(GraphEvent::ModeChanged(mode));
	}

	/// Enters select mode from an editing mode; leaves it (or view-only) back to adding nodes.
	pub fn toggle_select_mode(&mut self) {
		match self.mode {
			EditorMode::AddNodes | EditorMode::AddEdges => self.set_mode(EditorMode::Select),
			EditorMode::Select | EditorMode::ViewOnly => {
				self.deselect_all();
				self.set_mode(EditorMode::AddNodes);
			}
		}
	}

	/// Turns arrowheads on or off. Traversal reach is a separate setting.
	pub fn set_directed(&mut self, directed: bool) {
		self.directed = directed;
		self.events.push(GraphEvent::DirectedChanged(directed));
	}

	/// Shows or hides weights; while hidden, [`Editor::change_weight`] does nothing.
	pub fn set_weighted(&mut self, weighted: bool) {
		self.weighted = weighted;
		self.events.push(GraphEvent::WeightedChanged(weighted));
	}

	/// Applies to the next traversal run.
	pub fn set_traversal_reach(&mut self, reach: Reachability) {
		self.settings.traversal_reach = reach;
	}

	/// Creates a labelled node regardless of mode.
	pub fn add_node(&mut self, at: Point) -> NodeId {
		let node = self.graph.add_node(self.next_label.to_string());
		self.next_label += 1;
		self.events.push(GraphEvent::NodeAdded { node, at });
		node
	}

	/// A tap on empty canvas; only adds a node in [`EditorMode::AddNodes`].
	pub fn tap_background(&mut self, at: Point) -> Option<NodeId> {
		(self.mode == EditorMode::AddNodes).then(|| self.add_node(at))
	}

	/// A tap on a node: toggles its selection, and in edge mode connects a completed pair.
	pub fn tap_node(&mut self, node: NodeId) {
		if !matches!(self.mode, EditorMode::Select | EditorMode::AddEdges) {
			return;
		}
		self.select(node);
		if self.mode == EditorMode::AddEdges {
			if let [a, b] = *self.selection.as_slice() {
				self.add_edge_between(a, b);
			}
		}
	}

	/// Reports a drag; returns false when dragging is not allowed.
	pub fn node_moved(&mut self, node: NodeId) -> bool {
		if self.mode == EditorMode::ViewOnly || !self.graph.contains_node(node) {
			return false;
		}
		let edges = self.graph.incident_edges(node).collect();
		self.events.push(GraphEvent::GeometryChanged { node, edges });
		true
	}

	/// Connects two distinct, non-adjacent nodes, then clears the selection either way.
	pub fn add_edge_between(&mut self, a: NodeId, b: NodeId) -> Option<EdgeId> {
		let edge = if a == b || self.graph.is_adjacent(a, b) {
			debug!("ignoring edge {a} -> {b}");
			None
		} else {
			match self.graph.add_edge(a, b, self.settings.default_weight) {
				Ok(edge) => {
					self.events.push(GraphEvent::EdgeAdded(edge));
					Some(edge)
				}
				Err(err) => {
					warn!("edge {a} -> {b} rejected: {err}");
					None
				}
			}
		};
		self.deselect_all();
		edge
	}

	/// Toggles `node` in or out of the selection.
	pub fn select(&mut self, node: NodeId) {
		let Some(entry) = self.graph.node_mut(node) else {
			return;
		};
		entry.selected = !entry.selected;
		let selected = entry.selected;
		if selected {
			self.selection.push(node);
		} else {
			self.selection.retain(|n| *n != node);
		}
		self.events.push(GraphEvent::SelectionChanged { node, selected });
	}

	/// Clears the selection, reporting each node that was selected.
	pub fn deselect_all(&mut self) {
		for node in std::mem::take(&mut self.selection) {
			if let Some(entry) = self.graph.node_mut(node) {
				entry.selected = false;
			}
			self.events.push(GraphEvent::SelectionChanged {
				node,
				selected: false,
			});
		}
	}

	/// Removes `node` with its edges; a missing node is ignored.
	pub fn delete_node(&mut self, node: NodeId) {
		let edges: Vec<_> = self.graph.incident_edges(node).collect();
		match self.graph.remove_node(node) {
			Ok(Some(_)) => {
				self.selection.retain(|n| *n != node);
				self.events.extend(edges.into_iter().map(GraphEvent::EdgeRemoved));
				self.events.push(GraphEvent::NodeRemoved(node));
			}
			Ok(None) => debug!("node {node} already gone"),
			Err(err) => absorb(err),
		}
	}

	/// Deletes every selected node along with its edges.
	pub fn delete_selected_nodes(&mut self) {
		for node in std::mem::take(&mut self.selection) {
			self.delete_node(node);
		}
	}

	/// Removes `edge`; a missing edge is ignored.
	pub fn delete_edge(&mut self, edge: EdgeId) {
		match self.graph.remove_edge(edge) {
			Ok(Some(_)) => self.events.push(GraphEvent::EdgeRemoved(edge)),
			Ok(None) => debug!("edge {edge} already gone"),
			Err(err) => absorb(err),
		}
	}

	/// Removes the edge joining the two selected nodes, if there is one.
	pub fn delete_selected_edge(&mut self) {
		if let Some(edge) = self.selected_edge().map(Edge::id) {
			self.delete_edge(edge);
		}
	}

	/// Removes every edge and keeps the nodes.
	pub fn delete_all_edges(&mut self) {
		let edges: Vec<_> = self.graph.edges().map(Edge::id).collect();
		self.graph.remove_all_edges();
		self.events.extend(edges.into_iter().map(GraphEvent::EdgeRemoved));
	}

	/// Adds `delta` to the selected edge's weight. Ignored while the graph is unweighted.
	pub fn change_weight(&mut self, delta: i32) -> Option<i32> {
		if !self.weighted {
			return None;
		}
		let id = self.selected_edge().map(Edge::id)?;
		let floor = self.settings.min_weight;
		let edge = self.graph.edge_mut(id)?;
		let weight = edge.weight.saturating_add(delta);
		edge.weight = floor.map_or(weight, |min| weight.max(min));
		let weight = edge.weight;
		self.events.push(GraphEvent::WeightChanged { edge: id, weight });
		Some(weight)
	}

	/// Switches a traversal on (runs it from the first selected node) or off (hard reset).
	///
	/// Switching on with nothing selected changes nothing: flags, active state and the
	/// event queue are left as they were.
	pub fn set_traversal(&mut self, kind: TraversalKind, on: bool) -> Vec<NodeId> {
		let root = self.selection.first().copied();
		if on && root.is_none() {
			debug!("{kind:?} requested with nothing selected");
			return Vec::new();
		}
		match kind {
			TraversalKind::Dfs => self.dfs_active = on,
			TraversalKind::Bfs => self.bfs_active = on,
		}
		self.graph.reset_visited(kind);
		if !on {
			self.events.push(GraphEvent::TraversalReset(kind));
			return Vec::new();
		}

		let reach = self.settings.traversal_reach;
		let events = &mut self.events;
		let hook = |node| events.push(GraphEvent::Visited { node, kind });
		match kind {
			TraversalKind::Dfs => traversal::dfs(&mut self.graph, root, reach, hook),
			TraversalKind::Bfs => traversal::bfs(&mut self.graph, root, reach, hook),
		}
	}

	/// Highlights `node` and its neighbours, clearing any previous highlight.
	pub fn highlight(&mut self, node: Option<NodeId>) {
		let lit = node
			.map(|n| {
				let mut lit = self.graph.neighbors(n, Reachability::Undirected);
				lit.push(n);
				lit
			})
			.unwrap_or_default();
		for id in self.graph.node_ids() {
			if let Some(entry) = self.graph.node_mut(id) {
				entry.highlighted = lit.contains(&id);
			}
		}
	}

	/// Deletes every node (and so every edge) and starts over with an empty graph.
	///
	/// The fresh graph issues ids from zero again, so a [`NodeId`] or [`EdgeId`] kept from
	/// before the clear may name an unrelated new node or edge. Listeners should drop
	/// everything keyed by id on [`GraphEvent::GraphCleared`].
	pub fn clear_graph(&mut self) {
		for node in self.graph.node_ids() {
			self.delete_node(node);
		}
		self.deselect_all();
		self.graph = Graph::new();
		self.next_label = 1;
		self.dfs_active = false;
		self.bfs_active = false;
		info!("graph cleared");
		self.events.push(GraphEvent::GraphCleared);
	}
}

fn absorb(err: GraphError) {
	warn!("ignored invalid graph request: {err}");
}
