use std::fmt;

/// Opaque node handle, unique within the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

/// Opaque edge handle, unique within the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "n{}", self.0)
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "e{}", self.0)
	}
}

/// A location on the drawing surface. The core only forwards it to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset in canvas pixels.
	pub x: f64,
	/// Vertical offset in canvas pixels, growing downwards.
	pub y: f64,
}

impl Point {
	/// A point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Which traversal a visited flag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalKind {
	/// Depth-first.
	Dfs,
	/// Breadth-first.
	Bfs,
}

/// How traversals follow edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reachability {
	/// Any edge may be walked in either direction.
	#[default]
	Undirected,
	/// Only walk from an edge's start to its end.
	Directed,
}

/// A vertex with its display label and per-traversal state.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub(crate) id: NodeId,
	/// Text drawn inside the node.
	pub label: String,
	/// Reached by the last depth-first run.
	pub visited_dfs: bool,
	/// Reached by the last breadth-first run.
	pub visited_bfs: bool,
	/// Part of the editor's selection.
	pub selected: bool,
	/// Hovered, or a neighbour of the hovered node.
	pub highlighted: bool,
}

impl Node {
	pub(crate) fn new(id: NodeId, label: String) -> Self {
		Self {
			id,
			label,
			visited_dfs: false,
			visited_bfs: false,
			selected: false,
			highlighted: false,
		}
	}

	/// Handle of this node in the graph that owns it.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// The flag for `kind`; the two kinds never share state.
	pub fn visited(&self, kind: TraversalKind) -> bool {
		match kind {
			TraversalKind::Dfs => self.visited_dfs,
			TraversalKind::Bfs => self.visited_bfs,
		}
	}

	pub(crate) fn set_visited(&mut self, kind: TraversalKind, visited: bool) {
		match kind {
			TraversalKind::Dfs => self.visited_dfs = visited,
			TraversalKind::Bfs => self.visited_bfs = visited,
		}
	}
}

/// A weighted connection. `start`/`end` give the drawn direction; storage is symmetric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub(crate) id: EdgeId,
	pub(crate) start: NodeId,
	pub(crate) end: NodeId,
	/// Only meaningful while the editor is weighted.
	pub weight: i32,
}

impl Edge {
	/// Handle of this edge in the graph that owns it.
	pub fn id(&self) -> EdgeId {
		self.id
	}

	/// Tail of the arrow.
	pub fn start(&self) -> NodeId {
		self.start
	}

	/// Head of the arrow.
	pub fn end(&self) -> NodeId {
		self.end
	}

	/// Whether `node` is either endpoint.
	pub fn touches(&self, node: NodeId) -> bool {
		self.start == node || self.end == node
	}

	/// The endpoint opposite `node`, if `node` is an endpoint at all.
	pub fn other(&self, node: NodeId) -> Option<NodeId> {
		if self.start == node {
			Some(self.end)
		} else if self.end == node {
			Some(self.start)
		} else {
			None
		}
	}
}
