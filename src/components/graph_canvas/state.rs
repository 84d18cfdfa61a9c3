use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::graph::{Editor, EditorSettings, GraphEvent, NodeId, Point, TraversalKind};

pub const NODE_RADIUS: f64 = 24.0;
pub const HIT_RADIUS: f64 = 28.0;
/// Pointer travel (in px) before a press on a node turns into a drag.
const DRAG_SLOP: f64 = 2.0;
/// Seconds between revealing consecutive nodes of a traversal.
const REVEAL_STEP: f64 = 0.35;

pub const NODE_COLOR: &str = "#202020";
pub const SELECTED_COLOR: &str = "#d62728";
pub const DFS_COLOR: &str = "#1f77b4";
pub const BFS_COLOR: &str = "#2ca02c";

#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub down: bool,
	pub node: Option<NodeId>,
	pub dragging: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub highlight_t: f64,
}

/// Plays back traversal visits one node at a time.
#[derive(Clone, Debug, Default)]
pub struct RevealState {
	pending: VecDeque<(NodeId, TraversalKind)>,
	shown: HashSet<(NodeId, TraversalKind)>,
	clock: f64,
}

impl RevealState {
	pub fn is_shown(&self, node: NodeId, kind: TraversalKind) -> bool {
		self.shown.contains(&(node, kind))
	}

	fn reset(&mut self, kind: TraversalKind) {
		self.pending.retain(|(_, k)| *k != kind);
		self.shown.retain(|(_, k)| *k != kind);
	}

	fn forget(&mut self, node: NodeId) {
		self.pending.retain(|(n, _)| *n != node);
		self.shown.retain(|(n, _)| *n != node);
	}

	fn advance(&mut self, dt: f64) {
		if self.pending.is_empty() {
			self.clock = 0.0;
			return;
		}
		self.clock += dt;
		while self.clock >= REVEAL_STEP {
			self.clock -= REVEAL_STEP;
			match self.pending.pop_front() {
				Some(entry) => {
					self.shown.insert(entry);
				}
				None => break,
			}
		}
	}
}

/// Renderer-side view of the editor: node positions plus pointer, hover and animation state.
pub struct CanvasState {
	pub editor: Editor,
	pub positions: HashMap<NodeId, Point>,
	pub pointer: PointerState,
	pub hover: HoverState,
	pub reveal: RevealState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(settings: EditorSettings, width: f64, height: f64) -> Self {
		Self {
			editor: Editor::new(settings),
			positions: HashMap::new(),
			pointer: PointerState::default(),
			hover: HoverState::default(),
			reveal: RevealState::default(),
			width,
			height,
		}
	}

	pub fn position(&self, node: NodeId) -> Option<Point> {
		self.positions.get(&node).copied()
	}

	/// Topmost node under the point; later nodes are drawn above earlier ones.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeId> {
		self.editor
			.graph()
			.nodes()
			.filter_map(|node| Some((node.id(), self.position(node.id())?)))
			.filter(|(_, p)| ((p.x - x).powi(2) + (p.y - y).powi(2)).sqrt() < HIT_RADIUS)
			.last()
			.map(|(id, _)| id)
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let node = self.node_at_position(x, y);
		self.pointer = PointerState {
			down: true,
			node,
			dragging: false,
			start_x: x,
			start_y: y,
			node_start: node.and_then(|n| self.position(n)).unwrap_or_default(),
		};
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.pointer.down {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
			return;
		}
		let Some(node) = self.pointer.node else {
			return;
		};
		let (dx, dy) = (x - self.pointer.start_x, y - self.pointer.start_y);
		if !self.pointer.dragging && dx.abs() + dy.abs() < DRAG_SLOP {
			return;
		}
		if !self.editor.node_moved(node) {
			return;
		}
		self.pointer.dragging = true;
		let start = self.pointer.node_start;
		self.positions.insert(node, Point::new(start.x + dx, start.y + dy));
	}

	/// Completes a press: a drag ends silently, a tap goes to the editor.
	pub fn pointer_up(&mut self, x: f64, y: f64) {
		let pointer = std::mem::take(&mut self.pointer);
		if !pointer.down || pointer.dragging {
			return;
		}
		match pointer.node {
			Some(node) => self.editor.tap_node(node),
			None => {
				self.editor.tap_background(Point::new(x, y));
			}
		}
	}

	pub fn pointer_cancel(&mut self) {
		self.pointer = PointerState::default();
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.editor.highlight(node);
	}

	pub fn node_color(&self, node: NodeId) -> &'static str {
		let selected = self.editor.graph().node(node).is_some_and(|n| n.selected);
		if selected {
			SELECTED_COLOR
		} else if self.reveal.is_shown(node, TraversalKind::Bfs) {
			BFS_COLOR
		} else if self.reveal.is_shown(node, TraversalKind::Dfs) {
			DFS_COLOR
		} else {
			NODE_COLOR
		}
	}

	/// Applies queued editor notifications and advances animations.
	pub fn tick(&mut self, dt: f64) {
		for event in self.editor.drain_events() {
			self.apply(event);
		}
		self.reveal.advance(dt);

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (6.0 * dt).min(1.0);
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	fn apply(&mut self, event: GraphEvent) {
		match event {
			GraphEvent::NodeAdded { node, at } => {
				self.positions.insert(node, at);
			}
			GraphEvent::NodeRemoved(node) => {
				self.positions.remove(&node);
				self.reveal.forget(node);
				if self.hover.node == Some(node) {
					self.set_hover(None);
				}
			}
			GraphEvent::Visited { node, kind } => self.reveal.pending.push_back((node, kind)),
			GraphEvent::TraversalReset(kind) => self.reveal.reset(kind),
			GraphEvent::GraphCleared => {
				self.positions.clear();
				self.reveal = RevealState::default();
				self.hover = HoverState::default();
			}
			GraphEvent::GeometryChanged { .. } => {}
			other => debug!("{other:?}"),
		}
	}
}
