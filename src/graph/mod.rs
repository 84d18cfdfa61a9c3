//! Graph model, traversal engine and editing controller, independent of any rendering.

mod editor;
mod error;
mod model;
pub mod traversal;
mod types;

pub use editor::{Editor, EditorMode, EditorSettings, GraphEvent};
pub use error::{GraphError, Result};
pub use model::Graph;
pub use types::{Edge, EdgeId, Node, NodeId, Point, Reachability, TraversalKind};
