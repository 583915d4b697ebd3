pub mod element;
pub mod node;

pub use element::{ArrayElement, ArraySnapshot, ElementState};
pub use node::{Edge, GraphCanvas, GraphSnapshot, Node, NodeState};
