pub mod generators;
pub mod input;
pub mod traits;
pub mod tree;
pub mod undirected;

pub use input::{EdgeInput, GraphInput, NodeInput, TreeInput, TreeNodeInput};
pub use traits::{Graph, MutableGraph};
pub use tree::BinaryTree;
pub use undirected::UndirectedGraph;
