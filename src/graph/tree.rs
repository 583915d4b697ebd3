use std::collections::HashMap;

use crate::graph::input::TreeInput;
use crate::graph::traits::Graph;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
struct TreeNode {
    id: String,
    x: f64,
    y: f64,
    left: Option<usize>,
    right: Option<usize>,
}

/// A binary tree with fixed left/right children.
///
/// As a [`Graph`] it exposes parent -> child edges of weight 1, left first.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
    root: Option<usize>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; the first node added becomes the root
    pub fn add_node(&mut self, id: &str, x: f64, y: f64) -> usize {
        if let Some(&existing) = self.index.get(id) {
            self.nodes[existing].x = x;
            self.nodes[existing].y = y;
            return existing;
        }

        let new_index = self.nodes.len();
        self.nodes.push(TreeNode {
            id: id.to_string(),
            x,
            y,
            left: None,
            right: None,
        });
        self.index.insert(id.to_string(), new_index);
        if self.root.is_none() {
            self.root = Some(new_index);
        }
        new_index
    }

    pub fn set_root(&mut self, id: &str) -> Result<()> {
        self.root = Some(self.require(id)?);
        Ok(())
    }

    pub fn set_children(&mut self, parent: &str, left: Option<&str>, right: Option<&str>) -> Result<()> {
        let parent = self.require(parent)?;
        let left = left.map(|id| self.require(id)).transpose()?;
        let right = right.map(|id| self.require(id)).transpose()?;
        self.nodes[parent].left = left;
        self.nodes[parent].right = right;
        Ok(())
    }

    /// Builds and validates a tree: every node has at most one parent, the
    /// root is nobody's child, and no parent chain loops back on itself.
    pub fn from_input(input: &TreeInput) -> Result<Self> {
        let mut tree = BinaryTree::new();
        for node in &input.nodes {
            tree.add_node(&node.id, node.x, node.y);
        }
        for node in &input.nodes {
            tree.set_children(&node.id, node.left.as_deref(), node.right.as_deref())?;
        }
        if let Some(root) = &input.root {
            tree.set_root(root)?;
        }
        tree.validate()?;
        Ok(tree)
    }

    fn validate(&self) -> Result<()> {
        let mut parent_of = vec![None; self.nodes.len()];
        for (parent, node) in self.nodes.iter().enumerate() {
            for child in [node.left, node.right].into_iter().flatten() {
                if Some(child) == self.root {
                    return Err(Error::InvalidInput(format!(
                        "root {} cannot be a child of {}",
                        self.nodes[child].id, node.id
                    )));
                }
                if let Some(other) = parent_of[child].replace(parent) {
                    return Err(Error::InvalidInput(format!(
                        "node {} has two parents: {} and {}",
                        self.nodes[child].id, self.nodes[other].id, node.id
                    )));
                }
            }
        }

        // with at most one parent per node, a cycle is a parent chain longer than the tree
        for start in 0..self.nodes.len() {
            let mut node = start;
            let mut hops = 0;
            while let Some(parent) = parent_of[node] {
                hops += 1;
                if hops > self.nodes.len() {
                    return Err(Error::InvalidInput(format!(
                        "node {} is part of a cycle",
                        self.nodes[start].id
                    )));
                }
                node = parent;
            }
        }
        Ok(())
    }

    pub fn require(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn left(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.left)
    }

    pub fn right(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.right)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Graph<f64> for BinaryTree {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.left.is_some() as usize + n.right.is_some() as usize)
            .sum()
    }

    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match self.nodes.get(node) {
            Some(n) => Box::new([n.left, n.right].into_iter().flatten().map(|c| (c, 1.0))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (usize, usize, f64)> + '_> {
        Box::new(self.nodes.iter().enumerate().flat_map(|(parent, n)| {
            [n.left, n.right]
                .into_iter()
                .flatten()
                .map(move |child| (parent, child, 1.0))
        }))
    }

    fn node_id(&self, node: usize) -> Option<&str> {
        self.nodes.get(node).map(|n| n.id.as_str())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn position(&self, node: usize) -> Option<(f64, f64)> {
        self.nodes.get(node).map(|n| (n.x, n.y))
    }
}
