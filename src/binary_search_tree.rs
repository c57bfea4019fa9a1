use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::Key;

/// Highlight marker appended to the rendered node whose key matches.
const HIGHLIGHT_MARKER: &str = " 🟢";

/// Index of a node inside the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    id: Uuid,
    key: Key,
    left: Option<NodeId>,
    right: Option<NodeId>,
    // back-reference only, the parent owns us through left/right
    parent: Option<NodeId>,
    depth: usize,
    child_count: usize,
}

impl TreeNode {
    fn new(key: Key) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            left: None,
            right: None,
            parent: None,
            depth: 1,
            child_count: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 1 for the root, parent depth + 1 otherwise.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of insertions recorded at this node.
    ///
    /// For an inner node this is the number of direct children. The root
    /// additionally records every insertion below it, so its count equals
    /// the size of the tree minus one.
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn has_child(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    pub fn has_left_child(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right_child(&self) -> bool {
        self.right.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Unbalanced binary search tree over [`Key`]s.
///
/// Nodes live in an arena owned by the tree and refer to each other by
/// [`NodeId`]. The shape depends only on insertion order and equal keys are
/// dropped on insert.
#[derive(Debug, Default, Clone)]
pub struct BinarySearchTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Create a tree holding a single root node.
    pub fn with_root(key: Key) -> Self {
        Self {
            nodes: vec![TreeNode::new(key)],
            root: Some(NodeId(0)),
        }
    }

    /// Build a tree by inserting `keys` in the given order.
    pub fn new_with_keys(keys: &[Key]) -> Self {
        let mut tree = Self::new();
        for &key in keys {
            tree.insert(key);
        }
        debug!(requested = keys.len(), stored = tree.len(), "built tree from keys");
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root.map(|id| &self.nodes[id.0])
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Insert `key`, returning the new node or `None` if the key is already present.
    pub fn insert(&mut self, key: Key) -> Option<NodeId> {
        match self.root {
            None => {
                self.nodes.push(TreeNode::new(key));
                let root = NodeId(self.nodes.len() - 1);
                self.root = Some(root);
                trace!(key, "created root");
                Some(root)
            }
            Some(root) => self.insert_recursive(root, key),
        }
    }

    fn insert_recursive(&mut self, at: NodeId, key: Key) -> Option<NodeId> {
        let (node_key, left, right) = {
            let node = &self.nodes[at.0];
            (node.key, node.left, node.right)
        };

        match key.cmp(&node_key) {
            Ordering::Less => match left {
                Some(left) => self.insert_recursive(left, key),
                None => Some(self.attach(at, Side::Left, key)),
            },
            Ordering::Greater => match right {
                Some(right) => self.insert_recursive(right, key),
                None => Some(self.attach(at, Side::Right, key)),
            },
            Ordering::Equal => {
                trace!(key, "duplicate key dropped");
                None
            }
        }
    }

    fn attach(&mut self, parent: NodeId, side: Side, key: Key) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;

        self.nodes.push(TreeNode {
            parent: Some(parent),
            depth,
            ..TreeNode::new(key)
        });

        let parent_node = &mut self.nodes[parent.0];
        match side {
            Side::Left => parent_node.left = Some(id),
            Side::Right => parent_node.right = Some(id),
        }
        parent_node.child_count += 1;

        // the root counts every insertion, but only once when it is the parent
        let root = self.root_of(parent);
        if root != parent {
            self.nodes[root.0].child_count += 1;
        }

        trace!(key, depth, ?side, parent_key = self.nodes[parent.0].key, "attached node");
        id
    }

    /// Walk parent references from `id` up to the root.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current
    }

    /// Whether the parent of `id` has a right child other than `id` itself.
    ///
    /// Always false for the root.
    pub fn has_right_sibling(&self, id: NodeId) -> bool {
        self.nodes[id.0]
            .parent
            .and_then(|parent| self.nodes[parent.0].right)
            .is_some_and(|right| right != id)
    }

    /// Search for `target` starting at the root.
    pub fn find(&self, target: Key) -> Option<NodeId> {
        let root = self.root?;
        self.find_from(root, target)
    }

    /// Search for `target` in the subtree rooted at `start`.
    pub fn find_from(&self, start: NodeId, target: Key) -> Option<NodeId> {
        let node = &self.nodes[start.0];
        match target.cmp(&node.key) {
            Ordering::Equal => Some(start),
            Ordering::Less => node.left.and_then(|left| self.find_from(left, target)),
            Ordering::Greater => node.right.and_then(|right| self.find_from(right, target)),
        }
    }

    pub fn contains(&self, target: Key) -> bool {
        self.find(target).is_some()
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        if let Some(root) = self.root {
            self.in_order_recursive(root, &mut keys);
        }
        keys
    }

    fn in_order_recursive(&self, id: NodeId, keys: &mut Vec<Key>) {
        let node = &self.nodes[id.0];
        if let Some(left) = node.left {
            self.in_order_recursive(left, keys);
        }
        keys.push(node.key);
        if let Some(right) = node.right {
            self.in_order_recursive(right, keys);
        }
    }

    /// Keys in pre-order: node, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        if let Some(root) = self.root {
            self.pre_order_recursive(root, &mut keys);
        }
        keys
    }

    fn pre_order_recursive(&self, id: NodeId, keys: &mut Vec<Key>) {
        let node = &self.nodes[id.0];
        keys.push(node.key);
        if let Some(left) = node.left {
            self.pre_order_recursive(left, keys);
        }
        if let Some(right) = node.right {
            self.pre_order_recursive(right, keys);
        }
    }

    /// Depth-first value dump.
    ///
    /// Unlike [`pre_order`](Self::pre_order), the right subtree of a node is
    /// only visited when that node also has a left child. A node with a right
    /// child but no left child ends the walk of its branch.
    pub fn df_values(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        if let Some(root) = self.root {
            self.df_recursive(root, &mut |key: Key, _: bool| keys.push(key));
        }
        keys
    }

    /// Render the depth-first value dump: `"{key} "` per visited node, with a
    /// line break after each node that has no left child.
    pub fn write_df_values<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let mut result = Ok(());
        if let Some(root) = self.root {
            self.df_recursive(root, &mut |key: Key, has_left: bool| {
                if result.is_ok() {
                    result = if has_left {
                        write!(out, "{key} ")
                    } else {
                        writeln!(out, "{key} ")
                    };
                }
            });
        }
        result
    }

    fn df_recursive<F: FnMut(Key, bool)>(&self, id: NodeId, visit: &mut F) {
        let node = &self.nodes[id.0];
        visit(node.key, node.left.is_some());
        if let Some(left) = node.left {
            self.df_recursive(left, visit);
            if let Some(right) = node.right {
                self.df_recursive(right, visit);
            }
        }
    }

    /// Render the tree with box-drawing connectors, marking the node whose
    /// key equals `highlight`.
    pub fn render(&self, highlight: Option<Key>) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_tree(&mut out, highlight);
        out
    }

    pub fn write_tree<W: fmt::Write>(&self, out: &mut W, highlight: Option<Key>) -> fmt::Result {
        match self.root {
            Some(root) => self.write_subtree(out, root, "", false, highlight),
            None => Ok(()),
        }
    }

    fn write_subtree<W: fmt::Write>(
        &self,
        out: &mut W,
        id: NodeId,
        connector: &str,
        is_left: bool,
        highlight: Option<Key>,
    ) -> fmt::Result {
        let node = &self.nodes[id.0];
        let (prefix, child_prefix) = if is_left && self.has_right_sibling(id) {
            ("├── ", "│   ")
        } else {
            ("└── ", "    ")
        };

        write!(out, "{connector}{prefix}{}", node.key)?;
        if highlight == Some(node.key) {
            out.write_str(HIGHLIGHT_MARKER)?;
        }
        writeln!(out)?;

        if node.has_child() {
            let child_connector = format!("{connector}{child_prefix}");
            if let Some(left) = node.left {
                self.write_subtree(out, left, &child_connector, true, highlight)?;
            }
            if let Some(right) = node.right {
                self.write_subtree(out, right, &child_connector, false, highlight)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for BinarySearchTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root() {
        let tree = BinarySearchTree::with_root(7);
        let root = tree.root_node().unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(root.key(), 7);
        assert_eq!(root.depth(), 1);
        assert_eq!(root.child_count(), 0);
        assert!(root.is_root());
        assert!(!root.has_child());
    }

    #[test]
    fn test_attach_bookkeeping() {
        let mut tree = BinarySearchTree::with_root(10);
        let five = tree.insert(5).unwrap();
        let one = tree.insert(1).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree.node(five).parent(), Some(root));
        assert_eq!(tree.node(one).parent(), Some(five));
        assert_eq!(tree.node(one).depth(), 3);

        // direct parent counts its own child, root counts everything once
        assert_eq!(tree.node(five).child_count(), 1);
        assert_eq!(tree.node(root).child_count(), 2);
    }

    #[test]
    fn test_root_of() {
        let tree = BinarySearchTree::new_with_keys(&[50, 25, 75, 10, 30, 5]);
        let root = tree.root().unwrap();

        for key in [50, 25, 75, 10, 30, 5] {
            let id = tree.find(key).unwrap();
            assert_eq!(tree.root_of(id), root);
        }
    }

    #[test]
    fn test_has_right_sibling() {
        let tree = BinarySearchTree::new_with_keys(&[5, 3, 8, 1]);

        let root = tree.root().unwrap();
        let three = tree.find(3).unwrap();
        let eight = tree.find(8).unwrap();
        let one = tree.find(1).unwrap();

        assert!(!tree.has_right_sibling(root));
        assert!(tree.has_right_sibling(three));
        // a right child is not its own sibling
        assert!(!tree.has_right_sibling(eight));
        assert!(!tree.has_right_sibling(one));
    }

    #[test]
    fn test_node_ids_unique() {
        let tree = BinarySearchTree::new_with_keys(&[4, 2, 6, 1, 3, 5, 7]);
        let mut ids: Vec<Uuid> = tree.nodes.iter().map(TreeNode::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), tree.len());
    }
}
