//! Decision-tree capture for search visualization
//!
//! Every top-level search materializes the positions it evaluated, the moves
//! it pruned, and the principal-variation path into an explicit tree. Nodes
//! live in an arena indexed by [`NodeId`]; child and parent links are plain
//! indices, which keeps the upward back-reference traversal-only and free of
//! ownership cycles.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::tictactoe::Cell;

/// Index of a node within a [`DecisionTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What the search concluded about a node
///
/// A tagged variant instead of `score`/`pruned` sentinel fields: a pruned
/// placeholder can never carry a score, and a scored node was genuinely
/// evaluated by the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Created but not yet scored (only the root remains pending after search)
    Pending,
    /// Evaluated by recursion; subtree fully populated
    Scored(i32),
    /// Placeholder for a sibling move skipped by an alpha-beta cutoff
    Pruned,
}

/// A single position visited (or pruned) during search
#[derive(Debug, Clone)]
pub struct Node {
    /// Board after the move that produced this node; the root stores the
    /// board at the start of search
    pub board: [[Cell; 3]; 3],
    /// Whether this node's children are chosen to maximize or minimize
    pub is_maximizing: bool,
    /// The move that led to this node; absent at the root
    pub mv: Option<(usize, usize)>,
    /// How the search resolved this node
    pub outcome: Outcome,
    /// Set during the post-search pass that marks the principal variation
    pub is_best_move: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The node's score, if it was evaluated
    pub fn score(&self) -> Option<i32> {
        match self.outcome {
            Outcome::Scored(score) => Some(score),
            Outcome::Pending | Outcome::Pruned => None,
        }
    }

    /// Whether this node is a pruned placeholder
    pub fn pruned(&self) -> bool {
        self.outcome == Outcome::Pruned
    }
}

/// The recorded search tree, rebuilt from scratch on every top-level search
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl DecisionTree {
    /// The root node created by [`new`](Self::new)
    pub const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only a maximizing root for the given board
    pub fn new(board: [[Cell; 3]; 3]) -> Self {
        DecisionTree {
            nodes: vec![Node {
                board,
                is_maximizing: true,
                mv: None,
                outcome: Outcome::Pending,
                is_best_move: false,
                parent: None,
                children: Vec::new(),
            }],
            max_depth: 0,
        }
    }

    /// Append an evaluated-to-be child under `parent`; children alternate
    /// between maximizing and minimizing levels
    pub fn add_child(
        &mut self,
        parent: NodeId,
        board: [[Cell; 3]; 3],
        mv: (usize, usize),
    ) -> NodeId {
        self.push_node(parent, board, mv, Outcome::Pending)
    }

    /// Append a pruned placeholder under `parent`; it stays scoreless and
    /// childless so the cutoff remains visible in the recorded tree
    pub fn add_pruned(
        &mut self,
        parent: NodeId,
        board: [[Cell; 3]; 3],
        mv: (usize, usize),
    ) -> NodeId {
        self.push_node(parent, board, mv, Outcome::Pruned)
    }

    fn push_node(
        &mut self,
        parent: NodeId,
        board: [[Cell; 3]; 3],
        mv: (usize, usize),
        outcome: Outcome,
    ) -> NodeId {
        let is_maximizing = !self.nodes[parent.0].is_maximizing;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            board,
            is_maximizing,
            mv: Some(mv),
            outcome,
            is_best_move: false,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Record the score the recursion computed for `id`
    pub fn set_score(&mut self, id: NodeId, score: i32) {
        debug_assert!(
            !self.nodes[id.0].pruned(),
            "pruned placeholders are never scored"
        );
        self.nodes[id.0].outcome = Outcome::Scored(score);
    }

    /// Record a depth reached by the recursion
    pub fn observe_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Maximum recursion depth observed while building this tree
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of nodes in the arena, pruned placeholders included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node ids in creation order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Walk upward to the root using the parent back-references
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Mark the principal variation starting from a chosen root child.
    ///
    /// At each maximizing node the unpruned child with the strictly greatest
    /// score is selected, at each minimizing node the strictly least; ties
    /// keep the first-encountered child, matching the move-evaluation order.
    pub fn mark_best_path(&mut self, from: NodeId) {
        self.nodes[from.0].is_best_move = true;

        let mut current = from;
        loop {
            let maximizing = self.nodes[current.0].is_maximizing;
            let mut best: Option<(NodeId, i32)> = None;

            for &child in &self.nodes[current.0].children {
                let Some(score) = self.nodes[child.0].score() else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((_, incumbent)) if maximizing => score > incumbent,
                    Some((_, incumbent)) => score < incumbent,
                };
                if better {
                    best = Some((child, score));
                }
            }

            let Some((child, _)) = best else {
                return;
            };
            self.nodes[child.0].is_best_move = true;
            current = child;
        }
    }

    /// The marked principal-variation path, root child first
    pub fn principal_variation(&self) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Self::ROOT;
        loop {
            let next = self.nodes[current.0]
                .children
                .iter()
                .copied()
                .find(|id| self.nodes[id.0].is_best_move);
            match next {
                Some(id) => {
                    path.push(id);
                    current = id;
                }
                None => return path,
            }
        }
    }
}

/// Serializes to the wire shape consumed by the visualization frontend:
/// `{"root": Node, "maxDepth": n}` where each node carries camelCase fields,
/// `board` cells are `null`/`"X"`/`"O"`, `move` is `[row, col]` or `null`,
/// and `children` is omitted when empty.
impl Serialize for DecisionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "root",
            &NodeView {
                tree: self,
                id: Self::ROOT,
            },
        )?;
        map.serialize_entry("maxDepth", &self.max_depth)?;
        map.end()
    }
}

struct NodeView<'a> {
    tree: &'a DecisionTree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let entries = if node.children.is_empty() { 6 } else { 7 };

        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("board", &node.board)?;
        map.serialize_entry("isMaximizing", &node.is_maximizing)?;
        map.serialize_entry("score", &node.score())?;
        map.serialize_entry("pruned", &node.pruned())?;
        map.serialize_entry("isBestMove", &node.is_best_move)?;
        map.serialize_entry("move", &node.mv.map(|(row, col)| [row, col]))?;
        if !node.children.is_empty() {
            map.serialize_entry(
                "children",
                &ChildrenView {
                    tree: self.tree,
                    ids: &node.children,
                },
            )?;
        }
        map.end()
    }
}

struct ChildrenView<'a> {
    tree: &'a DecisionTree,
    ids: &'a [NodeId],
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                id,
            })?;
        }
        seq.end()
    }
}
