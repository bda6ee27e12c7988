//! Monte Carlo Tree Search with UCB1 selection and uniform random rollouts.
//!
//! Each iteration runs four phases:
//! 1. **Selection**: descend through fully expanded nodes by UCB1
//! 2. **Expansion**: add the first untried column of the reached node
//! 3. **Simulation**: play random columns until the game ends
//! 4. **Backpropagation**: credit the result to every node on the path
//!
//! Nodes live in an arena owned by the search; the parent link is an index,
//! so the tree never forms ownership cycles. Every node stores its reward from
//! the point of view of the side whose move produced it, which lets a parent
//! simply maximise over its children.

use crate::core::{Board, GameResult, Side, COLUMNS};
use crate::logic::{classify, classify_after_move};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// One reached game state.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    /// Side whose move produced this state (for the root: the side that is
    /// not to move).
    pub mover: Side,
    /// Column played from the parent; meaningless on the root.
    pub column: usize,
    pub parent: NodeId,
    pub children: Vec<NodeId>,
    /// Starts at 1: a node counts as visited once when created.
    pub visit_count: u32,
    pub total_reward: f64,
    /// Terminal classification, computed once at creation.
    pub result: GameResult,
}

impl SearchNode {
    fn new(board: Board, mover: Side, column: usize, parent: NodeId, result: GameResult) -> Self {
        Self {
            board,
            mover,
            column,
            parent,
            children: Vec::new(),
            visit_count: 1,
            total_reward: 0.0,
            result,
        }
    }

    #[inline]
    pub fn mean_reward(&self) -> f64 {
        self.total_reward / self.visit_count as f64
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }
}

/// Arena of search nodes; the root is always `NodeId(0)`.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new(board: Board, side_to_move: Side) -> Self {
        let root = SearchNode::new(
            board,
            side_to_move.opponent(),
            0,
            NodeId::NONE,
            classify(&board),
        );
        Self { nodes: vec![root] }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lowest legal column of `id` that has no child yet.
    fn untried_column(&self, id: NodeId) -> Option<usize> {
        let node = self.get(id);
        let mut tried = [false; COLUMNS];
        for &child in &node.children {
            tried[self.get(child).column] = true;
        }
        node.board
            .legal_columns()
            .into_iter()
            .find(|&col| !tried[col])
    }

    fn add_child(&mut self, parent: NodeId, column: usize, mover: Side) -> NodeId {
        let board = self.get(parent).board.with_move(column, mover);
        let result = classify_after_move(&board, mover);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(SearchNode::new(board, mover, column, parent, result));
        self.get_mut(parent).children.push(id);
        id
    }
}

/// Statistics of one root child, reported after the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub column: usize,
    pub visits: u32,
    pub mean_reward: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MctsOutcome {
    pub column: usize,
    /// Mean reward of the chosen child, in `[-1, 1]`.
    pub confidence: f64,
    pub iterations: u32,
    pub tree_size: usize,
    pub children: Vec<ChildStats>,
}

/// Search state for one decision. The RNG handle is borrowed from the caller
/// so results are reproducible with a seeded generator.
pub struct MctsSearch<'r, R: Rng> {
    tree: SearchTree,
    side: Side,
    exploration_factor: f64,
    rng: &'r mut R,
}

impl<'r, R: Rng> MctsSearch<'r, R> {
    pub fn new(board: &Board, side: Side, exploration_factor: f64, rng: &'r mut R) -> Self {
        Self {
            tree: SearchTree::new(*board, side),
            side,
            exploration_factor,
            rng,
        }
    }

    /// Runs `iterations` select/expand/simulate/backup rounds and picks the
    /// child with the best mean reward. `None` when the root is terminal.
    pub fn run(&mut self, iterations: u32) -> Option<MctsOutcome> {
        let root = self.tree.root();
        if self.tree.get(root).is_terminal() {
            return None;
        }

        for _ in 0..iterations {
            let (front, to_move) = self.tree_policy(self.exploration_factor);
            let reward = self.default_policy(front, to_move);
            self.backup(front, reward);
        }

        let best = self.best_child(root, 0.0)?;
        let chosen = self.tree.get(best);

        let children: Vec<ChildStats> = self
            .tree
            .get(root)
            .children
            .iter()
            .map(|&id| {
                let child = self.tree.get(id);
                ChildStats {
                    column: child.column,
                    visits: child.visit_count,
                    mean_reward: child.mean_reward(),
                }
            })
            .collect();
        for stats in &children {
            trace!(
                column = stats.column,
                visits = stats.visits,
                mean_reward = stats.mean_reward,
                "MCTS root child"
            );
        }

        Some(MctsOutcome {
            column: chosen.column,
            confidence: chosen.mean_reward(),
            iterations,
            tree_size: self.tree.len(),
            children,
        })
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Selection + expansion. Returns the node to simulate from and the side
    /// to move there.
    fn tree_policy(&mut self, factor: f64) -> (NodeId, Side) {
        let mut node = self.tree.root();
        let mut to_move = self.side;

        while !self.tree.get(node).is_terminal() {
            if let Some(column) = self.tree.untried_column(node) {
                let child = self.tree.add_child(node, column, to_move);
                return (child, to_move.opponent());
            }
            node = match self.best_child(node, factor) {
                Some(child) => child,
                None => unreachable!("fully expanded non-terminal node without children"),
            };
            to_move = to_move.opponent();
        }

        (node, to_move)
    }

    /// Uniform random playout. Reward is +1 when the searching side wins,
    /// -1 when it loses and 0 on a draw.
    fn default_policy(&mut self, id: NodeId, mut to_move: Side) -> f64 {
        let node = self.tree.get(id);
        let mut board = node.board;
        let mut result = node.result;

        while !result.is_terminal() {
            let moves = board.legal_columns();
            let col = match moves.choose(&mut *self.rng) {
                Some(&col) => col,
                None => unreachable!("non-terminal board without legal columns"),
            };
            board = board.with_move(col, to_move);
            result = classify_after_move(&board, to_move);
            to_move = to_move.opponent();
        }

        match result.winner() {
            Some(side) if side == self.side => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    /// Walks parent links up to the root. The reward is credited as-is to
    /// nodes produced by the searching side and negated for the others.
    fn backup(&mut self, mut id: NodeId, reward: f64) {
        let side = self.side;
        while !id.is_none() {
            let node = self.tree.get_mut(id);
            node.visit_count += 1;
            node.total_reward += if node.mover == side { reward } else { -reward };
            id = node.parent;
        }
    }

    /// UCB1 over the children of `id`; exact ties are broken uniformly at
    /// random.
    fn best_child(&mut self, id: NodeId, factor: f64) -> Option<NodeId> {
        let node = self.tree.get(id);
        let ln_parent = (node.visit_count as f64).ln();

        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<NodeId> = Vec::new();
        for &child_id in &node.children {
            let child = self.tree.get(child_id);
            let exploit = child.mean_reward();
            let explore = (ln_parent / child.visit_count as f64).sqrt();
            let score = exploit + factor * explore;

            if score == best_score {
                best.push(child_id);
            } else if score > best_score {
                best_score = score;
                best.clear();
                best.push(child_id);
            }
        }

        best.choose(&mut *self.rng).copied()
    }
}
