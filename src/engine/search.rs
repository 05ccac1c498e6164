//! Minimax search with decision-tree capture
//!
//! Both search variants drive the game state forward on private copies,
//! score terminal positions with the evaluator, and build the decision tree
//! in lockstep with the recursion. Alpha-beta is an exact optimization: it
//! returns the same scores as plain minimax while visiting fewer nodes.

use super::eval::evaluate;
use super::tree::{DecisionTree, NodeId};
use crate::tictactoe::{GameState, Player};

const CENTER: (usize, usize) = (1, 1);
const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];
const EDGES: [(usize, usize); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];

/// Exhaustive game-tree search for one side, recording its work as a
/// [`DecisionTree`]
///
/// The engine is synchronous and single-threaded; a call to
/// [`get_best_move`](Self::get_best_move) runs to completion. Reusing one
/// engine across independent searches is safe because every top-level call
/// resets the node counter and tree before searching.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    player: Player,
    nodes_explored: u64,
    tree: Option<DecisionTree>,
}

impl SearchEngine {
    /// Create an engine playing as `player`
    pub fn new(player: Player) -> Self {
        SearchEngine {
            player,
            nodes_explored: 0,
            tree: None,
        }
    }

    /// The symbol this engine plays
    pub fn player(&self) -> Player {
        self.player
    }

    /// Change the symbol this engine plays (the API layer retargets the
    /// engine per request)
    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    /// Nodes entered by the most recent top-level search.
    ///
    /// The counter is zeroed at the start of every [`get_best_move`] call and
    /// counts each node the recursive scoring function is entered for exactly
    /// once: the root, every root child, and every deeper position. Pruned
    /// placeholders are never entered, so they are never counted. After an
    /// opening-shortcut return the count is 0.
    ///
    /// [`get_best_move`]: Self::get_best_move
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// The decision tree recorded by the most recent top-level search, if
    /// that call actually searched
    pub fn decision_tree(&self) -> Option<&DecisionTree> {
        self.tree.as_ref()
    }

    /// Compute the best move for the current position.
    ///
    /// Returns `None` when the game is over or no cell is empty. As O within
    /// the first ply the engine answers from a fixed opening preference
    /// (center, then the first free corner) without searching; in that case
    /// no tree is built. Otherwise the full game tree is searched with the
    /// requested variant and the populated tree and node count become
    /// available through the accessors.
    pub fn get_best_move(
        &mut self,
        state: &GameState,
        use_alpha_beta: bool,
    ) -> Option<(usize, usize)> {
        self.nodes_explored = 0;
        self.tree = None;

        if state.is_over {
            return None;
        }
        let available = state.available_moves();
        if available.is_empty() {
            return None;
        }

        // Opening shortcut: searching 8 or 9 plies deep only to conclude
        // "take the center" is wasted work for the second player.
        if self.player == Player::O && state.moves_made <= 1 {
            if available.contains(&CENTER) {
                return Some(CENTER);
            }
            for corner in CORNERS {
                if available.contains(&corner) {
                    return Some(corner);
                }
            }
        }

        Some(self.search_best_move(state, use_alpha_beta, available))
    }

    /// Run the full search, bypassing the opening shortcut.
    ///
    /// Used directly by self-play drivers and tests that need pure search
    /// behavior on every ply.
    pub fn search(&mut self, state: &GameState, use_alpha_beta: bool) -> Option<(usize, usize)> {
        self.nodes_explored = 0;
        self.tree = None;

        if state.is_over {
            return None;
        }
        let available = state.available_moves();
        if available.is_empty() {
            return None;
        }

        Some(self.search_best_move(state, use_alpha_beta, available))
    }

    fn search_best_move(
        &mut self,
        state: &GameState,
        use_alpha_beta: bool,
        available: Vec<(usize, usize)>,
    ) -> (usize, usize) {
        let mut tree = DecisionTree::new(state.cells);
        self.nodes_explored = 1; // the root

        let mut best: Option<((usize, usize), i32)> = None;

        // Root children are enumerated in board order with a fresh
        // (-inf, +inf) window each, so pruning never crosses between
        // top-level candidate moves.
        for &(row, col) in &available {
            let mut sim = state.snapshot();
            sim.apply_move(row, col);

            let child = tree.add_child(DecisionTree::ROOT, sim.cells, (row, col));
            let score = if use_alpha_beta {
                self.alpha_beta(&sim, 0, false, i32::MIN, i32::MAX, &mut tree, child)
            } else {
                self.minimax(&sim, 0, false, &mut tree, child)
            };

            // Only a strictly greater score replaces the incumbent, so ties
            // resolve to the first move in board order.
            match best {
                Some((_, incumbent)) if score <= incumbent => {}
                _ => best = Some(((row, col), score)),
            }
        }

        let (best_move, _) = best.expect("at least one available move was searched");

        if let Some(&chosen) = tree
            .children(DecisionTree::ROOT)
            .iter()
            .find(|&&id| tree.node(id).mv == Some(best_move))
        {
            tree.mark_best_path(chosen);
        }

        self.tree = Some(tree);
        best_move
    }

    /// Plain minimax over every available move
    fn minimax(
        &mut self,
        state: &GameState,
        depth: usize,
        maximizing: bool,
        tree: &mut DecisionTree,
        node: NodeId,
    ) -> i32 {
        self.nodes_explored += 1;
        tree.observe_depth(depth);

        if state.is_over {
            let score = evaluate(state, self.player);
            tree.set_score(node, score);
            return score;
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (row, col) in state.available_moves() {
            let mut sim = state.snapshot();
            sim.apply_move(row, col);

            let child = tree.add_child(node, sim.cells, (row, col));
            let score = self.minimax(&sim, depth + 1, !maximizing, tree, child);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        tree.set_score(node, best);
        best
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `alpha` is the best score the maximizer can already guarantee along
    /// the current path, `beta` the minimizer's counterpart. Once
    /// `beta <= alpha` no remaining sibling move can influence the result;
    /// those moves are recorded as pruned placeholders instead of being
    /// silently dropped, so the cutoff stays visible in the tree.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        tree: &mut DecisionTree,
        node: NodeId,
    ) -> i32 {
        self.nodes_explored += 1;
        tree.observe_depth(depth);

        if state.is_over {
            let score = evaluate(state, self.player);
            tree.set_score(node, score);
            return score;
        }

        let mut moves = state.available_moves();
        if depth == 0 {
            // Center, corners, then edges at the shallowest level: strong
            // candidates first means earlier cutoffs. Ordering never changes
            // the chosen move or its score, only the node count and which
            // siblings end up pruned.
            moves = order_opening_moves(&moves);
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (index, &(row, col)) in moves.iter().enumerate() {
            let mut sim = state.snapshot();
            sim.apply_move(row, col);

            let child = tree.add_child(node, sim.cells, (row, col));
            let score = self.alpha_beta(&sim, depth + 1, !maximizing, alpha, beta, tree, child);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                for &(skipped_row, skipped_col) in &moves[index + 1..] {
                    let mut after = state.snapshot();
                    after.apply_move(skipped_row, skipped_col);
                    tree.add_pruned(node, after.cells, (skipped_row, skipped_col));
                }
                break;
            }
        }

        tree.set_score(node, best);
        best
    }
}

/// Reorder moves as center, corners, then edges, keeping only available ones
fn order_opening_moves(available: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut ordered = Vec::with_capacity(available.len());
    for mv in std::iter::once(CENTER).chain(CORNERS).chain(EDGES) {
        if available.contains(&mv) {
            ordered.push(mv);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GameState;

    fn scored_best_move(
        engine: &mut SearchEngine,
        state: &GameState,
        use_alpha_beta: bool,
    ) -> ((usize, usize), i32) {
        let mv = engine
            .get_best_move(state, use_alpha_beta)
            .expect("position has moves");
        let tree = engine.decision_tree().expect("search builds a tree");
        let chosen = tree
            .children(DecisionTree::ROOT)
            .iter()
            .find(|&&id| tree.node(id).mv == Some(mv))
            .copied()
            .expect("chosen move has a root child");
        (mv, tree.node(chosen).score().expect("root child is scored"))
    }

    #[test]
    fn test_no_moves_returns_none() {
        let full = GameState::from_string("XOXXOOOXX").unwrap();
        let mut engine = SearchEngine::new(Player::X);
        assert_eq!(engine.get_best_move(&full, true), None);
        assert_eq!(engine.get_best_move(&full, false), None);
    }

    #[test]
    fn test_opening_shortcut_takes_center() {
        let state = GameState::new();
        let mut engine = SearchEngine::new(Player::O);

        assert_eq!(engine.get_best_move(&state, true), Some((1, 1)));
        assert_eq!(engine.nodes_explored(), 0, "shortcut does not search");
        assert!(engine.decision_tree().is_none(), "shortcut builds no tree");
    }

    #[test]
    fn test_opening_shortcut_takes_corner_when_center_taken() {
        let mut state = GameState::new();
        state.apply_move(1, 1); // X takes the center

        let mut engine = SearchEngine::new(Player::O);
        assert_eq!(engine.get_best_move(&state, true), Some((0, 0)));
        assert_eq!(engine.nodes_explored(), 0);
    }

    #[test]
    fn test_shortcut_only_applies_to_o() {
        let state = GameState::new();
        let mut engine = SearchEngine::new(Player::X);

        let mv = engine.get_best_move(&state, true);
        assert!(mv.is_some());
        assert!(engine.nodes_explored() > 0, "X always searches");
        assert!(engine.decision_tree().is_some());
    }

    #[test]
    fn test_blocks_immediate_win() {
        // X holds (0,0) and (0,1); O must block at (0,2)
        let state = GameState::from_string("XX..O....").unwrap();
        assert_eq!(state.current_player, Player::O);

        for use_alpha_beta in [false, true] {
            let mut engine = SearchEngine::new(Player::O);
            let mv = engine.search(&state, use_alpha_beta);
            assert_eq!(
                mv,
                Some((0, 2)),
                "O must block (alpha_beta={use_alpha_beta})"
            );
        }
    }

    #[test]
    fn test_takes_immediate_win_over_block() {
        // Both sides threaten a win; the engine (X to move) takes its own
        let state = GameState::from_string("XX.OO....").unwrap();
        assert_eq!(state.current_player, Player::X);

        for use_alpha_beta in [false, true] {
            let mut engine = SearchEngine::new(Player::X);
            assert_eq!(engine.search(&state, use_alpha_beta), Some((0, 2)));
        }
    }

    #[test]
    fn test_variants_agree_with_cutoff_savings() {
        // One ply from a forced loss for X: O to move wins on the spot
        let state = GameState::from_string("XX..OO..X").unwrap();
        assert_eq!(state.current_player, Player::O);

        let mut plain = SearchEngine::new(Player::O);
        let (plain_move, plain_score) = scored_best_move(&mut plain, &state, false);
        let plain_nodes = plain.nodes_explored();

        let mut pruning = SearchEngine::new(Player::O);
        let (pruning_move, pruning_score) = scored_best_move(&mut pruning, &state, true);
        let pruning_nodes = pruning.nodes_explored();

        assert_eq!(plain_move, pruning_move);
        assert_eq!(plain_score, pruning_score);
        assert!(
            pruning_nodes < plain_nodes,
            "cutoffs must reduce the node count ({pruning_nodes} vs {plain_nodes})"
        );
    }

    #[test]
    fn test_counter_resets_between_calls() {
        let state = GameState::from_string("X...O....").unwrap();
        let mut engine = SearchEngine::new(Player::X);

        engine.get_best_move(&state, false);
        let first = engine.nodes_explored();
        engine.get_best_move(&state, false);
        let second = engine.nodes_explored();

        assert_eq!(
            first, second,
            "counter reads an absolute total per call, not a running sum"
        );
    }

    #[test]
    fn test_node_count_matches_evaluated_tree_nodes() {
        let state = GameState::from_string("X...O....").unwrap();

        for use_alpha_beta in [false, true] {
            let mut engine = SearchEngine::new(Player::X);
            engine.get_best_move(&state, use_alpha_beta);

            let tree = engine.decision_tree().unwrap();
            let unpruned = tree.ids().filter(|&id| !tree.node(id).pruned()).count();
            assert_eq!(
                engine.nodes_explored(),
                unpruned as u64,
                "counter equals entered nodes (alpha_beta={use_alpha_beta})"
            );
        }
    }

    #[test]
    fn test_root_children_follow_board_order() {
        let state = GameState::from_string("X...O....").unwrap();
        let mut engine = SearchEngine::new(Player::X);
        engine.get_best_move(&state, true);

        let tree = engine.decision_tree().unwrap();
        let root_moves: Vec<_> = tree
            .children(DecisionTree::ROOT)
            .iter()
            .map(|&id| tree.node(id).mv.unwrap())
            .collect();
        assert_eq!(
            root_moves,
            state.available_moves(),
            "root enumeration stays in board order even with pruning on"
        );
    }

    #[test]
    fn test_max_depth_covers_remaining_plies() {
        let state = GameState::from_string("XOXXO.O..").unwrap();
        let mut engine = SearchEngine::new(Player::X);
        engine.get_best_move(&state, false);

        // Three empty cells: root children at depth 0, deepest leaf at 2
        let tree = engine.decision_tree().unwrap();
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn test_order_opening_moves() {
        let all: Vec<_> = GameState::new().available_moves();
        let ordered = order_opening_moves(&all);
        assert_eq!(ordered[0], (1, 1));
        assert_eq!(&ordered[1..5], &CORNERS);
        assert_eq!(&ordered[5..], &EDGES);

        let without_center: Vec<_> = all.into_iter().filter(|&m| m != (1, 1)).collect();
        let ordered = order_opening_moves(&without_center);
        assert_eq!(ordered[0], (0, 0));
        assert_eq!(ordered.len(), 8);
    }
}
