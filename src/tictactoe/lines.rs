//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line coordinates on the 3x3 board
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row on any of the 8 lines
    pub fn has_won(cells: &[[Cell; 3]; 3], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| cells[r][c] == target))
    }

    /// Find all cells that would immediately complete a line for the player
    pub fn winning_moves(cells: &[[Cell; 3]; 3], player: Player) -> Vec<(usize, usize)> {
        let mut moves = Vec::new();
        for line in &WINNING_LINES {
            if let Some(pos) = Self::winning_move_in_line(cells, player, line) {
                if !moves.contains(&pos) {
                    moves.push(pos);
                }
            }
        }
        moves
    }

    /// Find the completing cell in a specific line, if one exists
    fn winning_move_in_line(
        cells: &[[Cell; 3]; 3],
        player: Player,
        line: &[(usize, usize); 3],
    ) -> Option<(usize, usize)> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &(r, c) in line {
            match cells[r][c] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        // More than one empty cell, not a winning move
                        return None;
                    }
                    empty_pos = Some((r, c));
                }
                cell if cell == target => count += 1,
                _ => return None, // Opponent piece in line
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::X;
        cells[0][1] = Cell::X;
        cells[0][2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::O;
        cells[1][0] = Cell::O;
        cells[2][0] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_has_won_diagonal() {
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::X;
        cells[1][1] = Cell::X;
        cells[2][2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Player::X));

        let mut anti = [[Cell::Empty; 3]; 3];
        anti[0][2] = Cell::O;
        anti[1][1] = Cell::O;
        anti[2][0] = Cell::O;

        assert!(LineAnalyzer::has_won(&anti, Player::O));
    }

    #[test]
    fn test_winning_moves() {
        // X.X on the top row: (0, 1) completes it
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::X;
        cells[0][2] = Cell::X;

        let moves = LineAnalyzer::winning_moves(&cells, Player::X);
        assert_eq!(moves, vec![(0, 1)]);
    }

    #[test]
    fn test_winning_moves_multiple() {
        // XX. on the top row, X below the corner: two completions
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::X;
        cells[0][1] = Cell::X;
        cells[1][0] = Cell::X;

        let moves = LineAnalyzer::winning_moves(&cells, Player::X);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&(0, 2))); // Complete top row
        assert!(moves.contains(&(2, 0))); // Complete left column
    }

    #[test]
    fn test_blocked_line_is_not_winnable() {
        let mut cells = [[Cell::Empty; 3]; 3];
        cells[0][0] = Cell::X;
        cells[0][1] = Cell::X;
        cells[0][2] = Cell::O;

        assert!(
            !LineAnalyzer::winning_moves(&cells, Player::X).contains(&(0, 2)),
            "occupied cell must not be reported as a winning move"
        );
    }
}
