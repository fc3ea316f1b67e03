use crate::tetris::block::Block;
use crate::tetris::features::extract_features;
use crate::tetris::geometry::Pos;
use crate::tetris::grid::Grid;
use crate::tetris::mv::Move;
use crate::tetris::stream::PieceStream;
use crate::tetris::weights::Weights;

/// Searches every (rotation, column) placement of `shape_id` on `grid` and
/// returns the highest-scoring one, or `None` if the piece cannot be placed
/// anywhere (top-out). Leaves `grid` bit-identical on return (hash included):
/// every tentative `block_add` is undone by a matching `block_remove` before
/// the next candidate is tried.
///
/// When `stream` can peek one piece ahead, each candidate is additionally
/// scored by the best placement of the peeked next piece on top of it
/// (one-ply lookahead, max-of-max), per the chosen search policy lines are
/// never cleared mid-search: features are read straight off the dirtied grid.
pub fn find_best(
    grid: &mut Grid<'_>,
    shape_id: usize,
    stream: &mut dyn PieceStream,
    weights: &Weights,
    lookahead: bool,
) -> Option<Move> {
    let n_rot = grid.shapes().shape(shape_id).n_rot();
    let mut best: Option<(f64, Move)> = None;

    for rot in 0..n_rot {
        let width = grid.shapes().shape(shape_id).rotation(rot).width;
        for col in 0..=(grid.width() as i32 - width) {
            let candidate = Block::new(shape_id, rot, Pos::new(col, grid.height() as i32 - grid.shapes().shape(shape_id).max_dim_len));
            if grid.collides(&candidate) {
                continue;
            }
            let placed = grid.drop(&candidate);

            grid.block_add(&placed);
            let score = if lookahead {
                best_continuation_score(grid, stream, weights)
            } else {
                weights.score(&extract_features(grid))
            };
            grid.block_remove(&placed);

            let candidate_move = Move::new(shape_id, rot, col);
            best = match best {
                Some((best_score, _)) if best_score >= score => best,
                _ => Some((score, candidate_move)),
            };
        }
    }

    best.map(|(_, mv)| mv)
}

/// The best score reachable by placing the peeked next piece on top of the
/// already-placed candidate. Falls back to the candidate's own score if no
/// placement of the next piece fits anywhere (pure defensive fallback).
fn best_continuation_score(
    grid: &mut Grid<'_>,
    stream: &mut dyn PieceStream,
    weights: &Weights,
) -> f64 {
    let own_score = weights.score(&extract_features(grid));
    let next_shape = stream.peek(0);
    let n_rot = grid.shapes().shape(next_shape).n_rot();

    let mut best = own_score;
    for rot in 0..n_rot {
        let width = grid.shapes().shape(next_shape).rotation(rot).width;
        for col in 0..=(grid.width() as i32 - width) {
            let candidate = Block::new(next_shape, rot, Pos::new(col, grid.height() as i32 - grid.shapes().shape(next_shape).max_dim_len));
            if grid.collides(&candidate) {
                continue;
            }
            let placed = grid.drop(&candidate);
            grid.block_add(&placed);
            let score = weights.score(&extract_features(grid));
            grid.block_remove(&placed);
            best = best.max(score);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use crate::tetris::shape::ShapeTable;
    use crate::tetris::stream::BagStream;

    use super::*;

    #[test]
    fn find_best_leaves_an_empty_grid_bit_identical() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        let weights = Weights::new([-1.0, -1.0, -1.0, -5.0, -2.0, -1.0, -2.0]);
        let mut stream = BagStream::new(1);

        let before_hash = grid.hash();
        let mv = find_best(&mut grid, 0, &mut stream, &weights, false);
        assert!(mv.is_some());
        assert_eq!(grid.hash(), before_hash);
        grid.check_invariants().unwrap();
    }

    #[test]
    fn find_best_ties_break_toward_lowest_rotation_then_lowest_column() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        // All weights zero: every placement scores identically, so the
        // tie-break must pick rotation 0, column 0.
        let weights = Weights::new([0.0; 7]);
        let mut stream = BagStream::new(2);

        let mv = find_best(&mut grid, 0, &mut stream, &weights, false).unwrap();
        assert_eq!(mv.rot, 0);
        assert_eq!(mv.col, 0);
    }

    #[test]
    fn heavy_relief_penalty_keeps_the_i_piece_flat_on_an_empty_floor() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        // Heavily penalize RELIEF_MAX and RELIEF_VAR; every other weight is zero.
        let weights = Weights::new([-10.0, 0.0, -10.0, 0.0, 0.0, 0.0, 0.0]);
        let mut stream = BagStream::new(7);

        let mv = find_best(&mut grid, 0, &mut stream, &weights, false).unwrap();
        assert_eq!(mv.rot, 0);
        assert!(mv.col <= 6);
    }

    #[test]
    fn lookahead_leaves_the_grid_bit_identical_too() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        let weights = Weights::new([-1.0, -1.0, -1.0, -5.0, -2.0, -1.0, -2.0]);
        let mut stream = BagStream::new(3);

        let before_hash = grid.hash();
        let mv = find_best(&mut grid, 1, &mut stream, &weights, true);
        assert!(mv.is_some());
        assert_eq!(grid.hash(), before_hash);
    }
}
