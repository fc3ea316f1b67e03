use itertools::Itertools;

use crate::tetris::consts::NUM_FEATURES;
use crate::tetris::grid::Grid;

/// Extracts the seven scalar features used by the evaluator from a terminal
/// (post-placement, post-clear) grid, in canonical [`FeatureIndex`] order.
///
/// [`FeatureIndex`]: crate::tetris::consts::FeatureIndex
pub fn extract_features(grid: &Grid<'_>) -> [f64; NUM_FEATURES] {
    let width = grid.width();

    let heights: Vec<i32> = (0..width).map(|x| grid.relief(x) + 1).collect();

    let relief_max = heights.iter().copied().max().unwrap_or(0) as f64;
    let relief_avg = heights.iter().sum::<i32>() as f64 / width as f64;
    let relief_var = heights
        .iter()
        .tuple_windows()
        .map(|(a, b)| (a - b).unsigned_abs() as f64)
        .sum::<f64>();

    let gaps = (0..width).map(|x| grid.gaps(x) as f64).sum::<f64>();

    let obs = (0..width)
        .map(|x| {
            grid.stack(x)
                .iter()
                .enumerate()
                .filter(|&(i, &y)| y != i as i32)
                .count() as f64
        })
        .sum::<f64>();

    let discont = (0..grid.height())
        .map(|y| row_discontinuities(grid.row(y), width))
        .sum::<f64>();

    let crevices = (0..width).filter(|&x| is_crevice(grid, x)).count() as f64;

    [relief_max, relief_avg, relief_var, gaps, obs, discont, crevices]
}

/// Number of occupied-to-empty bit transitions within the row's `width` bits.
fn row_discontinuities(row: u64, width: usize) -> f64 {
    (0..width.saturating_sub(1))
        .filter(|&x| (row >> x) & 1 == 1 && (row >> (x + 1)) & 1 == 0)
        .count() as f64
}

/// A column is a crevice if both of its neighbors (grid edges count as
/// full-height walls) stand at least 3 cells higher than it.
fn is_crevice(grid: &Grid<'_>, x: usize) -> bool {
    let here = grid.relief(x);
    let left = if x == 0 { grid.height() as i32 } else { grid.relief(x - 1) };
    let right = if x + 1 == grid.width() { grid.height() as i32 } else { grid.relief(x + 1) };
    left - here >= 3 && right - here >= 3
}

#[cfg(test)]
mod tests {
    use crate::tetris::block::Block;
    use crate::tetris::geometry::Pos;
    use crate::tetris::shape::ShapeTable;

    use super::*;

    #[test]
    fn empty_grid_has_all_zero_features() {
        let shapes = ShapeTable::standard();
        let grid = Grid::new(10, 20, &shapes);
        let features = extract_features(&grid);
        assert_eq!(features, [0.0; NUM_FEATURES]);
    }

    #[test]
    fn a_single_block_raises_relief_max_and_avg() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        let block = Block::new(0, 0, Pos::new(0, 0));
        grid.block_add(&block);
        let features = extract_features(&grid);
        assert_eq!(features[0], 1.0);
        assert!((features[1] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn a_buried_hole_counts_toward_gaps_and_obs() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        grid.add_cell(0, 0);
        grid.remove_cell(0, 0);
        grid.add_cell(0, 1);
        let features = extract_features(&grid);
        assert_eq!(features[3], 1.0);
        assert_eq!(features[4], 1.0);
    }

    #[test]
    fn a_deep_well_between_tall_walls_is_a_crevice() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        for y in 0..4 {
            grid.add_cell(0, y);
            grid.add_cell(2, y);
        }
        let features = extract_features(&grid);
        assert_eq!(features[6], 1.0);
    }
}
