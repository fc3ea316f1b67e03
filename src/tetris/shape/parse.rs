use crate::tetris::consts::NUM_SHAPES;
use crate::tetris::geometry::Delta;
use crate::utils::prelude::*;

use super::{Rotation, Shape, ShapeTable};

/// The built-in description of the 7 standard tetrominoes, one 4x4 block per
/// shape in the canonical order I, O, T, S, Z, J, L. `#` marks an occupied
/// local cell; blank lines separate shapes, per the §6 text format.
pub const DEFAULT_SHAPE_TEXT: &str = "
....
####
....
....

....
.##.
.##.
....

....
.#..
###.
....

....
.##.
##..
....

....
##..
.##.
....

....
#...
###.
....

....
..#.
###.
....
";

/// Parses a shape description into a full table, deriving every rotation of
/// every shape from the single base orientation supplied in the text.
pub fn parse_shape_table(text: &str) -> Result<ShapeTable> {
    let blocks = split_blocks(text);
    if blocks.len() != NUM_SHAPES {
        return Err(anyhow!(
            "expected {NUM_SHAPES} shapes in the description, found {}",
            blocks.len()
        ));
    }

    let shapes = blocks
        .iter()
        .enumerate()
        .map(|(id, lines)| parse_shape(id, lines))
        .collect::<Result<Vec<Shape>>>()?;

    Ok(ShapeTable { shapes })
}

/// Splits the text into blank-line-separated, non-empty line groups.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![];
    let mut current: Vec<&str> = vec![];
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Parses one shape's base orientation and derives all of its distinct rotations.
fn parse_shape(id: usize, lines: &[&str]) -> Result<Shape> {
    if lines.len() != 4 {
        return Err(anyhow!(
            "shape {id}: expected a 4-line block, found {} lines",
            lines.len()
        ));
    }

    let mut cells = vec![];
    for (row_idx, line) in lines.iter().enumerate() {
        for (col_idx, ch) in line.chars().enumerate() {
            if ch != ' ' && ch != '\t' {
                // Text row 0 is the top of the piece; local y grows upward, so
                // the bottom text row (index 3) is local y = 0.
                cells.push(Delta::new(col_idx as i32, (3 - row_idx) as i32));
            }
        }
    }
    if cells.len() != 4 {
        return Err(anyhow!(
            "shape {id}: expected exactly 4 occupied cells, found {}",
            cells.len()
        ));
    }

    let mut base = [cells[0], cells[1], cells[2], cells[3]];
    normalize(&mut base);

    let rotations = enumerate_rotations(base)
        .into_iter()
        .map(build_rotation)
        .collect::<Result<Vec<Rotation>>>()?;
    let max_dim_len = rotations
        .iter()
        .map(|r| r.width.max(r.height))
        .max()
        .expect("a shape always has at least its base rotation");

    Ok(Shape { id, rotations, max_dim_len })
}

/// Shifts a cell set so its bounding box starts at `(0, 0)`.
fn normalize(cells: &mut [Delta; 4]) {
    let min_x = cells.iter().map(|d| d.dx).min().unwrap();
    let min_y = cells.iter().map(|d| d.dy).min().unwrap();
    for d in cells.iter_mut() {
        d.dx -= min_x;
        d.dy -= min_y;
    }
}

/// Rotates a normalized cell set a quarter turn and renormalizes it.
fn rotate_quarter(cells: &[Delta; 4]) -> [Delta; 4] {
    let mut rotated = cells.map(|d| Delta::new(d.dy, -d.dx));
    normalize(&mut rotated);
    rotated
}

/// Applies the quarter-turn transform repeatedly, collapsing rotations that
/// reproduce a cell set already seen (this is what gives O a single
/// rotation, I/S/Z two, and J/L/T four).
fn enumerate_rotations(base: [Delta; 4]) -> Vec<[Delta; 4]> {
    let mut distinct: Vec<[Delta; 4]> = vec![];
    let mut current = base;
    for _ in 0..4 {
        let mut canonical = current;
        canonical.sort();
        if !distinct.contains(&canonical) {
            distinct.push(canonical);
        }
        current = rotate_quarter(&current);
    }
    distinct
}

/// Computes the bounding box and bottom crust for one rotation's cell set.
fn build_rotation(cells: [Delta; 4]) -> Result<Rotation> {
    let width = cells.iter().map(|d| d.dx).max().unwrap() + 1;
    let height = cells.iter().map(|d| d.dy).max().unwrap() + 1;

    let mut crust = vec![i32::MAX; width as usize];
    for d in cells.iter() {
        let slot = &mut crust[d.dx as usize];
        if d.dy < *slot {
            *slot = d.dy;
        }
    }
    if crust.iter().any(|&y| y == i32::MAX) {
        return Err(anyhow!(
            "shape rotation has a bounding-box column with no occupied cell"
        ));
    }

    Ok(Rotation { cells, width, height, crust })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_shape_count() {
        let err = parse_shape_table("....\n####\n....\n....\n").unwrap_err();
        assert!(err.to_string().contains("expected 7 shapes"));
    }

    #[test]
    fn rejects_malformed_cell_count() {
        let one_shape = "....\n###.\n....\n....\n";
        let seven = std::iter::repeat(one_shape)
            .take(NUM_SHAPES)
            .collect::<Vec<_>>()
            .join("\n");
        let err = parse_shape_table(&seven).unwrap_err();
        assert!(err.to_string().contains("exactly 4 occupied cells"));
    }

    #[test]
    fn o_piece_has_a_single_rotation() {
        let base = [
            Delta::new(0, 0),
            Delta::new(1, 0),
            Delta::new(0, 1),
            Delta::new(1, 1),
        ];
        assert_eq!(enumerate_rotations(base).len(), 1);
    }

    #[test]
    fn i_piece_has_two_rotations() {
        let base = [
            Delta::new(0, 0),
            Delta::new(1, 0),
            Delta::new(2, 0),
            Delta::new(3, 0),
        ];
        assert_eq!(enumerate_rotations(base).len(), 2);
    }
}
