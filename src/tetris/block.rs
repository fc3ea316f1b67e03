use crate::tetris::consts::Direction;
use crate::tetris::geometry::Pos;
use crate::tetris::shape::ShapeTable;

/// A lightweight cursor onto a shape: which shape, which of its rotations, and
/// where its bounding-box origin sits on the grid. Blocks are cheap to clone
/// and carry no reference to the grid or shape table they're used against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub shape_id: usize,
    pub rot: usize,
    pub offset: Pos,
}

impl Block {
    /// Constructs a new block cursor.
    pub fn new(shape_id: usize, rot: usize, offset: Pos) -> Block {
        Block { shape_id, rot, offset }
    }

    /// Produces a copy of this block translated by one nudge in the given direction.
    pub fn nudged(&self, direction: Direction, amount: i32) -> Block {
        let (dx, dy) = match direction {
            Direction::Left => (-amount, 0),
            Direction::Right => (amount, 0),
            Direction::Bot => (0, -amount),
            Direction::Top => (0, amount),
        };
        Block { offset: Pos::new(self.offset.x + dx, self.offset.y + dy), ..*self }
    }

    /// Produces a copy of this block rotated by `delta` steps, modulo the shape's
    /// rotation count. The rotation is applied at the current offset (no wall kicks).
    pub fn rotated(&self, delta: i32, n_rot: usize) -> Block {
        let n_rot = n_rot as i32;
        let next = ((self.rot as i32 + delta) % n_rot + n_rot) % n_rot;
        Block { rot: next as usize, ..*self }
    }

    /// The four real (grid) cells this block currently occupies.
    pub fn real_cells(&self, shapes: &ShapeTable) -> [Pos; 4] {
        let rotation = shapes.shape(self.shape_id).rotation(self.rot);
        rotation.cells.map(|d| self.offset + d)
    }

    /// The bounding box (w, h) of this block's current rotation.
    pub fn bounding_box(&self, shapes: &ShapeTable) -> (i32, i32) {
        let rotation = shapes.shape(self.shape_id).rotation(self.rot);
        (rotation.width, rotation.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetris::consts::Direction;

    #[test]
    fn rotated_wraps_modulo_n_rot() {
        let block = Block::new(0, 0, Pos::new(3, 3));
        let back_to_start = block.rotated(2, 2);
        assert_eq!(back_to_start.rot, 0);
    }

    #[test]
    fn nudged_moves_only_the_requested_axis() {
        let block = Block::new(0, 0, Pos::new(3, 3));
        let left = block.nudged(Direction::Left, 1);
        assert_eq!(left.offset, Pos::new(2, 3));
        let down = block.nudged(Direction::Bot, 2);
        assert_eq!(down.offset, Pos::new(3, 1));
    }
}
