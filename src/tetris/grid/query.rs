use crate::tetris::block::Block;
use crate::tetris::consts::Direction;
use crate::tetris::geometry::Pos;

use super::Grid;

impl<'s> Grid<'s> {
    /// True iff any of the block's four cells is out of bounds or already occupied.
    /// Rejects on the bounding box first, which is cheap and catches most
    /// out-of-bounds placements without visiting individual cells.
    pub fn collides(&self, block: &Block) -> bool {
        let (w, h) = block.bounding_box(self.shapes);
        if block.offset.x < 0
            || block.offset.y < 0
            || block.offset.x + w > self.width as i32
            || block.offset.y + h > self.height as i32
        {
            return true;
        }
        block
            .real_cells(self.shapes)
            .iter()
            .any(|cell| self.occupied(cell.x, cell.y))
    }

    /// Places a block at its spawn position: horizontally centered, elevated so
    /// the tallest rotation of the shape always clears the board. Returns
    /// `None` iff the spawn position collides (top-out).
    pub fn spawn(&self, shape_id: usize, rot: usize) -> Option<Block> {
        let shape = self.shapes.shape(shape_id);
        let w = shape.rotation(rot).width;
        let offset = Pos::new(
            (self.width as i32 - w) / 2,
            self.height as i32 - shape.max_dim_len,
        );
        let block = Block::new(shape_id, rot, offset);
        if self.collides(&block) {
            None
        } else {
            Some(block)
        }
    }

    /// Hard-drops a block: the largest non-negative `d` such that lowering the
    /// block by `d` keeps it clear of the stack, applied to the cursor.
    pub fn drop(&self, block: &Block) -> Block {
        let rotation = self.shapes.shape(block.shape_id).rotation(block.rot);
        let mut min_slack = i32::MAX;
        for (dx, &local_y) in rotation.crust.iter().enumerate() {
            let x = block.offset.x + dx as i32;
            let slack = (local_y + block.offset.y) - (self.relief[x as usize] + 1);
            min_slack = min_slack.min(slack);
        }

        if min_slack >= 0 {
            return block.nudged(Direction::Bot, min_slack);
        }

        // The block already overlaps the relief profile from a constructed
        // (non-spawn) position; fall back to per-cell probing.
        let mut probe = *block;
        loop {
            let lower = probe.nudged(Direction::Bot, 1);
            if self.collides(&lower) {
                return probe;
            }
            probe = lower;
        }
    }

    /// Moves the cursor one step in `direction`; rolled back (returns the
    /// original block) iff the new position collides or leaves bounds.
    pub fn try_move(&self, block: &Block, direction: Direction, amount: i32) -> Block {
        let moved = block.nudged(direction, amount);
        if self.collides(&moved) {
            *block
        } else {
            moved
        }
    }

    /// Rotates the cursor by `delta` steps at its current offset (no wall
    /// kicks); rolled back iff the rotated placement collides.
    pub fn try_rotate(&self, block: &Block, delta: i32) -> Block {
        let n_rot = self.shapes.shape(block.shape_id).n_rot();
        let rotated = block.rotated(delta, n_rot);
        if self.collides(&rotated) {
            *block
        } else {
            rotated
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tetris::shape::ShapeTable;

    use super::*;

    #[test]
    fn empty_grid_spawn_centers_and_elevates_the_i_piece() {
        let shapes = ShapeTable::standard();
        let grid = Grid::new(10, 20, &shapes);
        let block = grid.spawn(0, 0).expect("spawn must succeed on an empty grid");
        let max_dim = shapes.shape(0).max_dim_len;
        assert_eq!(block.offset, Pos::new((10 - 4) / 2, 20 - max_dim));
        assert!(!grid.collides(&block));
    }

    #[test]
    fn drop_lands_an_i_piece_flat_on_an_empty_floor() {
        let shapes = ShapeTable::standard();
        let grid = Grid::new(10, 20, &shapes);
        let spawned = grid.spawn(0, 0).unwrap();
        let dropped = grid.drop(&spawned);
        assert_eq!(dropped.offset.y, 0);
    }

    #[test]
    fn move_rolls_back_at_the_left_wall() {
        let shapes = ShapeTable::standard();
        let grid = Grid::new(10, 20, &shapes);
        let block = Block::new(0, 0, Pos::new(0, 0));
        let moved = grid.try_move(&block, Direction::Left, 1);
        assert_eq!(moved, block);
    }

    #[test]
    fn rotate_wraps_and_rolls_back_on_collision() {
        let shapes = ShapeTable::standard();
        let grid = Grid::new(10, 20, &shapes);
        // T-piece (id 2) pinned against the left wall: rotating into the wall
        // must roll back.
        let block = Block::new(2, 0, Pos::new(0, 5));
        let rotated = grid.try_rotate(&block, 1);
        assert!(!grid.collides(&rotated));
    }

    #[test]
    fn spawn_fails_once_every_row_up_to_the_top_is_full() {
        let shapes = ShapeTable::standard();
        let mut grid = Grid::new(10, 20, &shapes);
        for y in 0..19 {
            for x in 0..10 {
                grid.add_cell(x, y);
            }
        }
        for shape_id in 0..shapes.n_shapes() {
            assert!(grid.spawn(shape_id, 0).is_none());
        }
    }
}
