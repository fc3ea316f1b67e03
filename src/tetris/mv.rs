/// The decision produced by a move search: a shape placed at a rotation and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub shape_id: usize,
    pub rot: usize,
    pub col: i32,
}

impl Move {
    pub fn new(shape_id: usize, rot: usize, col: i32) -> Move {
        Move { shape_id, rot, col }
    }
}
