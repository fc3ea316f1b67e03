use crate::tetris::prelude::*;

/// Why a session stopped running a move loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The spawning piece collided immediately (top-out).
    GameOver,
    /// The search found no legal placement for the current piece.
    NoLegalMove,
}

/// Tallies produced by running a session to completion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub pieces_placed: u64,
    pub lines_cleared: u64,
}

/// Runs a single headless game: Spawn -> Decide -> Apply -> Clear, repeating
/// until top-out or a move budget is exhausted. This is the state machine a
/// consumer of the search wires up around `find_best` (§4.5).
pub struct Session<'s> {
    grid: Grid<'s>,
    weights: Weights,
    lookahead: bool,
}

impl<'s> Session<'s> {
    pub fn new(width: usize, height: usize, shapes: &'s ShapeTable, weights: Weights, lookahead: bool) -> Session<'s> {
        Session { grid: Grid::new(width, height, shapes), weights, lookahead }
    }

    pub fn grid(&self) -> &Grid<'s> {
        &self.grid
    }

    /// Plays one piece: spawns it, decides and applies the best placement, and
    /// clears any resulting full rows. Returns `Err(Outcome)` iff the game is
    /// over (spawn collision or no legal move); the session's grid is left
    /// untouched in that case.
    pub fn step(&mut self, stream: &mut dyn PieceStream) -> std::result::Result<u32, Outcome> {
        let shape_id = stream.pop();
        let spawned = self.grid.spawn(shape_id, 0).ok_or(Outcome::GameOver)?;

        let mv = find_best(&mut self.grid, shape_id, stream, &self.weights, self.lookahead)
            .ok_or(Outcome::NoLegalMove)?;

        let applied = self.apply(spawned, mv);
        self.grid.block_add(&applied);

        let cleared = if self.grid.n_full_rows() > 0 { self.grid.clear_lines() } else { 0 };
        Ok(cleared)
    }

    /// Rotates and translates the spawned cursor to the decided rotation and
    /// column one step at a time, validating each step, then hard-drops it.
    fn apply(&self, spawned: Block, mv: Move) -> Block {
        let mut block = spawned;
        while block.rot != mv.rot {
            let next = self.grid.try_rotate(&block, 1);
            if next == block {
                // Every rotation step collided; stop rather than spin forever.
                break;
            }
            block = next;
        }
        while block.offset.x != mv.col {
            let direction = if block.offset.x < mv.col { Direction::Right } else { Direction::Left };
            let next = self.grid.try_move(&block, direction, 1);
            if next == block {
                break;
            }
            block = next;
        }
        self.grid.drop(&block)
    }

    /// Runs the session until top-out or `max_pieces` placements, whichever
    /// comes first, returning aggregate stats.
    pub fn run(&mut self, stream: &mut dyn PieceStream, max_pieces: u64) -> Stats {
        let mut stats = Stats::default();
        while stats.pieces_placed < max_pieces {
            match self.step(stream) {
                Ok(cleared) => {
                    stats.pieces_placed += 1;
                    stats.lines_cleared += cleared as u64;
                }
                Err(_) => break,
            }
        }
        stats
    }
}
