pub mod session;
pub mod tetris;
pub mod train;

pub mod utils;

pub mod prelude {
    pub use super::session::{Outcome, Session, Stats};
    pub use super::tetris::prelude::*;
    pub use super::train::{train, TrainOptions};
}
