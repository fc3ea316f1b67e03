pub mod block;
pub mod consts;
pub mod features;
pub mod geometry;
pub mod grid;
pub mod mv;
pub mod search;
pub mod shape;
pub mod stream;
pub mod weights;

pub mod prelude {
    pub use crate::utils::prelude::*;

    pub use super::{
        block::Block,
        consts::*,
        features::extract_features,
        geometry::{Delta, Pos},
        grid::Grid,
        mv::Move,
        search::find_best,
        shape::{Shape, ShapeTable},
        stream::{BagStream, PieceStream},
        weights::Weights,
    };
}
