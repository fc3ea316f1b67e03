mod parse;

use std::sync::OnceLock;

use crate::tetris::geometry::Delta;

pub use parse::DEFAULT_SHAPE_TEXT;

static STANDARD_TABLE: OnceLock<ShapeTable> = OnceLock::new();

/// One rotation of a shape: its four local cell offsets (origin-normalized),
/// bounding box, and bottom crust (lowest occupied local `y` per column).
#[derive(Clone, Debug)]
pub struct Rotation {
    pub cells: [Delta; 4],
    pub width: i32,
    pub height: i32,
    pub crust: Vec<i32>,
}

/// An immutable, precomputed tetromino: all of its distinct rotations.
#[derive(Clone, Debug)]
pub struct Shape {
    pub id: usize,
    pub rotations: Vec<Rotation>,
    pub max_dim_len: i32,
}

impl Shape {
    /// The number of distinct rotations this shape has (1, 2, or 4).
    pub fn n_rot(&self) -> usize {
        self.rotations.len()
    }

    /// The rotation entry at the given index.
    pub fn rotation(&self, rot: usize) -> &Rotation {
        &self.rotations[rot]
    }
}

/// The full, read-only table of all 7 tetrominoes and their rotations.
/// Built once at startup; shared for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct ShapeTable {
    shapes: Vec<Shape>,
}

impl ShapeTable {
    /// The number of distinct shapes in the table (always 7).
    pub fn n_shapes(&self) -> usize {
        self.shapes.len()
    }

    /// The shape entry at the given index.
    pub fn shape(&self, i: usize) -> &Shape {
        &self.shapes[i]
    }

    /// Builds the table from the built-in standard tetromino description.
    pub fn standard() -> ShapeTable {
        parse::parse_shape_table(DEFAULT_SHAPE_TEXT)
            .expect("built-in shape description must be well-formed")
    }

    /// The process-wide standard table, built once behind a lazily-initialized
    /// singleton. Used wherever a `'static` reference is needed, e.g. a
    /// long-lived game session.
    pub fn global() -> &'static ShapeTable {
        STANDARD_TABLE.get_or_init(ShapeTable::standard)
    }

    /// Builds the table from a shape description file's contents (see §6 of the spec).
    /// Malformed input is fatal at process init, per the spec's error-handling design;
    /// callers that want to recover should validate the file before calling this.
    pub fn from_text(text: &str) -> crate::utils::prelude::Result<ShapeTable> {
        parse::parse_shape_table(text)
    }
}
