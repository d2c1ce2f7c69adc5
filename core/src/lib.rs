#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridwalk engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and pure systems. Systems translate held input into [`Command`]
//! values, the world executes those commands against a player bound to a map
//! via its `apply` entry point, and then reports [`Event`] values describing
//! what actually happened. Geometry lives in map-cell units: a cell spans one
//! unit along each axis, columns grow to the east and rows grow to the south.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells in a single map row.
pub const DEFAULT_ROW_WIDTH: u32 = 64;

/// Number of rows in a map.
pub const DEFAULT_ROW_COUNT: u32 = 64;

/// Highest cell value that still permits occupancy. Anything above blocks.
pub const DEFAULT_PASSABLE_THRESHOLD: u8 = 63;

/// Distance walked per unit of forward input, in cells.
pub const DEFAULT_MOVE_SPEED: f64 = 0.065;

/// Angle turned per unit of turn input, in radians.
pub const DEFAULT_TURN_SPEED: f64 = 0.05;

/// Commands that express all permissible player mutations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Moves the player relative to its facing direction.
    Move {
        /// Distance along the facing vector. Negative values walk backwards.
        length: f64,
        /// Distance perpendicular to the facing vector. Positive values strafe right.
        sideways: f64,
    },
    /// Rotates the facing vector in place.
    Turn {
        /// Rotation in radians. Positive values turn right.
        alpha: f64,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player position changed along at least one axis.
    PlayerMoved {
        /// Position held before the command.
        from: Position,
        /// Position held after the command.
        to: Position,
    },
    /// Reports that a non-zero move was rejected on both axes.
    MovementBlocked {
        /// Position the player remained at.
        at: Position,
    },
    /// Announces that the player crossed into a different cell.
    CellEntered {
        /// Cell containing the player after the move.
        cell: CellCoord,
    },
    /// Confirms that the facing vector rotated.
    PlayerTurned {
        /// Facing vector after the rotation.
        facing: Facing,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that points west or north of the map still map
/// onto a cell, which the map then reports as out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i64,
    row: i64,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i64 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i64 {
        self.row
    }

    /// Returns the cell that contains the provided continuous point.
    ///
    /// Coordinates are floored, so `-0.5` lands in column `-1` rather than
    /// being truncated into column `0`. Non-finite coordinates have no cell.
    #[must_use]
    pub fn containing(x: f64, y: f64) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(Self::new(x.floor() as i64, y.floor() as i64))
    }
}

/// Continuous point on the map measured in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, growing towards the east.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate, growing towards the south.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Cell that contains the position, if the coordinates are finite.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        CellCoord::containing(self.x, self.y)
    }
}

/// Direction the player looks and walks towards.
///
/// The vector is not normalized; rotations preserve whatever magnitude it was
/// created with.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Facing {
    dx: f64,
    dy: f64,
}

impl Facing {
    /// Facing towards decreasing row indices.
    pub const NORTH: Self = Self::new(0.0, -1.0);
    /// Facing towards increasing column indices.
    pub const EAST: Self = Self::new(1.0, 0.0);
    /// Facing towards increasing row indices.
    pub const SOUTH: Self = Self::new(0.0, 1.0);
    /// Facing towards decreasing column indices.
    pub const WEST: Self = Self::new(-1.0, 0.0);

    /// Creates a facing vector from its components.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> f64 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> f64 {
        self.dy
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Returns the vector rotated by `alpha` radians.
    ///
    /// Rows grow downwards, so a positive angle turns clockwise on screen,
    /// which is a right turn: rotating [`Facing::EAST`] by a quarter turn
    /// yields [`Facing::SOUTH`]. Both components are derived from the same
    /// pre-rotation pair.
    #[must_use]
    pub fn rotated(self, alpha: f64) -> Self {
        let (sin, cos) = alpha.sin_cos();
        let dx = self.dx * cos - self.dy * sin;
        let dy = self.dx * sin + self.dy * cos;
        Self { dx, dy }
    }
}

/// Position and facing of the player, captured together for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Continuous position on the map.
    pub position: Position,
    /// Direction the player faces.
    pub facing: Facing,
}

impl Pose {
    /// Creates a pose from raw coordinates and facing components.
    #[must_use]
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            position: Position::new(x, y),
            facing: Facing::new(dx, dy),
        }
    }
}

/// Describes how a flat byte buffer is laid out as a grid of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapLayout {
    /// Number of cells in each row.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Highest cell value that is still passable.
    pub passable_threshold: u8,
}

impl MapLayout {
    /// Creates a layout with the provided dimensions and the default threshold.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            passable_threshold: DEFAULT_PASSABLE_THRESHOLD,
        }
    }

    /// Total number of cells the layout addresses.
    ///
    /// Returns `None` when the product does not fit in memory addressing.
    #[must_use]
    pub fn cell_count(&self) -> Option<usize> {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).ok()
    }

    /// Reports whether the cell lies within the layout's extent.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// Linear index of the cell, computed as `column + columns * row`.
    ///
    /// Cells outside the extent have no index; columns past the row width
    /// never wrap into the following row.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }

        let linear = u64::from(column) + u64::from(self.columns) * u64::from(row);
        usize::try_from(linear).ok()
    }

    /// Reports whether a raw cell value permits occupancy.
    #[must_use]
    pub const fn is_passable_value(&self, value: u8) -> bool {
        value <= self.passable_threshold
    }
}

impl Default for MapLayout {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_WIDTH, DEFAULT_ROW_COUNT)
    }
}

/// Per-unit speeds applied by systems when translating input into commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementTuning {
    /// Distance walked per tick of held movement input.
    pub move_speed: f64,
    /// Angle turned per tick of held turn input.
    pub turn_speed: f64,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }
}

/// Reasons a map buffer may be rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The layout declares zero columns or zero rows.
    #[error("map layout must have at least one column and one row (got {columns}x{rows})")]
    EmptyLayout {
        /// Declared number of columns.
        columns: u32,
        /// Declared number of rows.
        rows: u32,
    },
    /// The layout addresses more cells than can be indexed.
    #[error("map layout {columns}x{rows} exceeds addressable memory")]
    TooLarge {
        /// Declared number of columns.
        columns: u32,
        /// Declared number of rows.
        rows: u32,
    },
    /// The buffer holds fewer bytes than the layout requires.
    #[error("map buffer holds {actual} bytes but the layout requires {expected}")]
    Truncated {
        /// Number of bytes the layout requires.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
}

/// Failures raised by player operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// A movement query ran before any map was bound to the player.
    #[error("no map bound to the player")]
    NoMapBound,
}
