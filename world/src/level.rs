//! Level files: a wall plane optionally followed by an object plane.

use gridwalk_core::{CellCoord, Facing, MapError, MapLayout, Pose, Position};
use tracing::debug;

use crate::Map;

/// Object value marking a spawn that faces north.
pub const SPAWN_FACING_NORTH: u8 = 19;
/// Object value marking a spawn that faces east.
pub const SPAWN_FACING_EAST: u8 = 20;
/// Object value marking a spawn that faces south.
pub const SPAWN_FACING_SOUTH: u8 = 21;
/// Object value marking a spawn that faces west.
pub const SPAWN_FACING_WEST: u8 = 22;

/// Wall map together with the object plane stored after it.
#[derive(Clone, Debug)]
pub struct Level {
    walls: Map,
    objects: Option<Box<[u8]>>,
}

impl Level {
    /// Splits a level file into its planes.
    ///
    /// The first `columns * rows` bytes form the wall plane and are mandatory.
    /// The object plane is kept only when a second complete plane follows;
    /// anything after it is ignored.
    pub fn from_bytes(bytes: &[u8], layout: MapLayout) -> Result<Self, MapError> {
        let walls = Map::new(bytes.to_vec(), layout)?;
        let plane = walls.cells().len();
        let objects = plane
            .checked_mul(2)
            .and_then(|end| bytes.get(plane..end))
            .map(Box::from);

        debug!(
            bytes = bytes.len(),
            has_objects = objects.is_some(),
            "loaded level planes"
        );

        Ok(Self { walls, objects })
    }

    /// Wall plane used for passability queries.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.walls
    }

    /// Consumes the level, keeping only the wall plane.
    #[must_use]
    pub fn into_map(self) -> Map {
        self.walls
    }

    /// Reports whether the file carried an object plane.
    #[must_use]
    pub const fn has_object_plane(&self) -> bool {
        self.objects.is_some()
    }

    /// Raw object value at the cell, or `None` outside the grid or without objects.
    #[must_use]
    pub fn object_value(&self, cell: CellCoord) -> Option<u8> {
        let objects = self.objects.as_deref()?;
        self.walls
            .layout()
            .index(cell)
            .and_then(|index| objects.get(index).copied())
    }

    /// Pose of the last spawn marker in row-major order.
    ///
    /// Later markers override earlier ones. The player is centred in the
    /// marker's cell and faces the marker's cardinal direction.
    #[must_use]
    pub fn spawn(&self) -> Option<Pose> {
        let (columns, rows) = self.walls.dimensions();
        for row in (0..i64::from(rows)).rev() {
            for column in (0..i64::from(columns)).rev() {
                let cell = CellCoord::new(column, row);
                let Some(facing) = self.object_value(cell).and_then(spawn_facing) else {
                    continue;
                };

                debug!(column, row, "found spawn marker");
                return Some(Pose {
                    position: Position::new(column as f64 + 0.5, row as f64 + 0.5),
                    facing,
                });
            }
        }
        None
    }
}

fn spawn_facing(value: u8) -> Option<Facing> {
    match value {
        SPAWN_FACING_NORTH => Some(Facing::NORTH),
        SPAWN_FACING_EAST => Some(Facing::EAST),
        SPAWN_FACING_SOUTH => Some(Facing::SOUTH),
        SPAWN_FACING_WEST => Some(Facing::WEST),
        _ => None,
    }
}
