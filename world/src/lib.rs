#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map and player state for Gridwalk.

mod level;
mod map;
mod player;

pub use level::{
    Level, SPAWN_FACING_EAST, SPAWN_FACING_NORTH, SPAWN_FACING_SOUTH, SPAWN_FACING_WEST,
};
pub use map::Map;
pub use player::Player;

use gridwalk_core::{Command, Event, PlayerError};

/// Applies the provided command to the player, reporting what changed.
///
/// Events are appended in a fixed order: movement outcome first, then any
/// cell transition, then rotation. A player without a bound map rejects
/// movement commands and leaves its pose untouched.
pub fn apply(
    player: &mut Player<'_>,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), PlayerError> {
    match command {
        Command::Move { length, sideways } => {
            let from = player.position();
            player.advance_with_strafe(length, sideways)?;
            let to = player.position();

            if to != from {
                out_events.push(Event::PlayerMoved { from, to });
            } else if length != 0.0 || sideways != 0.0 {
                out_events.push(Event::MovementBlocked { at: to });
            }

            if let Some(cell) = to.cell() {
                if from.cell() != Some(cell) {
                    out_events.push(Event::CellEntered { cell });
                }
            }
        }
        Command::Turn { alpha } => {
            if alpha != 0.0 {
                player.turn(alpha);
                out_events.push(Event::PlayerTurned {
                    facing: player.facing(),
                });
            }
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use gridwalk_core::{CellCoord, Pose};

    use super::{Map, Player};

    /// Captures the player's pose for rendering.
    #[must_use]
    pub fn pose(player: &Player<'_>) -> Pose {
        player.pose()
    }

    /// Cell currently containing the player.
    #[must_use]
    pub fn cell_of(player: &Player<'_>) -> Option<CellCoord> {
        player.position().cell()
    }

    /// Number of columns and rows in the map.
    #[must_use]
    pub fn map_dimensions(map: &Map) -> (u32, u32) {
        map.dimensions()
    }

    /// Reports whether the cell can be occupied.
    #[must_use]
    pub fn is_passable(map: &Map, cell: CellCoord) -> bool {
        !map.is_cell_blocking(cell)
    }
}
