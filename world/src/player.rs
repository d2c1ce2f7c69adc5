//! Continuous player pose integrated against map passability.

use gridwalk_core::{
    CellCoord, Facing, MovementTuning, PlayerError, Pose, Position, DEFAULT_MOVE_SPEED,
    DEFAULT_TURN_SPEED,
};
use tracing::trace;

use crate::Map;

/// Player holding a continuous pose on a borrowed map.
///
/// The map is not owned: it is bound after construction and may be rebound at
/// any time, and the borrow guarantees it outlives the player.
#[derive(Clone, Debug)]
pub struct Player<'map> {
    position: Position,
    facing: Facing,
    move_speed: f64,
    turn_speed: f64,
    map: Option<&'map Map>,
}

impl<'map> Player<'map> {
    /// Creates an unbound player at `(x, y)` facing `(dx, dy)`.
    #[must_use]
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self::from_pose(Pose::new(x, y, dx, dy))
    }

    /// Creates an unbound player from a captured pose.
    #[must_use]
    pub const fn from_pose(pose: Pose) -> Self {
        Self {
            position: pose.position,
            facing: pose.facing,
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            map: None,
        }
    }

    /// Replaces the per-tick speeds reported to systems.
    #[must_use]
    pub fn with_tuning(mut self, tuning: MovementTuning) -> Self {
        self.move_speed = tuning.move_speed;
        self.turn_speed = tuning.turn_speed;
        self
    }

    /// Binds the player to a map, replacing any previous binding.
    pub fn set_map(&mut self, map: &'map Map) {
        self.map = Some(map);
    }

    /// Map the player is currently bound to.
    #[must_use]
    pub const fn map(&self) -> Option<&'map Map> {
        self.map
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current facing vector.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Position and facing captured together.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            facing: self.facing,
        }
    }

    /// Walking distance per tick of held input. Not applied by [`Player::advance`].
    #[must_use]
    pub const fn move_speed(&self) -> f64 {
        self.move_speed
    }

    /// Turning angle per tick of held input. Not applied by [`Player::turn`].
    #[must_use]
    pub const fn turn_speed(&self) -> f64 {
        self.turn_speed
    }

    /// Speeds bundled for systems that scale input.
    #[must_use]
    pub const fn tuning(&self) -> MovementTuning {
        MovementTuning {
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
        }
    }

    /// Reports whether the point lies in a passable cell of the bound map.
    pub fn can_move_to(&self, x: f64, y: f64) -> Result<bool, PlayerError> {
        let map = self.map.ok_or(PlayerError::NoMapBound)?;
        Ok(CellCoord::containing(x, y).map_or(false, |cell| !map.is_cell_blocking(cell)))
    }

    /// Moves `length` cells along the facing vector. Negative walks backwards.
    pub fn advance(&mut self, length: f64) -> Result<(), PlayerError> {
        self.advance_with_strafe(length, 0.0)
    }

    /// Moves along the facing vector and sideways to its right.
    ///
    /// Each axis is resolved separately: X commits when the target column is
    /// passable at the old Y, then Y commits when the target row is passable at
    /// the X that resulted from the first decision. Blocking one axis therefore
    /// still lets the player slide along the other.
    pub fn advance_with_strafe(&mut self, length: f64, sideways: f64) -> Result<(), PlayerError> {
        let dx = self.facing.dx();
        let dy = self.facing.dy();
        let target_x = self.position.x() + dx * length - dy * sideways;
        let target_y = self.position.y() + dy * length + dx * sideways;

        if self.can_move_to(target_x, self.position.y())? {
            self.position = Position::new(target_x, self.position.y());
        }
        if self.can_move_to(self.position.x(), target_y)? {
            self.position = Position::new(self.position.x(), target_y);
        }

        trace!(
            x = self.position.x(),
            y = self.position.y(),
            target_x,
            target_y,
            "resolved movement"
        );
        Ok(())
    }

    /// Rotates the facing vector by `alpha` radians. Positive turns right.
    pub fn turn(&mut self, alpha: f64) {
        self.facing = self.facing.rotated(alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::MapLayout;

    #[test]
    fn unbound_player_reports_missing_map() {
        let mut player = Player::new(1.5, 1.5, 1.0, 0.0);
        assert_eq!(player.can_move_to(1.5, 1.5), Err(PlayerError::NoMapBound));
        assert_eq!(player.advance(0.5), Err(PlayerError::NoMapBound));
        assert_eq!(player.position(), Position::new(1.5, 1.5));
    }

    #[test]
    fn turning_does_not_require_a_map() {
        let mut player = Player::new(1.5, 1.5, 1.0, 0.0);
        player.turn(std::f64::consts::PI);
        assert!((player.facing().dx() + 1.0).abs() < 1e-12);
        assert!(player.facing().dy().abs() < 1e-12);
    }

    #[test]
    fn defaults_carry_canonical_speeds() {
        let player = Player::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(player.move_speed(), 0.065);
        assert_eq!(player.turn_speed(), 0.05);
        assert!(player.map().is_none());
    }

    #[test]
    fn tuning_overrides_speeds() {
        let player = Player::new(0.0, 0.0, 1.0, 0.0).with_tuning(MovementTuning {
            move_speed: 0.2,
            turn_speed: 0.1,
        });
        assert_eq!(player.tuning().move_speed, 0.2);
        assert_eq!(player.tuning().turn_speed, 0.1);
    }

    #[test]
    fn non_finite_targets_are_blocked() {
        let map = Map::filled(MapLayout::new(4, 4), 0).expect("map");
        let mut player = Player::new(1.5, 1.5, 1.0, 0.0);
        player.set_map(&map);
        assert_eq!(player.can_move_to(f64::NAN, 1.5), Ok(false));
        player.advance(f64::INFINITY).expect("bound");
        assert_eq!(player.position(), Position::new(1.5, 1.5));
    }

    #[test]
    fn negative_coordinates_leave_the_map() {
        let map = Map::filled(MapLayout::new(4, 4), 0).expect("map");
        let mut player = Player::new(0.2, 1.5, -1.0, 0.0);
        player.set_map(&map);
        assert_eq!(player.can_move_to(-0.1, 1.5), Ok(false));
        player.advance(0.5).expect("bound");
        assert_eq!(player.position(), Position::new(0.2, 1.5));
    }

    #[test]
    fn player_can_be_rebound() {
        let open = Map::filled(MapLayout::new(4, 4), 0).expect("map");
        let closed = Map::filled(MapLayout::new(4, 4), 255).expect("map");
        let mut player = Player::new(1.5, 1.5, 1.0, 0.0);

        player.set_map(&open);
        assert_eq!(player.can_move_to(2.5, 1.5), Ok(true));
        player.set_map(&closed);
        assert_eq!(player.can_move_to(2.5, 1.5), Ok(false));
    }
}
