#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that turns held input into player commands.

use std::f64::consts::SQRT_2;

use gridwalk_core::{Command, MovementTuning};
use tracing::trace;

/// Input held during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    /// Walk along the facing vector.
    pub forward: bool,
    /// Walk against the facing vector.
    pub backward: bool,
    /// Step to the left of the facing vector.
    pub strafe_left: bool,
    /// Step to the right of the facing vector.
    pub strafe_right: bool,
    /// Rotate anticlockwise on screen.
    pub turn_left: bool,
    /// Rotate clockwise on screen.
    pub turn_right: bool,
}

impl MovementInput {
    /// Reports whether no movement or turn input is held.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Pure system that scales held input by the tuning speeds.
#[derive(Debug)]
pub struct Movement {
    tuning: MovementTuning,
    pending_turn: f64,
}

impl Movement {
    /// Creates a movement system with the provided speeds.
    #[must_use]
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            pending_turn: 0.0,
        }
    }

    /// Speeds applied to held input.
    #[must_use]
    pub fn tuning(&self) -> MovementTuning {
        self.tuning
    }

    /// Adds analog turn units, such as pointer motion, to the next tick.
    ///
    /// One unit turns by `turn_speed`; positive units turn right.
    pub fn queue_turn(&mut self, units: f64) {
        self.pending_turn += units;
    }

    /// Emits the commands for one tick of held input.
    ///
    /// The turn is emitted before the move so that walking uses the updated
    /// facing. Combined forward and sideways input is scaled down by `sqrt(2)`
    /// on each axis. Idle ticks emit nothing.
    pub fn handle(&mut self, input: &MovementInput, out: &mut Vec<Command>) {
        let mut turn_units = std::mem::take(&mut self.pending_turn);
        if input.turn_right {
            turn_units += 1.0;
        }
        if input.turn_left {
            turn_units -= 1.0;
        }
        if turn_units != 0.0 {
            out.push(Command::Turn {
                alpha: turn_units * self.tuning.turn_speed,
            });
        }

        let speed = self.tuning.move_speed;
        let mut forward = 0.0;
        let mut sideways = 0.0;
        if input.forward {
            forward += speed;
        }
        if input.backward {
            forward -= speed;
        }
        if input.strafe_left {
            sideways -= speed;
        }
        if input.strafe_right {
            sideways += speed;
        }

        if forward != 0.0 && sideways != 0.0 {
            forward /= SQRT_2;
            sideways /= SQRT_2;
        }
        if forward != 0.0 || sideways != 0.0 {
            out.push(Command::Move {
                length: forward,
                sideways,
            });
        }

        trace!(turn_units, forward, sideways, "handled movement input");
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(MovementTuning::default())
    }
}
