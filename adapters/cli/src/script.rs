//! Parsing of scripted key sequences and start poses passed on the command line.

use std::{error::Error, fmt};

use gridwalk_core::Pose;
use gridwalk_system_movement::MovementInput;

/// Token that represents a tick with no keys held.
const IDLE_TOKEN: &str = ".";
/// Separator between a token and its repeat count.
const REPEAT_DELIMITER: char = '*';
/// Separator between the components of a start pose.
const POSE_DELIMITER: char = ',';
/// Upper bound on the ticks a single script may expand to.
const MAX_SCRIPT_TICKS: usize = 1_000_000;

/// Parses a whitespace separated script into one input per tick.
///
/// Each token combines key letters (`w` forward, `s` backward, `a` strafe
/// left, `d` strafe right, `q` turn left, `e` turn right) or is `.` for an
/// idle tick. A `*N` suffix repeats the token `N` times. The expanded
/// script may hold at most [`MAX_SCRIPT_TICKS`] ticks.
pub(crate) fn parse_script(script: &str) -> Result<Vec<MovementInput>, ScriptError> {
    let mut inputs = Vec::new();
    for token in script.split_whitespace() {
        let (keys, count) = split_repeat(token)?;
        let input = parse_keys(keys, token)?;
        if inputs.len() + count > MAX_SCRIPT_TICKS {
            return Err(ScriptError::TooManyTicks {
                limit: MAX_SCRIPT_TICKS,
            });
        }
        inputs.extend(std::iter::repeat(input).take(count));
    }
    Ok(inputs)
}

/// Parses a start pose written as `x,y,dx,dy`.
pub(crate) fn parse_pose(value: &str) -> Result<Pose, ScriptError> {
    let components = value
        .split(POSE_DELIMITER)
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ScriptError::InvalidPose(value.to_owned()))?;

    let [x, y, dx, dy] = components.as_slice() else {
        return Err(ScriptError::InvalidPose(value.to_owned()));
    };
    if components.iter().any(|component| !component.is_finite()) {
        return Err(ScriptError::InvalidPose(value.to_owned()));
    }

    Ok(Pose::new(*x, *y, *dx, *dy))
}

fn split_repeat(token: &str) -> Result<(&str, usize), ScriptError> {
    let Some((keys, count)) = token.split_once(REPEAT_DELIMITER) else {
        return Ok((token, 1));
    };

    let count = count
        .parse::<usize>()
        .map_err(|_| ScriptError::InvalidRepeat(token.to_owned()))?;
    if count == 0 || count > MAX_SCRIPT_TICKS {
        return Err(ScriptError::InvalidRepeat(token.to_owned()));
    }

    Ok((keys, count))
}

fn parse_keys(keys: &str, token: &str) -> Result<MovementInput, ScriptError> {
    let mut input = MovementInput::default();
    if keys == IDLE_TOKEN {
        return Ok(input);
    }
    if keys.is_empty() {
        return Err(ScriptError::EmptyToken(token.to_owned()));
    }

    for key in keys.chars() {
        match key {
            'w' => input.forward = true,
            's' => input.backward = true,
            'a' => input.strafe_left = true,
            'd' => input.strafe_right = true,
            'q' => input.turn_left = true,
            'e' => input.turn_right = true,
            other => {
                return Err(ScriptError::UnknownKey {
                    key: other,
                    token: token.to_owned(),
                })
            }
        }
    }

    Ok(input)
}

/// Errors that can occur while parsing command-line scripts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A token held no keys before its repeat suffix.
    EmptyToken(String),
    /// A token used a letter that maps to no input.
    UnknownKey {
        /// Offending character.
        key: char,
        /// Token containing the character.
        token: String,
    },
    /// The repeat suffix was not a positive integer within the tick limit.
    InvalidRepeat(String),
    /// The expanded script exceeded the tick limit.
    TooManyTicks {
        /// Maximum number of ticks accepted.
        limit: usize,
    },
    /// The start pose was not four finite comma separated numbers.
    InvalidPose(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken(token) => write!(f, "script token '{token}' holds no keys"),
            Self::UnknownKey { key, token } => {
                write!(f, "unknown key '{key}' in script token '{token}'")
            }
            Self::InvalidRepeat(token) => {
                write!(f, "script token '{token}' has an invalid repeat count")
            }
            Self::TooManyTicks { limit } => {
                write!(f, "script expands to more than {limit} ticks")
            }
            Self::InvalidPose(value) => {
                write!(f, "could not parse start pose '{value}', expected x,y,dx,dy")
            }
        }
    }
}

impl Error for ScriptError {}
