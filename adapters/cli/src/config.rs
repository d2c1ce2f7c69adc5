//! Optional TOML configuration for map layout and movement speeds.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use gridwalk_core::{MapLayout, MovementTuning};
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Settings resolved from the configuration file, or defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Layout used to interpret the level file.
    pub(crate) map: MapLayout,
    /// Speeds applied to held input.
    pub(crate) movement: MovementTuning,
}

impl Config {
    /// Loads the configuration stored at the provided path.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        if file.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported config version {}; expected {}",
                file.version,
                SUPPORTED_CONFIG_VERSION
            );
        }

        let movement = file.movement;
        if !movement.move_speed.is_finite() || !movement.turn_speed.is_finite() {
            bail!("movement speeds must be finite numbers");
        }
        if file.map.columns == 0 || file.map.rows == 0 {
            bail!(
                "map layout must have at least one column and one row (got {}x{})",
                file.map.columns,
                file.map.rows
            );
        }

        Ok(Self {
            map: file.map,
            movement,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    map: MapLayout,
    #[serde(default)]
    movement: MovementTuning,
}
