//! TOML configuration for a Homestead session.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use homestead_core::{GridRejection, GridSize, GRID_HEIGHT, GRID_WIDTH, MAX_GRID_DIMENSION};
use homestead_system_rest::{Config as RestConfig, DEFAULT_MIN_ENERGY};
use homestead_system_shop::{Config as ShopConfig, DEFAULT_BATCH_SIZE};
use serde::Deserialize;

/// Resolved settings with every default filled in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) grid: GridSize,
    pub(crate) rest: RestConfig,
    pub(crate) shop: ShopConfig,
}

impl Settings {
    /// Reads and validates the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(contents).context("failed to parse config toml contents")?;

        let width = file.grid.width.unwrap_or(GRID_WIDTH);
        let height = file.grid.height.unwrap_or(GRID_HEIGHT);
        let grid = match GridSize::new(width, height).validate() {
            Ok(grid) => grid,
            Err(GridRejection::Empty) => {
                bail!("grid dimensions must be positive (received {width}x{height})")
            }
            Err(GridRejection::TooLarge) => bail!(
                "grid dimensions must not exceed {MAX_GRID_DIMENSION} (received {width}x{height})"
            ),
        };

        let batch_size = file.shop.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            bail!("shop batch_size must be positive");
        }

        Ok(Self {
            grid,
            rest: RestConfig::new(file.rest.min_energy.unwrap_or(DEFAULT_MIN_ENERGY)),
            shop: ShopConfig::new(batch_size),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    grid: GridSection,
    rest: RestSection,
    shop: ShopSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GridSection {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RestSection {
    min_energy: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ShopSection {
    batch_size: Option<u32>,
}
