#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Homestead engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure policy systems. Adapters submit [`Command`]
//! values describing desired intents, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Rejected intents never fail: they leave the world untouched and are
//! reported as rejection events so presentation layers can surface feedback.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Homestead.";

/// Default number of tile columns in the farm.
pub const GRID_WIDTH: u32 = 16;

/// Default number of tile rows in the farm.
pub const GRID_HEIGHT: u32 = 12;

/// Largest accepted width or height of the farm, in tiles.
pub const MAX_GRID_DIMENSION: u32 = 256;

/// Edge length of a rendered tile measured in pixels.
pub const TILE_SIZE: u32 = 32;

/// Energy restored at the start of each day.
pub const MAX_ENERGY: u32 = 100;

/// Water restored at the start of each day.
pub const MAX_WATER: u32 = 100;

/// Money held by a freshly created player.
pub const STARTING_MONEY: u64 = 100;

/// Tile the player occupies when a session starts.
pub const STARTING_POSITION: Position = Position::new(8, 6);

/// Hour of day the clock resets to when a new day begins.
pub const DAWN_HOUR: u8 = 6;

/// Day counter value for a new session.
pub const FIRST_DAY: u32 = 1;

/// Energy spent tilling a tile with the hoe.
pub const HOE_ENERGY_COST: u32 = 5;

/// Energy spent watering a tile.
pub const WATERING_ENERGY_COST: u32 = 3;

/// Water consumed by a single use of the watering can.
pub const WATERING_WATER_COST: u32 = 1;

/// Energy spent planting seeds into a tile.
pub const PLANTING_ENERGY_COST: u32 = 5;

/// Energy spent harvesting a ripe crop by hand.
pub const HARVEST_ENERGY_COST: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Rebuilds the tile grid using the provided dimensions.
    ConfigureGrid {
        /// Dimensions of the new grid.
        size: GridSize,
    },
    /// Moves the player a single tile in the given direction.
    MovePlayer {
        /// Direction of travel; also becomes the player's facing.
        direction: Direction,
    },
    /// Replaces the tool the player currently holds.
    SelectTool {
        /// Tool that becomes active.
        tool: Tool,
    },
    /// Applies the currently selected tool to the tile at the given position.
    UseTool {
        /// Targeted tile. Positions outside the grid are ignored.
        position: Position,
    },
    /// Ends the current day: grows watered crops and restores daily resources.
    AdvanceDay,
    /// Buys a quantity of seeds for the given crop.
    BuySeeds {
        /// Crop whose seeds should be purchased.
        crop: CropType,
        /// Number of seeds requested.
        amount: u32,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the tile grid was rebuilt.
    GridConfigured {
        /// Dimensions of the rebuilt grid.
        size: GridSize,
    },
    /// Reports that a grid configuration was refused; the farm is unchanged.
    GridRejected {
        /// Dimensions that were requested.
        size: GridSize,
        /// Why the dimensions were refused.
        reason: GridRejection,
    },
    /// Confirms that the player processed a movement intent.
    PlayerMoved {
        /// Tile occupied before the intent.
        from: Position,
        /// Tile occupied afterwards. Equal to `from` when blocked by the edge.
        to: Position,
        /// Facing recorded by the intent.
        facing: Direction,
    },
    /// Announces that the player switched tools.
    ToolSelected {
        /// Tool that became active.
        tool: Tool,
    },
    /// Confirms that a tile was tilled.
    TilePlowed {
        /// Tile that was tilled.
        position: Position,
    },
    /// Confirms that a tile was watered.
    TileWatered {
        /// Tile that was watered.
        position: Position,
    },
    /// Confirms that seeds were planted in a tile.
    CropPlanted {
        /// Tile that received the seeds.
        position: Position,
        /// Crop that was planted.
        crop: CropType,
    },
    /// Confirms that a ripe crop was harvested and sold.
    CropHarvested {
        /// Tile the crop was harvested from.
        position: Position,
        /// Crop that was harvested.
        crop: CropType,
        /// Money credited for the harvest.
        earned: u64,
    },
    /// Reports that a tool application was rejected without changing the world.
    ToolRejected {
        /// Tool that was applied.
        tool: Tool,
        /// Tile the tool was applied to.
        position: Position,
        /// First precondition that failed.
        reason: ToolRejection,
    },
    /// Reports that a crop advanced to a new growth stage overnight.
    CropGrew {
        /// Tile containing the crop.
        position: Position,
        /// Stage reached after growing.
        stage: CropStage,
    },
    /// Announces the start of a new day.
    DayAdvanced {
        /// Number of the day that just began.
        day: u32,
    },
    /// Confirms a completed seed purchase.
    SeedsPurchased {
        /// Crop whose seeds were bought.
        crop: CropType,
        /// Number of seeds added to the inventory.
        amount: u32,
        /// Money deducted for the purchase.
        cost: u64,
    },
    /// Reports that a seed purchase was rejected without changing the world.
    PurchaseRejected {
        /// Crop whose seeds were requested.
        crop: CropType,
        /// Number of seeds requested.
        amount: u32,
        /// Price of the request, saturated when it cannot be represented.
        cost: u64,
        /// Specific reason the purchase failed.
        reason: PurchaseRejection,
    },
}

/// Location of a single tile expressed as column and row coordinates.
///
/// Coordinates are signed so that positions derived from pointer input outside
/// the farm, including negative ones, can be represented and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring position one step in `direction`.
    ///
    /// The result is not bounds checked.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Dimensions of the tile grid measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles contained in the grid.
    #[must_use]
    pub fn area(&self) -> usize {
        let area = u64::from(self.width) * u64::from(self.height);
        usize::try_from(area).unwrap_or(usize::MAX)
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    /// Row-major index of the position, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Checks that the grid has area and fits within [`MAX_GRID_DIMENSION`].
    pub const fn validate(self) -> Result<Self, GridRejection> {
        if self.width == 0 || self.height == 0 {
            Err(GridRejection::Empty)
        } else if self.width > MAX_GRID_DIMENSION || self.height > MAX_GRID_DIMENSION {
            Err(GridRejection::TooLarge)
        } else {
            Ok(self)
        }
    }

    /// Clamps the position into `[0, width - 1] x [0, height - 1]`.
    ///
    /// Grids without area clamp every position to the origin.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        let max_x = i32::try_from(self.width.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height.saturating_sub(1)).unwrap_or(i32::MAX);
        Position::new(position.x().clamp(0, max_x), position.y().clamp(0, max_y))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

/// Facing directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)` associated with the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Tools the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Tills untouched ground.
    Hoe,
    /// Waters tilled soil.
    WateringCan,
    /// Plants seeds into tilled soil.
    Seeds,
    /// Harvests ripe crops.
    Hand,
}

impl Tool {
    /// Every tool in toolbar order.
    pub const ALL: [Tool; 4] = [Tool::Hoe, Tool::WateringCan, Tool::Seeds, Tool::Hand];

    /// Stable lowercase name used by text adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hoe => "hoe",
            Self::WateringCan => "watering_can",
            Self::Seeds => "seeds",
            Self::Hand => "hand",
        }
    }
}

/// Crops that can be bought, planted and sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    /// Wheat.
    Wheat,
    /// Carrot.
    Carrot,
    /// Tomato.
    Tomato,
    /// Corn.
    Corn,
    /// Potato.
    Potato,
}

impl CropType {
    /// Every crop in shop order.
    pub const ALL: [CropType; 5] = [
        CropType::Wheat,
        CropType::Carrot,
        CropType::Tomato,
        CropType::Corn,
        CropType::Potato,
    ];

    /// Money earned when a single harvested crop is sold.
    #[must_use]
    pub const fn sale_price(self) -> u64 {
        match self {
            Self::Wheat => 10,
            Self::Carrot => 15,
            Self::Tomato => 20,
            Self::Corn => 25,
            Self::Potato => 12,
        }
    }

    /// Price of a single seed in the shop.
    #[must_use]
    pub const fn seed_cost(self) -> u64 {
        match self {
            Self::Wheat => 5,
            Self::Carrot => 8,
            Self::Tomato => 10,
            Self::Corn => 12,
            Self::Potato => 6,
        }
    }

    /// Nominal number of days the crop needs to ripen.
    ///
    /// Informational only: overnight growth advances every watered crop by a
    /// single stage regardless of type.
    #[must_use]
    pub const fn growth_days(self) -> u32 {
        match self {
            Self::Wheat => 3,
            Self::Carrot => 4,
            Self::Tomato => 5,
            Self::Corn => 6,
            Self::Potato => 4,
        }
    }

    /// Stable lowercase name used by text adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Carrot => "carrot",
            Self::Tomato => "tomato",
            Self::Corn => "corn",
            Self::Potato => "potato",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Wheat => 0,
            Self::Carrot => 1,
            Self::Tomato => 2,
            Self::Corn => 3,
            Self::Potato => 4,
        }
    }
}

/// Maturity of the crop planted in a tile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CropStage {
    /// Nothing is planted.
    #[default]
    Empty,
    /// Freshly planted seeds.
    Sprout,
    /// Growing plant.
    Growing,
    /// Ripe crop ready for harvest. Terminal growth state.
    Harvestable,
}

impl CropStage {
    /// Ordinal in `0..=3`.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Sprout => 1,
            Self::Growing => 2,
            Self::Harvestable => 3,
        }
    }

    /// Stage reached after one more day of growth, saturating at harvestable.
    #[must_use]
    pub const fn advanced(self) -> Self {
        match self {
            Self::Empty => Self::Sprout,
            Self::Sprout => Self::Growing,
            Self::Growing | Self::Harvestable => Self::Harvestable,
        }
    }

    /// Reports whether the crop is ripe.
    #[must_use]
    pub const fn is_harvestable(self) -> bool {
        matches!(self, Self::Harvestable)
    }
}

/// Per-crop counter covering every [`CropType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropCounts {
    counts: [u32; 5],
}

impl CropCounts {
    /// Counter with every crop set to zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self { counts: [0; 5] }
    }

    /// Builds a counter from explicit per-crop values.
    #[must_use]
    pub const fn new(wheat: u32, carrot: u32, tomato: u32, corn: u32, potato: u32) -> Self {
        Self {
            counts: [wheat, carrot, tomato, corn, potato],
        }
    }

    /// Count stored for the crop.
    #[must_use]
    pub const fn get(&self, crop: CropType) -> u32 {
        self.counts[crop.slot()]
    }

    /// Iterator over every crop and its count in shop order.
    pub fn iter(&self) -> impl Iterator<Item = (CropType, u32)> + '_ {
        CropType::ALL.iter().map(move |crop| (*crop, self.get(*crop)))
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|count| u64::from(*count)).sum()
    }
}

impl Index<CropType> for CropCounts {
    type Output = u32;

    fn index(&self, crop: CropType) -> &Self::Output {
        &self.counts[crop.slot()]
    }
}

impl IndexMut<CropType> for CropCounts {
    fn index_mut(&mut self, crop: CropType) -> &mut Self::Output {
        &mut self.counts[crop.slot()]
    }
}

/// Reasons a tool application may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolRejection {
    /// The hoe was used on a tile that is already tilled.
    AlreadyPlowed,
    /// The tile must be tilled first.
    NotPlowed,
    /// The tile was already watered today.
    AlreadyWatered,
    /// The watering can is empty.
    OutOfWater,
    /// The tile already holds a crop.
    Occupied,
    /// No seeds of the planted crop remain.
    OutOfSeeds,
    /// The tile holds no ripe crop.
    NothingToHarvest,
    /// The player lacks the energy the tool requires.
    InsufficientEnergy,
}

/// Reasons a seed purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseRejection {
    /// The player cannot afford the requested seeds.
    InsufficientFunds,
}

/// Reasons a grid size may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridRejection {
    /// Width or height is zero.
    Empty,
    /// Width or height exceeds [`MAX_GRID_DIMENSION`].
    TooLarge,
}
