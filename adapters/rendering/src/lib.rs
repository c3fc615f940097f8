#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Homestead adapters.
//!
//! Adapters never read the world directly while drawing. They build a
//! [`Scene`] from a world snapshot and hand it to a [`RenderingBackend`], which
//! reports player input back through [`FrameInput`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use homestead_core::{
    CropCounts, CropStage, CropType, Direction, GridSize, Position, Tool, ToolRejection,
    TILE_SIZE,
};
use homestead_world::{query, Tile, World};
use std::fmt;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: self.red + (1.0 - self.red) * amount,
            green: self.green + (1.0 - self.green) * amount,
            blue: self.blue + (1.0 - self.blue) * amount,
            alpha: self.alpha,
        }
    }

    /// Returns a new color darkened towards black by the provided amount.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);

        Self {
            red: self.red * keep,
            green: self.green * keep,
            blue: self.blue * keep,
            alpha: self.alpha,
        }
    }
}

/// Color used to clear each frame behind the farm.
pub const BACKGROUND_COLOR: Color = Color::from_rgb_u8(0x6b, 0x8e, 0x23);

/// Outline drawn around the tile under the pointer.
pub const HOVER_COLOR: Color = Color::from_rgb_u8(0xff, 0xd7, 0x00);

/// Converts a pixel coordinate on the farm canvas into a tile position.
///
/// Pixels left of or above the canvas map to negative tiles; the world ignores
/// those when a tool is used on them.
#[must_use]
pub fn pixel_to_tile(pixel: Vec2) -> Position {
    let tile_length = TILE_SIZE as f32;
    Position::new(
        (pixel.x / tile_length).floor() as i32,
        (pixel.y / tile_length).floor() as i32,
    )
}

/// Top-left pixel of the tile at `position`.
#[must_use]
pub fn tile_origin(position: Position) -> Vec2 {
    let tile_length = TILE_SIZE as f32;
    Vec2::new(
        position.x() as f32 * tile_length,
        position.y() as f32 * tile_length,
    )
}

/// Alternating grass shade that gives the field its checkerboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroundShade {
    /// Lighter grass on cells where `x + y` is even.
    Light,
    /// Darker grass on the remaining cells.
    Dark,
}

impl GroundShade {
    /// Shade of the grass at `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        if (position.x() as i64 + position.y() as i64).rem_euclid(2) == 0 {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Fill color for this shade.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Light => Color::from_rgb_u8(0x7b, 0xa4, 0x28),
            Self::Dark => BACKGROUND_COLOR,
        }
    }
}

/// Reports whether the grass at `position` carries a darker tuft.
#[must_use]
pub const fn has_grass_tuft(position: Position) -> bool {
    (position.x() as i64 * 7 + position.y() as i64 * 11).rem_euclid(5) == 0
}

/// Surface drawn on top of the grass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoilAppearance {
    /// The hoe has not touched the tile.
    Untilled,
    /// Dry tilled soil.
    Tilled,
    /// Tilled soil that was watered today.
    Watered,
}

impl SoilAppearance {
    /// Soil surface of `tile`.
    #[must_use]
    pub const fn of(tile: &Tile) -> Self {
        match (tile.is_plowed(), tile.is_watered()) {
            (false, _) => Self::Untilled,
            (true, false) => Self::Tilled,
            (true, true) => Self::Watered,
        }
    }

    /// Fill color of the soil, `None` when grass shows through.
    #[must_use]
    pub fn color(self) -> Option<Color> {
        let soil = Color::from_rgb_u8(0x8b, 0x73, 0x55);
        match self {
            Self::Untilled => None,
            Self::Tilled => Some(soil),
            Self::Watered => Some(soil.darken(0.3)),
        }
    }
}

/// Visible crop planted in a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropAppearance {
    /// Crop species.
    pub crop: CropType,
    /// Growth stage, never `Empty`.
    pub stage: CropStage,
}

impl CropAppearance {
    /// Crop drawn for `tile`, if anything has sprouted there.
    #[must_use]
    pub fn of(tile: &Tile) -> Option<Self> {
        let crop = tile.crop()?;
        (tile.stage() != CropStage::Empty).then_some(Self {
            crop,
            stage: tile.stage(),
        })
    }

    /// Foliage color for the current stage.
    #[must_use]
    pub const fn foliage_color(&self) -> Color {
        match self.stage {
            CropStage::Empty | CropStage::Sprout => Color::from_rgb_u8(0x90, 0xee, 0x90),
            CropStage::Growing | CropStage::Harvestable => Color::from_rgb_u8(0x22, 0x8b, 0x22),
        }
    }

    /// Color of the produce, shown once the crop is ripe.
    #[must_use]
    pub const fn produce_color(&self) -> Option<Color> {
        if !self.stage.is_harvestable() {
            return None;
        }

        Some(match self.crop {
            CropType::Wheat => Color::from_rgb_u8(0xff, 0xd7, 0x00),
            CropType::Carrot => Color::from_rgb_u8(0xff, 0x8c, 0x00),
            CropType::Tomato => Color::from_rgb_u8(0xdc, 0x14, 0x3c),
            CropType::Corn => Color::from_rgb_u8(0xf0, 0xe6, 0x8c),
            CropType::Potato => Color::from_rgb_u8(0xd2, 0xb4, 0x8c),
        })
    }
}

/// Everything a backend needs to draw one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePresentation {
    /// Tile position within the grid.
    pub position: Position,
    /// Grass shade below the soil.
    pub shade: GroundShade,
    /// Whether a grass tuft decorates the tile.
    pub grass_tuft: bool,
    /// Soil surface.
    pub soil: SoilAppearance,
    /// Crop growing in the tile.
    pub crop: Option<CropAppearance>,
}

impl TilePresentation {
    /// Describes how `tile` should be drawn.
    #[must_use]
    pub fn from_tile(tile: &Tile) -> Self {
        let position = tile.position();
        Self {
            position,
            shade: GroundShade::at(position),
            grass_tuft: has_grass_tuft(position),
            soil: SoilAppearance::of(tile),
            crop: CropAppearance::of(tile),
        }
    }
}

/// Describes the tile grid as drawn on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
}

impl GridPresentation {
    /// Creates a grid descriptor for a farm of the provided size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            columns: size.width(),
            rows: size.height(),
        }
    }
}

/// Player sprite state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerPresentation {
    /// Tile the player stands on.
    pub position: Position,
    /// Direction the sprite faces.
    pub facing: Direction,
    /// Tool held in hand.
    pub tool: Tool,
}

/// Status panel shown next to the farm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hud {
    /// Current day number.
    pub day: u32,
    /// Current hour of day.
    pub hour: u8,
    /// Remaining energy.
    pub energy: u32,
    /// Available money.
    pub money: u64,
    /// Water left in the watering can.
    pub water: u32,
    /// Active tool.
    pub tool: Tool,
    /// Seeds in stock.
    pub seeds: CropCounts,
    /// Produce harvested so far.
    pub harvested: CropCounts,
}

impl Hud {
    /// Clock reading shown to the player, such as `06:00`.
    #[must_use]
    pub fn clock(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Outcome of the last player action worth telling the player about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// The active tool could not be used on the targeted tile.
    ToolRejected {
        /// Tool that was used.
        tool: Tool,
        /// Targeted tile.
        position: Position,
        /// Unmet precondition.
        reason: ToolRejection,
    },
    /// Seeds were bought.
    Purchased {
        /// Crop bought.
        crop: CropType,
        /// Number of seeds bought.
        amount: u32,
        /// Money spent.
        cost: u64,
    },
    /// The player could not afford the seeds.
    InsufficientFunds {
        /// Crop requested.
        crop: CropType,
        /// Price of the order.
        cost: u64,
    },
    /// The player is too tired to go to bed.
    SleepRefused {
        /// Energy the player has left.
        energy: u32,
        /// Energy required to sleep.
        required: u32,
    },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolRejected {
                tool,
                position,
                reason,
            } => write!(
                f,
                "cannot use the {} at ({}, {}): {}",
                tool.name(),
                position.x(),
                position.y(),
                rejection_text(*reason)
            ),
            Self::Purchased { crop, amount, cost } => {
                write!(f, "bought {amount} {} seeds for {cost}", crop.name())
            }
            Self::InsufficientFunds { crop, cost } => {
                write!(f, "not enough money for {} seeds ({cost})", crop.name())
            }
            Self::SleepRefused { energy, required } => {
                write!(f, "too tired to sleep ({energy} energy, {required} needed)")
            }
        }
    }
}

const fn rejection_text(reason: ToolRejection) -> &'static str {
    match reason {
        ToolRejection::AlreadyPlowed => "the soil is already tilled",
        ToolRejection::NotPlowed => "the soil is not tilled",
        ToolRejection::AlreadyWatered => "the soil is already watered",
        ToolRejection::OutOfWater => "the watering can is empty",
        ToolRejection::Occupied => "something is already planted",
        ToolRejection::OutOfSeeds => "no wheat seeds left",
        ToolRejection::NothingToHarvest => "nothing is ripe",
        ToolRejection::InsufficientEnergy => "not enough energy",
    }
}

/// Scene description combining the farm, the player and the status panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the farm.
    pub grid: GridPresentation,
    /// Tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
    /// Player sprite.
    pub player: PlayerPresentation,
    /// Status panel.
    pub hud: Hud,
    /// Tile currently under the pointer.
    pub hovered: Option<Position>,
    /// Feedback about the last action.
    pub feedback: Option<Feedback>,
}

impl Scene {
    /// Captures the provided world snapshot.
    #[must_use]
    pub fn from_world(world: &World) -> Self {
        let player = query::player(world);
        let inventory = player.inventory();

        Self {
            grid: GridPresentation::new(query::grid_size(world)),
            tiles: query::grid(world)
                .iter()
                .map(TilePresentation::from_tile)
                .collect(),
            player: PlayerPresentation {
                position: player.position(),
                facing: player.facing(),
                tool: player.tool(),
            },
            hud: Hud {
                day: query::day(world),
                hour: query::time(world),
                energy: player.energy(),
                money: player.money(),
                water: inventory.water(),
                tool: player.tool(),
                seeds: *inventory.seeds(),
                harvested: *inventory.harvested(),
            },
            hovered: None,
            feedback: None,
        }
    }

    /// Replaces the world-derived parts of the scene, keeping hover and feedback.
    pub fn refresh(&mut self, world: &World) {
        let hovered = self.hovered;
        let feedback = self.feedback;
        *self = Self::from_world(world);
        self.hovered = hovered.filter(|position| self.contains(*position));
        self.feedback = feedback;
    }

    /// Points at the tile under `pixel`, clearing the hover when it leaves the farm.
    pub fn hover_pixel(&mut self, pixel: Vec2) {
        let position = pixel_to_tile(pixel);
        self.hovered = self.contains(position).then_some(position);
    }

    /// Reports whether `position` lies on the drawn farm.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        GridSize::new(self.grid.columns, self.grid.rows).contains(position)
    }

    /// Tile drawn at `position`.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&TilePresentation> {
        let index = GridSize::new(self.grid.columns, self.grid.rows).index_of(position)?;
        self.tiles.get(index)
    }

    /// Tiles grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TilePresentation]> {
        let width = usize::try_from(self.grid.columns)
            .unwrap_or(usize::MAX)
            .max(1);
        self.tiles.chunks(width)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in canvas pixels.
    pub pointer: Option<Vec2>,
    /// Whether the pointer was clicked on this frame.
    pub click: bool,
    /// Movement requested through the keyboard.
    pub movement: Option<Direction>,
    /// Tool picked from the toolbar.
    pub tool: Option<Tool>,
    /// Crop whose seeds were ordered from the shop.
    pub purchase: Option<CropType>,
    /// Whether the sleep button was pressed.
    pub sleep_requested: bool,
    /// Whether the player asked to leave.
    pub quit: bool,
}

impl FrameInput {
    /// Tile targeted by a click on this frame.
    #[must_use]
    pub fn clicked_tile(&self) -> Option<Position> {
        self.pointer
            .filter(|_| self.click)
            .map(pixel_to_tile)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Homestead scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until input ends or the player quits.
    ///
    /// The provided `update_scene` closure receives the input captured for each
    /// frame and may mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}
