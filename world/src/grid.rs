//! Tile surface of the farm.

use homestead_core::{CropStage, CropType, GridRejection, GridSize, Position, MAX_GRID_DIMENSION};
use thiserror::Error;

/// Errors produced by grid construction and position-indexed access.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested position lies outside the grid.
    #[error(
        "position ({}, {}) lies outside the {}x{} grid",
        .position.x(),
        .position.y(),
        .size.width(),
        .size.height()
    )]
    OutOfBounds {
        /// Position that was requested.
        position: Position,
        /// Dimensions of the grid that rejected the request.
        size: GridSize,
    },
    /// The requested dimensions cannot hold a farm.
    #[error(
        "a {}x{} grid is not allowed: {}",
        .size.width(),
        .size.height(),
        describe(.reason)
    )]
    InvalidSize {
        /// Dimensions that were requested.
        size: GridSize,
        /// Why the dimensions were refused.
        reason: GridRejection,
    },
}

fn describe(reason: &GridRejection) -> String {
    match reason {
        GridRejection::Empty => "both dimensions must be positive".to_owned(),
        GridRejection::TooLarge => format!("dimensions are limited to {MAX_GRID_DIMENSION}"),
    }
}

/// Agricultural state of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    position: Position,
    plowed: bool,
    watered: bool,
    crop: Option<CropType>,
    stage: CropStage,
}

impl Tile {
    /// Creates untouched ground at the provided position.
    #[must_use]
    pub const fn untouched(position: Position) -> Self {
        Self {
            position,
            plowed: false,
            watered: false,
            crop: None,
            stage: CropStage::Empty,
        }
    }

    /// Position of the tile within the grid.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Reports whether the tile has been tilled.
    #[must_use]
    pub const fn is_plowed(&self) -> bool {
        self.plowed
    }

    /// Reports whether the tile was watered today.
    #[must_use]
    pub const fn is_watered(&self) -> bool {
        self.watered
    }

    /// Crop currently planted in the tile.
    #[must_use]
    pub const fn crop(&self) -> Option<CropType> {
        self.crop
    }

    /// Growth stage of the planted crop, `Empty` when nothing is planted.
    #[must_use]
    pub const fn stage(&self) -> CropStage {
        self.stage
    }

    /// Ripe crop waiting to be harvested, if any.
    #[must_use]
    pub fn harvestable_crop(&self) -> Option<CropType> {
        self.crop.filter(|_| self.stage.is_harvestable())
    }

    pub(crate) fn plow(&mut self) {
        self.plowed = true;
    }

    pub(crate) fn water(&mut self) {
        self.watered = true;
    }

    pub(crate) fn plant(&mut self, crop: CropType) {
        debug_assert!(self.plowed, "crops are only planted into tilled soil");
        self.crop = Some(crop);
        self.stage = CropStage::Sprout;
    }

    pub(crate) fn clear_crop(&mut self) {
        self.crop = None;
        self.stage = CropStage::Empty;
        self.watered = false;
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set_crop(&mut self, crop: CropType, stage: CropStage) {
        self.plowed = true;
        self.crop = Some(crop);
        self.stage = stage;
    }

    /// Applies one night of growth and dries the soil.
    ///
    /// Returns the new stage when the crop grew.
    pub(crate) fn grow_overnight(&mut self) -> Option<CropStage> {
        let grows = self.crop.is_some() && self.watered && !self.stage.is_harvestable();
        self.watered = false;
        if !grows {
            return None;
        }

        self.stage = self.stage.advanced();
        Some(self.stage)
    }
}

/// Dense row-major tile storage covering the whole farm.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: GridSize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid of untouched tiles, one per cell.
    pub fn new(size: GridSize) -> Result<Self, GridError> {
        size.validate()
            .map(Self::untouched)
            .map_err(|reason| GridError::InvalidSize { size, reason })
    }

    /// Builds the tiles for a size that already passed validation.
    pub(crate) fn untouched(size: GridSize) -> Self {
        let mut tiles = Vec::with_capacity(size.area());
        for row in 0..size.height() {
            for column in 0..size.width() {
                let position = Position::new(
                    i32::try_from(column).unwrap_or(i32::MAX),
                    i32::try_from(row).unwrap_or(i32::MAX),
                );
                tiles.push(Tile::untouched(position));
            }
        }

        Self { size, tiles }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.size.contains(position)
    }

    /// Retrieves the tile at the provided position.
    pub fn tile(&self, position: Position) -> Result<&Tile, GridError> {
        self.size
            .index_of(position)
            .and_then(|index| self.tiles.get(index))
            .ok_or(GridError::OutOfBounds {
                position,
                size: self.size,
            })
    }

    /// Iterator over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterator over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        let width = usize::try_from(self.size.width()).unwrap_or(usize::MAX).max(1);
        self.tiles.chunks(width)
    }

    pub(crate) fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        let index = self.size.index_of(position)?;
        self.tiles.get_mut(index)
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32) -> Grid {
        Grid::new(GridSize::new(width, height)).expect("grid size is valid")
    }

    #[test]
    fn new_grid_positions_every_tile_at_its_own_cell() {
        let grid = grid(5, 3);

        assert_eq!(grid.iter().count(), 15);
        for tile in grid.iter() {
            assert_eq!(grid.tile(tile.position()), Ok(tile));
            assert!(!tile.is_plowed());
            assert!(!tile.is_watered());
            assert_eq!(tile.crop(), None);
            assert_eq!(tile.stage(), CropStage::Empty);
        }
    }

    #[test]
    fn rows_split_tiles_by_width() {
        let grid = grid(4, 2);
        let rows: Vec<&[Tile]> = grid.rows().collect();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[1][0].position(), Position::new(0, 1));
    }

    #[test]
    fn tile_lookup_rejects_out_of_bounds_positions() {
        let size = GridSize::new(16, 12);
        let grid = grid(16, 12);

        for position in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(16, 0),
            Position::new(0, 12),
        ] {
            assert_eq!(
                grid.tile(position),
                Err(GridError::OutOfBounds { position, size })
            );
        }
    }

    #[test]
    fn out_of_bounds_error_names_position_and_size() {
        let grid = grid(16, 12);
        let error = grid
            .tile(Position::new(16, 3))
            .expect_err("position is outside the grid");

        assert_eq!(
            error.to_string(),
            "position (16, 3) lies outside the 16x12 grid"
        );
    }

    #[test]
    fn new_grid_refuses_empty_and_oversized_dimensions() {
        for (size, reason) in [
            (GridSize::new(0, 5), GridRejection::Empty),
            (GridSize::new(5, 0), GridRejection::Empty),
            (GridSize::new(u32::MAX, u32::MAX), GridRejection::TooLarge),
            (GridSize::new(MAX_GRID_DIMENSION + 1, 2), GridRejection::TooLarge),
        ] {
            assert_eq!(
                Grid::new(size),
                Err(GridError::InvalidSize { size, reason })
            );
        }
        assert_eq!(
            Grid::new(GridSize::new(0, 3))
                .expect_err("zero width")
                .to_string(),
            "a 0x3 grid is not allowed: both dimensions must be positive"
        );
    }

    #[test]
    fn mutating_a_clone_leaves_the_original_untouched() {
        let original = grid(3, 3);
        let mut copy = original.clone();
        copy.tile_mut(Position::new(1, 1))
            .expect("tile exists")
            .plow();

        assert!(copy.tile(Position::new(1, 1)).expect("tile").is_plowed());
        assert!(!original.tile(Position::new(1, 1)).expect("tile").is_plowed());
        assert!(!copy.tile(Position::new(1, 0)).expect("tile").is_plowed());
    }

    #[test]
    fn overnight_growth_requires_water_and_stops_when_ripe() {
        let mut tile = Tile::untouched(Position::new(0, 0));
        tile.plow();
        tile.plant(CropType::Wheat);

        assert_eq!(tile.grow_overnight(), None);
        assert_eq!(tile.stage(), CropStage::Sprout);

        tile.water();
        assert_eq!(tile.grow_overnight(), Some(CropStage::Growing));
        assert!(!tile.is_watered());

        tile.water();
        assert_eq!(tile.grow_overnight(), Some(CropStage::Harvestable));

        tile.water();
        assert_eq!(tile.grow_overnight(), None);
        assert_eq!(tile.stage(), CropStage::Harvestable);
        assert!(!tile.is_watered());
        assert_eq!(tile.harvestable_crop(), Some(CropType::Wheat));
    }

    #[test]
    fn watered_soil_without_crop_dries_without_growing() {
        let mut tile = Tile::untouched(Position::new(2, 2));
        tile.plow();
        tile.water();

        assert_eq!(tile.grow_overnight(), None);
        assert!(tile.is_plowed());
        assert!(!tile.is_watered());
        assert_eq!(tile.stage(), CropStage::Empty);
    }
}
