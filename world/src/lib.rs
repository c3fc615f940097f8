#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative farm state for Homestead.
//!
//! The world is an immutable value: [`apply`] and the transition functions it
//! dispatches to borrow the previous snapshot and return a new one, leaving
//! the input untouched so renderers may keep reading older frames.

mod economy;
mod grid;
mod player;
mod session;
mod turn;

use homestead_core::{Command, Event, GridSize, DAWN_HOUR, FIRST_DAY, WELCOME_BANNER};
use tracing::{debug, trace};

pub use economy::buy_seeds;
pub use grid::{Grid, GridError, Tile};
pub use player::{Inventory, Player};
pub use session::Session;
pub use turn::{advance_day, apply_tool};

/// Represents the authoritative Homestead world state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    player: Player,
    day: u32,
    time: u8,
}

impl World {
    /// Creates a new world on a farm of the default size.
    #[must_use]
    pub fn new() -> Self {
        Self::on(Grid::untouched(GridSize::default()))
    }

    /// Creates a new world on a farm of the provided size.
    ///
    /// Fails when the size has no area or exceeds
    /// [`MAX_GRID_DIMENSION`](homestead_core::MAX_GRID_DIMENSION).
    pub fn with_grid(size: GridSize) -> Result<Self, GridError> {
        Grid::new(size).map(Self::on)
    }

    fn on(grid: Grid) -> Self {
        Self {
            banner: WELCOME_BANNER,
            player: Player::new(grid.size()),
            grid,
            day: FIRST_DAY,
            time: DAWN_HOUR,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, returning the next snapshot.
///
/// Commands whose preconditions fail produce a world equal to the input;
/// the accompanying events explain what happened.
#[must_use]
pub fn apply(world: &World, command: Command, out_events: &mut Vec<Event>) -> World {
    trace!(?command, "applying command");
    match command {
        Command::ConfigureGrid { size } => match size.validate() {
            Ok(size) => {
                let mut next = world.clone();
                next.grid = Grid::untouched(size);
                next.player.relocate_within(size);
                out_events.push(Event::GridConfigured { size });
                next
            }
            Err(reason) => {
                debug!(?size, ?reason, "grid configuration rejected");
                out_events.push(Event::GridRejected { size, reason });
                world.clone()
            }
        },
        Command::MovePlayer { direction } => {
            let from = world.player.position();
            let player = world.player.moved(direction, world.grid.size());
            out_events.push(Event::PlayerMoved {
                from,
                to: player.position(),
                facing: direction,
            });
            World {
                player,
                ..world.clone()
            }
        }
        Command::SelectTool { tool } => {
            out_events.push(Event::ToolSelected { tool });
            World {
                player: world.player.with_tool(tool),
                ..world.clone()
            }
        }
        Command::UseTool { position } => apply_tool(world, position, out_events),
        Command::AdvanceDay => advance_day(world, out_events),
        Command::BuySeeds { crop, amount } => buy_seeds(world, crop, amount, out_events).0,
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use homestead_core::{GridSize, Position};

    use super::{Grid, Player, Tile, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tile grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Dimensions of the farm.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Retrieves the tile at `position`, if it lies inside the farm.
    #[must_use]
    pub fn tile(world: &World, position: Position) -> Option<&Tile> {
        world.grid.tile(position).ok()
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Number of the current day, starting at one.
    #[must_use]
    pub fn day(world: &World) -> u32 {
        world.day
    }

    /// Current hour of day.
    #[must_use]
    pub fn time(world: &World) -> u8 {
        world.time
    }
}

/// Setters that bypass the rules so tests can stage arbitrary situations.
#[cfg(any(test, feature = "scaffolding"))]
impl World {
    /// Overrides the player's remaining energy.
    pub fn scaffold_energy(&mut self, energy: u32) {
        self.player.set_energy(energy);
    }

    /// Overrides the water left in the watering can.
    pub fn scaffold_water(&mut self, water: u32) {
        self.player.inventory_mut().set_water(water);
    }

    /// Overrides the player's money.
    pub fn scaffold_money(&mut self, money: u64) {
        self.player.set_money(money);
    }

    /// Overrides the seed stock for a crop.
    pub fn scaffold_seeds(&mut self, crop: homestead_core::CropType, count: u32) {
        self.player.inventory_mut().seeds_mut()[crop] = count;
    }

    /// Teleports the player, ignoring grid bounds.
    pub fn scaffold_position(&mut self, position: homestead_core::Position) {
        self.player.set_position(position);
    }

    /// Plants `crop` at `stage` into the tile at `position`, tilling it first.
    pub fn scaffold_crop(
        &mut self,
        position: homestead_core::Position,
        crop: homestead_core::CropType,
        stage: homestead_core::CropStage,
    ) {
        if let Some(tile) = self.grid.tile_mut(position) {
            tile.set_crop(crop, stage);
        }
    }

    /// Marks the tile at `position` as watered.
    pub fn scaffold_watered(&mut self, position: homestead_core::Position) {
        if let Some(tile) = self.grid.tile_mut(position) {
            tile.water();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_core::{Direction, GridRejection, Position, Tool, MAX_GRID_DIMENSION};

    #[test]
    fn new_world_starts_at_dawn_of_day_one() {
        let world = World::new();

        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::day(&world), 1);
        assert_eq!(query::time(&world), 6);
        assert_eq!(query::grid_size(&world), GridSize::new(16, 12));
        assert_eq!(query::grid(&world).iter().count(), 192);
    }

    #[test]
    fn apply_configures_grid_and_clamps_player() {
        let world = World::new();
        let mut events = Vec::new();
        let size = GridSize::new(5, 4);

        let next = apply(&world, Command::ConfigureGrid { size }, &mut events);

        assert_eq!(query::grid_size(&next), size);
        assert_eq!(query::grid(&next).iter().count(), 20);
        assert_eq!(query::player(&next).position(), Position::new(4, 3));
        assert_eq!(query::player(&next).energy(), 100);
        assert_eq!(events, vec![Event::GridConfigured { size }]);
    }

    #[test]
    fn apply_rejects_grids_without_area() {
        let mut world = World::new();
        world.scaffold_position(Position::new(3, 2));
        let mut events = Vec::new();

        for size in [GridSize::new(0, 0), GridSize::new(0, 4), GridSize::new(7, 0)] {
            events.clear();
            let next = apply(&world, Command::ConfigureGrid { size }, &mut events);

            assert_eq!(next, world);
            assert!(query::grid(&next).contains(query::player(&next).position()));
            assert_eq!(
                events,
                vec![Event::GridRejected {
                    size,
                    reason: GridRejection::Empty,
                }]
            );
        }
    }

    #[test]
    fn apply_rejects_oversized_grids() {
        let world = World::new();
        let mut events = Vec::new();
        let size = GridSize::new(u32::MAX, u32::MAX);

        let next = apply(&world, Command::ConfigureGrid { size }, &mut events);

        assert_eq!(next, world);
        assert_eq!(
            events,
            vec![Event::GridRejected {
                size,
                reason: GridRejection::TooLarge,
            }]
        );
    }

    #[test]
    fn apply_accepts_the_largest_grid() {
        let world = World::new();
        let mut events = Vec::new();
        let size = GridSize::new(MAX_GRID_DIMENSION, 1);

        let next = apply(&world, Command::ConfigureGrid { size }, &mut events);

        assert_eq!(query::grid_size(&next), size);
        assert_eq!(query::player(&next).position(), Position::new(8, 0));
        assert_eq!(events, vec![Event::GridConfigured { size }]);
    }

    #[test]
    fn with_grid_refuses_invalid_sizes() {
        let size = GridSize::new(0, 9);

        assert_eq!(
            World::with_grid(size),
            Err(GridError::InvalidSize {
                size,
                reason: GridRejection::Empty,
            })
        );
        assert_eq!(
            World::with_grid(GridSize::new(5, 4)).map(|world| query::grid_size(&world)),
            Ok(GridSize::new(5, 4))
        );
    }

    #[test]
    fn apply_configure_grid_discards_field_work() {
        let world = World::new();
        let mut events = Vec::new();
        let plowed = apply(
            &world,
            Command::UseTool {
                position: Position::new(2, 2),
            },
            &mut events,
        );

        let rebuilt = apply(
            &plowed,
            Command::ConfigureGrid {
                size: GridSize::default(),
            },
            &mut events,
        );

        assert!(!query::tile(&rebuilt, Position::new(2, 2))
            .expect("tile")
            .is_plowed());
        assert_eq!(query::player(&rebuilt).energy(), 95);
    }

    #[test]
    fn apply_move_reports_blocked_steps() {
        let mut world = World::new();
        world.scaffold_position(Position::new(0, 3));
        let mut events = Vec::new();

        let next = apply(
            &world,
            Command::MovePlayer {
                direction: Direction::Left,
            },
            &mut events,
        );

        assert_eq!(query::player(&next).position(), Position::new(0, 3));
        assert_eq!(query::player(&next).facing(), Direction::Left);
        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: Position::new(0, 3),
                to: Position::new(0, 3),
                facing: Direction::Left,
            }]
        );
    }

    #[test]
    fn apply_select_tool_twice_matches_once() {
        let world = World::new();
        let mut events = Vec::new();
        let command = Command::SelectTool {
            tool: Tool::WateringCan,
        };

        let once = apply(&world, command, &mut events);
        let twice = apply(&once, command, &mut events);

        assert_eq!(once, twice);
        assert_eq!(query::player(&twice).tool(), Tool::WateringCan);
    }

    #[test]
    fn apply_leaves_the_input_snapshot_untouched() {
        let world = World::new();
        let snapshot = world.clone();
        let mut events = Vec::new();

        for command in [
            Command::UseTool {
                position: Position::new(1, 1),
            },
            Command::AdvanceDay,
            Command::BuySeeds {
                crop: homestead_core::CropType::Corn,
                amount: 2,
            },
            Command::MovePlayer {
                direction: Direction::Up,
            },
        ] {
            let _ = apply(&world, command, &mut events);
        }

        assert_eq!(world, snapshot);
    }
}
