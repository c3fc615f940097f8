//! Player avatar, tool selection and carried resources.

use homestead_core::{
    CropCounts, Direction, GridSize, Position, Tool, MAX_ENERGY, MAX_WATER, STARTING_MONEY,
    STARTING_POSITION,
};

/// Seed stock handed to a new player.
const STARTING_SEEDS: CropCounts = CropCounts::new(10, 5, 3, 2, 5);

/// Resources carried by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Inventory {
    seeds: CropCounts,
    harvested: CropCounts,
    water: u32,
}

impl Inventory {
    fn starting() -> Self {
        Self {
            seeds: STARTING_SEEDS,
            harvested: CropCounts::zero(),
            water: MAX_WATER,
        }
    }

    /// Seeds available for planting, per crop.
    #[must_use]
    pub const fn seeds(&self) -> &CropCounts {
        &self.seeds
    }

    /// Running harvest totals, per crop.
    #[must_use]
    pub const fn harvested(&self) -> &CropCounts {
        &self.harvested
    }

    /// Water left in the watering can.
    #[must_use]
    pub const fn water(&self) -> u32 {
        self.water
    }

    pub(crate) fn seeds_mut(&mut self) -> &mut CropCounts {
        &mut self.seeds
    }

    pub(crate) fn harvested_mut(&mut self) -> &mut CropCounts {
        &mut self.harvested
    }

    pub(crate) fn set_water(&mut self, water: u32) {
        self.water = water;
    }
}

/// The farmer controlled by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    position: Position,
    facing: Direction,
    tool: Tool,
    inventory: Inventory,
    energy: u32,
    money: u64,
}

impl Player {
    /// Creates a player with the starting resources, placed inside `bounds`.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            position: bounds.clamp(STARTING_POSITION),
            facing: Direction::Down,
            tool: Tool::Hoe,
            inventory: Inventory::starting(),
            energy: MAX_ENERGY,
            money: STARTING_MONEY,
        }
    }

    /// Tile currently occupied by the player.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction the player faces.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Tool currently held.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Resources carried by the player.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Remaining energy for the day.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Money available for purchases.
    #[must_use]
    pub const fn money(&self) -> u64 {
        self.money
    }

    /// Returns the player after a single step in `direction`.
    ///
    /// The step is clamped to `bounds`, so walking into the edge of the farm
    /// leaves the position unchanged. The facing always follows the request.
    #[must_use]
    pub fn moved(&self, direction: Direction, bounds: GridSize) -> Self {
        Self {
            position: bounds.clamp(self.position.step(direction)),
            facing: direction,
            ..*self
        }
    }

    /// Returns the player holding `tool`.
    #[must_use]
    pub fn with_tool(&self, tool: Tool) -> Self {
        Self { tool, ..*self }
    }

    pub(crate) fn has_energy(&self, amount: u32) -> bool {
        self.energy >= amount
    }

    pub(crate) fn spend_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    pub(crate) fn earn(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    pub(crate) fn spend_money(&mut self, amount: u64) {
        self.money = self.money.saturating_sub(amount);
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub(crate) fn rest(&mut self) {
        self.energy = MAX_ENERGY;
        self.inventory.set_water(MAX_WATER);
    }

    pub(crate) fn relocate_within(&mut self, bounds: GridSize) {
        self.position = bounds.clamp(self.position);
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set_energy(&mut self, energy: u32) {
        self.energy = energy;
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set_money(&mut self, money: u64) {
        self.money = money;
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_core::CropType;

    #[test]
    fn new_player_starts_with_fixed_resources() {
        let player = Player::new(GridSize::default());

        assert_eq!(player.position(), Position::new(8, 6));
        assert_eq!(player.facing(), Direction::Down);
        assert_eq!(player.tool(), Tool::Hoe);
        assert_eq!(player.energy(), 100);
        assert_eq!(player.money(), 100);
        assert_eq!(player.inventory().water(), 100);
        assert_eq!(player.inventory().seeds().get(CropType::Wheat), 10);
        assert_eq!(player.inventory().seeds().get(CropType::Carrot), 5);
        assert_eq!(player.inventory().seeds().get(CropType::Tomato), 3);
        assert_eq!(player.inventory().seeds().get(CropType::Corn), 2);
        assert_eq!(player.inventory().seeds().get(CropType::Potato), 5);
        assert_eq!(player.inventory().harvested().total(), 0);
    }

    #[test]
    fn new_player_is_clamped_into_small_grids() {
        let player = Player::new(GridSize::new(4, 4));

        assert_eq!(player.position(), Position::new(3, 3));
    }

    #[test]
    fn moving_into_the_edge_keeps_position_but_turns() {
        let bounds = GridSize::default();
        let mut player = Player::new(bounds);
        player.set_position(Position::new(0, 5));

        let moved = player.moved(Direction::Left, bounds);

        assert_eq!(moved.position(), Position::new(0, 5));
        assert_eq!(moved.facing(), Direction::Left);
    }

    #[test]
    fn interior_moves_change_one_coordinate() {
        let bounds = GridSize::default();
        let player = Player::new(bounds);

        assert_eq!(
            player.moved(Direction::Up, bounds).position(),
            Position::new(8, 5)
        );
        assert_eq!(
            player.moved(Direction::Down, bounds).position(),
            Position::new(8, 7)
        );
        assert_eq!(
            player.moved(Direction::Left, bounds).position(),
            Position::new(7, 6)
        );
        assert_eq!(
            player.moved(Direction::Right, bounds).position(),
            Position::new(9, 6)
        );
    }

    #[test]
    fn moving_leaves_resources_untouched() {
        let bounds = GridSize::default();
        let player = Player::new(bounds);
        let moved = player.moved(Direction::Right, bounds);

        assert_eq!(moved.energy(), player.energy());
        assert_eq!(moved.inventory(), player.inventory());
        assert_eq!(moved.money(), player.money());
    }

    #[test]
    fn selecting_the_same_tool_twice_is_idempotent() {
        let player = Player::new(GridSize::default());

        let once = player.with_tool(Tool::Seeds);
        let twice = once.with_tool(Tool::Seeds);

        assert_eq!(once, twice);
        assert_eq!(twice.tool(), Tool::Seeds);
    }

    #[test]
    fn resting_restores_energy_and_water_only() {
        let mut player = Player::new(GridSize::default());
        player.spend_energy(70);
        player.inventory_mut().set_water(3);
        player.spend_money(40);

        player.rest();

        assert_eq!(player.energy(), 100);
        assert_eq!(player.inventory().water(), 100);
        assert_eq!(player.money(), 60);
    }

    #[test]
    fn spending_never_underflows() {
        let mut player = Player::new(GridSize::default());
        player.spend_energy(500);
        player.spend_money(500);

        assert_eq!(player.energy(), 0);
        assert_eq!(player.money(), 0);
        assert!(!player.has_energy(1));
        assert!(player.has_energy(0));
    }
}
