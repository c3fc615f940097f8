//! Owned game session exposing the engine call surface.

use homestead_core::{Command, CropType, Direction, Event, GridSize, Position, Tool};

use crate::{apply, economy, World};

/// Single owner of the authoritative world.
///
/// Every call replaces the held snapshot with the result of a pure
/// transition, so a [`World`] cloned out of the session earlier is never
/// affected by later calls. Events produced by the most recent call are kept
/// until the next one.
#[derive(Clone, Debug, Default)]
pub struct Session {
    world: World,
    events: Vec<Event>,
}

impl Session {
    /// Starts a session on a default-sized farm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session from an existing world snapshot.
    #[must_use]
    pub fn with_world(world: World) -> Self {
        Self {
            world,
            events: Vec::new(),
        }
    }

    /// Read-only snapshot of the current world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events reported by the most recent call.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the session, yielding the final world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Routes an arbitrary command through the world.
    pub fn submit(&mut self, command: Command) {
        self.events.clear();
        self.world = apply(&self.world, command, &mut self.events);
    }

    /// Moves the player one tile.
    pub fn move_player(&mut self, direction: Direction) {
        self.submit(Command::MovePlayer { direction });
    }

    /// Switches the player's tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.submit(Command::SelectTool { tool });
    }

    /// Applies the current tool to the tile at `position`.
    pub fn use_tool(&mut self, position: Position) {
        self.submit(Command::UseTool { position });
    }

    /// Ends the current day.
    pub fn advance_day(&mut self) {
        self.submit(Command::AdvanceDay);
    }

    /// Rebuilds the farm with new dimensions.
    pub fn configure_grid(&mut self, size: GridSize) {
        self.submit(Command::ConfigureGrid { size });
    }

    /// Buys seeds, reporting whether the purchase went through.
    pub fn buy_seeds(&mut self, crop: CropType, amount: u32) -> bool {
        self.events.clear();
        let (world, bought) = economy::buy_seeds(&self.world, crop, amount, &mut self.events);
        self.world = world;
        bought
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn earlier_snapshots_are_not_affected_by_later_calls() {
        let mut session = Session::new();
        let before = session.world().clone();

        session.use_tool(Position::new(1, 1));
        session.advance_day();

        assert!(!query::tile(&before, Position::new(1, 1))
            .expect("tile")
            .is_plowed());
        assert!(query::tile(session.world(), Position::new(1, 1))
            .expect("tile")
            .is_plowed());
        assert_eq!(query::day(&before), 1);
        assert_eq!(query::day(session.world()), 2);
    }

    #[test]
    fn events_only_cover_the_latest_call() {
        let mut session = Session::new();

        session.use_tool(Position::new(0, 0));
        assert_eq!(
            session.events(),
            &[Event::TilePlowed {
                position: Position::new(0, 0)
            }]
        );

        session.select_tool(Tool::Hand);
        assert_eq!(session.events(), &[Event::ToolSelected { tool: Tool::Hand }]);
    }

    #[test]
    fn buy_seeds_reports_success_and_failure() {
        let mut session = Session::new();

        assert!(session.buy_seeds(CropType::Tomato, 5));
        assert!(session.buy_seeds(CropType::Tomato, 5));
        assert!(!session.buy_seeds(CropType::Tomato, 5));
        assert_eq!(query::player(session.world()).money(), 0);
    }

    #[test]
    fn buy_seeds_replaces_events_of_the_previous_call() {
        let mut session = Session::new();
        session.use_tool(Position::new(2, 2));

        assert!(!session.buy_seeds(CropType::Corn, u32::MAX));
        assert_eq!(
            session.events(),
            &[Event::PurchaseRejected {
                crop: CropType::Corn,
                amount: u32::MAX,
                cost: 12 * u64::from(u32::MAX),
                reason: homestead_core::PurchaseRejection::InsufficientFunds,
            }]
        );

        assert!(session.buy_seeds(CropType::Wheat, 0));
        assert_eq!(
            session.events(),
            &[Event::SeedsPurchased {
                crop: CropType::Wheat,
                amount: 0,
                cost: 0,
            }]
        );
        assert_eq!(query::player(session.world()).money(), 100);
    }
}
