//! Routes frame input through the policy systems into the session.

use anyhow::{Context, Result};
use homestead_core::{Command, Event};
use homestead_rendering::{Feedback, FrameInput, Scene};
use homestead_system_rest::{Rest, RestInput};
use homestead_system_shop::{Shop, ShopInput, ShopNotice};
use homestead_world::{query, Session, World};
use tracing::debug;

use crate::config::Settings;

/// Interactive game owned by the adapter.
#[derive(Debug)]
pub(crate) struct Game {
    session: Session,
    rest: Rest,
    shop: Shop,
    commands: Vec<Command>,
    notices: Vec<ShopNotice>,
}

impl Game {
    pub(crate) fn new(settings: &Settings) -> Result<Self> {
        let world = World::with_grid(settings.grid).context("failed to build the farm")?;
        Ok(Self {
            session: Session::with_world(world),
            rest: Rest::new(settings.rest),
            shop: Shop::new(settings.shop),
            commands: Vec::new(),
            notices: Vec::new(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        self.session.world()
    }

    /// Applies one frame of input and brings `scene` up to date.
    pub(crate) fn step(&mut self, input: FrameInput, scene: &mut Scene) {
        let mut feedback = None;

        if let Some(pointer) = input.pointer {
            scene.hover_pixel(pointer);
        }
        if let Some(direction) = input.movement {
            self.session.move_player(direction);
        }
        if let Some(tool) = input.tool {
            self.session.select_tool(tool);
        }
        if let Some(target) = input.clicked_tile() {
            self.session.use_tool(target);
            feedback = self.session.events().iter().find_map(tool_feedback);
        }

        self.shop.handle(
            ShopInput {
                purchase: input.purchase,
            },
            &mut self.commands,
        );

        let energy = query::player(self.session.world()).energy();
        self.rest.handle(
            RestInput {
                sleep_requested: input.sleep_requested,
            },
            energy,
            &mut self.commands,
        );
        if input.sleep_requested && !self.rest.can_sleep(energy) {
            feedback = Some(Feedback::SleepRefused {
                energy,
                required: self.rest.min_energy(),
            });
        }

        for command in self.commands.drain(..) {
            debug!(?command, "submitting system command");
            self.session.submit(command);
            self.shop.notices(self.session.events(), &mut self.notices);
        }
        for notice in self.notices.drain(..) {
            feedback = Some(match notice {
                ShopNotice::Purchased { crop, amount, cost } => {
                    Feedback::Purchased { crop, amount, cost }
                }
                ShopNotice::InsufficientFunds { crop, cost } => {
                    Feedback::InsufficientFunds { crop, cost }
                }
            });
        }

        scene.refresh(self.session.world());
        scene.feedback = feedback;
    }
}

fn tool_feedback(event: &Event) -> Option<Feedback> {
    match *event {
        Event::ToolRejected {
            tool,
            position,
            reason,
        } => Some(Feedback::ToolRejected {
            tool,
            position,
            reason,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use homestead_core::{CropType, Direction, GridSize, Position, Tool, ToolRejection};
    use homestead_rendering::{tile_origin, SoilAppearance};
    use homestead_system_rest::Config as RestConfig;

    fn start(settings: Settings) -> (Game, Scene) {
        let game = Game::new(&settings).expect("settings are valid");
        let scene = Scene::from_world(game.world());
        (game, scene)
    }

    fn click(position: Position) -> FrameInput {
        FrameInput {
            pointer: Some(tile_origin(position) + Vec2::splat(1.0)),
            click: true,
            ..FrameInput::default()
        }
    }

    #[test]
    fn clicking_a_tile_uses_the_current_tool() {
        let (mut game, mut scene) = start(Settings::default());

        game.step(click(Position::new(2, 3)), &mut scene);

        let tile = scene.tile(Position::new(2, 3)).expect("tile is drawn");
        assert_eq!(tile.soil, SoilAppearance::Tilled);
        assert_eq!(scene.hud.energy, 95);
        assert_eq!(scene.hovered, Some(Position::new(2, 3)));
        assert_eq!(scene.feedback, None);
    }

    #[test]
    fn rejected_tool_use_is_reported() {
        let (mut game, mut scene) = start(Settings::default());

        game.step(click(Position::new(2, 3)), &mut scene);
        game.step(click(Position::new(2, 3)), &mut scene);

        assert_eq!(
            scene.feedback,
            Some(Feedback::ToolRejected {
                tool: Tool::Hoe,
                position: Position::new(2, 3),
                reason: ToolRejection::AlreadyPlowed,
            })
        );
        assert_eq!(scene.hud.energy, 95);
    }

    #[test]
    fn clicks_outside_the_farm_change_nothing() {
        let (mut game, mut scene) = start(Settings::default());
        let before = game.world().clone();

        game.step(click(Position::new(-1, 0)), &mut scene);

        assert_eq!(game.world(), &before);
        assert_eq!(scene.hovered, None);
        assert_eq!(scene.feedback, None);
    }

    #[test]
    fn shop_buys_configured_batches() {
        let (mut game, mut scene) = start(Settings::default());
        let buy = FrameInput {
            purchase: Some(CropType::Tomato),
            ..FrameInput::default()
        };

        game.step(buy, &mut scene);
        assert_eq!(scene.hud.money, 50);
        assert_eq!(scene.hud.seeds.get(CropType::Tomato), 8);
        assert_eq!(
            scene.feedback,
            Some(Feedback::Purchased {
                crop: CropType::Tomato,
                amount: 5,
                cost: 50,
            })
        );

        game.step(buy, &mut scene);
        game.step(buy, &mut scene);
        assert_eq!(scene.hud.money, 0);
        assert_eq!(
            scene.feedback,
            Some(Feedback::InsufficientFunds {
                crop: CropType::Tomato,
                cost: 50,
            })
        );
    }

    #[test]
    fn sleeping_advances_the_day_when_rested() {
        let (mut game, mut scene) = start(Settings::default());
        let sleep = FrameInput {
            sleep_requested: true,
            ..FrameInput::default()
        };

        game.step(click(Position::new(0, 0)), &mut scene);
        game.step(sleep, &mut scene);

        assert_eq!(scene.hud.day, 2);
        assert_eq!(scene.hud.energy, 100);
        assert_eq!(scene.hud.clock(), "06:00");
    }

    #[test]
    fn tired_players_cannot_sleep() {
        let (mut game, mut scene) = start(Settings {
            rest: RestConfig::new(100),
            ..Settings::default()
        });

        game.step(click(Position::new(0, 0)), &mut scene);
        game.step(
            FrameInput {
                sleep_requested: true,
                ..FrameInput::default()
            },
            &mut scene,
        );

        assert_eq!(scene.hud.day, 1);
        assert_eq!(
            scene.feedback,
            Some(Feedback::SleepRefused {
                energy: 95,
                required: 100,
            })
        );
    }

    #[test]
    fn movement_and_tool_changes_reach_the_scene() {
        let (mut game, mut scene) = start(Settings::default());

        game.step(
            FrameInput {
                movement: Some(Direction::Left),
                tool: Some(Tool::Seeds),
                ..FrameInput::default()
            },
            &mut scene,
        );

        assert_eq!(scene.player.position, Position::new(7, 6));
        assert_eq!(scene.player.facing, Direction::Left);
        assert_eq!(scene.player.tool, Tool::Seeds);
        assert_eq!(scene.hud.tool, Tool::Seeds);
    }

    #[test]
    fn configured_grid_size_is_used() {
        let (game, scene) = start(Settings {
            grid: GridSize::new(6, 4),
            ..Settings::default()
        });

        assert_eq!(scene.tiles.len(), 24);
        assert_eq!(query::player(game.world()).position(), Position::new(5, 3));
    }

    #[test]
    fn unbuildable_grid_is_an_error() {
        let error = Game::new(&Settings {
            grid: GridSize::new(u32::MAX, 2),
            ..Settings::default()
        })
        .expect_err("grid is too large");

        assert!(format!("{error:#}").contains("limited to 256"), "{error:#}");
    }
}
