//! Tool application and day advancement rules.

use homestead_core::{
    CropType, Event, Position, Tool, ToolRejection, DAWN_HOUR, HARVEST_ENERGY_COST,
    HOE_ENERGY_COST, PLANTING_ENERGY_COST, WATERING_ENERGY_COST, WATERING_WATER_COST,
};
use tracing::{debug, info};

use crate::{grid::Tile, player::Player, World};

/// Crop planted by the seeds tool. There is no seed picker, so the tool
/// always plants wheat regardless of the remaining stock of other crops.
const PLANTED_CROP: CropType = CropType::Wheat;

/// Applies the player's current tool to the tile at `target`.
///
/// Targets outside the grid are ignored without reporting anything. A tool
/// whose preconditions do not hold leaves the world untouched and reports
/// [`Event::ToolRejected`] naming the first failed precondition.
#[must_use]
pub fn apply_tool(world: &World, target: Position, out_events: &mut Vec<Event>) -> World {
    let Ok(tile) = world.grid.tile(target) else {
        return world.clone();
    };

    let tool = world.player.tool();
    if let Err(reason) = check_preconditions(tool, tile, &world.player) {
        debug!(?tool, ?target, ?reason, "tool rejected");
        out_events.push(Event::ToolRejected {
            tool,
            position: target,
            reason,
        });
        return world.clone();
    }

    let mut next = world.clone();
    let World { grid, player, .. } = &mut next;
    let Some(tile) = grid.tile_mut(target) else {
        return world.clone();
    };

    match tool {
        Tool::Hoe => {
            tile.plow();
            player.spend_energy(HOE_ENERGY_COST);
            out_events.push(Event::TilePlowed { position: target });
        }
        Tool::WateringCan => {
            tile.water();
            let water = player.inventory().water();
            player
                .inventory_mut()
                .set_water(water.saturating_sub(WATERING_WATER_COST));
            player.spend_energy(WATERING_ENERGY_COST);
            out_events.push(Event::TileWatered { position: target });
        }
        Tool::Seeds => {
            tile.plant(PLANTED_CROP);
            let seeds = &mut player.inventory_mut().seeds_mut()[PLANTED_CROP];
            *seeds = seeds.saturating_sub(1);
            player.spend_energy(PLANTING_ENERGY_COST);
            out_events.push(Event::CropPlanted {
                position: target,
                crop: PLANTED_CROP,
            });
        }
        Tool::Hand => {
            let Some(crop) = tile.harvestable_crop() else {
                return world.clone();
            };
            tile.clear_crop();
            let harvested = &mut player.inventory_mut().harvested_mut()[crop];
            *harvested = harvested.saturating_add(1);
            let earned = crop.sale_price();
            player.earn(earned);
            player.spend_energy(HARVEST_ENERGY_COST);
            out_events.push(Event::CropHarvested {
                position: target,
                crop,
                earned,
            });
        }
    }

    next
}

/// Ends the current day.
///
/// Every watered crop that is not yet ripe grows by one stage, all soil dries,
/// the player's energy and water are restored, the day counter increments and
/// the clock resets to dawn. Tilled soil and planted crops persist.
#[must_use]
pub fn advance_day(world: &World, out_events: &mut Vec<Event>) -> World {
    let mut next = world.clone();

    for tile in next.grid.tiles_mut() {
        if let Some(stage) = tile.grow_overnight() {
            out_events.push(Event::CropGrew {
                position: tile.position(),
                stage,
            });
        }
    }

    next.player.rest();
    next.day = next.day.saturating_add(1);
    next.time = DAWN_HOUR;

    info!(day = next.day, "day advanced");
    out_events.push(Event::DayAdvanced { day: next.day });
    next
}

fn check_preconditions(tool: Tool, tile: &Tile, player: &Player) -> Result<(), ToolRejection> {
    match tool {
        Tool::Hoe => {
            if tile.is_plowed() {
                return Err(ToolRejection::AlreadyPlowed);
            }
            require_energy(player, HOE_ENERGY_COST)
        }
        Tool::WateringCan => {
            if !tile.is_plowed() {
                return Err(ToolRejection::NotPlowed);
            }
            if tile.is_watered() {
                return Err(ToolRejection::AlreadyWatered);
            }
            if player.inventory().water() == 0 {
                return Err(ToolRejection::OutOfWater);
            }
            require_energy(player, WATERING_ENERGY_COST)
        }
        Tool::Seeds => {
            if !tile.is_plowed() {
                return Err(ToolRejection::NotPlowed);
            }
            if tile.crop().is_some() {
                return Err(ToolRejection::Occupied);
            }
            if player.inventory().seeds().get(PLANTED_CROP) == 0 {
                return Err(ToolRejection::OutOfSeeds);
            }
            require_energy(player, PLANTING_ENERGY_COST)
        }
        Tool::Hand => {
            if tile.harvestable_crop().is_none() {
                return Err(ToolRejection::NothingToHarvest);
            }
            require_energy(player, HARVEST_ENERGY_COST)
        }
    }
}

fn require_energy(player: &Player, amount: u32) -> Result<(), ToolRejection> {
    if player.has_energy(amount) {
        Ok(())
    } else {
        Err(ToolRejection::InsufficientEnergy)
    }
}
