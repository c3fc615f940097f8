//! Seed shop transactions.

use homestead_core::{CropType, Event, PurchaseRejection};
use tracing::debug;

use crate::World;

/// Buys `amount` seeds of `crop` at the fixed shop price.
///
/// Returns the resulting world together with a success flag. A purchase the
/// player cannot afford, including one whose price overflows, leaves the world
/// untouched and reports [`Event::PurchaseRejected`].
#[must_use]
pub fn buy_seeds(
    world: &World,
    crop: CropType,
    amount: u32,
    out_events: &mut Vec<Event>,
) -> (World, bool) {
    let cost = crop.seed_cost().checked_mul(u64::from(amount));

    let Some(cost) = cost.filter(|cost| *cost <= world.player.money()) else {
        let cost = cost.unwrap_or(u64::MAX);
        debug!(?crop, amount, cost, money = world.player.money(), "purchase rejected");
        out_events.push(Event::PurchaseRejected {
            crop,
            amount,
            cost,
            reason: PurchaseRejection::InsufficientFunds,
        });
        return (world.clone(), false);
    };

    let mut next = world.clone();
    next.player.spend_money(cost);
    let seeds = &mut next.player.inventory_mut().seeds_mut()[crop];
    *seeds = seeds.saturating_add(amount);
    out_events.push(Event::SeedsPurchased { crop, amount, cost });
    (next, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn affordable_purchase_moves_money_into_seeds() {
        let world = World::new();
        let mut events = Vec::new();

        let (next, bought) = buy_seeds(&world, CropType::Tomato, 5, &mut events);

        assert!(bought);
        assert_eq!(query::player(&next).money(), 50);
        assert_eq!(
            query::player(&next).inventory().seeds().get(CropType::Tomato),
            8
        );
        assert_eq!(
            events,
            vec![Event::SeedsPurchased {
                crop: CropType::Tomato,
                amount: 5,
                cost: 50,
            }]
        );
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut world = World::new();
        world.scaffold_money(40);
        let mut events = Vec::new();

        let (next, bought) = buy_seeds(&world, CropType::Tomato, 5, &mut events);

        assert!(!bought);
        assert_eq!(next, world);
        assert_eq!(
            events,
            vec![Event::PurchaseRejected {
                crop: CropType::Tomato,
                amount: 5,
                cost: 50,
                reason: PurchaseRejection::InsufficientFunds,
            }]
        );
    }

    #[test]
    fn spending_exactly_all_money_succeeds() {
        let world = World::new();
        let mut events = Vec::new();

        let (next, bought) = buy_seeds(&world, CropType::Wheat, 20, &mut events);

        assert!(bought);
        assert_eq!(query::player(&next).money(), 0);
        assert_eq!(
            query::player(&next).inventory().seeds().get(CropType::Wheat),
            30
        );
    }

    #[test]
    fn zero_amount_is_accepted_for_free() {
        let world = World::new();
        let mut events = Vec::new();

        let (next, bought) = buy_seeds(&world, CropType::Corn, 0, &mut events);

        assert!(bought);
        assert_eq!(next, world);
        assert_eq!(
            events,
            vec![Event::SeedsPurchased {
                crop: CropType::Corn,
                amount: 0,
                cost: 0,
            }]
        );
    }

    #[test]
    fn large_orders_are_priced_without_overflow() {
        let mut world = World::new();
        world.scaffold_money(u64::MAX);
        let mut events = Vec::new();

        let (next, bought) = buy_seeds(&world, CropType::Corn, u32::MAX, &mut events);

        assert!(bought);
        assert_eq!(
            query::player(&next).money(),
            u64::MAX - 12 * u64::from(u32::MAX)
        );
        assert_eq!(
            query::player(&next).inventory().seeds().get(CropType::Corn),
            u32::MAX
        );
    }
}
