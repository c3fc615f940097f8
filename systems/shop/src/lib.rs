#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure shop system that turns storefront clicks into seed purchases.

use homestead_core::{Command, CropType, Event, PurchaseRejection};

/// Seeds bought per click when no other batch size is configured.
pub const DEFAULT_BATCH_SIZE: u32 = 5;

/// Configuration parameters for the shop system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    batch_size: u32,
}

impl Config {
    /// Creates a configuration selling `batch_size` seeds per purchase.
    #[must_use]
    pub const fn new(batch_size: u32) -> Self {
        Self { batch_size }
    }

    /// Seeds sold per purchase.
    #[must_use]
    pub const fn batch_size(&self) -> u32 {
        self.batch_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShopInput {
    /// Crop whose buy button was pressed on this frame, if any.
    pub purchase: Option<CropType>,
}

/// Storefront row describing a purchasable seed batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Crop the seeds grow into.
    pub crop: CropType,
    /// Price of a single seed.
    pub unit_cost: u64,
    /// Price of one batch.
    pub batch_cost: u64,
}

/// User-facing outcome of a purchase, suitable for a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopNotice {
    /// Seeds were added to the inventory.
    Purchased {
        /// Crop whose seeds were bought.
        crop: CropType,
        /// Number of seeds bought.
        amount: u32,
        /// Money paid.
        cost: u64,
    },
    /// The player could not afford the batch.
    InsufficientFunds {
        /// Crop whose seeds were requested.
        crop: CropType,
        /// Money the batch would have cost.
        cost: u64,
    },
}

/// Shop system emitting fixed-size purchase commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shop {
    config: Config,
}

impl Shop {
    /// Creates a new shop system with the provided configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Lists every crop with its unit and batch price, in shop order.
    #[must_use]
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        CropType::ALL
            .iter()
            .map(|crop| CatalogEntry {
                crop: *crop,
                unit_cost: crop.seed_cost(),
                batch_cost: self.batch_cost(*crop),
            })
            .collect()
    }

    /// Price of one batch of `crop` seeds.
    #[must_use]
    pub fn batch_cost(&self, crop: CropType) -> u64 {
        crop.seed_cost()
            .saturating_mul(u64::from(self.config.batch_size))
    }

    /// Emits a [`Command::BuySeeds`] for the clicked crop, if any.
    pub fn handle(&self, input: ShopInput, out: &mut Vec<Command>) {
        if let Some(crop) = input.purchase {
            out.push(Command::BuySeeds {
                crop,
                amount: self.config.batch_size,
            });
        }
    }

    /// Translates purchase events reported by the world into notices.
    pub fn notices(&self, events: &[Event], out: &mut Vec<ShopNotice>) {
        for event in events {
            match *event {
                Event::SeedsPurchased { crop, amount, cost } => {
                    out.push(ShopNotice::Purchased { crop, amount, cost });
                }
                Event::PurchaseRejected {
                    crop,
                    cost,
                    reason: PurchaseRejection::InsufficientFunds,
                    ..
                } => {
                    out.push(ShopNotice::InsufficientFunds { crop, cost });
                }
                _ => {}
            }
        }
    }
}
