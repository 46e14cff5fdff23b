//! Business logic services

pub mod assets;
pub mod bookings;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub bookings: bookings::BookingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(repository: Repository) -> Self {
        Self {
            assets: assets::AssetsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
