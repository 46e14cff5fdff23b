//! Statistics service

use crate::{
    api::stats::StatsResponse,
    error::AppResult,
    models::BookingStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard counters over the current catalog and bookings
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let assets = self.repository.list_assets().await?;
        let bookings = self.repository.list_bookings().await?;

        Ok(StatsResponse {
            available: assets.iter().filter(|a| a.is_available).count(),
            in_use: assets.iter().filter(|a| a.is_in_use()).count(),
            maintenance: assets
                .iter()
                .filter(|a| a.maintenance_status.is_some())
                .count(),
            my_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
                .count(),
        })
    }
}
