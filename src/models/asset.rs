//! Asset (lab instrument) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{CalibrationStatus, MaintenanceStatus};

/// Asset record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i32,
    /// Human-readable asset code (e.g. "OSC-001"), unique
    pub asset_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Room or lab holding the instrument
    pub location: String,
    pub category: String,
    pub calibration_status: CalibrationStatus,
    pub last_calibrated: DateTime<Utc>,
    pub next_due: DateTime<Utc>,
    pub is_available: bool,
    /// Set while the asset is out of service; `isAvailable` is false then
    pub maintenance_status: Option<MaintenanceStatus>,
    pub estimated_return: Option<DateTime<Utc>>,
}

impl Asset {
    /// Checked out to someone, as opposed to withdrawn for maintenance
    pub fn is_in_use(&self) -> bool {
        !self.is_available && self.maintenance_status.is_none()
    }
}

/// Create asset request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 50, message = "Asset ID must be between 1 and 50 characters"))]
    pub asset_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub calibration_status: CalibrationStatus,
    pub last_calibrated: DateTime<Utc>,
    pub next_due: DateTime<Utc>,
    /// Defaults to true
    pub is_available: Option<bool>,
    pub maintenance_status: Option<MaintenanceStatus>,
    pub estimated_return: Option<DateTime<Utc>>,
}

impl CreateAsset {
    /// Build the stored record, filling optional fields with their defaults
    pub fn into_asset(self, id: i32) -> Asset {
        Asset {
            id,
            asset_id: self.asset_id,
            name: self.name,
            description: self.description,
            location: self.location,
            category: self.category,
            calibration_status: self.calibration_status,
            last_calibrated: self.last_calibrated,
            next_due: self.next_due,
            is_available: self.is_available.unwrap_or(true),
            maintenance_status: self.maintenance_status,
            estimated_return: self.estimated_return,
        }
    }
}

/// Update asset request.
///
/// Absent fields are left untouched. The nullable fields distinguish an
/// absent key from an explicit `null`, which clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 50, message = "Asset ID must be between 1 and 50 characters"))]
    pub asset_id: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    pub calibration_status: Option<CalibrationStatus>,
    pub last_calibrated: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<MaintenanceStatus>)]
    pub maintenance_status: Option<Option<MaintenanceStatus>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub estimated_return: Option<Option<DateTime<Utc>>>,
}

impl UpdateAsset {
    /// Merge the present fields into `asset`
    pub fn apply_to(&self, asset: &mut Asset) {
        let changes = self;

        macro_rules! merge {
            ($($field:ident),*) => {
                $(
                    if let Some(ref val) = changes.$field {
                        asset.$field = val.clone();
                    }
                )*
            };
        }

        merge!(
            asset_id,
            name,
            description,
            location,
            category,
            calibration_status,
            last_calibrated,
            next_due,
            is_available,
            maintenance_status,
            estimated_return
        );
    }
}

/// Catalog status filter, as offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatusFilter {
    All,
    /// Bookable: available and not under maintenance
    Available,
    Calibrated,
    DueSoon,
}

/// Asset list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    /// Case-insensitive match on name or asset code
    pub search: Option<String>,
    /// Exact category; "all" disables the filter
    pub category: Option<String>,
    pub status: Option<AssetStatusFilter>,
}

impl AssetQuery {
    pub fn matches(&self, asset: &Asset) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                asset.name.to_lowercase().contains(&term)
                    || asset.asset_id.to_lowercase().contains(&term)
            }
        };

        let matches_category = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(category) => asset.category == category,
        };

        let matches_status = match self.status {
            None | Some(AssetStatusFilter::All) => true,
            Some(AssetStatusFilter::Available) => {
                asset.is_available && asset.maintenance_status.is_none()
            }
            Some(AssetStatusFilter::Calibrated) => {
                asset.calibration_status == CalibrationStatus::Calibrated
            }
            Some(AssetStatusFilter::DueSoon) => {
                asset.calibration_status == CalibrationStatus::DueSoon
            }
        };

        matches_search && matches_category && matches_status
    }
}
