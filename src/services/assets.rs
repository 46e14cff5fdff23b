//! Asset catalog service

use std::sync::Arc;

use indexmap::IndexSet;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetQuery, CreateAsset, UpdateAsset},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
    /// Serializes writes so the asset code stays unique
    write_guard: Arc<Mutex<()>>,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    /// List assets matching the catalog filters
    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let assets = self.repository.list_assets().await?;
        Ok(assets.into_iter().filter(|a| query.matches(a)).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        self.repository
            .get_asset(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))
    }

    pub async fn get_by_code(&self, code: &str) -> AppResult<Asset> {
        self.repository
            .get_asset_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))
    }

    /// Distinct categories, in the order they first appear in the catalog
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let assets = self.repository.list_assets().await?;
        let categories: IndexSet<String> = assets.into_iter().map(|a| a.category).collect();
        Ok(categories.into_iter().collect())
    }

    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let _guard = self.write_guard.lock().await;

        if self.repository.get_asset_by_code(&data.asset_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Asset {} already exists",
                data.asset_id
            )));
        }

        let asset = self.repository.create_asset(data).await?;
        tracing::info!(id = asset.id, code = %asset.asset_id, "Asset created");
        Ok(asset)
    }

    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let _guard = self.write_guard.lock().await;

        if let Some(ref code) = data.asset_id {
            if let Some(other) = self.repository.get_asset_by_code(code).await? {
                if other.id != id {
                    return Err(AppError::Conflict(format!("Asset {} already exists", code)));
                }
            }
        }

        let asset = self
            .repository
            .update_asset(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
        tracing::info!(id, available = asset.is_available, "Asset updated");
        Ok(asset)
    }
}
