//! Asset catalog API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::asset::{Asset, AssetQuery, CreateAsset, UpdateAsset},
};

use super::{parse_id, QueryParams, ValidatedJson};

/// List assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetQuery),
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>),
        (status = 400, description = "Invalid query string", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<AssetQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.assets.list(&query).await?;
    Ok(Json(assets))
}

/// List distinct asset categories
#[utoipa::path(
    get,
    path = "/assets/categories",
    tag = "assets",
    responses(
        (status = 200, description = "Categories in catalog order", body = Vec<String>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<String>>> {
    let categories = state.services.assets.categories().await?;
    Ok(Json(categories))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Asset>> {
    let id = parse_id(&id, "Asset not found")?;
    let asset = state.services.assets.get_by_id(id).await?;
    Ok(Json(asset))
}

/// Get asset by its human-readable code
#[utoipa::path(
    get,
    path = "/assets/by-code/{code}",
    tag = "assets",
    params(("code" = String, Path, description = "Asset code, e.g. OSC-001")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset_by_code(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.get_by_code(&code).await?;
    Ok(Json(asset))
}

/// Create asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Validation error", body = crate::error::ErrorResponse),
        (status = 409, description = "Asset code already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.services.assets.create(&data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update asset (partial)
#[utoipa::path(
    patch,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    let id = parse_id(&id, "Asset not found")?;
    let asset = state.services.assets.update(id, &data).await?;
    Ok(Json(asset))
}
