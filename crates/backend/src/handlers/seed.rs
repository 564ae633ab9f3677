use axum::Json;
use contracts::usecases::u501_seed_master_data::SeedSummary;

use crate::shared::api_error::ApiResult;
use crate::usecases::u501_seed_master_data;

/// POST /api/seed
pub async fn seed_master_data() -> ApiResult<Json<SeedSummary>> {
    Ok(Json(u501_seed_master_data::executor::execute().await?))
}
