//! Bindings for `/analytics/turnover/`.

use crate::client::ApiClient;
use crate::domain::models::TurnoverSnapshot;
use crate::error::Error;

/// The aggregated turnover picture, scoped server-side to the caller's role
/// (HR sees only their department).
pub async fn turnover(api: &ApiClient) -> Result<TurnoverSnapshot, Error> {
    api.get("/analytics/turnover/").await
}
