use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use miltontv_core::quotes::Quote;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    get,
    path = "/api/v1/stock/{ticker}",
    params(("ticker" = String, Path, description = "Stock ticker, case-insensitive")),
    responses(
        (status = 200, description = "Latest quote, at most 30 seconds old"),
        (status = 404, description = "Unknown symbol"),
        (status = 502, description = "Quote provider failure")
    )
)]
pub async fn get_stock_quote(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Quote>> {
    let quote = state.quote_service.get_quote(&ticker).await?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stock/{ticker}", get(get_stock_quote))
}
