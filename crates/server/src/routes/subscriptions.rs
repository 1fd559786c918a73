use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::plans::{ActiveSubscription, UpgradeQuote};

use crate::errors::JsonApiError;
use crate::observability;
use crate::routes::ServerState;

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub id: String,
    pub name: String,
    pub rank: usize,
    pub monthly_entitlement: u64,
    pub cost: u64,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub current: Option<ActiveSubscription>,
    pub target_plan_id: String,
    /// Evaluation instant; defaults to the server clock
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[utoipa::path(get, path = "/api/plans", tag = "subscriptions", responses((status = 200, description = "Plans, lowest tier first", body = [crate::openapi::PlanDoc])))]
pub async fn list_plans(State(state): State<ServerState>) -> Json<Vec<PlanView>> {
    let plans = state
        .catalog
        .plans()
        .iter()
        .enumerate()
        .map(|(rank, p)| PlanView {
            id: p.id.clone(),
            name: p.name.clone(),
            rank,
            monthly_entitlement: p.monthly_entitlement,
            cost: p.cost,
        })
        .collect();
    Json(plans)
}

#[utoipa::path(
    post, path = "/api/subscriptions/upgrade-quote", tag = "subscriptions",
    request_body = crate::openapi::QuoteRequestDoc,
    responses(
        (status = 200, description = "Quote computed", body = crate::openapi::UpgradeQuoteDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown target plan")
    )
)]
pub async fn upgrade_quote(
    State(state): State<ServerState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<UpgradeQuote>, JsonApiError> {
    let now = req.now.unwrap_or_else(Utc::now);
    let quote = match state.catalog.quote_upgrade(req.current.as_ref(), &req.target_plan_id, now) {
        Ok(q) => q,
        Err(e) => {
            observability::record_quote("rejected", 0);
            return Err(e.into());
        }
    };

    let outcome = if quote.is_upgrade { "upgrade" } else { "full_price" };
    observability::record_quote(outcome, quote.credit);
    info!(
        target_plan = %quote.target_plan_id,
        current_plan = req.current.as_ref().map(|c| c.plan_id.as_str()).unwrap_or("-"),
        credit = quote.credit,
        charged = quote.charged,
        "upgrade quote"
    );
    Ok(Json(quote))
}
