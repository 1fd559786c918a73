use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use service::pagination::{page_window, PageEntry, Pagination};

use crate::errors::JsonApiError;
use crate::observability::PAGE_WINDOW_REQUESTS_TOTAL;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// 1-based current page; clamped into range
    pub page: Option<u32>,
    /// Page count; takes precedence over `total_items`
    pub total_pages: Option<u32>,
    /// Item count, paged by `per_page`
    pub total_items: Option<u64>,
    pub per_page: Option<u32>,
    /// Page-button budget, within 3 and the configured limit
    pub max_buttons: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct WindowResponse {
    pub page: u32,
    pub total_pages: u32,
    pub entries: Vec<PageEntry>,
}

#[utoipa::path(
    get, path = "/api/pagination/window", tag = "pagination",
    params(WindowQuery),
    responses(
        (status = 200, description = "Window computed", body = crate::openapi::WindowResponseDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn window(
    State(state): State<ServerState>,
    Query(q): Query<WindowQuery>,
) -> Result<Json<WindowResponse>, JsonApiError> {
    let paging = Pagination {
        page: q.page.unwrap_or(1),
        per_page: q.per_page.unwrap_or(state.pagination.per_page),
    };
    let total_pages = match (q.total_pages, q.total_items) {
        (Some(pages), _) => pages,
        (None, Some(items)) => paging.total_pages(items),
        (None, None) => return Err(JsonApiError::bad_request("either total_pages or total_items is required")),
    };
    let max_buttons = q.max_buttons.unwrap_or(state.pagination.max_buttons);
    let limit = state.pagination.max_buttons_limit;
    if !(3..=limit).contains(&max_buttons) {
        return Err(JsonApiError::bad_request(format!("max_buttons must be within 3..={limit}")));
    }

    let page = paging.clamp_page(total_pages);
    let entries = page_window(page, total_pages, max_buttons);
    PAGE_WINDOW_REQUESTS_TOTAL.inc();
    debug!(page, total_pages, max_buttons, entries = entries.len(), "page window computed");

    Ok(Json(WindowResponse { page, total_pages, entries }))
}
