use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PageEntryDoc {
    /// `page` or `ellipsis`
    pub kind: String,
    pub number: Option<u32>,
}

#[derive(ToSchema)]
pub struct WindowResponseDoc {
    pub page: u32,
    pub total_pages: u32,
    pub entries: Vec<PageEntryDoc>,
}

#[derive(ToSchema)]
pub struct PlanDoc {
    pub id: String,
    pub name: String,
    pub rank: u32,
    pub monthly_entitlement: u64,
    pub cost: u64,
}

#[derive(ToSchema)]
pub struct ActiveSubscriptionDoc {
    pub plan_id: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(ToSchema)]
pub struct QuoteRequestDoc {
    pub current: Option<ActiveSubscriptionDoc>,
    pub target_plan_id: String,
    pub now: Option<String>,
}

#[derive(ToSchema)]
pub struct UpgradeQuoteDoc {
    pub target_plan_id: String,
    pub base_cost: u64,
    pub credit: u64,
    pub charged: u64,
    pub is_upgrade: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::pagination::window,
        crate::routes::subscriptions::list_plans,
        crate::routes::subscriptions::upgrade_quote,
    ),
    components(
        schemas(
            HealthResponse,
            PageEntryDoc,
            WindowResponseDoc,
            PlanDoc,
            ActiveSubscriptionDoc,
            QuoteRequestDoc,
            UpgradeQuoteDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pagination"),
        (name = "subscriptions")
    )
)]
pub struct ApiDoc;
