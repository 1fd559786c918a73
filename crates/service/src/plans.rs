//! Subscription plan catalog and upgrade quotes.
//!
//! Plans are ranked by their position in the catalog. Moving to a strictly
//! higher rank credits whatever is left of the current cycle's entitlement;
//! downgrades and lateral switches are charged in full.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use configs::{check_plan_ids, PlanConfig};

use crate::errors::ServiceError;
use crate::proration::SubscriptionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Tokens granted per billing cycle
    pub monthly_entitlement: u64,
    /// Tokens charged to switch to this plan
    pub cost: u64,
}

impl From<&PlanConfig> for Plan {
    fn from(cfg: &PlanConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            monthly_entitlement: cfg.monthly_entitlement,
            cost: cfg.cost,
        }
    }
}

/// The subscription a user holds right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSubscription {
    pub plan_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpgradeQuote {
    pub target_plan_id: String,
    pub base_cost: u64,
    pub credit: u64,
    pub charged: u64,
    pub is_upgrade: bool,
}

/// Ordered list of plans, lowest tier first.
#[derive(Clone, Debug, Default)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Result<Self, ServiceError> {
        check_plan_ids(plans.iter().map(|p| p.id.as_str())).map_err(ServiceError::Validation)?;
        Ok(Self { plans })
    }

    pub fn from_config(plans: &[PlanConfig]) -> Result<Self, ServiceError> {
        Self::new(plans.iter().map(Plan::from).collect())
    }

    pub fn plans(&self) -> &[Plan] { &self.plans }

    pub fn get(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.plans.iter().position(|p| p.id == id)
    }

    /// Price the switch from `current` (if any) to `target_plan_id` at `now`.
    pub fn quote_upgrade(
        &self,
        current: Option<&ActiveSubscription>,
        target_plan_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UpgradeQuote, ServiceError> {
        let target_rank = self.rank(target_plan_id).ok_or_else(|| ServiceError::not_found("plan"))?;
        let target = &self.plans[target_rank];

        let held = current.and_then(|sub| {
            let found = self.rank(&sub.plan_id).map(|rank| (sub, rank));
            if found.is_none() {
                debug!(plan_id = %sub.plan_id, "current plan not in catalog; no credit");
            }
            found
        });

        let (credit, is_upgrade) = match held {
            Some((sub, rank)) if target_rank > rank => {
                let snapshot = SubscriptionSnapshot::new(
                    sub.start_date,
                    sub.end_date,
                    self.plans[rank].monthly_entitlement,
                )?;
                (snapshot.unused_entitlement(now)?, true)
            }
            _ => (0, false),
        };

        Ok(UpgradeQuote {
            target_plan_id: target.id.clone(),
            base_cost: target.cost,
            credit,
            charged: target.cost.saturating_sub(credit),
            is_upgrade,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn catalog() -> PlanCatalog {
        let plan = |id: &str, tokens: u64, cost: u64| Plan {
            id: id.into(),
            name: id.to_uppercase(),
            monthly_entitlement: tokens,
            cost,
        };
        PlanCatalog::new(vec![plan("starter", 120, 100), plan("pro", 350, 300), plan("elite", 800, 90)]).unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn holding(plan_id: &str) -> ActiveSubscription {
        ActiveSubscription { plan_id: plan_id.into(), start_date: day(1), end_date: day(31) }
    }

    #[test]
    fn upgrade_is_credited_with_unused_entitlement() {
        let q = catalog().quote_upgrade(Some(&holding("starter")), "pro", day(16)).unwrap();
        assert!(q.is_upgrade);
        assert_eq!(q.base_cost, 300);
        assert_eq!(q.credit, 60);
        assert_eq!(q.charged, 240);
    }

    #[test]
    fn charge_never_goes_below_zero() {
        let q = catalog().quote_upgrade(Some(&holding("pro")), "elite", day(1)).unwrap();
        assert_eq!(q.credit, 350);
        assert_eq!(q.charged, 0);
    }

    #[test]
    fn downgrade_and_lateral_switch_get_no_credit() {
        let c = catalog();
        for target in ["starter", "pro"] {
            let q = c.quote_upgrade(Some(&holding("pro")), target, day(16)).unwrap();
            assert!(!q.is_upgrade);
            assert_eq!(q.credit, 0);
            assert_eq!(q.charged, q.base_cost);
        }
    }

    #[test]
    fn no_subscription_or_unknown_current_plan_gets_no_credit() {
        let c = catalog();
        let q = c.quote_upgrade(None, "elite", day(16)).unwrap();
        assert_eq!((q.credit, q.charged), (0, 90));
        let q = c.quote_upgrade(Some(&holding("legacy")), "elite", day(16)).unwrap();
        assert_eq!((q.credit, q.charged), (0, 90));
    }

    #[test]
    fn unknown_target_is_not_found() {
        let err = catalog().quote_upgrade(None, "platinum", day(1)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn inverted_subscription_period_fails_upgrade() {
        let sub = ActiveSubscription { plan_id: "starter".into(), start_date: day(20), end_date: day(2) };
        let err = catalog().quote_upgrade(Some(&sub), "pro", day(10)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn catalog_rejects_duplicates_and_keeps_order() {
        let c = catalog();
        assert_eq!(c.rank("starter"), Some(0));
        assert_eq!(c.rank("elite"), Some(2));
        assert_eq!(c.get("pro").map(|p| p.cost), Some(300));

        let mut plans = c.plans().to_vec();
        let dup = plans[0].clone();
        plans.push(dup);
        assert_eq!(
            PlanCatalog::new(plans).unwrap_err(),
            ServiceError::Validation("duplicate plan id `starter`".into())
        );
    }

    #[test]
    fn builds_from_config() {
        let cfgs = vec![PlanConfig { id: "a".into(), name: "A".into(), monthly_entitlement: 10, cost: 12 }];
        let c = PlanCatalog::from_config(&cfgs).unwrap();
        assert_eq!(c.plans()[0], Plan { id: "a".into(), name: "A".into(), monthly_entitlement: 10, cost: 12 });
    }
}
