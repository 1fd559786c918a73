//! Pro-rated credit for mid-cycle plan upgrades.
//!
//! Days are counted with ceiling semantics: any started day counts as a whole
//! day, both for the cycle length and for the time left in it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Billing period and entitlement of the plan a subscriber currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub monthly_entitlement: u64,
}

impl SubscriptionSnapshot {
    pub fn new(
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        monthly_entitlement: u64,
    ) -> Result<Self, ServiceError> {
        let snapshot = Self { start_date, end_date, monthly_entitlement };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.end_date <= self.start_date {
            return Err(ServiceError::Validation(format!(
                "subscription end {} must be after start {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Length of the billing cycle in (started) days.
    pub fn total_days(&self) -> i64 {
        ceil_days(self.end_date - self.start_date)
    }

    /// Days left in the cycle at `now`, within `0..=total_days`.
    pub fn remaining_days(&self, now: DateTime<Utc>) -> i64 {
        ceil_days(self.end_date - now).clamp(0, self.total_days().max(0))
    }

    pub fn used_days(&self, now: DateTime<Utc>) -> i64 {
        self.total_days() - self.remaining_days(now)
    }

    /// Entitlement not yet consumed at `now`:
    /// `entitlement - floor(entitlement * used_days / total_days)`.
    pub fn unused_entitlement(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
        self.validate()?;
        let total = self.total_days() as u128;
        let used = self.used_days(now) as u128;
        let consumed = u128::from(self.monthly_entitlement) * used / total;
        // consumed <= entitlement because used <= total
        Ok(self.monthly_entitlement - consumed as u64)
    }
}

/// Free-function form of [`SubscriptionSnapshot::unused_entitlement`].
pub fn unused_entitlement(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    monthly_entitlement: u64,
    now: DateTime<Utc>,
) -> Result<u64, ServiceError> {
    SubscriptionSnapshot::new(start_date, end_date, monthly_entitlement)?.unused_entitlement(now)
}

fn ceil_days(span: Duration) -> i64 {
    let ms = span.num_milliseconds();
    -((-ms).div_euclid(MILLIS_PER_DAY))
}
