//! Service layer for the Gondola Bros storefront helpers.
//! - `pagination`: list paging inputs and the compact page-button window.
//! - `proration`: unused entitlement of a running subscription cycle.
//! - `plans`: plan catalog ranking and upgrade quotes built on `proration`.

pub mod errors;
pub mod pagination;
pub mod plans;
pub mod proration;
