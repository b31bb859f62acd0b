//! Back-office services.
//!
//! Pure decisions live in `panier-core`; these services wire them to the
//! repositories and to the live financial feed.

pub mod progression;
pub mod settlement_feed;

pub use progression::record_delivered_order;
pub use settlement_feed::{FinancialStore, PgFinancialStore, SettlementFeed};
