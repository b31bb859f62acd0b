//! Panier Core - Shared types and marketplace domain logic.
//!
//! This crate provides the types and pure calculations used across all
//! Panier components:
//! - `storefront` - Client-facing catalog and checkout service
//! - `admin` - Supplier portal and back-office
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything here can be computed
//! synchronously on whatever thread calls it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and status enums
//! - [`pricing`] - Partner level resolution and margin redistribution
//! - [`settlement`] - Per-supplier financial aggregation over orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod settlement;
pub mod types;

pub use pricing::{
    BenefitInput, LevelSchedule, PartnerLevelRule, PriceBenefit, PricingSettings, ScheduleError,
    SurplusSplit, compute_benefit,
};
pub use settlement::{
    LineFinancialView, OrderFinancialView, SupplierFinancials, aggregate_supplier_financials,
};
pub use types::*;
