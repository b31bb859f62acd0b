//! Domain models for the storefront.

pub mod order;
pub mod partner;
pub mod product;
