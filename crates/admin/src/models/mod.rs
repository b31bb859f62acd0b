//! Domain models for the admin.

pub mod order;
pub mod partner;
pub mod supplier;
