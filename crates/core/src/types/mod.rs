//! Shared type definitions for Panier.

pub mod id;
pub mod status;

pub use id::*;
pub use status::*;

// Define all entity IDs in one place so every crate agrees on them.
crate::define_id!(ClientId);
crate::define_id!(SupplierId);
crate::define_id!(PartnerId);
crate::define_id!(ProductId);
crate::define_id!(OrderId);
