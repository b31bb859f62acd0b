//! Supplier model.

use serde::{Deserialize, Serialize};

use panier_core::SupplierId;

/// A catalog supplier.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Supplier {
    /// Unique supplier ID.
    pub id: SupplierId,
    /// Display name.
    pub name: String,
    /// Inactive suppliers are hidden from the storefront.
    pub is_active: bool,
}
