//! Catalog product model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use panier_core::{ProductId, SupplierId};

/// A catalog product.
///
/// `supplier_price` is the supplier's confidential cost; it is nullable in
/// the database (suppliers may list a product before their cost is
/// recorded) and a missing cost is treated as zero at pricing time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Supplier who sells this product.
    pub supplier_id: SupplierId,
    /// Display name.
    pub name: String,
    /// Public selling price, whole currency units.
    pub selling_price: Decimal,
    /// Confidential supplier cost, whole currency units.
    pub supplier_price: Option<Decimal>,
    /// Whether the product is currently visible in the catalog.
    pub is_listed: bool,
}
