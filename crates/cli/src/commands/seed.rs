//! Demo data seeding.
//!
//! Inserts a small set of suppliers, products, clients and partners for
//! local development. The pricing settings row is seeded by the migration
//! itself and left untouched here.

use sqlx::PgPool;

use super::{CommandError, connect};

/// Seed demo data into an empty database.
///
/// Refuses to run when suppliers already exist, so a re-run never
/// duplicates the catalog.
///
/// # Errors
///
/// Returns `CommandError` if the connection or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM suppliers")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "Suppliers already present, nothing to seed");
        return Ok(());
    }

    seed_catalog(&pool).await?;
    seed_clients(&pool).await?;
    seed_partners(&pool).await?;

    tracing::info!("Demo data seeded");
    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), CommandError> {
    let suppliers = [
        ("Patisserie Aminata", true),
        ("Four a Bois de Ngor", true),
        ("Douceurs de Yoff", false),
    ];

    // (name, selling_price, supplier_price). A NULL cost exercises the
    // missing-cost path at pricing time.
    let products: [&[(&str, i64, Option<i64>)]; 3] = [
        &[
            ("Croissant x12", 6000, Some(3000)),
            ("Mille-feuille", 2500, Some(1400)),
            ("Tarte coco", 4500, None),
        ],
        &[
            ("Pain complet", 1500, Some(700)),
            ("Brioche sucree", 2000, Some(900)),
        ],
        &[("Beignets x20", 3000, Some(1200))],
    ];

    for ((name, is_active), product_rows) in suppliers.iter().zip(products) {
        let supplier_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO suppliers (name, is_active) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(is_active)
        .fetch_one(pool)
        .await?;

        for &(product_name, selling_price, supplier_price) in product_rows {
            sqlx::query(
                r"
                INSERT INTO products (supplier_id, name, selling_price, supplier_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(supplier_id)
            .bind(product_name)
            .bind(rust_decimal::Decimal::from(selling_price))
            .bind(supplier_price.map(rust_decimal::Decimal::from))
            .execute(pool)
            .await?;
        }

        tracing::info!(supplier = name, products = product_rows.len(), "Supplier seeded");
    }

    Ok(())
}

async fn seed_clients(pool: &PgPool) -> Result<(), CommandError> {
    for name in ["Fatou S.", "Moussa B.", "Awa N."] {
        sqlx::query("INSERT INTO clients (display_name) VALUES ($1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn seed_partners(pool: &PgPool) -> Result<(), CommandError> {
    // One partner per level threshold of the default schedule.
    let partners = [
        ("Cheikh T.", "CHEIKH26", 0_i64, "standard"),
        ("Mariama K.", "MARIAMA1", 42, "actif"),
        ("Ibrahima F.", "IBRA2026", 180, "premium"),
    ];

    for (display_name, promo_code, total_sales, level) in partners {
        sqlx::query(
            r"
            INSERT INTO partners (display_name, promo_code, total_sales, level)
            VALUES ($1, $2, $3, $4::partner_level)
            ON CONFLICT (promo_code) DO NOTHING
            ",
        )
        .bind(display_name)
        .bind(promo_code)
        .bind(total_sales)
        .bind(level)
        .execute(pool)
        .await?;
    }
    Ok(())
}
