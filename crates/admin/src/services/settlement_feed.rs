//! Live supplier financial feed.
//!
//! Every order mutation pushes the affected supplier onto an unbounded
//! channel. A background task drains it, recomputes the supplier's position
//! with the pure aggregation fold, persists the snapshot when it moved
//! materially, and publishes the fresh totals on a per-supplier watch
//! channel for dashboard consumers.
//!
//! The persisted snapshot is fire-and-forget: a failed write is logged and
//! dropped, never retried, because the next recomputation overwrites it and
//! the live value is what dashboards display anyway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::sync::{mpsc, watch};

use panier_core::{
    OrderFinancialView, SupplierFinancials, SupplierId, aggregate_supplier_financials,
};

use crate::db::{FinancialSnapshotRepository, OrderRepository, RepositoryError};

/// Order and snapshot access needed by the feed worker.
///
/// The production implementation reads Postgres; tests supply an in-memory
/// store so the worker loop runs against fixed data.
pub trait FinancialStore: Send + Sync + 'static {
    /// One supplier's orders in aggregation shape.
    fn financial_views(
        &self,
        supplier_id: SupplierId,
    ) -> impl Future<Output = Result<Vec<OrderFinancialView>, RepositoryError>> + Send;

    /// Last persisted snapshot, if any.
    fn load_snapshot(
        &self,
        supplier_id: SupplierId,
    ) -> impl Future<Output = Result<Option<SupplierFinancials>, RepositoryError>> + Send;

    /// Overwrite the persisted snapshot.
    fn persist_snapshot(
        &self,
        supplier_id: SupplierId,
        financials: SupplierFinancials,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Postgres-backed [`FinancialStore`].
#[derive(Clone)]
pub struct PgFinancialStore {
    pool: PgPool,
}

impl PgFinancialStore {
    /// Wrap a pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FinancialStore for PgFinancialStore {
    async fn financial_views(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<OrderFinancialView>, RepositoryError> {
        OrderRepository::new(&self.pool)
            .financial_views(supplier_id)
            .await
    }

    async fn load_snapshot(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Option<SupplierFinancials>, RepositoryError> {
        FinancialSnapshotRepository::new(&self.pool)
            .load(supplier_id)
            .await
    }

    async fn persist_snapshot(
        &self,
        supplier_id: SupplierId,
        financials: SupplierFinancials,
    ) -> Result<(), RepositoryError> {
        FinancialSnapshotRepository::new(&self.pool)
            .upsert(supplier_id, &financials)
            .await
    }
}

type WatchMap = Arc<Mutex<HashMap<SupplierId, watch::Sender<SupplierFinancials>>>>;

/// Handle to the running feed: notify on mutation, subscribe for updates.
#[derive(Clone)]
pub struct SettlementFeed {
    dirty: mpsc::UnboundedSender<SupplierId>,
    channels: WatchMap,
}

impl SettlementFeed {
    /// Spawn the background worker and return the shared handle.
    #[must_use]
    pub fn spawn<S: FinancialStore>(store: S, snapshot_threshold: Decimal) -> Self {
        let (dirty, mut rx) = mpsc::unbounded_channel::<SupplierId>();
        let channels: WatchMap = Arc::new(Mutex::new(HashMap::new()));

        let worker_channels = Arc::clone(&channels);
        tokio::spawn(async move {
            while let Some(supplier_id) = rx.recv().await {
                refresh(&store, &worker_channels, supplier_id, snapshot_threshold).await;
            }
            tracing::debug!("Settlement feed channel closed, worker exiting");
        });

        Self { dirty, channels }
    }

    /// Mark a supplier's orders as changed.
    ///
    /// Never blocks; if the worker is gone the notification is dropped and
    /// logged, and dashboards fall back to on-demand aggregation.
    pub fn notify_orders_changed(&self, supplier_id: SupplierId) {
        if self.dirty.send(supplier_id).is_err() {
            tracing::warn!(%supplier_id, "Settlement feed worker is gone, notification dropped");
        }
    }

    /// Subscribe to a supplier's recomputed financials.
    ///
    /// The first observed value is the zero position until a recomputation
    /// lands; callers wanting an immediate figure aggregate on demand.
    #[must_use]
    pub fn subscribe(&self, supplier_id: SupplierId) -> watch::Receiver<SupplierFinancials> {
        self.lock_channels()
            .entry(supplier_id)
            .or_insert_with(|| watch::channel(SupplierFinancials::default()).0)
            .subscribe()
    }

    fn lock_channels(&self) -> MutexGuard<'_, HashMap<SupplierId, watch::Sender<SupplierFinancials>>> {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Recompute one supplier, persist if moved, publish.
async fn refresh<S: FinancialStore>(
    store: &S,
    channels: &WatchMap,
    supplier_id: SupplierId,
    snapshot_threshold: Decimal,
) {
    let views = match store.financial_views(supplier_id).await {
        Ok(views) => views,
        Err(e) => {
            tracing::error!(%supplier_id, error = %e, "Financial recomputation failed");
            return;
        }
    };
    let fresh = aggregate_supplier_financials(views);

    match store.load_snapshot(supplier_id).await {
        Ok(previous) => {
            let stale = previous
                .is_none_or(|prev| fresh.differs_materially(&prev, snapshot_threshold));
            if stale {
                if let Err(e) = store.persist_snapshot(supplier_id, fresh).await {
                    tracing::error!(%supplier_id, error = %e, "Snapshot write failed, skipping");
                }
            }
        }
        Err(e) => {
            tracing::error!(%supplier_id, error = %e, "Snapshot read failed, skipping write");
        }
    }

    let sender = channels
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(supplier_id)
        .or_insert_with(|| watch::channel(SupplierFinancials::default()).0)
        .clone();
    sender.send_replace(fresh);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use panier_core::{LineFinancialView, OrderStatus, SettlementStatus};
    use tokio::time::timeout;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        orders: Mutex<HashMap<SupplierId, Vec<OrderFinancialView>>>,
        snapshots: Mutex<HashMap<SupplierId, SupplierFinancials>>,
        writes: AtomicUsize,
    }

    impl FinancialStore for Arc<MemoryStore> {
        async fn financial_views(
            &self,
            supplier_id: SupplierId,
        ) -> Result<Vec<OrderFinancialView>, RepositoryError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .get(&supplier_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn load_snapshot(
            &self,
            supplier_id: SupplierId,
        ) -> Result<Option<SupplierFinancials>, RepositoryError> {
            Ok(self.snapshots.lock().unwrap().get(&supplier_id).copied())
        }

        async fn persist_snapshot(
            &self,
            supplier_id: SupplierId,
            financials: SupplierFinancials,
        ) -> Result<(), RepositoryError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.snapshots.lock().unwrap().insert(supplier_id, financials);
            Ok(())
        }
    }

    fn shipping_order(platform_debt: i64, fee: i64, lines: &[(i64, i64)]) -> OrderFinancialView {
        OrderFinancialView {
            status: OrderStatus::Shipping,
            settlement_status: SettlementStatus::Pending,
            platform_debt: Decimal::from(platform_debt),
            delivery_fee: Decimal::from(fee),
            lines: lines
                .iter()
                .map(|&(supplier_price, quantity)| LineFinancialView {
                    supplier_price: Decimal::from(supplier_price),
                    quantity,
                })
                .collect(),
        }
    }

    async fn wait_for_update(rx: &mut watch::Receiver<SupplierFinancials>) -> SupplierFinancials {
        timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("feed update timed out")
            .expect("feed channel closed");
        *rx.borrow_and_update()
    }

    #[tokio::test]
    async fn test_notification_publishes_fresh_totals_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let supplier = SupplierId::from(7);
        store
            .orders
            .lock()
            .unwrap()
            .insert(supplier, vec![shipping_order(500, 1000, &[(2000, 2)])]);

        let feed = SettlementFeed::spawn(Arc::clone(&store), Decimal::ONE);
        let mut rx = feed.subscribe(supplier);
        feed.notify_orders_changed(supplier);

        let totals = wait_for_update(&mut rx).await;
        assert_eq!(totals.platform_debt, Decimal::from(600));
        assert_eq!(totals.product_earnings, Decimal::from(4000));
        assert_eq!(totals.delivery_earnings, Decimal::from(900));

        // Snapshot lands before the publish, so it is visible here.
        assert_eq!(
            store.snapshots.lock().unwrap().get(&supplier),
            Some(&totals)
        );
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unchanged_recomputation_skips_the_snapshot_write() {
        let store = Arc::new(MemoryStore::default());
        let supplier = SupplierId::from(3);
        store
            .orders
            .lock()
            .unwrap()
            .insert(supplier, vec![shipping_order(250, 0, &[(1000, 1)])]);

        let feed = SettlementFeed::spawn(Arc::clone(&store), Decimal::ONE);
        let mut rx = feed.subscribe(supplier);

        feed.notify_orders_changed(supplier);
        wait_for_update(&mut rx).await;
        feed.notify_orders_changed(supplier);
        wait_for_update(&mut rx).await;

        // Second pass recomputed the same totals; write-back stayed at one.
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_settlement_drops_debt_but_keeps_earnings() {
        let store = Arc::new(MemoryStore::default());
        let supplier = SupplierId::from(11);
        let mut order = shipping_order(400, 500, &[(1500, 1)]);
        store
            .orders
            .lock()
            .unwrap()
            .insert(supplier, vec![order.clone()]);

        let feed = SettlementFeed::spawn(Arc::clone(&store), Decimal::ONE);
        let mut rx = feed.subscribe(supplier);
        feed.notify_orders_changed(supplier);
        let before = wait_for_update(&mut rx).await;
        assert_eq!(before.platform_debt, Decimal::from(450));

        order.settlement_status = SettlementStatus::Paid;
        store.orders.lock().unwrap().insert(supplier, vec![order]);
        feed.notify_orders_changed(supplier);
        let after = wait_for_update(&mut rx).await;

        assert_eq!(after.platform_debt, Decimal::ZERO);
        assert_eq!(after.total_earnings, before.total_earnings);
    }
}
