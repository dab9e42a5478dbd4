use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use futures::{
    stream::{self, StreamExt},
    TryStreamExt,
};
use tracing::info;

use crate::{
    domain::{logic::overdue::stale_pending_orders, repositories::records_repository::RecordStore},
    entities::{Order, OrderPatch, OrderStatus},
};

#[async_trait]
pub trait OverdueUsecase: Send + Sync {
    /// Moves every order still persisted as pending whose deadline is before
    /// `now` to `Overdue`, and returns the updated orders. Complete orders
    /// are never touched.
    async fn reconcile_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Order>, ServerError>;
}

pub(crate) struct OverdueUsecaseImpl<S: RecordStore> {
    store: Arc<S>,
}

#[async_trait]
impl<S: RecordStore> OverdueUsecase for OverdueUsecaseImpl<S> {
    async fn reconcile_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Order>, ServerError> {
        let orders = self.store.list_orders().await?;
        let stale: Vec<Order> = stale_pending_orders(&orders, now)
            .into_iter()
            .cloned()
            .collect();
        let store = &self.store;
        let updated = stream::iter(stale)
            .then(|order| async move {
                store
                    .update_order(
                        &order.id,
                        OrderPatch {
                            status: Some(OrderStatus::Overdue),
                            ..Default::default()
                        },
                    )
                    .await
            })
            .try_collect::<Vec<_>>()
            .await?;
        if !updated.is_empty() {
            info!(count = updated.len(), "orders marked overdue");
        }
        Ok(updated)
    }
}

impl<S: RecordStore> OverdueUsecaseImpl<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        OverdueUsecaseImpl { store }
    }
}
