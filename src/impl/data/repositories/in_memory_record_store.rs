use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    domain::repositories::records_repository::RecordStore,
    entities::{
        Client, ClientFields, ClientId, ClientPatch, Expense, ExpenseFields, ExpenseId,
        ExpensePatch, Order, OrderFields, OrderId, OrderPatch, RecordsSnapshot,
    },
};

use super::snapshot_mutations as mutations;

/// Record store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<RecordsSnapshot>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. with previously exported records or fixtures.
    pub fn with_snapshot(snapshot: RecordsSnapshot) -> Self {
        Self {
            records: RwLock::new(snapshot),
        }
    }

    pub async fn snapshot(&self) -> RecordsSnapshot {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_clients(&self) -> Result<Vec<Client>, ServerError> {
        Ok(self.records.read().await.clients.clone())
    }

    async fn insert_client(&self, fields: ClientFields) -> Result<Client, ServerError> {
        let client = mutations::insert_client(&mut *self.records.write().await, fields, Utc::now());
        debug!(id = %client.id, "client inserted");
        Ok(client)
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Client, ServerError> {
        mutations::update_client(&mut *self.records.write().await, id, &patch)
    }

    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError> {
        mutations::delete_client(&mut *self.records.write().await, id)?;
        debug!(%id, "client deleted");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ServerError> {
        Ok(self.records.read().await.orders.clone())
    }

    async fn insert_order(&self, fields: OrderFields) -> Result<Order, ServerError> {
        let order = mutations::insert_order(&mut *self.records.write().await, fields, Utc::now());
        debug!(id = %order.id, "order inserted");
        Ok(order)
    }

    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, ServerError> {
        mutations::update_order(&mut *self.records.write().await, id, &patch)
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ServerError> {
        mutations::delete_order(&mut *self.records.write().await, id)?;
        debug!(%id, "order deleted");
        Ok(())
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, ServerError> {
        Ok(self.records.read().await.expenses.clone())
    }

    async fn insert_expense(&self, fields: ExpenseFields) -> Result<Expense, ServerError> {
        let expense = mutations::insert_expense(&mut *self.records.write().await, fields);
        debug!(id = %expense.id, "expense inserted");
        Ok(expense)
    }

    async fn update_expense(
        &self,
        id: &ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ServerError> {
        mutations::update_expense(&mut *self.records.write().await, id, &patch)
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), ServerError> {
        mutations::delete_expense(&mut *self.records.write().await, id)?;
        debug!(%id, "expense deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::ExpenseCategory;

    fn expense_fields(title: &str, amount: f64) -> ExpenseFields {
        ExpenseFields {
            title: title.to_string(),
            amount,
            date: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
            category: ExpenseCategory::Tools,
            notes: None,
        }
    }

    #[tokio::test]
    async fn writes_are_visible_to_later_reads() {
        let store = InMemoryRecordStore::new();
        let inserted = store
            .insert_expense(expense_fields("Adobe Creative Cloud Subscription", 52.99))
            .await
            .unwrap();
        assert_eq!(store.list_expenses().await.unwrap(), vec![inserted.clone()]);

        let updated = store
            .update_expense(
                &inserted.id,
                ExpensePatch {
                    amount: Some(54.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 54.99);
        assert_eq!(updated.title, inserted.title);
        assert_eq!(store.list_expenses().await.unwrap(), vec![updated]);

        store.delete_expense(&inserted.id).await.unwrap();
        assert!(store.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_ids_fail() {
        let store = InMemoryRecordStore::new();
        assert!(store
            .update_client(&ClientId::from("ghost"), ClientPatch::default())
            .await
            .is_err());
        assert!(store.delete_order(&OrderId::from("ghost")).await.is_err());
    }

    #[tokio::test]
    async fn seeded_snapshot_is_listed() {
        let seeded = InMemoryRecordStore::new();
        seeded.insert_expense(expense_fields("Zoom Pro", 14.99)).await.unwrap();
        let snapshot = seeded.snapshot().await;

        let store = InMemoryRecordStore::with_snapshot(snapshot.clone());
        assert_eq!(store.list_expenses().await.unwrap(), snapshot.expenses);
    }
}
