use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    data::datasources::records_json_datasource::{
        RecordsJsonDatasource, RecordsJsonDatasourceImpl,
    },
    domain::repositories::records_repository::RecordStore,
    entities::{
        Client, ClientFields, ClientId, ClientPatch, Expense, ExpenseFields, ExpenseId,
        ExpensePatch, Order, OrderFields, OrderId, OrderPatch, RecordsSnapshot,
    },
    errors::StoreUnavailable,
};

use super::snapshot_mutations as mutations;

/// Record store backed by a single JSON document on disk. Every successful
/// write is saved before it becomes visible; a failed save leaves both the
/// file and the in-memory records unchanged.
pub struct JsonFileRecordStore {
    path: PathBuf,
    records: RwLock<RecordsSnapshot>,
    datasource: RecordsJsonDatasourceImpl,
}

impl JsonFileRecordStore {
    /// Loads the document at `path`. A missing file opens as an empty store
    /// and is created on the first write; a missing parent directory does
    /// not, and fails with `StoreUnavailable`.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Err(StoreUnavailable::new(&format!(
                "'{}' is a directory",
                path.display()
            )));
        }
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
                return Err(StoreUnavailable::new(&format!(
                    "directory '{}' does not exist",
                    dir.display()
                )));
            }
            _ => {}
        }
        let datasource = RecordsJsonDatasourceImpl::new();
        let records = datasource.load(&path).await?;
        info!(
            path = %path.display(),
            clients = records.clients.len(),
            orders = records.orders.len(),
            expenses = records.expenses.len(),
            "records loaded"
        );
        Ok(Self {
            path,
            records: RwLock::new(records),
            datasource,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut RecordsSnapshot) -> Result<T, ServerError> + Send,
    ) -> Result<T, ServerError> {
        let mut records = self.records.write().await;
        let mut draft = records.clone();
        let result = change(&mut draft)?;
        self.datasource.save(&self.path, &draft).await?;
        *records = draft;
        debug!(path = %self.path.display(), "records saved");
        Ok(result)
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn list_clients(&self) -> Result<Vec<Client>, ServerError> {
        Ok(self.records.read().await.clients.clone())
    }

    async fn insert_client(&self, fields: ClientFields) -> Result<Client, ServerError> {
        self.commit(|r| Ok(mutations::insert_client(r, fields, Utc::now())))
            .await
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Client, ServerError> {
        self.commit(|r| mutations::update_client(r, id, &patch)).await
    }

    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError> {
        self.commit(|r| mutations::delete_client(r, id)).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ServerError> {
        Ok(self.records.read().await.orders.clone())
    }

    async fn insert_order(&self, fields: OrderFields) -> Result<Order, ServerError> {
        self.commit(|r| Ok(mutations::insert_order(r, fields, Utc::now())))
            .await
    }

    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, ServerError> {
        self.commit(|r| mutations::update_order(r, id, &patch)).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ServerError> {
        self.commit(|r| mutations::delete_order(r, id)).await
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, ServerError> {
        Ok(self.records.read().await.expenses.clone())
    }

    async fn insert_expense(&self, fields: ExpenseFields) -> Result<Expense, ServerError> {
        self.commit(|r| Ok(mutations::insert_expense(r, fields))).await
    }

    async fn update_expense(
        &self,
        id: &ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ServerError> {
        self.commit(|r| mutations::update_expense(r, id, &patch)).await
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), ServerError> {
        self.commit(|r| mutations::delete_expense(r, id)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::PaymentStatus;

    fn client_fields() -> ClientFields {
        ClientFields {
            name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            preferred_payment_method: "Bank Transfer".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn writes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = JsonFileRecordStore::open(&path).await.unwrap();
        assert!(store.list_clients().await.unwrap().is_empty());
        let client = store.insert_client(client_fields()).await.unwrap();
        let order = store
            .insert_order(OrderFields {
                client_id: client.id.clone(),
                title: "Website Redesign".to_string(),
                description: "Full redesign".to_string(),
                deadline: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
                cost: 2500.0,
                payment_status: PaymentStatus::Partial,
                amount_paid: Some(1000.0),
            })
            .await
            .unwrap();

        let reopened = JsonFileRecordStore::open(&path).await.unwrap();
        assert_eq!(reopened.list_clients().await.unwrap(), vec![client]);
        assert_eq!(reopened.list_orders().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn failed_write_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = JsonFileRecordStore::open(&path).await.unwrap();
        store.insert_client(client_fields()).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        assert!(store
            .delete_client(&ClientId::from("ghost"))
            .await
            .is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(store.list_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unusable_locations_are_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonFileRecordStore::open(dir.path()).await.is_err());
        assert!(
            JsonFileRecordStore::open(dir.path().join("missing").join("records.json"))
                .await
                .is_err()
        );
        assert!(!dir.path().join("missing").exists());
    }

    #[tokio::test]
    async fn reads_snake_case_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"{ "orders": [{
                "id": "7", "client_id": "1", "title": "Logo Design", "description": "",
                "deadline": "2023-05-20T00:00:00Z", "cost": 800, "status": "pending",
                "payment_status": "unpaid", "created_at": "2023-05-01T00:00:00Z"
            }] }"#,
        )
        .unwrap();

        let store = JsonFileRecordStore::open(&path).await.unwrap();
        let orders = store.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].client_id, ClientId::from("1"));
        assert_eq!(orders[0].payment_status, PaymentStatus::Unpaid);
    }
}
