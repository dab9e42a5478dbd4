use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{
    Client, ClientFields, ClientId, ClientPatch, Expense, ExpenseFields, ExpenseId, ExpensePatch,
    Order, OrderFields, OrderId, OrderPatch,
};

/// Persistence collaborator holding the three record collections.
///
/// Inserts assign `id` (and `created_at` where the record has one). Updates
/// and deletes of a missing id fail with `RecordNotFound`. A write is visible
/// to every later read through the same store. Cascading client deletion is
/// not the store's concern; see `RecordsUsecase::delete_client`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, ServerError>;
    async fn insert_client(&self, fields: ClientFields) -> Result<Client, ServerError>;
    async fn update_client(&self, id: &ClientId, patch: ClientPatch)
        -> Result<Client, ServerError>;
    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError>;

    async fn list_orders(&self) -> Result<Vec<Order>, ServerError>;
    async fn insert_order(&self, fields: OrderFields) -> Result<Order, ServerError>;
    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, ServerError>;
    async fn delete_order(&self, id: &OrderId) -> Result<(), ServerError>;

    async fn list_expenses(&self) -> Result<Vec<Expense>, ServerError>;
    async fn insert_expense(&self, fields: ExpenseFields) -> Result<Expense, ServerError>;
    async fn update_expense(
        &self,
        id: &ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ServerError>;
    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), ServerError>;
}
