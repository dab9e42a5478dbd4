use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::{debug, info, warn};

use crate::{
    config::{BooksConfig, ClientDeletionPolicy},
    data::datasources::expenses_csv_datasource::{
        ExpensesCsvDatasource, ExpensesCsvDatasourceImpl,
    },
    domain::{
        logic::{
            lookup::find_client,
            validation::{validate_client, validate_expense, validate_order, validate_order_fields},
        },
        repositories::records_repository::RecordStore,
    },
    entities::{
        Client, ClientFields, ClientId, ClientPatch, Expense, ExpenseFields, ExpenseId,
        ExpensePatch, Order, OrderFields, OrderId, OrderPatch, OrderStatus, Payment,
        PaymentStatus,
    },
    errors::{
        InvalidField, InvalidPaymentAmount, InvalidStatusTransition, OrderAlreadyPaid,
        RecordNotFound,
    },
};

/// Validated writes and simple queries over the record store.
#[async_trait]
pub trait RecordsUsecase: Send + Sync {
    // Clients.
    async fn clients(&self) -> Result<Vec<Client>, ServerError>;
    /// `None` when no client has this id; never an error for a missing id.
    async fn client(&self, id: &ClientId) -> Result<Option<Client>, ServerError>;
    async fn add_client(&self, fields: ClientFields) -> Result<Client, ServerError>;
    async fn update_client(&self, id: &ClientId, patch: ClientPatch)
        -> Result<Client, ServerError>;
    /// Deletes the client, then (under `ClientDeletionPolicy::CascadeOrders`)
    /// each of their orders. The two steps are not atomic.
    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError>;

    // Orders.
    async fn orders(&self) -> Result<Vec<Order>, ServerError>;
    async fn add_order(&self, fields: OrderFields) -> Result<Order, ServerError>;
    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, ServerError>;
    async fn delete_order(&self, id: &OrderId) -> Result<(), ServerError>;
    async fn complete_order(&self, id: &OrderId) -> Result<Order, ServerError>;
    async fn process_payment(&self, id: &OrderId, payment: Payment)
        -> Result<Order, ServerError>;
    async fn orders_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, ServerError>;
    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, ServerError>;
    async fn orders_by_payment_status(
        &self,
        payment_status: PaymentStatus,
    ) -> Result<Vec<Order>, ServerError>;

    // Expenses.
    async fn expenses(&self) -> Result<Vec<Expense>, ServerError>;
    async fn add_expense(&self, fields: ExpenseFields) -> Result<Expense, ServerError>;
    async fn update_expense(
        &self,
        id: &ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ServerError>;
    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), ServerError>;
    /// Every row is validated before any is inserted.
    async fn import_expenses_csv(&self, csv: &str) -> Result<Vec<Expense>, ServerError>;
    async fn import_expenses_csv_file(&self, path: &Path) -> Result<Vec<Expense>, ServerError>;
}

pub(crate) struct RecordsUsecaseImpl<S, DS = ExpensesCsvDatasourceImpl>
where
    S: RecordStore,
    DS: ExpensesCsvDatasource,
{
    store: Arc<S>,
    config: BooksConfig,
    expenses_csv_datasource: DS,
}

impl<S, DS> RecordsUsecaseImpl<S, DS>
where
    S: RecordStore,
    DS: ExpensesCsvDatasource + Send + Sync,
{
    async fn existing_order(&self, id: &OrderId) -> Result<Order, ServerError> {
        self.store
            .list_orders()
            .await?
            .into_iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| RecordNotFound::new("Order", &id.0))
    }

    async fn orders_where(
        &self,
        predicate: impl Fn(&Order) -> bool + Send,
    ) -> Result<Vec<Order>, ServerError> {
        Ok(self
            .store
            .list_orders()
            .await?
            .into_iter()
            .filter(|o| predicate(o))
            .collect())
    }

    async fn insert_expenses(
        &self,
        rows: Vec<ExpenseFields>,
    ) -> Result<Vec<Expense>, ServerError> {
        for row in &rows {
            validate_expense(row)?;
        }
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            inserted.push(self.store.insert_expense(row).await?);
        }
        info!(count = inserted.len(), "expenses imported");
        Ok(inserted)
    }
}

#[async_trait]
impl<S, DS> RecordsUsecase for RecordsUsecaseImpl<S, DS>
where
    S: RecordStore,
    DS: ExpensesCsvDatasource + Send + Sync,
{
    async fn clients(&self) -> Result<Vec<Client>, ServerError> {
        self.store.list_clients().await
    }

    async fn client(&self, id: &ClientId) -> Result<Option<Client>, ServerError> {
        let clients = self.store.list_clients().await?;
        Ok(find_client(&clients, id).cloned())
    }

    async fn add_client(&self, fields: ClientFields) -> Result<Client, ServerError> {
        validate_client(&fields)?;
        let client = self.store.insert_client(fields).await?;
        info!(id = %client.id, "client added");
        Ok(client)
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Client, ServerError> {
        let clients = self.store.list_clients().await?;
        let mut merged = find_client(&clients, id)
            .cloned()
            .ok_or_else(|| RecordNotFound::new("Client", &id.0))?;
        patch.apply(&mut merged);
        validate_client(&merged.to_fields())?;
        self.store.update_client(id, patch).await
    }

    async fn delete_client(&self, id: &ClientId) -> Result<(), ServerError> {
        self.store.delete_client(id).await?;
        info!(%id, "client deleted");
        if self.config.client_deletion == ClientDeletionPolicy::KeepOrders {
            return Ok(());
        }
        let orphaned = self.orders_where(|o| &o.client_id == id).await?;
        for order in &orphaned {
            if let Err(e) = self.store.delete_order(&order.id).await {
                warn!(client = %id, order = %order.id, "cascade delete stopped part-way");
                return Err(e);
            }
        }
        debug!(client = %id, count = orphaned.len(), "orders of deleted client removed");
        Ok(())
    }

    async fn orders(&self) -> Result<Vec<Order>, ServerError> {
        self.store.list_orders().await
    }

    async fn add_order(&self, fields: OrderFields) -> Result<Order, ServerError> {
        validate_order_fields(&fields)?;
        let order = self.store.insert_order(fields).await?;
        info!(id = %order.id, client = %order.client_id, "order added");
        Ok(order)
    }

    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, ServerError> {
        let current = self.existing_order(id).await?;
        if let Some(next) = patch.status {
            // Overdue is only ever set by `OverdueUsecase::reconcile_overdue`.
            let manual_overdue = next == OrderStatus::Overdue && current.status != next;
            if manual_overdue || !current.status.can_transition_to(next) {
                return Err(InvalidStatusTransition::new(
                    current.status.as_str(),
                    next.as_str(),
                ));
            }
        }
        if let Some(paid) = patch.amount_paid {
            if paid < current.amount_paid.unwrap_or(0.0) {
                return Err(InvalidField::new("amount paid", "cannot decrease"));
            }
        }
        let mut merged = current;
        patch.apply(&mut merged);
        validate_order(&merged)?;
        self.store.update_order(id, patch).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ServerError> {
        self.store.delete_order(id).await?;
        info!(%id, "order deleted");
        Ok(())
    }

    async fn complete_order(&self, id: &OrderId) -> Result<Order, ServerError> {
        let order = self
            .update_order(
                id,
                OrderPatch {
                    status: Some(OrderStatus::Complete),
                    ..Default::default()
                },
            )
            .await?;
        info!(%id, "order completed");
        Ok(order)
    }

    async fn process_payment(
        &self,
        id: &OrderId,
        payment: Payment,
    ) -> Result<Order, ServerError> {
        let order = self.existing_order(id).await?;
        let remaining = match order.payment_status {
            PaymentStatus::Paid => 0.0,
            _ => order.remaining_balance(),
        };
        if remaining <= 0.0 {
            return Err(OrderAlreadyPaid::new(&id.0));
        }
        let amount = match payment {
            Payment::Full => remaining,
            Payment::Partial(amount)
                if amount.is_finite() && amount > 0.0 && amount <= remaining =>
            {
                amount
            }
            Payment::Partial(amount) => return Err(InvalidPaymentAmount::new(amount, remaining)),
        };
        let amount_paid = order.amount_paid.unwrap_or(0.0) + amount;
        let payment_status = if amount_paid >= order.cost {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };
        let updated = self
            .store
            .update_order(
                id,
                OrderPatch {
                    payment_status: Some(payment_status),
                    amount_paid: Some(amount_paid.min(order.cost)),
                    ..Default::default()
                },
            )
            .await?;
        info!(%id, amount, status = %payment_status, "payment recorded");
        Ok(updated)
    }

    async fn orders_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, ServerError> {
        self.orders_where(|o| &o.client_id == client_id).await
    }

    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, ServerError> {
        self.orders_where(|o| o.status == status).await
    }

    async fn orders_by_payment_status(
        &self,
        payment_status: PaymentStatus,
    ) -> Result<Vec<Order>, ServerError> {
        self.orders_where(|o| o.payment_status == payment_status)
            .await
    }

    async fn expenses(&self) -> Result<Vec<Expense>, ServerError> {
        self.store.list_expenses().await
    }

    async fn add_expense(&self, fields: ExpenseFields) -> Result<Expense, ServerError> {
        validate_expense(&fields)?;
        let expense = self.store.insert_expense(fields).await?;
        info!(id = %expense.id, "expense added");
        Ok(expense)
    }

    async fn update_expense(
        &self,
        id: &ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ServerError> {
        let mut merged = self
            .store
            .list_expenses()
            .await?
            .into_iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| RecordNotFound::new("Expense", &id.0))?;
        patch.apply(&mut merged);
        validate_expense(&merged.to_fields())?;
        self.store.update_expense(id, patch).await
    }

    async fn delete_expense(&self, id: &ExpenseId) -> Result<(), ServerError> {
        self.store.delete_expense(id).await?;
        info!(%id, "expense deleted");
        Ok(())
    }

    async fn import_expenses_csv(&self, csv: &str) -> Result<Vec<Expense>, ServerError> {
        let rows = self.expenses_csv_datasource.from_string(csv)?;
        self.insert_expenses(rows).await
    }

    async fn import_expenses_csv_file(&self, path: &Path) -> Result<Vec<Expense>, ServerError> {
        let rows = self.expenses_csv_datasource.from_file(path)?;
        self.insert_expenses(rows).await
    }
}

impl<S: RecordStore> RecordsUsecaseImpl<S> {
    pub(crate) fn new(store: Arc<S>, config: BooksConfig) -> Self {
        RecordsUsecaseImpl {
            store,
            config,
            expenses_csv_datasource: ExpensesCsvDatasourceImpl::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        data::repositories::in_memory_record_store::InMemoryRecordStore,
        entities::ExpenseCategory,
    };

    fn usecase(config: BooksConfig) -> RecordsUsecaseImpl<InMemoryRecordStore> {
        RecordsUsecaseImpl::new(Arc::new(InMemoryRecordStore::new()), config)
    }

    fn client_fields(name: &str) -> ClientFields {
        ClientFields {
            name: name.to_string(),
            email: "alex@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            preferred_payment_method: "Bank Transfer".to_string(),
            notes: None,
        }
    }

    fn order_fields(client_id: &ClientId, cost: f64) -> OrderFields {
        OrderFields {
            client_id: client_id.clone(),
            title: "Website Redesign".to_string(),
            description: "Landing page and blog".to_string(),
            deadline: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            cost,
            payment_status: PaymentStatus::Unpaid,
            amount_paid: None,
        }
    }

    #[tokio::test]
    async fn invalid_records_never_reach_the_store() {
        let usecase = usecase(BooksConfig::default());
        assert!(usecase.add_client(client_fields("A")).await.is_err());
        let client = usecase.add_client(client_fields("Alex Johnson")).await.unwrap();
        assert!(usecase.add_order(order_fields(&client.id, -5.0)).await.is_err());
        assert!(usecase
            .update_client(
                &client.id,
                ClientPatch {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
            )
            .await
            .is_err());

        assert_eq!(usecase.clients().await.unwrap(), vec![client]);
        assert!(usecase.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_client_cascades_to_their_orders() {
        let usecase = usecase(BooksConfig::default());
        let alex = usecase.add_client(client_fields("Alex Johnson")).await.unwrap();
        let sam = usecase.add_client(client_fields("Sam Lee")).await.unwrap();
        usecase.add_order(order_fields(&alex.id, 1000.0)).await.unwrap();
        usecase.add_order(order_fields(&alex.id, 500.0)).await.unwrap();
        let kept = usecase.add_order(order_fields(&sam.id, 300.0)).await.unwrap();

        usecase.delete_client(&alex.id).await.unwrap();

        assert_eq!(usecase.orders().await.unwrap(), vec![kept]);
        assert_eq!(usecase.client(&alex.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn keep_orders_policy_leaves_orders_behind() {
        let usecase = usecase(BooksConfig {
            client_deletion: ClientDeletionPolicy::KeepOrders,
            ..Default::default()
        });
        let alex = usecase.add_client(client_fields("Alex Johnson")).await.unwrap();
        usecase.add_order(order_fields(&alex.id, 1000.0)).await.unwrap();

        usecase.delete_client(&alex.id).await.unwrap();

        assert_eq!(usecase.orders_by_client(&alex.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn payments_accumulate_until_paid() {
        let usecase = usecase(BooksConfig::default());
        let order = usecase
            .add_order(order_fields(&ClientId::from("c1"), 1000.0))
            .await
            .unwrap();

        let order = usecase
            .process_payment(&order.id, Payment::Partial(400.0))
            .await
            .unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Partial);
        assert_eq!(order.amount_paid, Some(400.0));

        assert!(usecase
            .process_payment(&order.id, Payment::Partial(700.0))
            .await
            .is_err());
        assert!(usecase
            .process_payment(&order.id, Payment::Partial(0.0))
            .await
            .is_err());

        let order = usecase.process_payment(&order.id, Payment::Full).await.unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.amount_paid, Some(1000.0));
        assert!(usecase.process_payment(&order.id, Payment::Full).await.is_err());
        assert_eq!(
            usecase
                .orders_by_payment_status(PaymentStatus::Paid)
                .await
                .unwrap(),
            vec![order]
        );
    }

    #[tokio::test]
    async fn status_changes_follow_the_lifecycle() {
        let usecase = usecase(BooksConfig::default());
        let order = usecase
            .add_order(order_fields(&ClientId::from("c1"), 800.0))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let order = usecase.complete_order(&order.id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Complete);
        // Completing again is a no-op.
        assert!(usecase.complete_order(&order.id).await.is_ok());

        for status in [OrderStatus::Pending, OrderStatus::Overdue] {
            assert!(usecase
                .update_order(
                    &order.id,
                    OrderPatch {
                        status: Some(status),
                        ..Default::default()
                    },
                )
                .await
                .is_err());
        }
        assert_eq!(
            usecase
                .orders_by_status(OrderStatus::Complete)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn amount_paid_never_decreases() {
        let usecase = usecase(BooksConfig::default());
        let order = usecase
            .add_order(order_fields(&ClientId::from("c1"), 1000.0))
            .await
            .unwrap();
        let order = usecase
            .process_payment(&order.id, Payment::Partial(600.0))
            .await
            .unwrap();

        assert!(usecase
            .update_order(
                &order.id,
                OrderPatch {
                    amount_paid: Some(100.0),
                    ..Default::default()
                },
            )
            .await
            .is_err());
        assert_eq!(usecase.orders().await.unwrap()[0].amount_paid, Some(600.0));
    }

    #[tokio::test]
    async fn unpaid_orders_cannot_claim_payment() {
        let usecase = usecase(BooksConfig::default());
        let fields = OrderFields {
            amount_paid: Some(1000.0),
            ..order_fields(&ClientId::from("c1"), 1000.0)
        };
        assert!(usecase.add_order(fields).await.is_err());
        assert!(usecase.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overdue_is_not_set_by_hand() {
        let usecase = usecase(BooksConfig::default());
        let order = usecase
            .add_order(order_fields(&ClientId::from("c1"), 800.0))
            .await
            .unwrap();
        assert!(usecase
            .update_order(
                &order.id,
                OrderPatch {
                    status: Some(OrderStatus::Overdue),
                    ..Default::default()
                },
            )
            .await
            .is_err());
        assert_eq!(
            usecase.orders().await.unwrap()[0].status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn missing_ids_fail_explicitly() {
        let usecase = usecase(BooksConfig::default());
        let ghost = OrderId::from("ghost");
        assert!(usecase.update_order(&ghost, OrderPatch::default()).await.is_err());
        assert!(usecase.delete_order(&ghost).await.is_err());
        assert!(usecase.process_payment(&ghost, Payment::Full).await.is_err());
        assert!(usecase
            .delete_expense(&ExpenseId::from("ghost"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn csv_import_is_all_or_nothing() {
        let usecase = usecase(BooksConfig::default());
        let bad = "title,amount,date,category,notes\n\
                   Zoom Pro,14.99,2023-05-02,communication,\n\
                   ,10,2023-05-03,other,\n";
        assert!(usecase.import_expenses_csv(bad).await.is_err());
        assert!(usecase.expenses().await.unwrap().is_empty());

        let good = "title,amount,date,category,notes\n\
                    Zoom Pro,14.99,2023-05-02,communication,\n\
                    Train ticket,42.50,2023-05-03,travel,Client visit\n";
        let imported = usecase.import_expenses_csv(good).await.unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[1].category, ExpenseCategory::Travel);
        assert_eq!(usecase.expenses().await.unwrap(), imported);
    }
}
