//! Write operations shared by every store that keeps a full `RecordsSnapshot`
//! in memory.

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use crate::{
    entities::{
        Client, ClientFields, ClientId, ClientPatch, Expense, ExpenseFields, ExpenseId,
        ExpensePatch, Order, OrderFields, OrderId, OrderPatch, RecordsSnapshot,
    },
    errors::RecordNotFound,
};

pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn find_mut<'a, T>(
    items: &'a mut [T],
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> Result<&'a mut T, ServerError> {
    items
        .iter_mut()
        .find(|item| matches(item))
        .ok_or_else(|| RecordNotFound::new(kind, id))
}

fn remove<T>(
    items: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> Result<(), ServerError> {
    let position = items
        .iter()
        .position(matches)
        .ok_or_else(|| RecordNotFound::new(kind, id))?;
    items.remove(position);
    Ok(())
}

// Clients.
// ---

pub(crate) fn insert_client(
    snapshot: &mut RecordsSnapshot,
    fields: ClientFields,
    now: DateTime<Utc>,
) -> Client {
    let client = Client::new(ClientId(new_record_id()), fields, now);
    snapshot.clients.push(client.clone());
    client
}

pub(crate) fn update_client(
    snapshot: &mut RecordsSnapshot,
    id: &ClientId,
    patch: &ClientPatch,
) -> Result<Client, ServerError> {
    let client = find_mut(&mut snapshot.clients, |c| &c.id == id, "Client", &id.0)?;
    patch.apply(client);
    Ok(client.clone())
}

pub(crate) fn delete_client(
    snapshot: &mut RecordsSnapshot,
    id: &ClientId,
) -> Result<(), ServerError> {
    remove(&mut snapshot.clients, |c| &c.id == id, "Client", &id.0)
}

// Orders.
// ---

pub(crate) fn insert_order(
    snapshot: &mut RecordsSnapshot,
    fields: OrderFields,
    now: DateTime<Utc>,
) -> Order {
    let order = Order::new(OrderId(new_record_id()), fields, now);
    snapshot.orders.push(order.clone());
    order
}

pub(crate) fn update_order(
    snapshot: &mut RecordsSnapshot,
    id: &OrderId,
    patch: &OrderPatch,
) -> Result<Order, ServerError> {
    let order = find_mut(&mut snapshot.orders, |o| &o.id == id, "Order", &id.0)?;
    patch.apply(order);
    Ok(order.clone())
}

pub(crate) fn delete_order(
    snapshot: &mut RecordsSnapshot,
    id: &OrderId,
) -> Result<(), ServerError> {
    remove(&mut snapshot.orders, |o| &o.id == id, "Order", &id.0)
}

// Expenses.
// ---

pub(crate) fn insert_expense(snapshot: &mut RecordsSnapshot, fields: ExpenseFields) -> Expense {
    let expense = Expense::new(ExpenseId(new_record_id()), fields);
    snapshot.expenses.push(expense.clone());
    expense
}

pub(crate) fn update_expense(
    snapshot: &mut RecordsSnapshot,
    id: &ExpenseId,
    patch: &ExpensePatch,
) -> Result<Expense, ServerError> {
    let expense = find_mut(&mut snapshot.expenses, |e| &e.id == id, "Expense", &id.0)?;
    patch.apply(expense);
    Ok(expense.clone())
}

pub(crate) fn delete_expense(
    snapshot: &mut RecordsSnapshot,
    id: &ExpenseId,
) -> Result<(), ServerError> {
    remove(&mut snapshot.expenses, |e| &e.id == id, "Expense", &id.0)
}
