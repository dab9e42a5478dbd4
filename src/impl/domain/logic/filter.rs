use std::cmp::Reverse;

use crate::entities::{Client, ClientFilter, Expense, ExpenseFilter, Order, OrderFilter};

use super::utils::{contains_ignore_case, contains_inclusive};

fn normalized_query(query: &Option<String>) -> String {
    query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .unwrap_or_default()
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let query = normalized_query(&self.text_query);
        self.status.map_or(true, |s| order.status == s)
            && self.payment_status.map_or(true, |s| order.payment_status == s)
            && self.client_id.as_ref().map_or(true, |id| &order.client_id == id)
            && (contains_ignore_case(&order.title, &query)
                || contains_ignore_case(&order.description, &query))
            && contains_inclusive(order.created_at, self.date_from, self.date_to)
    }
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        let query = normalized_query(&self.text_query);
        self.category.map_or(true, |c| expense.category == c)
            && (contains_ignore_case(&expense.title, &query)
                || expense
                    .notes
                    .as_deref()
                    .is_some_and(|notes| contains_ignore_case(notes, &query)))
            && contains_inclusive(expense.date, self.date_from, self.date_to)
    }
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        let query = normalized_query(&self.text_query);
        contains_ignore_case(&client.name, &query) || contains_ignore_case(&client.email, &query)
    }
}

// Filtering keeps the snapshot order; sorting is a separate step.
// ---

pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    orders.iter().filter(|o| filter.matches(o)).cloned().collect()
}

pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

pub fn filter_clients(clients: &[Client], filter: &ClientFilter) -> Vec<Client> {
    clients.iter().filter(|c| filter.matches(c)).cloned().collect()
}

pub fn sort_orders_newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|o| Reverse(o.created_at));
}

pub fn sort_expenses_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by_key(|e| Reverse(e.date));
}
