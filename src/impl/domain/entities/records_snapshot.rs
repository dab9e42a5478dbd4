use super::{client::Client, expense::Expense, order::Order};

/// Point-in-time copy of all three collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordsSnapshot {
    pub clients: Vec<Client>,
    pub orders: Vec<Order>,
    pub expenses: Vec<Expense>,
}
