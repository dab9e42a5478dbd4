use chrono::{DateTime, Utc};

use super::{
    client::ClientId,
    expense::ExpenseCategory,
    order::{OrderStatus, PaymentStatus},
};

/// Absent criteria match everything. Date bounds apply to `created_at` and
/// are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub client_id: Option<ClientId>,
    /// Case-insensitive substring of `title` or `description`.
    pub text_query: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

/// Date bounds apply to `date`, inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<ExpenseCategory>,
    /// Case-insensitive substring of `title` or `notes`.
    pub text_query: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    /// Case-insensitive substring of `name` or `email`.
    pub text_query: Option<String>,
}
