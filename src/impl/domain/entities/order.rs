use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::client::ClientId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub String);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    Pending,
    Complete,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Non-owning reference. May dangle after the client is deleted.
    pub client_id: ClientId,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub cost: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub amount_paid: Option<f64>,
}

/// Order data supplied by callers on insert. New orders always start as
/// `Pending`; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFields {
    pub client_id: ClientId,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub cost: f64,
    pub payment_status: PaymentStatus,
    pub amount_paid: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderPatch {
    pub client_id: Option<ClientId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub amount_paid: Option<f64>,
}

// --

impl OrderStatus {
    /// In reporting order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Complete,
        OrderStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Complete => "complete",
            OrderStatus::Overdue => "overdue",
        }
    }

    /// Pending may become overdue (deadline passed) or complete; overdue may
    /// only become complete; complete is terminal. Keeping the current status
    /// is always allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (current, next) if *current == next => true,
            (OrderStatus::Pending, OrderStatus::Overdue) => true,
            (OrderStatus::Pending, OrderStatus::Complete) => true,
            (OrderStatus::Overdue, OrderStatus::Complete) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "complete" => Ok(OrderStatus::Complete),
            "overdue" => Ok(OrderStatus::Overdue),
            _ => Err(()),
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "partial" => Ok(PaymentStatus::Partial),
            _ => Err(()),
        }
    }
}

impl Order {
    pub fn new(id: OrderId, fields: OrderFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client_id: fields.client_id,
            title: fields.title,
            description: fields.description,
            deadline: fields.deadline,
            cost: fields.cost,
            status: OrderStatus::Pending,
            payment_status: fields.payment_status,
            created_at,
            amount_paid: fields.amount_paid,
        }
    }

    /// Outstanding balance, treating a missing `amount_paid` as nothing paid.
    pub fn remaining_balance(&self) -> f64 {
        (self.cost - self.amount_paid.unwrap_or(0.0)).max(0.0)
    }
}

impl OrderPatch {
    pub fn apply(&self, order: &mut Order) {
        if let Some(client_id) = &self.client_id {
            order.client_id = client_id.clone();
        }
        if let Some(title) = &self.title {
            order.title = title.clone();
        }
        if let Some(description) = &self.description {
            order.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            order.deadline = deadline;
        }
        if let Some(cost) = self.cost {
            order.cost = cost;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(payment_status) = self.payment_status {
            order.payment_status = payment_status;
        }
        if let Some(amount_paid) = self.amount_paid {
            order.amount_paid = Some(amount_paid);
        }
    }
}
