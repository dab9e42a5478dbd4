use chrono::{DateTime, Utc};

use super::{
    client::ClientId,
    order::{OrderId, OrderStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Deadline,
}

/// Display emphasis for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTone {
    Primary,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub order_id: Option<OrderId>,
    pub title: String,
    pub date: DateTime<Utc>,
    pub kind: EventKind,
    pub client_id: Option<ClientId>,
    pub status: Option<OrderStatus>,
    pub tone: EventTone,
}
