use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::entities::{CalendarEvent, EventKind, EventTone, Order, OrderStatus};

use super::utils::month_start_date;

impl From<OrderStatus> for EventTone {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Overdue => EventTone::Destructive,
            OrderStatus::Complete => EventTone::Success,
            OrderStatus::Pending => EventTone::Primary,
        }
    }
}

/// One deadline event per order.
pub fn deadline_events(orders: &[Order]) -> Vec<CalendarEvent> {
    orders
        .iter()
        .map(|order| CalendarEvent {
            order_id: Some(order.id.clone()),
            title: order.title.clone(),
            date: order.deadline,
            kind: EventKind::Deadline,
            client_id: Some(order.client_id.clone()),
            status: Some(order.status),
            tone: order.status.into(),
        })
        .collect()
}

pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|e| e.date.date_naive() == day)
        .cloned()
        .collect()
}

/// Days within the month containing `any_day` that carry at least one event.
pub fn event_days_in_month(events: &[CalendarEvent], any_day: NaiveDate) -> BTreeSet<NaiveDate> {
    let month_start = month_start_date(any_day);
    events
        .iter()
        .map(|e| e.date.date_naive())
        .filter(|d| d.year() == month_start.year() && d.month() == month_start.month())
        .collect()
}
