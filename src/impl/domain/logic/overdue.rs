use chrono::{DateTime, Utc};

use crate::entities::{Order, OrderStatus};

/// Live overdue check, independent of the persisted status: the deadline has
/// passed and the order is not complete.
pub fn is_overdue(order: &Order, now: DateTime<Utc>) -> bool {
    order.deadline < now && order.status != OrderStatus::Complete
}

/// Orders that are behaviourally overdue at `now`, whether or not their
/// persisted status says so yet.
pub fn overdue_orders(orders: &[Order], now: DateTime<Utc>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| is_overdue(o, now))
        .cloned()
        .collect()
}

/// Orders still persisted as pending although their deadline has passed.
/// These are the ones reconciliation moves to `Overdue`.
pub fn stale_pending_orders(orders: &[Order], now: DateTime<Utc>) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending && is_overdue(o, now))
        .collect()
}
