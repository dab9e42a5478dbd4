use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::{
    config::RevenueRecognition,
    entities::{
        Client, ClientId, ClientRevenue, ClientStats, Expense, ExpenseCategory, MonthlyBucket,
        Order, OrderStatus, ProfitLossReport, StatusCount,
    },
};

use super::{
    lookup::ClientLookup,
    utils::{contains_inclusive, month_key, months_between, months_of_year, MonthKey},
};

pub const TOP_CLIENTS_LIMIT: usize = 5;

/// Pure reductions over one snapshot of orders and expenses. Every revenue
/// figure goes through the same [`RevenueRecognition`] rule.
pub struct Aggregator<'a> {
    orders: &'a [Order],
    expenses: &'a [Expense],
    rule: RevenueRecognition,
}

impl<'a> Aggregator<'a> {
    pub fn new(orders: &'a [Order], expenses: &'a [Expense], rule: RevenueRecognition) -> Self {
        Self {
            orders,
            expenses,
            rule,
        }
    }

    pub fn total_revenue(&self) -> f64 {
        self.rule.total_revenue(self.orders)
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn net_profit(&self) -> f64 {
        self.total_revenue() - self.total_expenses()
    }

    /// One bucket per month of `year`, zero-filled.
    pub fn monthly_series_for_year(&self, year: i32) -> Vec<MonthlyBucket> {
        self.buckets_for(&months_of_year(year))
    }

    /// One bucket per calendar month touched by `[from, to]`, zero-filled.
    /// Records outside the range are ignored even when they fall in the
    /// first or last month.
    pub fn monthly_series(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<MonthlyBucket> {
        let orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| contains_inclusive(o.created_at, Some(from), Some(to)))
            .cloned()
            .collect();
        let expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| contains_inclusive(e.date, Some(from), Some(to)))
            .cloned()
            .collect();
        Aggregator::new(&orders, &expenses, self.rule)
            .buckets_for(&months_between(from.date_naive(), to.date_naive()))
    }

    /// Months with any activity, chronological, without zero-filling.
    pub fn monthly_activity(&self) -> Vec<MonthlyBucket> {
        let mut months: BTreeMap<MonthKey, MonthlyBucket> = BTreeMap::new();
        for order in self.orders {
            let (year, month) = month_key(order.created_at);
            months
                .entry((year, month))
                .or_insert_with(|| MonthlyBucket::empty(year, month))
                .revenue += self.rule.recognized_revenue(order);
        }
        for expense in self.expenses {
            let (year, month) = month_key(expense.date);
            months
                .entry((year, month))
                .or_insert_with(|| MonthlyBucket::empty(year, month))
                .expenses += expense.amount;
        }
        months.into_values().collect()
    }

    fn buckets_for(&self, months: &[MonthKey]) -> Vec<MonthlyBucket> {
        let mut buckets: BTreeMap<MonthKey, MonthlyBucket> = months
            .iter()
            .map(|&(year, month)| ((year, month), MonthlyBucket::empty(year, month)))
            .collect();
        for order in self.orders {
            if let Some(bucket) = buckets.get_mut(&month_key(order.created_at)) {
                bucket.revenue += self.rule.recognized_revenue(order);
            }
        }
        for expense in self.expenses {
            if let Some(bucket) = buckets.get_mut(&month_key(expense.date)) {
                bucket.expenses += expense.amount;
            }
        }
        buckets.into_values().collect()
    }

    /// Highest recognized revenue first, at most [`TOP_CLIENTS_LIMIT`]
    /// entries. Ties keep the order in which clients were first seen;
    /// clients without recognized revenue are left out.
    pub fn top_clients(&self, clients: &[Client]) -> Vec<ClientRevenue> {
        let lookup = ClientLookup::new(clients);
        let mut discovered: Vec<(&ClientId, f64)> = Vec::new();
        let mut index: HashMap<&ClientId, usize> = HashMap::new();
        for order in self.orders {
            let i = *index.entry(&order.client_id).or_insert_with(|| {
                discovered.push((&order.client_id, 0.0));
                discovered.len() - 1
            });
            discovered[i].1 += self.rule.recognized_revenue(order);
        }
        discovered.retain(|(_, revenue)| *revenue > 0.0);
        // Stable, so ties keep discovery order.
        discovered.sort_by(|a, b| b.1.total_cmp(&a.1));
        discovered
            .into_iter()
            .take(TOP_CLIENTS_LIMIT)
            .map(|(client_id, revenue)| ClientRevenue {
                client_id: client_id.clone(),
                client_name: lookup.name_of(client_id).to_string(),
                revenue,
            })
            .collect()
    }

    /// Counts per persisted status, always listing every status.
    pub fn status_breakdown(&self) -> Vec<StatusCount> {
        OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: self.orders.iter().filter(|o| o.status == status).count(),
            })
            .collect()
    }

    /// Expense totals per category; categories without expenses are absent.
    pub fn expenses_by_category(&self) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    pub fn profit_loss(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ProfitLossReport {
        let monthly = self.monthly_series(from, to);
        let total_revenue: f64 = self
            .orders
            .iter()
            .filter(|o| contains_inclusive(o.created_at, Some(from), Some(to)))
            .map(|o| self.rule.recognized_revenue(o))
            .sum();
        let total_expenses: f64 = self
            .expenses
            .iter()
            .filter(|e| contains_inclusive(e.date, Some(from), Some(to)))
            .map(|e| e.amount)
            .sum();
        ProfitLossReport {
            from,
            to,
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            monthly,
        }
    }

    /// Per-client order counts and recognized revenue, highest revenue
    /// first. Clients without orders are included with zero figures.
    pub fn client_stats(&self, clients: &[Client]) -> Vec<ClientStats> {
        let mut stats: Vec<ClientStats> = clients
            .iter()
            .map(|client| {
                let orders: Vec<&Order> = self
                    .orders
                    .iter()
                    .filter(|o| o.client_id == client.id)
                    .collect();
                let count =
                    |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
                ClientStats {
                    client: client.clone(),
                    total_orders: orders.len(),
                    total_revenue: self.rule.total_revenue(orders.iter().copied()),
                    completed_orders: count(OrderStatus::Complete),
                    pending_orders: count(OrderStatus::Pending),
                    overdue_orders: count(OrderStatus::Overdue),
                }
            })
            .collect();
        stats.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        stats
    }
}
