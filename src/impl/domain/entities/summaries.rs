use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::{
    client::{Client, ClientId},
    expense::{Expense, ExpenseCategory},
    order::{Order, OrderStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub year: i32,
    /// 1-based.
    pub month: u32,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientRevenue {
    pub client_id: ClientId,
    pub client_name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfitLossReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub monthly: Vec<MonthlyBucket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientStats {
    pub client: Client,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub completed_orders: usize,
    pub pending_orders: usize,
    pub overdue_orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseReport {
    /// Newest first.
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub by_category: BTreeMap<ExpenseCategory, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverdueOrder {
    pub order: Order,
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub client_count: usize,
    pub order_count: usize,
    pub monthly_activity: Vec<MonthlyBucket>,
    pub top_clients: Vec<ClientRevenue>,
    pub status_breakdown: Vec<StatusCount>,
    /// At most the first five; see `overdue_count` for the full total.
    pub overdue_orders: Vec<OverdueOrder>,
    pub overdue_count: usize,
}

// --

impl MonthlyBucket {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            revenue: 0.0,
            expenses: 0.0,
        }
    }

    pub fn profit(&self) -> f64 {
        self.revenue - self.expenses
    }

    /// Short label such as "May 2023".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}
