use std::{collections::BTreeMap, collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    config::BooksConfig,
    domain::{
        logic::{
            aggregation::Aggregator,
            calendar::{deadline_events, event_days_in_month, events_on},
            filter::{
                filter_expenses, filter_orders, sort_expenses_newest_first,
                sort_orders_newest_first,
            },
            lookup::ClientLookup,
            overdue::overdue_orders,
        },
        repositories::records_repository::RecordStore,
    },
    entities::{
        CalendarEvent, Client, ClientRevenue, ClientStats, Dashboard, ExpenseCategory,
        ExpenseFilter, ExpenseReport, MonthlyBucket, Order, OrderFilter, OverdueOrder,
        ProfitLossReport, RecordsSnapshot, StatusCount,
    },
};

const OVERDUE_PREVIEW_LIMIT: usize = 5;

/// Read-only views over a fresh snapshot of the store. Every revenue figure
/// uses the configured `RevenueRecognition` rule.
#[async_trait]
pub trait ReportsUsecase: Send + Sync {
    async fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard, ServerError>;
    async fn profit_loss(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ProfitLossReport, ServerError>;
    /// Twelve zero-filled buckets, January first.
    async fn monthly_series_for_year(&self, year: i32) -> Result<Vec<MonthlyBucket>, ServerError>;
    async fn top_clients(&self) -> Result<Vec<ClientRevenue>, ServerError>;
    async fn status_breakdown(&self) -> Result<Vec<StatusCount>, ServerError>;
    async fn expenses_by_category(&self) -> Result<BTreeMap<ExpenseCategory, f64>, ServerError>;
    async fn client_report(&self) -> Result<Vec<ClientStats>, ServerError>;
    /// Matching orders, newest first.
    async fn order_report(&self, filter: &OrderFilter) -> Result<Vec<Order>, ServerError>;
    async fn expense_report(&self, filter: &ExpenseFilter) -> Result<ExpenseReport, ServerError>;
    /// Orders overdue at `now` by deadline, regardless of persisted status.
    async fn overdue_orders(&self, now: DateTime<Utc>) -> Result<Vec<OverdueOrder>, ServerError>;
    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ServerError>;
    async fn events_on(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, ServerError>;
    async fn event_days_in_month(
        &self,
        any_day: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, ServerError>;
}

pub(crate) struct ReportsUsecaseImpl<S: RecordStore> {
    store: Arc<S>,
    config: BooksConfig,
}

impl<S: RecordStore> ReportsUsecaseImpl<S> {
    async fn snapshot(&self) -> Result<RecordsSnapshot, ServerError> {
        let (clients, orders, expenses) = futures::try_join!(
            self.store.list_clients(),
            self.store.list_orders(),
            self.store.list_expenses(),
        )?;
        Ok(RecordsSnapshot {
            clients,
            orders,
            expenses,
        })
    }

    fn aggregator<'a>(&self, snapshot: &'a RecordsSnapshot) -> Aggregator<'a> {
        Aggregator::new(
            &snapshot.orders,
            &snapshot.expenses,
            self.config.revenue_recognition,
        )
    }
}

fn with_client_names(orders: Vec<Order>, clients: &[Client]) -> Vec<OverdueOrder> {
    let lookup = ClientLookup::new(clients);
    orders
        .into_iter()
        .map(|order| OverdueOrder {
            client_name: lookup.name_of(&order.client_id).to_string(),
            order,
        })
        .collect()
}

#[async_trait]
impl<S: RecordStore> ReportsUsecase for ReportsUsecaseImpl<S> {
    async fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard, ServerError> {
        let snapshot = self.snapshot().await?;
        let aggregator = self.aggregator(&snapshot);
        let overdue = overdue_orders(&snapshot.orders, now);
        let overdue_count = overdue.len();
        let total_revenue = aggregator.total_revenue();
        let total_expenses = aggregator.total_expenses();
        debug!(
            clients = snapshot.clients.len(),
            orders = snapshot.orders.len(),
            overdue_count,
            "dashboard computed"
        );
        Ok(Dashboard {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            client_count: snapshot.clients.len(),
            order_count: snapshot.orders.len(),
            monthly_activity: aggregator.monthly_activity(),
            top_clients: aggregator.top_clients(&snapshot.clients),
            status_breakdown: aggregator.status_breakdown(),
            overdue_orders: with_client_names(
                overdue.into_iter().take(OVERDUE_PREVIEW_LIMIT).collect(),
                &snapshot.clients,
            ),
            overdue_count,
        })
    }

    async fn profit_loss(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ProfitLossReport, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).profit_loss(from, to))
    }

    async fn monthly_series_for_year(&self, year: i32) -> Result<Vec<MonthlyBucket>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).monthly_series_for_year(year))
    }

    async fn top_clients(&self) -> Result<Vec<ClientRevenue>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).top_clients(&snapshot.clients))
    }

    async fn status_breakdown(&self) -> Result<Vec<StatusCount>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).status_breakdown())
    }

    async fn expenses_by_category(&self) -> Result<BTreeMap<ExpenseCategory, f64>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).expenses_by_category())
    }

    async fn client_report(&self) -> Result<Vec<ClientStats>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(self.aggregator(&snapshot).client_stats(&snapshot.clients))
    }

    async fn order_report(&self, filter: &OrderFilter) -> Result<Vec<Order>, ServerError> {
        let mut orders = filter_orders(&self.store.list_orders().await?, filter);
        sort_orders_newest_first(&mut orders);
        Ok(orders)
    }

    async fn expense_report(&self, filter: &ExpenseFilter) -> Result<ExpenseReport, ServerError> {
        let mut expenses = filter_expenses(&self.store.list_expenses().await?, filter);
        sort_expenses_newest_first(&mut expenses);
        let aggregator = Aggregator::new(&[], &expenses, self.config.revenue_recognition);
        Ok(ExpenseReport {
            total: aggregator.total_expenses(),
            by_category: aggregator.expenses_by_category(),
            expenses,
        })
    }

    async fn overdue_orders(&self, now: DateTime<Utc>) -> Result<Vec<OverdueOrder>, ServerError> {
        let snapshot = self.snapshot().await?;
        Ok(with_client_names(
            overdue_orders(&snapshot.orders, now),
            &snapshot.clients,
        ))
    }

    async fn calendar_events(&self) -> Result<Vec<CalendarEvent>, ServerError> {
        Ok(deadline_events(&self.store.list_orders().await?))
    }

    async fn events_on(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, ServerError> {
        Ok(events_on(&self.calendar_events().await?, day))
    }

    async fn event_days_in_month(
        &self,
        any_day: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, ServerError> {
        Ok(event_days_in_month(&self.calendar_events().await?, any_day))
    }
}

impl<S: RecordStore> ReportsUsecaseImpl<S> {
    pub(crate) fn new(store: Arc<S>, config: BooksConfig) -> Self {
        ReportsUsecaseImpl { store, config }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::RevenueRecognition,
        data::repositories::in_memory_record_store::InMemoryRecordStore,
        entities::{ClientId, Expense, ExpenseId, OrderId, OrderStatus, PaymentStatus},
        logic::UNKNOWN_CLIENT,
    };

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: ClientId::from(id),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "555-0100".to_string(),
            preferred_payment_method: "PayPal".to_string(),
            notes: None,
            created_at: at(2023, 1, 1),
        }
    }

    fn order(
        id: &str,
        client_id: &str,
        cost: f64,
        payment_status: PaymentStatus,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Order {
        Order {
            id: OrderId::from(id),
            client_id: ClientId::from(client_id),
            title: format!("Order {id}"),
            description: String::new(),
            deadline: created_at + Duration::days(14),
            cost,
            status,
            payment_status,
            created_at,
            amount_paid: None,
        }
    }

    fn expense(id: &str, category: ExpenseCategory, amount: f64, date: DateTime<Utc>) -> Expense {
        Expense {
            id: ExpenseId::from(id),
            title: format!("Expense {id}"),
            amount,
            date,
            category,
            notes: None,
        }
    }

    fn reports(config: BooksConfig) -> ReportsUsecaseImpl<InMemoryRecordStore> {
        let snapshot = RecordsSnapshot {
            clients: vec![client("c1", "Alex Johnson"), client("c2", "Sam Lee")],
            orders: vec![
                order(
                    "o1",
                    "c1",
                    1000.0,
                    PaymentStatus::Paid,
                    OrderStatus::Complete,
                    at(2023, 1, 10),
                ),
                order(
                    "o2",
                    "c1",
                    500.0,
                    PaymentStatus::Partial,
                    OrderStatus::Pending,
                    at(2023, 3, 5),
                ),
                order(
                    "o3",
                    "c2",
                    300.0,
                    PaymentStatus::Unpaid,
                    OrderStatus::Pending,
                    at(2023, 3, 20),
                ),
                order(
                    "o4",
                    "gone",
                    200.0,
                    PaymentStatus::Paid,
                    OrderStatus::Overdue,
                    at(2023, 4, 1),
                ),
            ],
            expenses: vec![
                expense("e1", ExpenseCategory::Tools, 50.0, at(2023, 1, 15)),
                expense("e2", ExpenseCategory::Tools, 25.0, at(2023, 3, 1)),
                expense("e3", ExpenseCategory::Travel, 10.0, at(2023, 3, 2)),
            ],
        };
        ReportsUsecaseImpl::new(
            Arc::new(InMemoryRecordStore::with_snapshot(snapshot)),
            config,
        )
    }

    #[tokio::test]
    async fn dashboard_agrees_with_profit_loss() {
        let reports = reports(BooksConfig::default());
        let now = at(2023, 5, 1);
        let dashboard = reports.dashboard(now).await.unwrap();
        let profit_loss = reports.profit_loss(at(2023, 1, 1), now).await.unwrap();

        assert_eq!(dashboard.total_revenue, 1000.0 + 250.0 + 200.0);
        assert_eq!(dashboard.total_expenses, 85.0);
        assert_eq!(dashboard.net_profit, 1450.0 - 85.0);
        assert_eq!(profit_loss.total_revenue, dashboard.total_revenue);
        assert_eq!(profit_loss.net_profit, dashboard.net_profit);
        assert_eq!(profit_loss.monthly.len(), 5);

        assert_eq!(dashboard.client_count, 2);
        assert_eq!(dashboard.order_count, 4);
        assert_eq!(
            dashboard
                .monthly_activity
                .iter()
                .map(|b| b.month)
                .collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
        assert_eq!(
            dashboard
                .top_clients
                .iter()
                .map(|c| (c.client_name.as_str(), c.revenue))
                .collect::<Vec<_>>(),
            vec![("Alex Johnson", 1250.0), (UNKNOWN_CLIENT, 200.0)]
        );
        assert_eq!(
            dashboard
                .status_breakdown
                .iter()
                .map(|s| s.count)
                .collect::<Vec<_>>(),
            vec![2, 1, 1]
        );
        // o2 and o3 are pending past their deadline, o4 is persisted overdue.
        assert_eq!(dashboard.overdue_count, 3);
        assert_eq!(dashboard.overdue_orders[2].client_name, UNKNOWN_CLIENT);
    }

    #[tokio::test]
    async fn amount_paid_rule_applies_everywhere() {
        let config = BooksConfig {
            revenue_recognition: RevenueRecognition::AmountPaid,
            ..Default::default()
        };
        let reports = reports(config);
        let top = reports.top_clients().await.unwrap();
        let dashboard = reports.dashboard(at(2023, 5, 1)).await.unwrap();
        // o2 has no recorded amount, so it falls back to half of its cost.
        assert_eq!(top[0].revenue, 1250.0);
        assert_eq!(dashboard.total_revenue, 1450.0);
    }

    #[tokio::test]
    async fn year_series_is_zero_filled() {
        let series = reports(BooksConfig::default())
            .monthly_series_for_year(2023)
            .await
            .unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series[1].revenue, 0.0);
        assert_eq!(series[2].revenue, 250.0);
        assert_eq!(series[2].expenses, 35.0);
    }

    #[tokio::test]
    async fn expense_report_sorts_and_totals() {
        let report = reports(BooksConfig::default())
            .expense_report(&ExpenseFilter::default())
            .await
            .unwrap();
        assert_eq!(
            report
                .expenses
                .iter()
                .map(|e| e.id.0.as_str())
                .collect::<Vec<_>>(),
            vec!["e3", "e2", "e1"]
        );
        assert_eq!(report.total, 85.0);
        assert_eq!(
            report.by_category,
            BTreeMap::from([(ExpenseCategory::Tools, 75.0), (ExpenseCategory::Travel, 10.0)])
        );
    }

    #[tokio::test]
    async fn order_report_filters_newest_first() {
        let orders = reports(BooksConfig::default())
            .order_report(&OrderFilter {
                client_id: Some(ClientId::from("c1")),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            orders.iter().map(|o| o.id.0.as_str()).collect::<Vec<_>>(),
            vec!["o2", "o1"]
        );
    }

    #[tokio::test]
    async fn client_report_ranks_by_revenue() {
        let stats = reports(BooksConfig::default()).client_report().await.unwrap();
        assert_eq!(stats[0].client.name, "Alex Johnson");
        assert_eq!(stats[0].total_orders, 2);
        assert_eq!(stats[0].completed_orders, 1);
        assert_eq!(stats[0].pending_orders, 1);
        assert_eq!(stats[1].total_revenue, 0.0);
    }

    #[tokio::test]
    async fn calendar_marks_deadline_days() {
        let reports = reports(BooksConfig::default());
        let days = reports
            .event_days_in_month(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(
            days.into_iter().collect::<Vec<_>>(),
            vec![NaiveDate::from_ymd_opt(2023, 1, 24).unwrap()]
        );
        let events = reports
            .events_on(NaiveDate::from_ymd_opt(2023, 1, 24).unwrap())
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].order_id, Some(OrderId::from("o1")));
    }
}
