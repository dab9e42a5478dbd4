use iso_currency::Currency;

use crate::entities::{Dashboard, ExpenseReport, ProfitLossReport};

use super::utils::{format_amount, section_header};

const NOTES_WIDTH: usize = 60;

pub(crate) struct ReportPrinter {
    currency: Currency,
}

impl ReportPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    fn amount(&self, amount: f64) -> String {
        format_amount(amount, self.currency)
    }

    fn line(&self, out: &mut String, label: &str, amount: f64) {
        out.push_str(&format!("{:<40}{:>20}\n", label, self.amount(amount)));
    }

    pub(crate) fn print_dashboard(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();

        out.push_str(&section_header("Summary"));
        self.line(&mut out, "Total revenue", dashboard.total_revenue);
        self.line(&mut out, "Total expenses", dashboard.total_expenses);
        self.line(&mut out, "Net profit", dashboard.net_profit);
        out.push_str(&format!("{:<40}{:>20}\n", "Clients", dashboard.client_count));
        out.push_str(&format!("{:<40}{:>20}\n", "Orders", dashboard.order_count));
        out.push('\n');

        out.push_str(&section_header("Monthly activity"));
        for bucket in &dashboard.monthly_activity {
            out.push_str(&format!(
                "{:<12}{:>16}{:>16}{:>16}\n",
                bucket.label(),
                self.amount(bucket.revenue),
                self.amount(bucket.expenses),
                self.amount(bucket.profit()),
            ));
        }
        out.push('\n');

        out.push_str(&section_header("Top clients"));
        for (rank, client) in dashboard.top_clients.iter().enumerate() {
            out.push_str(&format!(
                "{}. {:<37}{:>20}\n",
                rank + 1,
                client.client_name,
                self.amount(client.revenue)
            ));
        }
        out.push('\n');

        out.push_str(&section_header("Order status"));
        for status in &dashboard.status_breakdown {
            out.push_str(&format!("{:<40}{:>20}\n", status.status.as_str(), status.count));
        }
        out.push('\n');

        out.push_str(&section_header("Overdue"));
        for overdue in &dashboard.overdue_orders {
            out.push_str(&format!(
                "{}  {} ({}), due {}\n",
                overdue.order.id,
                overdue.order.title,
                overdue.client_name,
                overdue.order.deadline.format("%Y-%m-%d"),
            ));
        }
        let hidden = dashboard
            .overdue_count
            .saturating_sub(dashboard.overdue_orders.len());
        if hidden > 0 {
            out.push_str(&format!("... and {} more\n", hidden));
        }

        out
    }

    pub(crate) fn print_profit_loss(&self, report: &ProfitLossReport) -> String {
        let mut out = String::new();

        out.push_str(&section_header(&format!(
            "Profit & loss {} to {}",
            report.from.format("%Y-%m-%d"),
            report.to.format("%Y-%m-%d")
        )));
        self.line(&mut out, "Revenue", report.total_revenue);
        self.line(&mut out, "Expenses", report.total_expenses);
        self.line(&mut out, "Net profit", report.net_profit);
        out.push('\n');

        out.push_str(&section_header("By month"));
        for bucket in &report.monthly {
            out.push_str(&format!(
                "{:<12}{:>16}{:>16}{:>16}\n",
                bucket.label(),
                self.amount(bucket.revenue),
                self.amount(bucket.expenses),
                self.amount(bucket.profit()),
            ));
        }

        out
    }

    pub(crate) fn print_expense_report(&self, report: &ExpenseReport) -> String {
        let mut out = String::new();

        out.push_str(&section_header("Expenses"));
        for expense in &report.expenses {
            out.push_str(&format!(
                "{}  {:<34}{:>16}\n",
                expense.date.format("%Y-%m-%d"),
                expense.title,
                self.amount(expense.amount)
            ));
            if let Some(notes) = &expense.notes {
                for line in textwrap::wrap(notes, NOTES_WIDTH) {
                    out.push_str(&format!("    ; {}\n", line));
                }
            }
        }
        out.push('\n');

        out.push_str(&section_header("By category"));
        for (category, total) in &report.by_category {
            self.line(&mut out, category.label(), *total);
        }
        self.line(&mut out, "Total", report.total);

        out
    }
}
