use crate::{
    config::RevenueRecognition,
    entities::{Order, PaymentStatus},
};

impl RevenueRecognition {
    /// Portion of the order's cost counted as earned income.
    pub fn recognized_revenue(&self, order: &Order) -> f64 {
        match order.payment_status {
            PaymentStatus::Paid => order.cost,
            PaymentStatus::Unpaid => 0.0,
            PaymentStatus::Partial => match self {
                RevenueRecognition::HalfOfCost => order.cost / 2.0,
                RevenueRecognition::AmountPaid => order
                    .amount_paid
                    .map(|paid| paid.min(order.cost).max(0.0))
                    .unwrap_or(order.cost / 2.0),
            },
        }
    }

    pub fn total_revenue<'a, I>(&self, orders: I) -> f64
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders
            .into_iter()
            .map(|order| self.recognized_revenue(order))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::entities::{ClientId, OrderId, OrderStatus};

    fn order(cost: f64, payment_status: PaymentStatus, amount_paid: Option<f64>) -> Order {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        Order {
            id: OrderId::from("o"),
            client_id: ClientId::from("c1"),
            title: "Logo".to_string(),
            description: String::new(),
            deadline: at,
            cost,
            status: OrderStatus::Pending,
            payment_status,
            created_at: at,
            amount_paid,
        }
    }

    #[test]
    fn unpaid_contributes_nothing_under_either_rule() {
        let o = order(900.0, PaymentStatus::Unpaid, Some(300.0));
        assert_eq!(RevenueRecognition::HalfOfCost.recognized_revenue(&o), 0.0);
        assert_eq!(RevenueRecognition::AmountPaid.recognized_revenue(&o), 0.0);
    }

    #[test]
    fn paid_contributes_exact_cost() {
        let o = order(1234.56, PaymentStatus::Paid, Some(100.0));
        assert_eq!(RevenueRecognition::HalfOfCost.recognized_revenue(&o), 1234.56);
        assert_eq!(RevenueRecognition::AmountPaid.recognized_revenue(&o), 1234.56);
    }

    #[test]
    fn partial_uses_half_of_cost_by_default() {
        let o = order(500.0, PaymentStatus::Partial, Some(400.0));
        assert_eq!(RevenueRecognition::HalfOfCost.recognized_revenue(&o), 250.0);
    }

    #[test]
    fn partial_uses_amount_paid_when_configured() {
        let tracked = order(500.0, PaymentStatus::Partial, Some(400.0));
        let untracked = order(500.0, PaymentStatus::Partial, None);
        assert_eq!(RevenueRecognition::AmountPaid.recognized_revenue(&tracked), 400.0);
        assert_eq!(RevenueRecognition::AmountPaid.recognized_revenue(&untracked), 250.0);
    }

    #[test]
    fn paid_plus_partial_scenario_totals_1250() {
        let orders = vec![
            order(1000.0, PaymentStatus::Paid, None),
            order(500.0, PaymentStatus::Partial, None),
        ];
        assert_eq!(RevenueRecognition::HalfOfCost.total_revenue(&orders), 1250.0);
    }

    #[test]
    fn summation_order_does_not_matter() {
        let mut orders = vec![
            order(0.1, PaymentStatus::Paid, None),
            order(0.2, PaymentStatus::Paid, None),
            order(0.3, PaymentStatus::Partial, None),
            order(1e6, PaymentStatus::Paid, None),
        ];
        let forward = RevenueRecognition::HalfOfCost.total_revenue(&orders);
        orders.reverse();
        let backward = RevenueRecognition::HalfOfCost.total_revenue(&orders);
        assert!((forward - backward).abs() < 1e-6);
    }
}
