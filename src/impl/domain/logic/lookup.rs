use std::collections::HashMap;

use crate::entities::{Client, ClientId, Order};

/// Display name for orders whose client no longer exists.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Resolves order→client references against a snapshot of the client
/// collection. Never fails: dangling references resolve to
/// [`UNKNOWN_CLIENT`].
pub struct ClientLookup<'a> {
    by_id: HashMap<&'a ClientId, &'a Client>,
}

impl<'a> ClientLookup<'a> {
    pub fn new(clients: &'a [Client]) -> Self {
        Self {
            by_id: clients.iter().map(|c| (&c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: &ClientId) -> Option<&'a Client> {
        self.by_id.get(id).copied()
    }

    pub fn name_of(&self, id: &ClientId) -> &'a str {
        self.get(id).map_or(UNKNOWN_CLIENT, |c| c.name.as_str())
    }

    /// `client_id → name` for every client referenced by `orders`.
    pub fn names_for(&self, orders: &[Order]) -> HashMap<ClientId, String> {
        orders
            .iter()
            .map(|o| (o.client_id.clone(), self.name_of(&o.client_id).to_string()))
            .collect()
    }
}

pub fn find_client<'a>(clients: &'a [Client], id: &ClientId) -> Option<&'a Client> {
    clients.iter().find(|c| &c.id == id)
}

pub fn client_names(clients: &[Client], orders: &[Order]) -> HashMap<ClientId, String> {
    ClientLookup::new(clients).names_for(orders)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::entities::{OrderId, OrderStatus, PaymentStatus};

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: ClientId::from(id),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "(555) 123-4567".to_string(),
            preferred_payment_method: "PayPal".to_string(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    fn order_for(client_id: &str) -> Order {
        let at = Utc.with_ymd_and_hms(2023, 5, 5, 8, 30, 0).unwrap();
        Order {
            id: OrderId::from(format!("o-{client_id}").as_str()),
            client_id: ClientId::from(client_id),
            title: "Website Redesign".to_string(),
            description: String::new(),
            deadline: at,
            cost: 3500.0,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: at,
            amount_paid: None,
        }
    }

    #[test]
    fn finds_existing_client() {
        let clients = vec![client("1", "Alex Johnson"), client("2", "Sarah Williams")];
        assert_eq!(
            find_client(&clients, &ClientId::from("2")).map(|c| c.name.as_str()),
            Some("Sarah Williams")
        );
        assert!(find_client(&clients, &ClientId::from("9")).is_none());
    }

    #[test]
    fn dangling_reference_maps_to_placeholder() {
        let clients = vec![client("1", "Alex Johnson")];
        let orders = vec![order_for("1"), order_for("gone")];
        let names = client_names(&clients, &orders);
        assert_eq!(names[&ClientId::from("1")], "Alex Johnson");
        assert_eq!(names[&ClientId::from("gone")], UNKNOWN_CLIENT);
    }

    #[test]
    fn lookup_over_empty_snapshot() {
        let lookup = ClientLookup::new(&[]);
        assert_eq!(lookup.name_of(&ClientId::from("1")), UNKNOWN_CLIENT);
        assert!(lookup.get(&ClientId::from("1")).is_none());
    }
}
