use crate::entities::RecordsSnapshot;

use super::{client_model::ClientModel, expense_model::ExpenseModel, order_model::OrderModel};

/// The whole persisted document: `{ "clients": [..], "orders": [..],
/// "expenses": [..] }`. Missing collections read as empty.
#[derive(Debug, Default, serde_derive::Deserialize, serde_derive::Serialize)]
pub(crate) struct RecordsDocumentModel {
    #[serde(default)]
    pub clients: Vec<ClientModel>,
    #[serde(default)]
    pub orders: Vec<OrderModel>,
    #[serde(default)]
    pub expenses: Vec<ExpenseModel>,
}

impl From<RecordsDocumentModel> for RecordsSnapshot {
    fn from(model: RecordsDocumentModel) -> Self {
        RecordsSnapshot {
            clients: model.clients.into_iter().map(Into::into).collect(),
            orders: model.orders.into_iter().map(Into::into).collect(),
            expenses: model.expenses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&RecordsSnapshot> for RecordsDocumentModel {
    fn from(snapshot: &RecordsSnapshot) -> Self {
        RecordsDocumentModel {
            clients: snapshot.clients.iter().map(Into::into).collect(),
            orders: snapshot.orders.iter().map(Into::into).collect(),
            expenses: snapshot.expenses.iter().map(Into::into).collect(),
        }
    }
}
