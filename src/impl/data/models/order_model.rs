use crate::entities::{ClientId, Order, OrderId, OrderStatus, PaymentStatus};

use super::{amount_model::AmountModel, iso_datetime_model::IsoDateTimeModel};

#[derive(Debug, Clone, Copy, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OrderStatusModel {
    Pending,
    Complete,
    Overdue,
}

#[derive(Debug, Clone, Copy, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PaymentStatusModel {
    Paid,
    Unpaid,
    Partial,
}

/// Order row as persisted; accepts `clientId`/`client_id`,
/// `paymentStatus`/`payment_status` and friends.
#[derive(Debug, Clone, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderModel {
    pub id: String,
    #[serde(alias = "client_id")]
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: IsoDateTimeModel,
    pub cost: AmountModel,
    pub status: OrderStatusModel,
    #[serde(alias = "payment_status")]
    pub payment_status: PaymentStatusModel,
    #[serde(alias = "created_at")]
    pub created_at: IsoDateTimeModel,
    #[serde(alias = "amount_paid", default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<AmountModel>,
}

impl From<OrderStatusModel> for OrderStatus {
    fn from(model: OrderStatusModel) -> Self {
        match model {
            OrderStatusModel::Pending => OrderStatus::Pending,
            OrderStatusModel::Complete => OrderStatus::Complete,
            OrderStatusModel::Overdue => OrderStatus::Overdue,
        }
    }
}

impl From<OrderStatus> for OrderStatusModel {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderStatusModel::Pending,
            OrderStatus::Complete => OrderStatusModel::Complete,
            OrderStatus::Overdue => OrderStatusModel::Overdue,
        }
    }
}

impl From<PaymentStatusModel> for PaymentStatus {
    fn from(model: PaymentStatusModel) -> Self {
        match model {
            PaymentStatusModel::Paid => PaymentStatus::Paid,
            PaymentStatusModel::Unpaid => PaymentStatus::Unpaid,
            PaymentStatusModel::Partial => PaymentStatus::Partial,
        }
    }
}

impl From<PaymentStatus> for PaymentStatusModel {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => PaymentStatusModel::Paid,
            PaymentStatus::Unpaid => PaymentStatusModel::Unpaid,
            PaymentStatus::Partial => PaymentStatusModel::Partial,
        }
    }
}

impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Order {
            id: OrderId(model.id),
            client_id: ClientId(model.client_id),
            title: model.title,
            description: model.description,
            deadline: model.deadline.into(),
            cost: model.cost.into(),
            status: model.status.into(),
            payment_status: model.payment_status.into(),
            created_at: model.created_at.into(),
            amount_paid: model.amount_paid.map(Into::into),
        }
    }
}

impl From<&Order> for OrderModel {
    fn from(order: &Order) -> Self {
        OrderModel {
            id: order.id.0.clone(),
            client_id: order.client_id.0.clone(),
            title: order.title.clone(),
            description: order.description.clone(),
            deadline: IsoDateTimeModel(order.deadline),
            cost: AmountModel(order.cost),
            status: order.status.into(),
            payment_status: order.payment_status.into(),
            created_at: IsoDateTimeModel(order.created_at),
            amount_paid: order.amount_paid.map(AmountModel),
        }
    }
}
