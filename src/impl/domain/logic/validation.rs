use std::sync::LazyLock;

use fractic_server_error::ServerError;
use regex::Regex;

use crate::{
    entities::{ClientFields, ExpenseFields, Order, OrderFields, PaymentStatus},
    errors::InvalidField,
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded regex should be valid")
});

fn require(condition: bool, field: &str, details: &str) -> Result<(), ServerError> {
    if condition {
        Ok(())
    } else {
        Err(InvalidField::new(field, details))
    }
}

fn positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub(crate) fn validate_client(fields: &ClientFields) -> Result<(), ServerError> {
    require(
        fields.name.trim().chars().count() >= 2,
        "name",
        "must be at least 2 characters",
    )?;
    require(
        EMAIL_PATTERN.is_match(fields.email.trim()),
        "email",
        "must be a valid email address",
    )?;
    require(
        fields.phone.trim().chars().count() >= 5,
        "phone",
        "must be at least 5 characters",
    )?;
    require(
        !fields.preferred_payment_method.trim().is_empty(),
        "preferred payment method",
        "must not be empty",
    )
}

fn check_order(
    client_id: &str,
    title: &str,
    cost: f64,
    payment_status: PaymentStatus,
    amount_paid: Option<f64>,
) -> Result<(), ServerError> {
    require(!client_id.trim().is_empty(), "client", "an order needs a client")?;
    require(!title.trim().is_empty(), "title", "must not be empty")?;
    require(positive_amount(cost), "cost", "must be greater than 0")?;
    if let Some(paid) = amount_paid {
        require(
            paid.is_finite() && paid >= 0.0 && paid <= cost,
            "amount paid",
            "must be between 0 and the order cost",
        )?;
        match payment_status {
            PaymentStatus::Unpaid => {
                require(paid == 0.0, "amount paid", "must be 0 for an unpaid order")?
            }
            PaymentStatus::Paid => require(
                paid == cost,
                "amount paid",
                "must equal the order cost for a paid order",
            )?,
            PaymentStatus::Partial => {}
        }
    }
    Ok(())
}

pub(crate) fn validate_order_fields(fields: &OrderFields) -> Result<(), ServerError> {
    check_order(
        &fields.client_id.0,
        &fields.title,
        fields.cost,
        fields.payment_status,
        fields.amount_paid,
    )
}

pub(crate) fn validate_order(order: &Order) -> Result<(), ServerError> {
    check_order(
        &order.client_id.0,
        &order.title,
        order.cost,
        order.payment_status,
        order.amount_paid,
    )
}

pub(crate) fn validate_expense(fields: &ExpenseFields) -> Result<(), ServerError> {
    require(!fields.title.trim().is_empty(), "title", "must not be empty")?;
    require(
        positive_amount(fields.amount),
        "amount",
        "must be greater than 0",
    )
}
