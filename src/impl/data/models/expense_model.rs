use crate::entities::{Expense, ExpenseCategory, ExpenseId};

use super::{amount_model::AmountModel, iso_datetime_model::IsoDateTimeModel};

#[derive(Debug, Clone, Copy, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExpenseCategoryModel {
    Tools,
    Communication,
    Utilities,
    Supplies,
    Travel,
    Other,
}

#[derive(Debug, Clone, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpenseModel {
    pub id: String,
    pub title: String,
    pub amount: AmountModel,
    pub date: IsoDateTimeModel,
    pub category: ExpenseCategoryModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<ExpenseCategoryModel> for ExpenseCategory {
    fn from(model: ExpenseCategoryModel) -> Self {
        match model {
            ExpenseCategoryModel::Tools => ExpenseCategory::Tools,
            ExpenseCategoryModel::Communication => ExpenseCategory::Communication,
            ExpenseCategoryModel::Utilities => ExpenseCategory::Utilities,
            ExpenseCategoryModel::Supplies => ExpenseCategory::Supplies,
            ExpenseCategoryModel::Travel => ExpenseCategory::Travel,
            ExpenseCategoryModel::Other => ExpenseCategory::Other,
        }
    }
}

impl From<ExpenseCategory> for ExpenseCategoryModel {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Tools => ExpenseCategoryModel::Tools,
            ExpenseCategory::Communication => ExpenseCategoryModel::Communication,
            ExpenseCategory::Utilities => ExpenseCategoryModel::Utilities,
            ExpenseCategory::Supplies => ExpenseCategoryModel::Supplies,
            ExpenseCategory::Travel => ExpenseCategoryModel::Travel,
            ExpenseCategory::Other => ExpenseCategoryModel::Other,
        }
    }
}

impl From<ExpenseModel> for Expense {
    fn from(model: ExpenseModel) -> Self {
        Expense {
            id: ExpenseId(model.id),
            title: model.title,
            amount: model.amount.into(),
            date: model.date.into(),
            category: model.category.into(),
            notes: model.notes.filter(|n| !n.is_empty()),
        }
    }
}

impl From<&Expense> for ExpenseModel {
    fn from(expense: &Expense) -> Self {
        ExpenseModel {
            id: expense.id.0.clone(),
            title: expense.title.clone(),
            amount: AmountModel(expense.amount),
            date: IsoDateTimeModel(expense.date),
            category: expense.category.into(),
            notes: expense.notes.clone(),
        }
    }
}
