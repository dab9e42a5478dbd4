use std::str::FromStr;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(pub String);

impl std::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        ExpenseId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Tools,
    Communication,
    Utilities,
    Supplies,
    Travel,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub title: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<ExpenseCategory>,
    pub notes: Option<Option<String>>,
}

// --

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Tools,
        ExpenseCategory::Communication,
        ExpenseCategory::Utilities,
        ExpenseCategory::Supplies,
        ExpenseCategory::Travel,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Tools => "tools",
            ExpenseCategory::Communication => "communication",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Other => "other",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Tools => "Tools & Software",
            ExpenseCategory::Communication => "Communication",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

impl Expense {
    pub fn new(id: ExpenseId, fields: ExpenseFields) -> Self {
        Self {
            id,
            title: fields.title,
            amount: fields.amount,
            date: fields.date,
            category: fields.category,
            notes: fields.notes,
        }
    }

    pub fn to_fields(&self) -> ExpenseFields {
        ExpenseFields {
            title: self.title.clone(),
            amount: self.amount,
            date: self.date,
            category: self.category,
            notes: self.notes.clone(),
        }
    }
}

impl ExpensePatch {
    pub fn apply(&self, expense: &mut Expense) {
        if let Some(title) = &self.title {
            expense.title = title.clone();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(notes) = &self.notes {
            expense.notes = notes.clone();
        }
    }
}
