use std::{fs, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::models::{amount_model::AmountModel, iso_datetime_model::IsoDateTimeModel},
    entities::{ExpenseCategory, ExpenseFields},
    errors::{InvalidCsv, InvalidCsvContent, ReadError},
};

/// Reads expense rows laid out as `title,amount,date,category,notes` (with a
/// header row).
pub(crate) trait ExpensesCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<ExpenseFields>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<ExpenseFields>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ExpensesCsvDatasourceImpl;

impl ExpensesCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ExpensesCsvDatasource for ExpensesCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<ExpenseFields>, ServerError> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(s.as_bytes())
            .records()
            .enumerate()
            .map(|(i, r)| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    // Extract from CSV record.
                    let raw_title = r.get(0).unwrap_or("");
                    let raw_amount = r.get(1).unwrap_or("");
                    let raw_date = r.get(2).unwrap_or("");
                    let raw_category = r.get(3).unwrap_or("other");
                    let raw_notes = match r.get(4) {
                        Some(s) if !s.is_empty() => Some(s),
                        _ => None,
                    };

                    // Parse.
                    let amount: AmountModel = AmountModel::from_str(raw_amount)?;
                    let date: IsoDateTimeModel = IsoDateTimeModel::from_str(raw_date)?;
                    let category: ExpenseCategory =
                        ExpenseCategory::from_str(raw_category).map_err(|_| {
                            InvalidCsvContent::new(&format!(
                                "unknown expense category '{}' on row {}",
                                raw_category,
                                i + 1
                            ))
                        })?;

                    // Build.
                    Ok(ExpenseFields {
                        title: raw_title.to_string(),
                        amount: amount.into(),
                        date: date.into(),
                        category,
                        notes: raw_notes.map(str::to_string),
                    })
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<ExpenseFields>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}
