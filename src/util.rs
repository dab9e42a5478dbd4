use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use crate::{
    config::BooksConfig,
    data::repositories::{
        in_memory_record_store::InMemoryRecordStore, json_file_record_store::JsonFileRecordStore,
    },
    domain::{
        repositories::records_repository::RecordStore,
        usecases::{
            overdue_usecase::{OverdueUsecase, OverdueUsecaseImpl},
            records_usecase::{RecordsUsecase, RecordsUsecaseImpl},
            reports_usecase::{ReportsUsecase, ReportsUsecaseImpl},
        },
    },
    entities::ExpenseFilter,
    presentation::report_printer::ReportPrinter,
};

/// Entry point wiring the usecases to one injected record store.
pub struct FreelanceLedgerUtil<S: RecordStore> {
    store: Arc<S>,
    records_usecase: RecordsUsecaseImpl<S>,
    overdue_usecase: OverdueUsecaseImpl<S>,
    reports_usecase: ReportsUsecaseImpl<S>,
    printer: ReportPrinter,
}

impl<S: RecordStore> FreelanceLedgerUtil<S> {
    pub fn new(store: S, config: BooksConfig) -> Result<Self, ServerError> {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Like `new`, for stores the caller keeps using directly.
    pub fn with_shared_store(store: Arc<S>, config: BooksConfig) -> Result<Self, ServerError> {
        let currency = config.currency()?;
        Ok(Self {
            records_usecase: RecordsUsecaseImpl::new(store.clone(), config.clone()),
            overdue_usecase: OverdueUsecaseImpl::new(store.clone()),
            reports_usecase: ReportsUsecaseImpl::new(store.clone(), config),
            printer: ReportPrinter::new(currency),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &dyn RecordsUsecase {
        &self.records_usecase
    }

    pub fn overdue(&self) -> &dyn OverdueUsecase {
        &self.overdue_usecase
    }

    pub fn reports(&self) -> &dyn ReportsUsecase {
        &self.reports_usecase
    }

    pub async fn print_dashboard(&self, now: DateTime<Utc>) -> Result<String, ServerError> {
        let dashboard = self.reports_usecase.dashboard(now).await?;
        Ok(self.printer.print_dashboard(&dashboard))
    }

    pub async fn print_profit_loss(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<String, ServerError> {
        let report = self.reports_usecase.profit_loss(from, to).await?;
        Ok(self.printer.print_profit_loss(&report))
    }

    pub async fn print_expense_report(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<String, ServerError> {
        let report = self.reports_usecase.expense_report(filter).await?;
        Ok(self.printer.print_expense_report(&report))
    }
}

impl FreelanceLedgerUtil<InMemoryRecordStore> {
    pub fn in_memory(config: BooksConfig) -> Result<Self, ServerError> {
        Self::new(InMemoryRecordStore::new(), config)
    }
}

impl FreelanceLedgerUtil<JsonFileRecordStore> {
    /// Opens (or starts) the JSON records document at `path`.
    pub async fn open_json<P: AsRef<Path>>(
        path: P,
        config: BooksConfig,
    ) -> Result<Self, ServerError> {
        Self::new(JsonFileRecordStore::open(path).await?, config)
    }
}
