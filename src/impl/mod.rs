// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod expenses_csv_datasource;
        pub(crate) mod records_json_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod client_model;
        pub(crate) mod expense_model;
        pub(crate) mod iso_datetime_model;
        pub(crate) mod order_model;
        pub(crate) mod records_document_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod in_memory_record_store;
        pub(crate) mod json_file_record_store;
        mod snapshot_mutations;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod calendar_event;
        pub(crate) mod client;
        pub(crate) mod expense;
        pub(crate) mod filters;
        pub(crate) mod order;
        pub(crate) mod payment;
        pub(crate) mod records_snapshot;
        pub(crate) mod summaries;
    }
    pub(crate) mod logic {
        pub(crate) mod aggregation;
        pub(crate) mod calendar;
        pub(crate) mod filter;
        pub(crate) mod lookup;
        pub(crate) mod overdue;
        pub(crate) mod revenue;
        pub(crate) mod validation;
        mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod records_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod overdue_usecase;
        pub(crate) mod records_usecase;
        pub(crate) mod reports_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod report_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::calendar_event::*;
        pub use crate::domain::entities::client::*;
        pub use crate::domain::entities::expense::*;
        pub use crate::domain::entities::filters::*;
        pub use crate::domain::entities::order::*;
        pub use crate::domain::entities::payment::*;
        pub use crate::domain::entities::records_snapshot::*;
        pub use crate::domain::entities::summaries::*;
    }

    /// Pure functions over record snapshots. None of them fail or mutate
    /// their inputs.
    pub mod logic {
        pub use crate::domain::logic::aggregation::*;
        pub use crate::domain::logic::calendar::*;
        pub use crate::domain::logic::filter::*;
        pub use crate::domain::logic::lookup::*;
        pub use crate::domain::logic::overdue::*;
    }

    pub mod repositories {
        pub use crate::data::repositories::in_memory_record_store::InMemoryRecordStore;
        pub use crate::data::repositories::json_file_record_store::JsonFileRecordStore;
        pub use crate::domain::repositories::records_repository::RecordStore;
    }

    pub mod usecases {
        pub use crate::domain::usecases::overdue_usecase::OverdueUsecase;
        pub use crate::domain::usecases::records_usecase::RecordsUsecase;
        pub use crate::domain::usecases::reports_usecase::ReportsUsecase;
    }
}
