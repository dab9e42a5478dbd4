use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file.");

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidJson, "Invalid {document} (invalid JSON format).", { document: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDateTime, "Invalid ISO date-time: {date}.", { date: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(InvalidAmount, "Invalid amount: '{value}'.", { value: &str });

// Validation-related.
define_client_error!(
    InvalidField,
    "Invalid {field}: {details}.",
    { field: &str, details: &str }
);
define_client_error!(
    InvalidStatusTransition,
    "Order status cannot change from '{from}' to '{to}'.",
    { from: &str, to: &str }
);
define_client_error!(
    InvalidPaymentAmount,
    "Invalid payment amount {amount}; expected more than 0 and at most {remaining}.",
    { amount: f64, remaining: f64 }
);
define_client_error!(
    OrderAlreadyPaid,
    "Order '{id}' has no remaining balance.",
    { id: &str }
);

// Record store.
define_client_error!(
    RecordNotFound,
    "{kind} '{id}' not found.",
    { kind: &str, id: &str }
);
define_internal_error!(
    StoreUnavailable,
    "Record store rejected the operation: {details}.",
    { details: &str }
);
