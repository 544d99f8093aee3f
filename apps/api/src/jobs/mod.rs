// Job records: CRUD and CSV export.

pub mod csv_export;
pub mod handlers;
pub mod store;
