// Candidate records: CRUD, CSV import/export and CV summarization.

pub mod csv_io;
pub mod cv;
pub mod handlers;
pub mod store;
