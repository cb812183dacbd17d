pub mod csv_writer;
pub mod preferences_store;
