pub mod filter;
pub mod raw_row;
pub mod record;
