pub mod poster_extractor;
pub mod record_extractor;
