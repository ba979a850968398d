pub mod card_writer;
pub mod record_reader;
