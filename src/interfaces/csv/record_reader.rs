use crate::error::{CardError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads typed records (card inputs, stored profiles, payments) from a CSV
/// source.
///
/// This reader wraps `csv::Reader`, trims whitespace and tolerates missing
/// trailing columns.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    /// Creates a new `RecordReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CardError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brand::Brand;
    use crate::domain::card::CardInput;
    use crate::domain::payment::{PaymentSnapshot, PaymentState};
    use crate::domain::profile::StoredProfile;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reads_card_inputs() {
        let data = "number, expiry, brand, name, verification_value\n\
                    4111 1111 1111 1111, 12/30, visa, Jo Doe, 123\n\
                    , , , ,";
        let reader = RecordReader::new(data.as_bytes());
        let results: Vec<Result<CardInput>> = reader.records().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.raw_number.as_deref(), Some("4111 1111 1111 1111"));
        assert_eq!(first.brand_hint.as_deref(), Some("visa"));
        assert!(!first.imported);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.raw_number, None);
    }

    #[test]
    fn test_reads_stored_profiles() {
        let data = "gateway_customer_profile_id, gateway_payment_profile_id, brand, last_digits, month, year, name\n\
                    CUS-1, PP-1, american_express, 0005, 7, 2030, Ada Lovelace\n\
                    , PP-2, , 1234, , ,";
        let reader = RecordReader::new(data.as_bytes());
        let profiles: Vec<StoredProfile> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(profiles[0].brand, Some(Brand::AmericanExpress));
        assert_eq!(profiles[0].year, Some(2030));
        assert_eq!(profiles[1].gateway_customer_profile_id, None);
        assert_eq!(profiles[1].brand, None);
    }

    #[test]
    fn test_reads_payments() {
        let data = "payment, state, order_payment_state, credit_allowed\nP1, completed, credit_owed, 12.50";
        let reader = RecordReader::new(data.as_bytes());
        let payments: Vec<PaymentSnapshot> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(payments[0].state, PaymentState::Completed);
        assert_eq!(payments[0].credit_allowed, dec!(12.50));
    }

    #[test]
    fn test_malformed_line() {
        let data = "payment, state, order_payment_state, credit_allowed\nP1, settled, paid, 1.0";
        let reader = RecordReader::new(data.as_bytes());
        let results: Vec<Result<PaymentSnapshot>> = reader.records().collect();

        assert!(results[0].is_err());
    }
}
