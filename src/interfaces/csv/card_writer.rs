use crate::application::engine::CardOutcome;
use crate::domain::brand::Brand;
use crate::domain::payment::{PaymentSnapshot, can_capture, can_credit, can_void};
use crate::error::{Result, join_errors};
use serde::Serialize;
use std::io::Write;

/// Display-safe projection of a created card. Never carries the full number
/// or the verification value.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CardRow {
    pub last_digits: String,
    pub brand: Option<Brand>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub display_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: &'static str,
    pub errors: String,
}

impl From<&CardOutcome> for CardRow {
    fn from(outcome: &CardOutcome) -> Self {
        let card = &outcome.card;
        Self {
            last_digits: card.last_digits.clone(),
            brand: card.brand,
            month: card.month,
            year: card.year,
            display_number: card.display_number(),
            first_name: card.first_name(),
            last_name: card.last_name(),
            status: if outcome.is_valid() { "valid" } else { "invalid" },
            errors: join_errors(&outcome.errors),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CapabilityRow {
    pub payment: String,
    pub can_capture: bool,
    pub can_void: bool,
    pub can_credit: bool,
}

impl From<&PaymentSnapshot> for CapabilityRow {
    fn from(payment: &PaymentSnapshot) -> Self {
        Self {
            payment: payment.payment.clone(),
            can_capture: can_capture(payment),
            can_void: can_void(payment),
            can_credit: can_credit(payment),
        }
    }
}

/// Writes card and capability rows as CSV.
pub struct CardWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CardWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_cards<'a>(
        &mut self,
        outcomes: impl IntoIterator<Item = &'a CardOutcome>,
    ) -> Result<()> {
        for outcome in outcomes {
            self.writer.serialize(CardRow::from(outcome))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_capabilities<'a>(
        &mut self,
        payments: impl IntoIterator<Item = &'a PaymentSnapshot>,
    ) -> Result<()> {
        for payment in payments {
            self.writer.serialize(CapabilityRow::from(payment))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes card rows as a pretty-printed JSON array.
pub fn write_cards_json<'a, W: Write>(
    sink: W,
    outcomes: impl IntoIterator<Item = &'a CardOutcome>,
) -> Result<()> {
    let rows: Vec<CardRow> = outcomes.into_iter().map(CardRow::from).collect();
    serde_json::to_writer_pretty(sink, &rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{CardInput, normalize};
    use crate::domain::payment::{OrderPaymentState, PaymentState};
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    fn outcome(errors: Vec<ValidationError>) -> CardOutcome {
        CardOutcome {
            card: normalize(&CardInput {
                raw_number: Some("4242424242424242".to_string()),
                raw_expiry: Some("09/31".to_string()),
                name: Some("Mary Jackson".to_string()),
                verification_value: Some("321".to_string()),
                ..Default::default()
            }),
            errors,
        }
    }

    #[test]
    fn test_write_cards_masks_number() {
        let mut buffer = Vec::new();
        CardWriter::new(&mut buffer)
            .write_cards(&[outcome(Vec::new())])
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with(
            "last_digits,brand,month,year,display_number,first_name,last_name,status,errors\n"
        ));
        assert!(output.contains("4242,visa,9,2031,XXXX-XXXX-XXXX-4242,Mary,Jackson,valid,\n"));
        assert!(!output.contains("4242424242424242"));
        assert!(!output.contains("321"));
    }

    #[test]
    fn test_write_cards_lists_errors() {
        let mut buffer = Vec::new();
        CardWriter::new(&mut buffer)
            .write_cards(&[outcome(vec![ValidationError::CardExpired])])
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains(",invalid,card has expired\n"));
    }

    #[test]
    fn test_write_capabilities() {
        let payment = PaymentSnapshot {
            payment: "P1".to_string(),
            state: PaymentState::Pending,
            order_payment_state: OrderPaymentState::BalanceDue,
            credit_allowed: dec!(0),
        };
        let mut buffer = Vec::new();
        CardWriter::new(&mut buffer)
            .write_capabilities(&[payment])
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output,
            "payment,can_capture,can_void,can_credit\nP1,true,true,false\n"
        );
    }

    #[test]
    fn test_write_cards_json() {
        let mut buffer = Vec::new();
        write_cards_json(&mut buffer, &[outcome(Vec::new())]).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(rows[0]["brand"], "visa");
        assert_eq!(rows[0]["display_number"], "XXXX-XXXX-XXXX-4242");
        assert_eq!(rows[0]["status"], "valid");
    }
}
