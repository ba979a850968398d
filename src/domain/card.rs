use super::brand::{Brand, resolve_brand_hint};
use super::expiry::{parse_expiry, validate_expiry};
use crate::error::{Field, ValidationError, ValidationErrors};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

const MASK_GROUP: &str = "XXXX";
const DISPLAY_DELIMITER: char = '-';

/// Loosely formatted card data as supplied by a caller for one payment attempt.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct CardInput {
    #[serde(rename = "number", default)]
    pub raw_number: Option<String>,
    #[serde(rename = "expiry", default)]
    pub raw_expiry: Option<String>,
    #[serde(rename = "brand", default)]
    pub brand_hint: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub verification_value: Option<String>,
    #[serde(
        rename = "encrypted_data",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub encrypted_data_present: bool,
    #[serde(default)]
    pub gateway_customer_profile_id: Option<String>,
    #[serde(default)]
    pub gateway_payment_profile_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub imported: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).map(str::to_ascii_lowercase) {
        None => Ok(false),
        Some(flag) => match flag.as_str() {
            "" | "false" | "0" | "no" => Ok(false),
            "true" | "1" | "yes" => Ok(true),
            other => Err(serde::de::Error::custom(format!("invalid flag: {other}"))),
        },
    }
}

/// Where the card data came from. Presence rules are keyed on this.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardRepresentation {
    /// Raw card data entered locally.
    #[default]
    Raw,
    /// Encrypted card data is present; the number is not expected locally.
    Tokenized,
    /// A reference to a card profile stored at the payment gateway.
    ProfileBacked {
        customer_profile_id: Option<String>,
        payment_profile_id: Option<String>,
    },
}

impl CardRepresentation {
    fn from_input(input: &CardInput) -> Self {
        let customer_profile_id = non_blank(input.gateway_customer_profile_id.as_deref());
        let payment_profile_id = non_blank(input.gateway_payment_profile_id.as_deref());

        if customer_profile_id.is_some() || payment_profile_id.is_some() {
            CardRepresentation::ProfileBacked {
                customer_profile_id,
                payment_profile_id,
            }
        } else if input.encrypted_data_present {
            CardRepresentation::Tokenized
        } else {
            CardRepresentation::Raw
        }
    }

    /// True only for raw cards, whose number, expiry and holder must be supplied.
    pub fn requires_card_numbers(&self) -> bool {
        matches!(self, CardRepresentation::Raw)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Card attributes after sanitization and classification.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct NormalizedCard {
    /// Digits only; empty when the card is only a profile reference.
    pub number: String,
    pub last_digits: String,
    pub brand: Option<Brand>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub name: Option<String>,
    #[serde(skip)]
    pub verification_value: Option<String>,
    pub representation: CardRepresentation,
    pub imported: bool,
}

/// The flat record handed to a gateway adapter.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct GatewayCard {
    pub number: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub verification_value: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Strips every non-digit character.
pub fn sanitize_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// The last four digits, or the whole number when it is shorter.
pub fn last_digits(number: &str) -> String {
    let count = number.chars().count();
    number.chars().skip(count.saturating_sub(4)).collect()
}

/// Builds a [`NormalizedCard`] from raw input. Never fails; bad input is
/// caught by [`NormalizedCard::validate`].
pub fn normalize(input: &CardInput) -> NormalizedCard {
    let number = sanitize_number(input.raw_number.as_deref().unwrap_or_default());
    let expiry = parse_expiry(input.raw_expiry.as_deref().unwrap_or_default());
    let brand = resolve_brand_hint(input.brand_hint.as_deref().unwrap_or_default(), &number);

    NormalizedCard {
        last_digits: last_digits(&number),
        number,
        brand,
        month: expiry.month,
        year: expiry.year,
        name: non_blank(input.name.as_deref()),
        verification_value: non_blank(input.verification_value.as_deref()),
        representation: CardRepresentation::from_input(input),
        imported: input.imported,
    }
}

impl NormalizedCard {
    pub fn verification_value_present(&self) -> bool {
        self.verification_value.is_some()
    }

    /// Masked number for display, e.g. `XXXX-XXXX-XXXX-4242`.
    pub fn display_number(&self) -> String {
        let mut display = String::new();
        for _ in 0..3 {
            display.push_str(MASK_GROUP);
            display.push(DISPLAY_DELIMITER);
        }
        display.push_str(&self.last_digits);
        display
    }

    pub fn first_name(&self) -> Option<String> {
        self.split_name().0
    }

    pub fn last_name(&self) -> Option<String> {
        self.split_name().1
    }

    fn split_name(&self) -> (Option<String>, Option<String>) {
        let Some(name) = self.name.as_deref().map(str::trim) else {
            return (None, None);
        };
        match name.find(char::is_whitespace) {
            Some(idx) => (
                Some(name[..idx].to_string()),
                Some(name[idx..].trim_start().to_string()),
            ),
            None => (Some(name.to_string()), None),
        }
    }

    pub fn to_gateway_card(&self) -> GatewayCard {
        GatewayCard {
            number: self.number.clone(),
            month: self.month,
            year: self.year,
            verification_value: self.verification_value.clone(),
            first_name: self.first_name(),
            last_name: self.last_name(),
        }
    }

    /// Runs presence and expiry checks, collecting every failure.
    pub fn validate(&self, reference: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.representation.requires_card_numbers() {
            if self.month.is_none() {
                errors.push(ValidationError::MissingRequiredField(Field::Month));
            }
            if self.year.is_none() {
                errors.push(ValidationError::MissingRequiredField(Field::Year));
            }
            if self.name.is_none() {
                errors.push(ValidationError::MissingRequiredField(Field::Name));
            }
            if !self.imported {
                if self.number.is_empty() {
                    errors.push(ValidationError::MissingRequiredField(Field::Number));
                }
                if !self.verification_value_present() {
                    errors.push(ValidationError::MissingRequiredField(
                        Field::VerificationValue,
                    ));
                }
            }
        }

        if let Err(e) = validate_expiry(self.month, self.year, reference) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

impl From<&NormalizedCard> for CardInput {
    fn from(card: &NormalizedCard) -> Self {
        let (customer, payment) = match &card.representation {
            CardRepresentation::ProfileBacked {
                customer_profile_id,
                payment_profile_id,
            } => (customer_profile_id.clone(), payment_profile_id.clone()),
            _ => (None, None),
        };
        CardInput {
            raw_number: Some(card.number.clone()),
            raw_expiry: match (card.month, card.year) {
                (Some(month), Some(year)) => Some(format!("{month:02}/{year}")),
                _ => None,
            },
            // "maestro" as a hint means master, so maestro cards are
            // classified from their number again.
            brand_hint: card
                .brand
                .filter(|b| *b != Brand::Maestro)
                .map(|b| b.to_string()),
            name: card.name.clone(),
            verification_value: card.verification_value.clone(),
            encrypted_data_present: card.representation == CardRepresentation::Tokenized,
            gateway_customer_profile_id: customer,
            gateway_payment_profile_id: payment,
            imported: card.imported,
        }
    }
}
