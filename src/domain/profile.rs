use super::brand::Brand;
use super::card::{CardRepresentation, NormalizedCard, last_digits};
use serde::{Deserialize, Serialize};

/// Display and classification metadata of a card already stored against a
/// gateway profile.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct MatchingProfile {
    pub brand: Option<Brand>,
    pub last_digits: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub name: Option<String>,
}

/// A stored card keyed by its gateway profile identifiers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct StoredProfile {
    pub gateway_customer_profile_id: Option<String>,
    pub gateway_payment_profile_id: Option<String>,
    pub brand: Option<Brand>,
    pub last_digits: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub name: Option<String>,
}

impl StoredProfile {
    pub fn key(&self) -> (Option<String>, Option<String>) {
        (
            self.gateway_customer_profile_id.clone(),
            self.gateway_payment_profile_id.clone(),
        )
    }
}

impl From<StoredProfile> for MatchingProfile {
    fn from(stored: StoredProfile) -> Self {
        Self {
            brand: stored.brand,
            last_digits: stored.last_digits,
            month: stored.month,
            year: stored.year,
            name: stored.name,
        }
    }
}

impl NormalizedCard {
    /// The gateway profile identifiers, when the card is profile-backed.
    pub fn profile_ids(&self) -> Option<(Option<&str>, Option<&str>)> {
        match &self.representation {
            CardRepresentation::ProfileBacked {
                customer_profile_id,
                payment_profile_id,
            } => Some((customer_profile_id.as_deref(), payment_profile_id.as_deref())),
            _ => None,
        }
    }
}

/// Fills a profile-backed card from a previously stored card sharing its
/// gateway profile identifiers.
///
/// `lookup` receives the customer and payment profile ids and is invoked at
/// most once, and only when at least one of them is set. When it returns a
/// record, brand, last digits, month, name and year are taken from it.
pub fn sync_from_profile<F>(card: NormalizedCard, lookup: F) -> NormalizedCard
where
    F: FnOnce(Option<&str>, Option<&str>) -> Option<MatchingProfile>,
{
    let card = NormalizedCard {
        last_digits: last_digits(&card.number),
        ..card
    };

    let matching = match card.profile_ids() {
        Some((customer, payment)) => lookup(customer, payment),
        None => None,
    };

    match matching {
        Some(profile) => NormalizedCard {
            brand: profile.brand,
            last_digits: profile.last_digits,
            month: profile.month,
            name: profile.name,
            year: profile.year,
            ..card
        },
        None => card,
    }
}
