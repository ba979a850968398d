use crate::domain::card::{CardInput, NormalizedCard, normalize};
use crate::domain::ports::ProfileStoreBox;
use crate::domain::profile::sync_from_profile;
use crate::error::{Result, ValidationError};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Settings for a [`CardEngine`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Expiry is judged against this date.
    pub reference_date: NaiveDate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
        }
    }
}

impl EngineConfig {
    /// Builds a config from a `YYYY-MM-DD` reference date.
    pub fn with_reference_date(date: &str) -> Result<Self> {
        Ok(Self {
            reference_date: NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?,
        })
    }
}

/// A created card and whatever validation failures it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOutcome {
    pub card: NormalizedCard,
    pub errors: Vec<ValidationError>,
}

impl CardOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The main entry point for turning raw card input into validated cards.
///
/// `CardEngine` owns the profile store used to fill in profile-backed cards.
/// Each call performs at most one store lookup.
pub struct CardEngine {
    profile_store: ProfileStoreBox,
    config: EngineConfig,
}

impl CardEngine {
    /// Creates a new `CardEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `profile_store` - The store holding cards saved against gateway profiles.
    /// * `config` - Engine settings, including the expiry reference date.
    pub fn new(profile_store: ProfileStoreBox, config: EngineConfig) -> Self {
        Self {
            profile_store,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalizes `input`, syncs it from a matching stored profile when it is
    /// profile-backed, then validates it.
    ///
    /// Validation failures are returned in the outcome; only store failures
    /// are errors.
    pub async fn create(&self, input: CardInput) -> Result<CardOutcome> {
        let card = normalize(&input);

        let matching = match card.profile_ids() {
            Some((customer, payment)) => {
                let found = self
                    .profile_store
                    .find_matching_profile(customer, payment)
                    .await?;
                debug!(found = found.is_some(), "profile lookup");
                found
            }
            None => None,
        };

        let card = sync_from_profile(card, |_, _| matching);
        let errors = match card.validate(self.config.reference_date) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.0,
        };

        debug!(
            last_digits = %card.last_digits,
            brand = ?card.brand,
            errors = errors.len(),
            "card created"
        );

        Ok(CardOutcome { card, errors })
    }
}
