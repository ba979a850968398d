use cardkit::application::engine::EngineConfig;
use cardkit::domain::brand::Brand;
use cardkit::domain::profile::StoredProfile;
use chrono::NaiveDate;

pub fn reference_config() -> EngineConfig {
    EngineConfig {
        reference_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

pub fn stored_profile(customer: &str, payment: &str, last_digits: &str) -> StoredProfile {
    StoredProfile {
        gateway_customer_profile_id: Some(customer.to_string()),
        gateway_payment_profile_id: Some(payment.to_string()),
        brand: Some(Brand::Jcb),
        last_digits: last_digits.to_string(),
        month: Some(2),
        year: Some(2030),
        name: Some("Dorothy Vaughan".to_string()),
    }
}
