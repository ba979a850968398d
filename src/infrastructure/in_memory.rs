use crate::domain::ports::ProfileStore;
use crate::domain::profile::{MatchingProfile, StoredProfile};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type ProfileKey = (Option<String>, Option<String>);

/// A thread-safe in-memory store for cards saved against gateway profiles.
///
/// Uses `Arc<RwLock<HashMap<..>>>` keyed by the (customer, payment) profile
/// id pair, so lookups see a consistent snapshot.
#[derive(Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<ProfileKey, StoredProfile>>>,
}

impl InMemoryProfileStore {
    /// Creates a new, empty in-memory profile store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn store(&self, profile: StoredProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.key(), profile);
        Ok(())
    }

    async fn find_matching_profile(
        &self,
        customer_profile_id: Option<&str>,
        payment_profile_id: Option<&str>,
    ) -> Result<Option<MatchingProfile>> {
        let key = (
            customer_profile_id.map(str::to_string),
            payment_profile_id.map(str::to_string),
        );
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&key).cloned().map(MatchingProfile::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brand::Brand;

    fn profile(customer: Option<&str>, payment: Option<&str>) -> StoredProfile {
        StoredProfile {
            gateway_customer_profile_id: customer.map(str::to_string),
            gateway_payment_profile_id: payment.map(str::to_string),
            brand: Some(Brand::Discover),
            last_digits: "1117".to_string(),
            month: Some(3),
            year: Some(2029),
            name: Some("Katherine Johnson".to_string()),
        }
    }

    #[tokio::test]
    async fn test_find_matching_profile() {
        let store = InMemoryProfileStore::new();
        store
            .store(profile(Some("CUS-1"), Some("PP-1")))
            .await
            .unwrap();

        let found = store
            .find_matching_profile(Some("CUS-1"), Some("PP-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.last_digits, "1117");
        assert_eq!(found.brand, Some(Brand::Discover));
    }

    #[tokio::test]
    async fn test_both_ids_must_match() {
        let store = InMemoryProfileStore::new();
        store
            .store(profile(Some("CUS-1"), Some("PP-1")))
            .await
            .unwrap();

        assert!(
            store
                .find_matching_profile(Some("CUS-1"), None)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .find_matching_profile(Some("CUS-1"), Some("PP-2"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_payment_id_only_profile() {
        let store = InMemoryProfileStore::new();
        store.store(profile(None, Some("PP-9"))).await.unwrap();

        let found = store.find_matching_profile(None, Some("PP-9")).await.unwrap();
        assert!(found.is_some());
    }
}
