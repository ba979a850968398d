use super::profile::{MatchingProfile, StoredProfile};
use crate::error::Result;
use async_trait::async_trait;

/// Storage for cards previously saved against gateway profiles.
///
/// Implementations must return a consistent snapshot per lookup.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn store(&self, profile: StoredProfile) -> Result<()>;
    async fn find_matching_profile(
        &self,
        customer_profile_id: Option<&str>,
        payment_profile_id: Option<&str>,
    ) -> Result<Option<MatchingProfile>>;
}

pub type ProfileStoreBox = Box<dyn ProfileStore>;
pub type ProfileStoreFactory = Box<dyn Fn() -> ProfileStoreBox + Send + Sync>;
