use std::sync::Arc;

use folio_models::profile::Profile;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ProfileFeatureService: Send + Sync + 'static {
    /// Return the display content of the portfolio page.
    fn get_profile(&self) -> Arc<Profile>;
}

#[cfg(feature = "mock")]
impl MockProfileFeatureService {
    pub fn with_get_profile(mut self, profile: Profile) -> Self {
        self.expect_get_profile()
            .once()
            .return_once(move || profile.into());
        self
    }
}
