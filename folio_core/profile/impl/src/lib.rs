use std::sync::Arc;

use folio_core_profile_contracts::ProfileFeatureService;
use folio_models::profile::Profile;

#[derive(Debug, Clone)]
pub struct ProfileFeatureServiceImpl {
    config: ProfileFeatureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileFeatureConfig {
    pub profile: Arc<Profile>,
}

impl ProfileFeatureServiceImpl {
    pub fn new(config: ProfileFeatureConfig) -> Self {
        Self { config }
    }
}

impl ProfileFeatureService for ProfileFeatureServiceImpl {
    fn get_profile(&self) -> Arc<Profile> {
        Arc::clone(&self.config.profile)
    }
}

#[cfg(test)]
mod tests {
    use folio_models::profile::{Skill, SkillCategory};

    use super::*;

    #[test]
    fn get_profile() {
        // Arrange
        let profile = Profile {
            name: "Jane Doe".into(),
            title: "Developer".into(),
            skills: vec![Skill {
                name: "Rust".into(),
                category: SkillCategory::Backend,
            }],
            ..Default::default()
        };

        let sut = ProfileFeatureServiceImpl::new(ProfileFeatureConfig {
            profile: profile.clone().into(),
        });

        // Act
        let result = sut.get_profile();

        // Assert
        assert_eq!(*result, profile);
        assert!(Arc::ptr_eq(&result, &sut.get_profile()));
    }
}
