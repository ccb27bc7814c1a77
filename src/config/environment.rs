//! Active environment used for contextual enablement.

use std::collections::BTreeSet;

use crate::config::schema::EnvironmentConfig;

/// The set of active profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    active_profiles: BTreeSet<String>,
}

impl Environment {
    pub fn new<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active_profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(config.active_profiles.iter().cloned())
    }

    pub fn is_active(&self, profile: &str) -> bool {
        self.active_profiles.contains(profile)
    }

    pub fn active_profiles(&self) -> impl Iterator<Item = &str> {
        self.active_profiles.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let env = Environment::from_config(&EnvironmentConfig {
            active_profiles: vec!["test".into(), "dev".into()],
        });
        assert!(env.is_active("dev"));
        assert!(!env.is_active("cloud"));
        assert_eq!(env.active_profiles().collect::<Vec<_>>(), vec!["dev", "test"]);
        assert!(!Environment::default().is_active("dev"));
    }
}
