use crate::error::ConfigurationError;
use crate::reasoner::{ForwardChainer, Profile, Reasoner, ReasonerConfig};

/// A reasoner implementation available by name.
#[derive(Debug)]
pub struct ReasonerEntry {
    name: &'static str,
    description: &'static str,
    profiles: &'static [&'static str],
    default_profile: &'static str,
    factory: fn(&str, ReasonerConfig) -> Option<Box<dyn Reasoner>>,
}

impl ReasonerEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The names of the profiles supported by this reasoner.
    pub fn profiles(&self) -> &'static [&'static str] {
        self.profiles
    }

    pub fn default_profile(&self) -> &'static str {
        self.default_profile
    }

    /// Builds the reasoner with the given profile, or the default one if `None`.
    pub fn instantiate(
        &self,
        profile: Option<&str>,
        config: ReasonerConfig,
    ) -> Result<Box<dyn Reasoner>, ConfigurationError> {
        let profile = profile.unwrap_or(self.default_profile);
        (self.factory)(profile, config).ok_or_else(|| ConfigurationError::UnknownProfile {
            reasoner: self.name,
            profile: profile.into(),
            available: self.profiles,
        })
    }
}

static REASONERS: [ReasonerEntry; 1] = [ReasonerEntry {
    name: "rules",
    description: "Built-in forward chainer over a subset of the OWL 2 RL/RDF rules",
    profiles: &["owl-rl", "rdfs", "trans"],
    default_profile: "owl-rl",
    factory: forward_chainer,
}];

fn forward_chainer(profile: &str, config: ReasonerConfig) -> Option<Box<dyn Reasoner>> {
    let profile = Profile::from_name(profile)?;
    Some(Box::new(ForwardChainer::new(profile, config)))
}

/// All the registered reasoners.
pub fn reasoners() -> &'static [ReasonerEntry] {
    &REASONERS
}

pub fn reasoner_names() -> impl Iterator<Item = &'static str> {
    REASONERS.iter().map(ReasonerEntry::name)
}

/// Finds a registered reasoner by name.
pub fn lookup(name: &str) -> Result<&'static ReasonerEntry, ConfigurationError> {
    REASONERS
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| ConfigurationError::UnknownReasoner(name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_profiles_are_instantiable() -> Result<(), ConfigurationError> {
        for entry in reasoners() {
            assert!(entry.profiles().contains(&entry.default_profile()));
            for profile in entry.profiles() {
                let reasoner = entry.instantiate(Some(profile), ReasonerConfig::default())?;
                assert_eq!(reasoner.profile(), *profile);
            }
        }
        Ok(())
    }

    #[test]
    fn rules_profiles_match_the_engine() {
        let Ok(entry) = lookup("rules") else {
            panic!("the rules reasoner is not registered")
        };
        let names: Vec<_> = Profile::ALL.into_iter().map(Profile::name).collect();
        assert_eq!(entry.profiles(), names.as_slice());
    }

    #[test]
    fn unknown_names() {
        assert!(matches!(
            lookup("jena"),
            Err(ConfigurationError::UnknownReasoner(_))
        ));
        let Ok(entry) = lookup("rules") else {
            panic!("the rules reasoner is not registered")
        };
        assert!(matches!(
            entry.instantiate(Some("owl-fb"), ReasonerConfig::default()),
            Err(ConfigurationError::UnknownProfile { .. })
        ));
        assert_eq!(reasoner_names().collect::<Vec<_>>(), ["rules"]);
    }
}
