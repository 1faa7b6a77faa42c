//! `CLUSTERFORGE_*` environment overrides.
//!
//! Environment variables are read once at startup into the explicit override
//! layer; nothing below the CLI touches process state.

use clusterforge_prompt::Overrides;

/// Every question id the shipped assets may ask.
pub const QUESTION_IDS: &[&str] = &[
    "cluster-name",
    "base-domain",
    "pull-secret",
    "platform",
    "aws-region",
    "aws-user-tags",
    "openstack-region",
    "openstack-image",
    "openstack-cloud",
    "openstack-external-network",
    "libvirt-uri",
    "libvirt-image",
];

/// The environment variable carrying the override for a question id.
#[must_use]
pub fn env_var_for(id: &str) -> String {
    format!("CLUSTERFORGE_{}", id.to_uppercase().replace('-', "_"))
}

/// Collect overrides from the process environment.
#[must_use]
pub fn from_env() -> Overrides {
    collect(|name| std::env::var(name).ok())
}

fn collect(lookup: impl Fn(&str) -> Option<String>) -> Overrides {
    let mut overrides = Overrides::default();
    for id in QUESTION_IDS {
        if let Some(value) = lookup(&env_var_for(id)) {
            overrides.set(*id, value);
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterforge_prompt::{Question, ValueProvider};
    use std::collections::HashMap;

    #[test]
    fn question_ids_map_to_screaming_snake_variables() {
        assert_eq!(env_var_for("cluster-name"), "CLUSTERFORGE_CLUSTER_NAME");
        assert_eq!(env_var_for("platform"), "CLUSTERFORGE_PLATFORM");
    }

    #[test]
    fn collect_picks_up_known_variables_only() {
        let env = HashMap::from([
            ("CLUSTERFORGE_BASE_DOMAIN".to_string(), "example.com".to_string()),
            ("CLUSTERFORGE_UNRELATED".to_string(), "x".to_string()),
        ]);
        let overrides = collect(|name| env.get(name).cloned());

        let answered = overrides
            .provide(&Question::new("base-domain", "Base Domain"))
            .unwrap();
        assert_eq!(answered.as_deref(), Some("example.com"));
        let unrelated = overrides
            .provide(&Question::new("unrelated", "Unrelated"))
            .unwrap();
        assert_eq!(unrelated, None);
    }
}
