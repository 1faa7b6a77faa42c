//! Prompt-backed pure assets: cluster identity and pull secret.

use crate::context::InstallContext;
use clusterforge_asset::{Asset, BoxedError, Parents};
use clusterforge_prompt::{validators, Question};
use std::sync::Arc;

fn cluster_name_question() -> Question {
    Question::new("cluster-name", "Cluster Name")
        .help("The name of the cluster. This will be used when generating sub-domains.")
        .validate(validators::all_of(vec![
            validators::required(),
            Arc::new(|value: &str| {
                let valid = value
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                    && !value.starts_with('-')
                    && !value.ends_with('-');
                if valid {
                    Ok(())
                } else {
                    Err("must be a lowercase DNS label".to_string())
                }
            }),
        ]))
}

fn base_domain_question() -> Question {
    Question::new("base-domain", "Base Domain")
        .help("The base domain of the cluster. All DNS records will be sub-domains of this base.")
}

fn pull_secret_question() -> Question {
    Question::new("pull-secret", "Pull Secret")
        .help("The container registry pull secret, as a JSON document.")
        .validate(Arc::new(|value: &str| {
            match serde_json::from_str::<serde_json::Value>(value) {
                Ok(serde_json::Value::Object(_)) => Ok(()),
                Ok(_) => Err("must be a JSON object".to_string()),
                Err(err) => Err(format!("not valid JSON: {err}")),
            }
        }))
}

/// The chosen cluster name. Pure computation node, no persisted form.
#[derive(Debug, Default)]
pub struct ClusterName {
    name: String,
}

impl ClusterName {
    /// The resolved name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Asset<InstallContext> for ClusterName {
    fn name(&self) -> &'static str {
        "Cluster Name"
    }

    fn generate(
        &mut self,
        ctx: &InstallContext,
        _parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        self.name = ctx.answers.resolve(&cluster_name_question())?;
        Ok(())
    }
}

/// The chosen DNS base domain. Pure computation node.
#[derive(Debug, Default)]
pub struct BaseDomain {
    domain: String,
}

impl BaseDomain {
    /// The resolved base domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Asset<InstallContext> for BaseDomain {
    fn name(&self) -> &'static str {
        "Base Domain"
    }

    fn generate(
        &mut self,
        ctx: &InstallContext,
        _parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        self.domain = ctx.answers.resolve(&base_domain_question())?;
        Ok(())
    }
}

/// The registry pull secret. Pure computation node.
#[derive(Debug, Default)]
pub struct PullSecret {
    secret: String,
}

impl PullSecret {
    /// The resolved pull secret JSON.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Asset<InstallContext> for PullSecret {
    fn name(&self) -> &'static str {
        "Pull Secret"
    }

    fn generate(
        &mut self,
        ctx: &InstallContext,
        _parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        self.secret = ctx.answers.resolve(&pull_secret_question())?;
        Ok(())
    }
}
