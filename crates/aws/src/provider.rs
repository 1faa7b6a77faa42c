//! The AWS platform provider.

use crate::regions::{region_ids, DEFAULT_REGION};
use clusterforge_asset::BoxedError;
use clusterforge_prompt::{Answers, Question};
use clusterforge_types::{AwsPlatform, Platform, PlatformKind, PlatformProvider, DEFAULT_VPC_CIDR};
use std::collections::BTreeMap;
use tracing::debug;

/// Question for the installation region.
#[must_use]
pub fn region_question() -> Question {
    Question::new("aws-region", "Region")
        .help("The AWS region to be used for installation.")
        .default_value(DEFAULT_REGION)
        .options(region_ids())
}

/// Question for additional resource tags, a JSON object.
#[must_use]
pub fn user_tags_question() -> Question {
    Question::new("aws-user-tags", "User Tags")
        .help("Additional tags applied to every created resource, as a JSON object.")
        .default_value("{}")
        .validate(std::sync::Arc::new(|value| {
            serde_json::from_str::<BTreeMap<String, String>>(value)
                .map(|_| ())
                .map_err(|err| format!("not a JSON string map: {err}"))
        }))
}

/// Collects the AWS platform configuration.
#[derive(Debug, Default)]
pub struct AwsProvider;

impl PlatformProvider for AwsProvider {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Aws
    }

    fn collect(&self, answers: &Answers) -> Result<Platform, BoxedError> {
        let region = answers.resolve(&region_question())?;
        let user_tags: BTreeMap<String, String> =
            serde_json::from_str(&answers.resolve(&user_tags_question())?)?;
        debug!("collected aws platform for region '{}'", region);

        Ok(Platform::Aws(AwsPlatform {
            region,
            user_tags,
            vpc_cidr_block: DEFAULT_VPC_CIDR.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterforge_prompt::{Overrides, PromptError, ValueProvider};

    /// Interactive stand-in that fails the test if it is ever consulted.
    struct NeverAsk;

    impl ValueProvider for NeverAsk {
        fn provide(
            &self,
            question: &Question,
        ) -> Result<Option<String>, PromptError> {
            panic!("interactive prompt invoked for '{}'", question.id);
        }
    }

    #[test]
    fn override_region_is_used_without_prompting() {
        let mut overrides = Overrides::default();
        overrides.set("aws-region", "us-east-1");
        overrides.set("aws-user-tags", r#"{"team":"infra"}"#);
        let answers = Answers::new(vec![Box::new(overrides), Box::new(NeverAsk)]);

        let platform = AwsProvider.collect(&answers).unwrap();
        let Platform::Aws(aws) = platform else {
            panic!("expected an aws platform");
        };
        assert_eq!(aws.region, "us-east-1");
        assert_eq!(aws.user_tags.get("team").map(String::as_str), Some("infra"));
        assert_eq!(aws.vpc_cidr_block, DEFAULT_VPC_CIDR);
    }

    #[test]
    fn invalid_region_override_fails_collection() {
        let mut overrides = Overrides::default();
        overrides.set("aws-region", "mars-north-1");
        let answers = Answers::new(vec![Box::new(overrides)]);

        let err = AwsProvider.collect(&answers).unwrap_err();
        assert!(err.to_string().contains("mars-north-1"));
    }

    #[test]
    fn malformed_user_tags_override_fails_collection() {
        let mut overrides = Overrides::default();
        overrides.set("aws-region", "us-east-1");
        overrides.set("aws-user-tags", "not json");
        let answers = Answers::new(vec![Box::new(overrides)]);

        assert!(AwsProvider.collect(&answers).is_err());
    }
}
