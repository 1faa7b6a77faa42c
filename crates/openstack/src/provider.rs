//! The OpenStack platform provider.

use crate::clouds::CloudsSource;
use crate::networks::NetworkSource;
use clusterforge_asset::BoxedError;
use clusterforge_prompt::{validators, Answers, Question};
use clusterforge_types::{
    OpenstackPlatform, Platform, PlatformKind, PlatformProvider, DEFAULT_VPC_CIDR,
};
use std::sync::Arc;
use tracing::debug;

/// Default OpenStack region.
pub const DEFAULT_REGION: &str = "regionOne";

/// Default base image name.
pub const DEFAULT_BASE_IMAGE: &str = "rhcos";

/// Question for the installation region.
#[must_use]
pub fn region_question() -> Question {
    Question::new("openstack-region", "Region")
        .help("The OpenStack region to be used for installation.")
        .default_value(DEFAULT_REGION)
}

/// Question for the base image.
#[must_use]
pub fn image_question() -> Question {
    Question::new("openstack-image", "Image")
        .help("The OpenStack image to be used for installation.")
        .default_value(DEFAULT_BASE_IMAGE)
}

/// Question for the external network.
#[must_use]
pub fn external_network_question() -> Question {
    Question::new("openstack-external-network", "ExternalNetwork")
        .help("The OpenStack external network to be used for installation.")
}

/// Collects the OpenStack platform configuration.
///
/// The cloud name is validated against the operator's clouds.yaml through
/// the [`CloudsSource`] collaborator; when a [`NetworkSource`] is attached,
/// the external network is validated against the cloud's network list.
pub struct OpenstackProvider {
    clouds: Arc<dyn CloudsSource>,
    networks: Option<Arc<dyn NetworkSource>>,
}

impl OpenstackProvider {
    /// Create a provider validating cloud names against `clouds`.
    #[must_use]
    pub fn new(clouds: Arc<dyn CloudsSource>) -> Self {
        Self {
            clouds,
            networks: None,
        }
    }

    /// Validate the external network choice against `networks`.
    #[must_use]
    pub fn with_networks(mut self, networks: Arc<dyn NetworkSource>) -> Self {
        self.networks = Some(networks);
        self
    }

    fn cloud_question(&self) -> Result<Question, BoxedError> {
        let names = self.clouds.cloud_names()?;
        Ok(Question::new("openstack-cloud", "Cloud")
            .help("The OpenStack cloud name from clouds.yaml.")
            .validate(validators::all_of(vec![
                validators::required(),
                validators::one_of(names),
            ])))
    }

    fn network_question(&self, cloud: &str) -> Result<Question, BoxedError> {
        let mut question = external_network_question();
        if let Some(networks) = &self.networks {
            question = question.options(networks.external_networks(cloud)?);
        }
        Ok(question)
    }
}

impl PlatformProvider for OpenstackProvider {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Openstack
    }

    fn collect(&self, answers: &Answers) -> Result<Platform, BoxedError> {
        let region = answers.resolve(&region_question())?;
        let base_image = answers.resolve(&image_question())?;
        let cloud_name = answers.resolve(&self.cloud_question()?)?;
        let external_network = answers.resolve(&self.network_question(&cloud_name)?)?;
        debug!(
            "collected openstack platform for cloud '{}' in region '{}'",
            cloud_name, region
        );

        Ok(Platform::Openstack(OpenstackPlatform {
            region,
            base_image,
            cloud_name,
            external_network,
            network_cidr_block: DEFAULT_VPC_CIDR.to_string(),
            default_machine_platform: None,
        }))
    }
}
