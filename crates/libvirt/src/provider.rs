//! The libvirt platform provider.

use crate::image::ImageSource;
use clusterforge_asset::BoxedError;
use clusterforge_prompt::{validators, Answers, Question};
use clusterforge_types::{
    LibvirtMachinePool, LibvirtNetwork, LibvirtPlatform, Platform, PlatformKind, PlatformProvider,
};
use std::sync::Arc;
use tracing::debug;

/// Default libvirt connection URI.
pub const DEFAULT_URI: &str = "qemu+tcp://192.168.122.1/system";

/// Question for the libvirt connection URI.
#[must_use]
pub fn uri_question() -> Question {
    Question::new("libvirt-uri", "Libvirt Connection URI")
        .help("The libvirt connection URI to be used. This must be accessible from the running cluster.")
        .default_value(DEFAULT_URI)
        .validate(validators::all_of(vec![
            validators::required(),
            validators::has_scheme(),
        ]))
}

/// Question for the QCOW image URL; defaults to the channel lookup result.
#[must_use]
pub fn image_question(default_url: String) -> Question {
    Question::new("libvirt-image", "Image")
        .help("URL of the QCOW image machines boot from.")
        .default_value(default_url)
        .validate(validators::all_of(vec![
            validators::required(),
            validators::has_scheme(),
        ]))
}

/// Collects the libvirt platform configuration.
pub struct LibvirtProvider {
    image: Arc<dyn ImageSource>,
}

impl LibvirtProvider {
    /// Create a provider defaulting the boot image from `image`.
    #[must_use]
    pub fn new(image: Arc<dyn ImageSource>) -> Self {
        Self { image }
    }
}

impl PlatformProvider for LibvirtProvider {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Libvirt
    }

    fn collect(&self, answers: &Answers) -> Result<Platform, BoxedError> {
        let uri = answers.resolve(&uri_question())?;
        let image = answers.resolve(&image_question(self.image.qemu_image_url()?))?;
        debug!("collected libvirt platform at '{}'", uri);

        Ok(Platform::Libvirt(LibvirtPlatform {
            uri,
            network: LibvirtNetwork::default(),
            default_machine_platform: Some(LibvirtMachinePool { image }),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::StaticImage;
    use clusterforge_prompt::{Interactive, Overrides};
    use clusterforge_types::{DEFAULT_LIBVIRT_IF_NAME, DEFAULT_LIBVIRT_IP_RANGE};

    fn provider() -> LibvirtProvider {
        LibvirtProvider::new(Arc::new(StaticImage(
            "https://example.com/base.qcow2".to_string(),
        )))
    }

    #[test]
    fn empty_interactive_input_accepts_the_default_uri() {
        // Two empty lines: one for the URI, one for the image.
        let answers = Answers::new(vec![
            Box::new(Overrides::default()),
            Box::new(Interactive::new(&b"\n\n"[..], Vec::new())),
        ]);

        let Platform::Libvirt(libvirt) = provider().collect(&answers).unwrap() else {
            panic!("expected a libvirt platform");
        };
        assert_eq!(libvirt.uri, DEFAULT_URI);
        assert_eq!(libvirt.network.if_name, DEFAULT_LIBVIRT_IF_NAME);
        assert_eq!(libvirt.network.ip_range, DEFAULT_LIBVIRT_IP_RANGE);
        assert_eq!(
            libvirt.default_machine_platform.unwrap().image,
            "https://example.com/base.qcow2"
        );
    }

    #[test]
    fn scheme_less_uri_override_is_rejected() {
        let mut overrides = Overrides::default();
        overrides.set("libvirt-uri", "192.168.122.1/system");
        let answers = Answers::new(vec![Box::new(overrides)]);

        assert!(provider().collect(&answers).is_err());
    }
}
