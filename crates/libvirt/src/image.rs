//! QEMU image lookup collaborator.

use clusterforge_asset::BoxedError;

/// URL of the default QCOW image channel.
pub const DEFAULT_IMAGE_URL: &str =
    "https://releases.example.com/qemu/latest/cluster-base-qemu.qcow2";

/// Resolves the QCOW image machines boot from.
///
/// Stands in for the release-channel lookup; implementations own their own
/// network and retry policy.
pub trait ImageSource {
    /// URL of the image to boot from.
    fn qemu_image_url(&self) -> Result<String, BoxedError>;
}

/// [`ImageSource`] returning the default release channel image.
#[derive(Debug, Default)]
pub struct ChannelImage;

impl ImageSource for ChannelImage {
    fn qemu_image_url(&self) -> Result<String, BoxedError> {
        Ok(DEFAULT_IMAGE_URL.to_string())
    }
}

/// Fixed image URL, for tests.
#[derive(Debug, Clone)]
pub struct StaticImage(pub String);

impl ImageSource for StaticImage {
    fn qemu_image_url(&self) -> Result<String, BoxedError> {
        Ok(self.0.clone())
    }
}
