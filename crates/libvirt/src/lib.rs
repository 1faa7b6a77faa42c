//! libvirt platform provider for clusterforge.
//!
//! Registers under [`PlatformKind::Libvirt`](clusterforge_types::PlatformKind)
//! and collects the connection URI (validated to carry a scheme) and the
//! QCOW boot image, defaulting from the [`ImageSource`] collaborator.

mod image;
mod provider;

pub use image::{ChannelImage, ImageSource, StaticImage, DEFAULT_IMAGE_URL};
pub use provider::{image_question, uri_question, LibvirtProvider, DEFAULT_URI};
