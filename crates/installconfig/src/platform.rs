//! The platform selection asset.

use crate::context::InstallContext;
use clusterforge_asset::{Asset, BoxedError, Parents};
use clusterforge_prompt::Question;
use clusterforge_types::{Platform, PlatformKind};
use tracing::debug;

fn platform_question(options: Vec<String>) -> Question {
    Question::new("platform", "Platform")
        .help("The platform on which the cluster will run.")
        .options(options)
}

/// Asks which platform to install on and delegates configuration collection
/// to the registered provider for that kind.
///
/// Pure computation node: the selection is persisted only as part of the
/// install config.
#[derive(Debug, Default)]
pub struct PlatformSelection {
    platform: Option<Platform>,
}

impl PlatformSelection {
    /// The collected platform configuration.
    #[must_use]
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    /// The collected platform configuration, or an error when the asset has
    /// not generated.
    pub fn try_platform(&self) -> Result<&Platform, BoxedError> {
        self.platform
            .as_ref()
            .ok_or_else(|| "platform selection has not been resolved".into())
    }
}

impl Asset<InstallContext> for PlatformSelection {
    fn name(&self) -> &'static str {
        "Platform"
    }

    fn generate(
        &mut self,
        ctx: &InstallContext,
        _parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        let choice = ctx.answers.resolve(&platform_question(ctx.platforms.names()))?;
        let kind = PlatformKind::from_name(&choice)
            .ok_or_else(|| format!("unknown platform type {choice:?}"))?;
        debug!("platform '{}' selected", kind);
        self.platform = Some(ctx.platforms.collect(kind, &ctx.answers)?);
        Ok(())
    }
}
