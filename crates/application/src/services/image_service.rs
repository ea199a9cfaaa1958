//! Image registry service
//!
//! Validates image references before handing them to the registry tool, and
//! fills in the default project, image name and tag for archive pushes.

use std::path::Path;
use std::sync::Arc;

use domain::ImageReference;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CommandOutput, ImageRegistryPort, RegistryCredentials};

/// Project used when none is given
pub const DEFAULT_PROJECT: &str = "default";
/// Image name used when none is given
pub const DEFAULT_IMAGE: &str = "default-image";
/// Tag used when none is given
pub const DEFAULT_TAG: &str = "latest";

/// Destination of an archive push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    registry: String,
    project: Option<String>,
    image: Option<String>,
    tag: Option<String>,
}

impl PushTarget {
    /// Target the given registry with default project, image and tag
    pub fn new(registry: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            project: None,
            image: None,
            tag: None,
        }
    }

    /// Override the project (namespace); blank values keep the default
    #[must_use]
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = non_blank(project);
        self
    }

    /// Override the image name; blank values keep the default
    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = non_blank(image);
        self
    }

    /// Override the tag; blank values keep the default
    #[must_use]
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = non_blank(tag);
        self
    }

    /// Resolve into a validated reference
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled reference is not a valid private
    /// registry reference.
    pub fn resolve(&self) -> Result<ImageReference, ApplicationError> {
        let reference = ImageReference::from_parts(
            &self.registry,
            self.project.as_deref().unwrap_or(DEFAULT_PROJECT),
            self.image.as_deref().unwrap_or(DEFAULT_IMAGE),
            self.tag.as_deref().unwrap_or(DEFAULT_TAG),
        )?;
        Ok(reference)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service for registry image operations
pub struct ImageService {
    registry: Arc<dyn ImageRegistryPort>,
}

impl std::fmt::Debug for ImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageService").finish_non_exhaustive()
    }
}

impl ImageService {
    /// Create the service over a registry port
    pub fn new(registry: Arc<dyn ImageRegistryPort>) -> Self {
        Self { registry }
    }

    /// Validate a reference string
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Domain`] if the reference is invalid.
    pub fn validate_reference(reference: &str) -> Result<ImageReference, ApplicationError> {
        ImageReference::parse(reference).map_err(|e| {
            warn!(reference, "Rejected image reference");
            ApplicationError::from(e)
        })
    }

    /// Inspect an image in the registry
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is invalid or the tool cannot be run.
    #[instrument(skip(self, credentials))]
    pub async fn inspect(
        &self,
        reference: &str,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError> {
        let image = Self::validate_reference(reference)?;
        let output = self.registry.inspect(&image, credentials).await?;
        info!(image = %image, success = output.success, "Inspected image");
        Ok(output)
    }

    /// Push a local archive to the registry
    ///
    /// # Errors
    ///
    /// Returns an error if the archive does not exist, the target reference is
    /// invalid, or the tool cannot be run.
    #[instrument(skip(self, credentials), fields(archive = %archive.display()))]
    pub async fn push_archive(
        &self,
        archive: &Path,
        target: &PushTarget,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError> {
        let exists = tokio::fs::try_exists(archive).await.unwrap_or(false);
        if !exists {
            return Err(ApplicationError::InvalidOperation(format!(
                "archive not found: {}",
                archive.display()
            )));
        }
        let image = target.resolve()?;
        let output = self
            .registry
            .push_archive(archive, &image, credentials)
            .await?;
        info!(image = %image, success = output.success, "Pushed image archive");
        Ok(output)
    }
}
