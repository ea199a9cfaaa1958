//! Registry image reference value object
//!
//! Accepts only fully qualified references to a private registry:
//! `registry[:port]/namespace/repository[:tag]`, where the registry is a dotted
//! hostname or an IPv4 address. Short Docker Hub forms such as `ubuntu:20.04`
//! are rejected.
//!
//! # Examples
//!
//! ```
//! use domain::ImageReference;
//!
//! let image = ImageReference::parse("docker://192.168.50.103/flow/cust-cont:20250617191632-x86").unwrap();
//! assert_eq!(image.registry(), "192.168.50.103");
//! assert_eq!(image.tag(), Some("20250617191632-x86"));
//! assert_eq!(image.docker_uri(), "docker://192.168.50.103/flow/cust-cont:20250617191632-x86");
//!
//! assert!(ImageReference::parse("ubuntu:20.04").is_err());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Transport prefix understood by registry tooling
pub const DOCKER_TRANSPORT: &str = "docker://";

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let label = r"[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?";
    let octet = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    let component = r"[a-z0-9]+(?:[._-][a-z0-9]+)*";
    let pattern = format!(
        r"^(?P<registry>{label}\.{label}(?:\.{label})*|(?:{octet}\.){{3}}{octet})(?::(?P<port>[1-9][0-9]{{0,4}}))?/(?P<namespace>{component})/(?P<repository>{component})(?::(?P<tag>[a-zA-Z0-9_][a-zA-Z0-9._-]{{0,127}}))?$"
    );
    #[allow(clippy::expect_used)] // Static pattern, covered by tests
    Regex::new(&pattern).expect("image reference pattern must compile")
});

/// A validated `registry[:port]/namespace/repository[:tag]` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference {
    registry: String,
    port: Option<u32>,
    namespace: String,
    repository: String,
    tag: Option<String>,
}

impl ImageReference {
    /// Parse and validate a reference, tolerating surrounding whitespace and a
    /// leading `docker://`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidImageReference`] if the input is empty or does
    /// not match the accepted format.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_image_reference("reference is empty"));
        }
        let candidate = trimmed.strip_prefix(DOCKER_TRANSPORT).unwrap_or(trimmed);

        let caps = REFERENCE_PATTERN
            .captures(candidate)
            .ok_or_else(|| DomainError::invalid_image_reference(trimmed))?;

        let port = caps
            .name("port")
            .map(|m| m.as_str().parse::<u32>())
            .transpose()
            .map_err(|_| DomainError::invalid_image_reference(trimmed))?;

        Ok(Self {
            registry: caps["registry"].to_string(),
            port,
            namespace: caps["namespace"].to_string(),
            repository: caps["repository"].to_string(),
            tag: caps.name("tag").map(|m| m.as_str().to_string()),
        })
    }

    /// Assemble a reference from parts and validate the result
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled reference is invalid.
    pub fn from_parts(
        registry: &str,
        namespace: &str,
        repository: &str,
        tag: &str,
    ) -> Result<Self, DomainError> {
        let registry = registry.trim();
        let registry = registry.strip_prefix(DOCKER_TRANSPORT).unwrap_or(registry);
        Self::parse(&format!("{registry}/{namespace}/{repository}:{tag}"))
    }

    /// Check a reference without keeping the parsed value
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Registry host (hostname or IPv4)
    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// Registry port, if given
    pub const fn port(&self) -> Option<u32> {
        self.port
    }

    /// Namespace / project
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Repository / image name
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Tag, if given
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Reference prefixed with the `docker://` transport
    pub fn docker_uri(&self) -> String {
        format!("{DOCKER_TRANSPORT}{self}")
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.registry)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "/{}/{}", self.namespace, self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ImageReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
