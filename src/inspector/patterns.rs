use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{
    ACTIVATION_RECORD_PATTERN, APPLICATION_STATE_PATTERN, BUILD_PROP_PATTERN,
    LAST_BUILD_INFO_PATTERN, PACKAGES_XML_PATTERN,
};
use crate::decoders::DecodeError;
use crate::inspector::handlers;
use crate::models::ExtractedRecord;

/// Decodes one matched entry's bytes into the record.
pub type ArtifactHandler = fn(&[u8], &mut ExtractedRecord) -> Result<(), DecodeError>;

/// Known forensic artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    BuildProperties,
    LastBuildInfo,
    PackageRegistry,
    ApplicationState,
    ActivationRecord,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::BuildProperties => "build properties",
            ArtifactKind::LastBuildInfo => "last build info",
            ArtifactKind::PackageRegistry => "package registry",
            ArtifactKind::ApplicationState => "application state",
            ArtifactKind::ActivationRecord => "activation record",
        };
        write!(f, "{}", name)
    }
}

/// A recognizable artifact location and the handler that decodes it.
pub struct ArtifactPattern {
    pub kind: ArtifactKind,
    pub regex: Regex,
    pub handler: ArtifactHandler,
}

impl ArtifactPattern {
    pub fn new(kind: ArtifactKind, regex: Regex, handler: ArtifactHandler) -> Self {
        ArtifactPattern { kind, regex, handler }
    }
}

impl fmt::Debug for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactPattern")
            .field("kind", &self.kind)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

lazy_static! {
    /// Built-in artifact table, in dispatch priority order
    pub static ref ARTIFACT_PATTERNS: Vec<ArtifactPattern> = vec![
        ArtifactPattern::new(
            ArtifactKind::BuildProperties,
            Regex::new(BUILD_PROP_PATTERN).unwrap(),
            handlers::build_properties,
        ),
        ArtifactPattern::new(
            ArtifactKind::LastBuildInfo,
            Regex::new(LAST_BUILD_INFO_PATTERN).unwrap(),
            handlers::last_build_info,
        ),
        ArtifactPattern::new(
            ArtifactKind::PackageRegistry,
            Regex::new(PACKAGES_XML_PATTERN).unwrap(),
            handlers::package_registry,
        ),
        ArtifactPattern::new(
            ArtifactKind::ApplicationState,
            Regex::new(APPLICATION_STATE_PATTERN).unwrap(),
            handlers::application_state,
        ),
        ArtifactPattern::new(
            ArtifactKind::ActivationRecord,
            Regex::new(ACTIVATION_RECORD_PATTERN).unwrap(),
            handlers::activation_record,
        ),
    ];
}

/// First pattern in `table` matching `entry_name`; later patterns are not tried.
pub fn match_artifact<'t>(table: &'t [ArtifactPattern], entry_name: &str) -> Option<&'t ArtifactPattern> {
    table.iter().find(|pattern| pattern.regex.is_match(entry_name))
}
