use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::hash::fingerprint_path;

/// Findings for one archive, serialized as one entry of the results collection.
///
/// Field names are consumed by downstream tooling and must stay stable.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub logical_path: String,
    #[serde(default)]
    pub date_extraction: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub directory: Vec<String>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub package_versions: BTreeMap<String, String>,
}

impl ExtractedRecord {
    /// Start a record for the archive at `archive_path`, fingerprinting the path.
    pub fn for_archive(archive_path: &str) -> Self {
        ExtractedRecord {
            logical_path: archive_path.to_string(),
            hash: fingerprint_path(archive_path),
            ..Default::default()
        }
    }

    /// Append an installed package, keeping discovery order.
    pub fn push_package(&mut self, package: InstalledPackage) {
        if let Some(version) = package.version {
            self.package_versions.insert(package.name.clone(), version);
        }
        self.packages.push(package.name);
    }
}

/// One entry of an installed-application inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: Option<String>,
}

impl InstalledPackage {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        InstalledPackage {
            name: name.into(),
            version,
        }
    }

    pub fn unversioned(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// Coarse platform classification of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceFamily {
    Android,
    Apple,
    Unclassified,
}

impl DeviceFamily {
    /// Manufacturer label used when artifact decoding found none.
    pub fn default_manufacturer(&self) -> Option<&'static str> {
        match self {
            DeviceFamily::Android => Some("Android"),
            DeviceFamily::Apple => Some("Apple"),
            DeviceFamily::Unclassified => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DeviceFamily::Unclassified)
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceFamily::Android => write!(f, "Android"),
            DeviceFamily::Apple => write!(f, "Apple"),
            DeviceFamily::Unclassified => write!(f, "Unclassified"),
        }
    }
}
