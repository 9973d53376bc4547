//! Global constants for the mobile-triage application.
//!
//! Artifact locations, decoder keys and default file names live here so the
//! inspector, decoders and configuration share a single definition.

// Artifact path patterns, tested against slash-normalized entry names.
// Order matters: the inspector tries them in this order and stops at the first match.

/// Android system build properties
pub const BUILD_PROP_PATTERN: &str = r"(?i).*dump/system/build\.prop$";

/// iOS last build information
pub const LAST_BUILD_INFO_PATTERN: &str =
    r".*private/var/installd/Library/MobileInstallation/LastBuildInfo\.plist$";

/// Android package registry (plain or binary XML)
pub const PACKAGES_XML_PATTERN: &str = r".*/data/system/packages\.xml$";

/// iOS FrontBoard application state database
pub const APPLICATION_STATE_PATTERN: &str =
    r".*private/var/mobile/Library/FrontBoard/applicationState\.db$";

/// iOS activation record
pub const ACTIVATION_RECORD_PATTERN: &str =
    r".*private/var/containers/Data/System/.*/Library/activation_records/activation_record\.plist$";

// build.prop keys
pub const PROP_RELEASE: &str = "ro.build.version.release=";
pub const PROP_SECURITY_PATCH: &str = "ro.build.version.security_patch=";
pub const PROP_PRODUCT_BRAND: &str = "ro.product.system.brand=";
pub const PROP_PRODUCT_MODEL: &str = "ro.product.system.model=";

/// Installed applications in the FrontBoard store
pub const APPLICATION_STATE_QUERY: &str =
    "SELECT application_identifier FROM application_identifier_tab";

// Directory signature members used for classification
pub const ANDROID_SIGNATURE_DIR: &str = "data/";
pub const APPLE_SIGNATURE_DIRS: &[&str] = &["applications/", "private/"];

// Discovery heuristics
/// Archive extension looked for during the walk
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Cloud exports and third-party tool outputs, never queued
pub const DEFAULT_EXCLUDED_KEYWORDS: &[&str] = &["takeout", "icloud", "onedrive", "leapp", "axiom"];

/// Already-processed logical extractions, counted but not queued
pub const DEFAULT_EXTRACTION_KEYWORDS: &[&str] = &["logical", "wiko"];

// Default file names
pub const DEFAULT_RESULTS_NAME: &str = "results.json";
pub const DEFAULT_CACHE_NAME: &str = "zip.sqlite";
pub const DEFAULT_LOG_NAME: &str = "app.log";
pub const DEFAULT_SUMMARY_NAME: &str = "scan_summary.json";

/// Root scanned when none is given on the command line
#[cfg(windows)]
pub const DEFAULT_SCAN_ROOT: &str = r"S:\";
#[cfg(not(windows))]
pub const DEFAULT_SCAN_ROOT: &str = "/";
