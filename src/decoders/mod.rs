//! Decoders for the forensic artifacts recognized inside an archive.
//!
//! Each decoder takes the raw bytes of one archive entry and either yields
//! the identifying values it carries or a [`DecodeError`]. Decoders never
//! panic on malformed input; the archive inspector logs the error and keeps
//! going with the remaining entries.
//!
//! ## Formats
//!
//! - **Build properties**: `key=value` text lines (`build.prop`)
//! - **Property lists**: XML, binary or OpenStep plists (`LastBuildInfo.plist`,
//!   `activation_record.plist`)
//! - **Package registry**: `packages.xml`, either plain XML or Android's
//!   compact binary XML (ABX)
//! - **Application state**: the FrontBoard `applicationState.db` SQLite store

use thiserror::Error;

/// `key=value` build property parsing
pub mod build_prop;

/// Property-list helpers for Apple artifacts
pub mod property_list;

/// Plain XML package registry
pub mod packages_xml;

/// Android binary XML (ABX) package registry
pub mod abx;

/// FrontBoard application-state store
pub mod app_state;

pub use build_prop::{parse_build_properties, BuildProperties};
pub use packages_xml::{is_xml_document, parse_package_list};
pub use abx::parse_abx_package_list;
pub use app_state::read_application_identifiers;

/// Failure to decode one artifact entry.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("property list error: {0}")]
    PropertyList(#[from] plist::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("binary XML error at offset {offset}: {message}")]
    BinaryXml { offset: usize, message: String },

    #[error("missing or mistyped field `{0}`")]
    Field(&'static str),
}
