//! Artifact handlers referenced by the pattern table.
//!
//! Each handler decodes one entry's bytes and writes what it found onto the
//! record. A handler that fails leaves the record untouched.

use std::io::Cursor;

use log::debug;

use crate::decoders::{
    is_xml_document, parse_abx_package_list, parse_build_properties, parse_package_list,
    property_list, read_application_identifiers, DecodeError,
};
use crate::models::{ExtractedRecord, InstalledPackage};

/// Android `build.prop`.
pub fn build_properties(bytes: &[u8], record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let props = parse_build_properties(Cursor::new(bytes))?;
    if props.matched() == 0 {
        return Err(DecodeError::Field("ro.build.version.release"));
    }
    debug!("build.prop matched {}/4 keys", props.matched());
    props.apply_to(record);
    Ok(())
}

/// iOS `LastBuildInfo.plist`.
pub fn last_build_info(bytes: &[u8], record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let dict = property_list::read_dictionary(bytes)?;
    property_list::apply_last_build_info(&dict, record)
}

/// Android `packages.xml`, plain or binary.
///
/// The whole list is decoded before anything is pushed, so a failure part
/// way through contributes no packages.
pub fn package_registry(bytes: &[u8], record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let packages = if is_xml_document(bytes) {
        parse_package_list(bytes)?
    } else {
        parse_abx_package_list(bytes)?
    };
    extend_packages(record, packages);
    Ok(())
}

/// iOS FrontBoard `applicationState.db`.
pub fn application_state(bytes: &[u8], record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let identifiers = read_application_identifiers(bytes)?;
    extend_packages(record, identifiers.into_iter().map(InstalledPackage::unversioned));
    Ok(())
}

/// iOS `activation_record.plist`.
pub fn activation_record(bytes: &[u8], record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let dict = property_list::read_dictionary(bytes)?;
    record.product_type = property_list::activation_product_type(&dict)?;
    Ok(())
}

fn extend_packages<I: IntoIterator<Item = InstalledPackage>>(record: &mut ExtractedRecord, packages: I) {
    for package in packages {
        record.push_package(package);
    }
}
