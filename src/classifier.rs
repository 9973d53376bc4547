//! Device-family classification from a directory signature.

use crate::constants::{ANDROID_SIGNATURE_DIR, APPLE_SIGNATURE_DIRS};
use crate::inspector::DirectorySignature;
use crate::models::{DeviceFamily, ExtractedRecord};

/// `data/` means Android; otherwise `applications/` or `private/` means Apple.
pub fn classify(signature: &DirectorySignature) -> DeviceFamily {
    if signature.contains(ANDROID_SIGNATURE_DIR) {
        DeviceFamily::Android
    } else if APPLE_SIGNATURE_DIRS.iter().any(|dir| signature.contains(dir)) {
        DeviceFamily::Apple
    } else {
        DeviceFamily::Unclassified
    }
}

/// Fill an empty manufacturer from the family label. Never overwrites.
pub fn backfill_manufacturer(record: &mut ExtractedRecord, family: DeviceFamily) {
    if !record.manufacturer.is_empty() {
        return;
    }
    if let Some(label) = family.default_manufacturer() {
        record.manufacturer = label.to_string();
    }
}
