use std::io::BufRead;

use crate::constants::{
    PROP_PRODUCT_BRAND, PROP_PRODUCT_MODEL, PROP_RELEASE, PROP_SECURITY_PATCH,
};
use crate::decoders::DecodeError;
use crate::models::ExtractedRecord;

/// The values of interest found in an Android `build.prop`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties {
    pub release: Option<String>,
    pub security_patch: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl BuildProperties {
    /// Number of the four expected prefixes that were found.
    pub fn matched(&self) -> usize {
        [&self.release, &self.security_patch, &self.brand, &self.model]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    /// Copy the decoded values onto `record`.
    ///
    /// The version is `"<release> <security-patch>"` when both are present.
    pub fn apply_to(&self, record: &mut ExtractedRecord) {
        match (&self.release, &self.security_patch) {
            (Some(release), Some(patch)) => record.version = format!("{} {}", release, patch),
            (Some(release), None) => record.version = release.clone(),
            _ => {}
        }

        if let Some(brand) = &self.brand {
            record.manufacturer = brand.clone();
        }
        if let Some(model) = &self.model {
            record.product_type = model.clone();
        }
    }
}

/// Scan `key=value` lines for the release, patch level, brand and model.
///
/// The first occurrence of each key wins. Lines are decoded lossily so a
/// stray non-UTF-8 byte elsewhere in the file does not lose the whole entry.
pub fn parse_build_properties<R: BufRead>(mut reader: R) -> Result<BuildProperties, DecodeError> {
    let mut props = BuildProperties::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches(['\r', '\n']);

        let slot = if let Some(value) = text.strip_prefix(PROP_RELEASE) {
            Some((&mut props.release, value))
        } else if let Some(value) = text.strip_prefix(PROP_SECURITY_PATCH) {
            Some((&mut props.security_patch, value))
        } else if let Some(value) = text.strip_prefix(PROP_PRODUCT_BRAND) {
            Some((&mut props.brand, value))
        } else if let Some(value) = text.strip_prefix(PROP_PRODUCT_MODEL) {
            Some((&mut props.model, value))
        } else {
            None
        };

        if let Some((field, value)) = slot {
            if field.is_none() {
                *field = Some(value.to_string());
            }
        }
    }

    Ok(props)
}
