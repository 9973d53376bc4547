use std::io::Cursor;

use lazy_static::lazy_static;
use plist::{Dictionary, Value};
use regex::Regex;

use crate::decoders::DecodeError;
use crate::models::ExtractedRecord;

lazy_static! {
    /// `"ProductType" = "iPhone10,6";` inside an OpenStep-style account token
    static ref OPENSTEP_PRODUCT_TYPE: Regex =
        Regex::new(r#""?ProductType"?\s*=\s*"([^"]+)""#).unwrap();
}

/// Decode a property list whose root must be a dictionary.
pub fn read_dictionary(bytes: &[u8]) -> Result<Dictionary, DecodeError> {
    Value::from_reader(Cursor::new(bytes))?
        .into_dictionary()
        .ok_or(DecodeError::Field("<root dictionary>"))
}

/// Apply `LastBuildInfo.plist`: `ProductName` and `ShortVersionString`.
///
/// Both keys must be strings; otherwise the record is left untouched.
pub fn apply_last_build_info(dict: &Dictionary, record: &mut ExtractedRecord) -> Result<(), DecodeError> {
    let product_name = dict
        .get("ProductName")
        .and_then(Value::as_string)
        .ok_or(DecodeError::Field("ProductName"))?;
    let short_version = dict
        .get("ShortVersionString")
        .and_then(Value::as_string)
        .ok_or(DecodeError::Field("ShortVersionString"))?;

    record.manufacturer = product_name.to_string();
    record.version = short_version.to_string();
    Ok(())
}

/// Extract the device product type from an activation record.
///
/// `AccountToken` holds a nested property list. It is usually OpenStep text,
/// which is matched directly when the plist reader does not accept it.
pub fn activation_product_type(dict: &Dictionary) -> Result<String, DecodeError> {
    let token = dict
        .get("AccountToken")
        .and_then(Value::as_data)
        .ok_or(DecodeError::Field("AccountToken"))?;

    if let Ok(nested) = read_dictionary(token) {
        if let Some(product_type) = nested.get("ProductType").and_then(Value::as_string) {
            return Ok(product_type.to_string());
        }
    }

    let text = String::from_utf8_lossy(token);
    OPENSTEP_PRODUCT_TYPE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(DecodeError::Field("ProductType"))
}
