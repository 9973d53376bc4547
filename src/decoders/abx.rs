//! Android Binary XML (ABX) reader, limited to what the package registry needs.
//!
//! Android 12+ persists `packages.xml` with `BinaryXmlSerializer`: a 4-byte
//! `ABX\0` magic followed by a token stream. Each token byte carries the
//! event in its low nibble and the value type in its high nibble. Strings are
//! big-endian `u16` length-prefixed UTF-8; interned strings are a `u16`
//! index into a table that grows whenever the index is `0xFFFF`.
//!
//! Every read is bounds-checked so truncated or hostile input yields a
//! [`DecodeError::BinaryXml`] instead of a panic.

use crate::decoders::DecodeError;
use crate::models::InstalledPackage;

pub const ABX_MAGIC: &[u8; 4] = b"ABX\0";

// Events (low nibble)
const START_DOCUMENT: u8 = 0;
const END_DOCUMENT: u8 = 1;
const START_TAG: u8 = 2;
const END_TAG: u8 = 3;
const TEXT: u8 = 4;
const CDSECT: u8 = 5;
const ENTITY_REF: u8 = 6;
const IGNORABLE_WHITESPACE: u8 = 7;
const PROCESSING_INSTRUCTION: u8 = 8;
const COMMENT: u8 = 9;
const DOCDECL: u8 = 10;
const ATTRIBUTE: u8 = 15;

// Value types (high nibble)
const TYPE_NULL: u8 = 1;
const TYPE_STRING: u8 = 2;
const TYPE_STRING_INTERNED: u8 = 3;
const TYPE_BYTES_HEX: u8 = 4;
const TYPE_BYTES_BASE64: u8 = 5;
const TYPE_INT: u8 = 6;
const TYPE_INT_HEX: u8 = 7;
const TYPE_LONG: u8 = 8;
const TYPE_LONG_HEX: u8 = 9;
const TYPE_FLOAT: u8 = 10;
const TYPE_DOUBLE: u8 = 11;
const TYPE_BOOLEAN_TRUE: u8 = 12;
const TYPE_BOOLEAN_FALSE: u8 = 13;

const NEW_INTERNED_STRING: u16 = 0xffff;

struct AbxReader<'a> {
    data: &'a [u8],
    pos: usize,
    interned: Vec<String>,
}

impl<'a> AbxReader<'a> {
    fn new(data: &'a [u8]) -> Result<Self, DecodeError> {
        if !data.starts_with(ABX_MAGIC) {
            return Err(DecodeError::BinaryXml {
                offset: 0,
                message: "missing ABX magic".to_string(),
            });
        }
        Ok(AbxReader {
            data,
            pos: ABX_MAGIC.len(),
            interned: Vec::new(),
        })
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::BinaryXml {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| self.error(format!("truncated input, wanted {} bytes", len)))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_utf(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| self.error("invalid UTF-8 string"))
    }

    fn read_interned(&mut self) -> Result<String, DecodeError> {
        let index = self.read_u16()?;
        if index == NEW_INTERNED_STRING {
            let value = self.read_utf()?;
            self.interned.push(value.clone());
            Ok(value)
        } else {
            self.interned
                .get(index as usize)
                .cloned()
                .ok_or_else(|| self.error(format!("unknown interned string index {}", index)))
        }
    }

    fn read_bytes_as_hex(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Read a typed value and render it the way the text serializer would.
    fn read_value(&mut self, value_type: u8) -> Result<Option<String>, DecodeError> {
        let value = match value_type {
            TYPE_NULL => return Ok(None),
            TYPE_STRING => self.read_utf()?,
            TYPE_STRING_INTERNED => self.read_interned()?,
            TYPE_BYTES_HEX | TYPE_BYTES_BASE64 => self.read_bytes_as_hex()?,
            TYPE_INT => i32::from_be_bytes(self.read_array::<4>()?).to_string(),
            TYPE_INT_HEX => format!("{:x}", u32::from_be_bytes(self.read_array::<4>()?)),
            TYPE_LONG => i64::from_be_bytes(self.read_array::<8>()?).to_string(),
            TYPE_LONG_HEX => format!("{:x}", u64::from_be_bytes(self.read_array::<8>()?)),
            TYPE_FLOAT => f32::from_be_bytes(self.read_array::<4>()?).to_string(),
            TYPE_DOUBLE => f64::from_be_bytes(self.read_array::<8>()?).to_string(),
            TYPE_BOOLEAN_TRUE => "true".to_string(),
            TYPE_BOOLEAN_FALSE => "false".to_string(),
            other => return Err(self.error(format!("unknown value type {}", other))),
        };
        Ok(Some(value))
    }
}

#[derive(Default)]
struct PendingPackage {
    name: Option<String>,
    version: Option<String>,
}

impl PendingPackage {
    fn finish(self, out: &mut Vec<InstalledPackage>) {
        if let Some(name) = self.name {
            out.push(InstalledPackage::new(name, self.version));
        }
    }
}

/// Decode an ABX `packages.xml` into its top-level `<package>` entries.
pub fn parse_abx_package_list(data: &[u8]) -> Result<Vec<InstalledPackage>, DecodeError> {
    let mut reader = AbxReader::new(data)?;
    let mut packages = Vec::new();
    let mut pending: Option<PendingPackage> = None;
    let mut depth = 0usize;

    while !reader.at_end() {
        let token = reader.read_u8()?;
        let event = token & 0x0f;
        let value_type = token >> 4;

        // Attributes belong to the most recent start tag; anything else closes it
        if event != ATTRIBUTE {
            if let Some(package) = pending.take() {
                package.finish(&mut packages);
            }
        }

        match event {
            START_DOCUMENT | END_DOCUMENT => {}
            START_TAG => {
                let name = reader.read_interned()?;
                depth += 1;
                if depth == 2 && name == "package" {
                    pending = Some(PendingPackage::default());
                }
            }
            END_TAG => {
                reader.read_interned()?;
                depth = depth.saturating_sub(1);
            }
            ATTRIBUTE => {
                let name = reader.read_interned()?;
                let value = reader.read_value(value_type)?;
                if let Some(package) = pending.as_mut() {
                    match name.as_str() {
                        "name" => package.name = value,
                        "version" => package.version = value,
                        _ => {}
                    }
                }
            }
            TEXT | CDSECT | ENTITY_REF | IGNORABLE_WHITESPACE | PROCESSING_INSTRUCTION
            | COMMENT | DOCDECL => {
                reader.read_value(value_type)?;
            }
            other => return Err(reader.error(format!("unknown token {}", other))),
        }
    }

    if let Some(package) = pending.take() {
        package.finish(&mut packages);
    }

    Ok(packages)
}


#[cfg(test)]
mod tests {
    use super::writer::{package_registry, AbxWriter};
    use super::*;

    #[test]
    fn test_parse_package_registry() {
        let data = package_registry(&[("com.acme.mail", 1204), ("com.acme.maps", 7)]);
        let packages = parse_abx_package_list(&data).unwrap();

        assert_eq!(
            packages,
            vec![
                InstalledPackage::new("com.acme.mail", Some("1204".to_string())),
                InstalledPackage::new("com.acme.maps", Some("7".to_string())),
            ]
        );
    }

    #[test]
    fn test_nested_package_tags_are_ignored() {
        let data = AbxWriter::new()
            .start_tag("packages")
            .start_tag("shared-user")
            .start_tag("package")
            .attr_str("name", "nested.pkg")
            .end_tag("package")
            .end_tag("shared-user")
            .start_tag("package")
            .attr_str("name", "top.pkg")
            .end_tag("package")
            .end_tag("packages")
            .finish();

        let packages = parse_abx_package_list(&data).unwrap();
        assert_eq!(packages, vec![InstalledPackage::unversioned("top.pkg")]);
    }

    #[test]
    fn test_missing_magic() {
        let err = parse_abx_package_list(b"<?xml version='1.0'?>").unwrap_err();
        assert!(matches!(err, DecodeError::BinaryXml { offset: 0, .. }));
    }

    #[test]
    fn test_truncated_input_is_error_not_panic() {
        let data = package_registry(&[("com.acme.mail", 1204)]);
        for cut in ABX_MAGIC.len()..data.len() - 1 {
            // Any prefix must either decode or fail cleanly
            let _ = parse_abx_package_list(&data[..cut]);
        }
        assert!(parse_abx_package_list(&data[..data.len() - 6]).is_err());
    }

    #[test]
    fn test_unknown_interned_index() {
        let mut data = ABX_MAGIC.to_vec();
        data.push(START_TAG | (TYPE_STRING_INTERNED << 4));
        data.extend_from_slice(&5u16.to_be_bytes());
        let err = parse_abx_package_list(&data).unwrap_err();
        assert!(err.to_string().contains("interned"));
    }

    #[test]
    fn test_unknown_token() {
        let mut data = ABX_MAGIC.to_vec();
        data.push(0x0c);
        assert!(parse_abx_package_list(&data).is_err());
    }
}
