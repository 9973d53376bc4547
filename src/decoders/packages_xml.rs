use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::decoders::DecodeError;
use crate::models::InstalledPackage;

const XML_DECLARATION: &[u8] = b"<?xml";
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Whether `bytes` start (after whitespace or a BOM) with an XML declaration.
pub fn is_xml_document(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(XML_DECLARATION)
}

/// Parse a plain-text `packages.xml` into its `<package>` entries.
///
/// Only direct children of the root element are considered, matching the
/// layout `<packages><package name=".." version=".."/>...</packages>`.
pub fn parse_package_list(bytes: &[u8]) -> Result<Vec<InstalledPackage>, DecodeError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut packages = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                depth += 1;
                if depth == 2 && element.name().as_ref() == b"package" {
                    if let Some(package) = package_from_element(&element)? {
                        packages.push(package);
                    }
                }
            }
            Event::Empty(element) => {
                if depth == 1 && element.name().as_ref() == b"package" {
                    if let Some(package) = package_from_element(&element)? {
                        packages.push(package);
                    }
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(packages)
}

fn package_from_element(element: &BytesStart<'_>) -> Result<Option<InstalledPackage>, DecodeError> {
    let mut name = None;
    let mut version = None;

    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.into_owned()),
            b"version" => version = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    Ok(name.map(|name| InstalledPackage::new(name, version)))
}
