//! Test utilities for mobile-triage
//!
//! Fixture builders for zip archives and the artifacts found inside them.

#![cfg(test)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use plist::{Dictionary, Value};
use rusqlite::Connection;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::decoders::abx::writer::package_registry;

/// Entries of a zip archive to be written by [`write_zip`].
#[derive(Debug, Clone, Default)]
pub struct ZipFixture {
    entries: Vec<(String, Vec<u8>)>,
}

impl ZipFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file<C: AsRef<[u8]>>(mut self, name: &str, content: C) -> Self {
        self.entries.push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

/// Write `fixture` as `dir/name` and return the archive path.
pub fn write_zip(dir: &Path, name: &str, fixture: &ZipFixture) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
    for (entry, content) in &fixture.entries {
        zip.start_file(entry.as_str(), FileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// `build.prop` text carrying the four keys of interest among unrelated ones.
pub fn build_prop(release: &str, patch: &str, brand: &str, model: &str) -> String {
    format!(
        "# begin build properties\n\
         ro.build.id=UP1A.231005.007\n\
         ro.build.version.release={}\n\
         ro.build.version.security_patch={}\n\
         ro.product.system.brand={}\n\
         ro.product.system.model={}\n\
         ro.product.system.name=x1_eea\n",
        release, patch, brand, model
    )
}

/// A FrontBoard `applicationState.db` image holding `identifiers`.
pub fn application_state_db(identifiers: &[&str]) -> Vec<u8> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("applicationState.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE application_identifier_tab (
                id INTEGER PRIMARY KEY,
                application_identifier TEXT
            );",
        )
        .unwrap();
        for identifier in identifiers {
            conn.execute(
                "INSERT INTO application_identifier_tab (application_identifier) VALUES (?1)",
                [identifier],
            )
            .unwrap();
        }
    }
    fs::read(&path).unwrap()
}

/// XML `LastBuildInfo.plist`.
pub fn last_build_info_plist(product_name: &str, version: &str) -> Vec<u8> {
    let mut dict = Dictionary::new();
    dict.insert("ProductName".into(), Value::String(product_name.into()));
    dict.insert("ShortVersionString".into(), Value::String(version.into()));
    dict.insert("ProductBuildVersion".into(), Value::String("21E236".into()));
    to_xml(dict)
}

/// XML `activation_record.plist` whose `AccountToken` is OpenStep text.
pub fn activation_record_plist(product_type: &str) -> Vec<u8> {
    let token = format!(
        "{{\n\t\"ActivationRandomness\" = \"6E4C3A1B\";\n\t\"ProductType\" = \"{}\";\n\t\"SerialNumber\" = \"F2LXK0ABCDEF\";\n}}",
        product_type
    );
    let mut dict = Dictionary::new();
    dict.insert("AccountToken".into(), Value::Data(token.into_bytes()));
    dict.insert("unbrick".into(), Value::Boolean(true));
    to_xml(dict)
}

fn to_xml(dict: Dictionary) -> Vec<u8> {
    let mut out = Vec::new();
    Value::Dictionary(dict).to_writer_xml(&mut out).unwrap();
    out
}

/// Android extraction: `build.prop`, a binary `packages.xml` and an app directory.
pub fn android_fixture(brand: &str, model: &str) -> ZipFixture {
    ZipFixture::new()
        .file("dump/system/build.prop", build_prop("14", "2024-05-01", brand, model))
        .file(
            "dump/data/system/packages.xml",
            package_registry(&[("com.android.chrome", 631209138), ("com.whatsapp", 241077)]),
        )
        .file("dump/data/app/com.whatsapp/base.apk", "apk")
}

/// iOS file-system extraction with every Apple artifact present.
pub fn apple_fixture(product_type: &str) -> ZipFixture {
    ZipFixture::new()
        .file(
            "fs/private/var/installd/Library/MobileInstallation/LastBuildInfo.plist",
            last_build_info_plist("iPhone OS", "17.4.1"),
        )
        .file(
            "fs/private/var/mobile/Library/FrontBoard/applicationState.db",
            application_state_db(&["com.apple.mobilesafari", "com.acme.chat"]),
        )
        .file(
            "fs/private/var/containers/Data/System/5D1E2C44-0A7B/Library/activation_records/activation_record.plist",
            activation_record_plist(product_type),
        )
        .file("fs/Applications/MobileSafari.app/Info.plist", "x")
}

#[test]
fn test_fixture_archives_are_readable() {
    let dir = TempDir::new().unwrap();
    let fixture = android_fixture("Acme", "X1");
    let path = write_zip(dir.path(), "nested/a.zip", &fixture);

    let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    assert_eq!(archive.len(), fixture.entry_names().count());
}
