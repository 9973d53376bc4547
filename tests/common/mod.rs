//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use plist::{Dictionary, Value};
use rusqlite::Connection;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const ANDROID_BUILD_PROP: &str = "ro.build.version.release=14\n\
                                      ro.build.version.security_patch=2024-05-01\n\
                                      ro.product.system.brand=Acme\n\
                                      ro.product.system.model=X1\n";

pub const PACKAGES_XML: &str = r#"<?xml version='1.0' encoding='utf-8' standalone='yes' ?>
<packages>
    <version sdkVersion="34" databaseVersion="3" />
    <package name="com.android.chrome" codePath="/data/app/chrome" version="631209138">
        <sigs count="1" schemeVersion="3" />
    </package>
    <package name="com.whatsapp" codePath="/data/app/whatsapp" version="241077" />
</packages>
"#;

/// Write a zip with `entries` to `dir/name`.
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
    for (entry, content) in entries {
        zip.start_file(*entry, FileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
    path
}

pub fn android_archive(dir: &Path, name: &str) -> PathBuf {
    write_zip(
        dir,
        name,
        &[
            ("dump/system/build.prop", ANDROID_BUILD_PROP.as_bytes().to_vec()),
            ("dump/data/system/packages.xml", PACKAGES_XML.as_bytes().to_vec()),
            ("dump/data/app/com.whatsapp/base.apk", b"apk".to_vec()),
        ],
    )
}

pub fn apple_archive(dir: &Path, name: &str) -> PathBuf {
    let last_build_info = plist_xml(&[
        ("ProductName", Value::String("iPhone OS".into())),
        ("ShortVersionString", Value::String("17.4.1".into())),
    ]);
    let token = b"{\n\t\"ProductType\" = \"iPhone14,2\";\n\t\"SerialNumber\" = \"F2LXK0ABCDEF\";\n}".to_vec();
    let activation = plist_xml(&[("AccountToken", Value::Data(token))]);
    let app_state = application_state_db(&["com.apple.mobilesafari", "com.acme.chat"]);

    write_zip(
        dir,
        name,
        &[
            (
                "fs/private/var/installd/Library/MobileInstallation/LastBuildInfo.plist",
                last_build_info,
            ),
            ("fs/private/var/mobile/Library/FrontBoard/applicationState.db", app_state),
            (
                "fs/private/var/containers/Data/System/5D1E2C44/Library/activation_records/activation_record.plist",
                activation,
            ),
            ("fs/Applications/MobileSafari.app/Info.plist", b"x".to_vec()),
        ],
    )
}

/// Apple layout without any decodable artifact.
pub fn bare_apple_archive(dir: &Path, name: &str) -> PathBuf {
    write_zip(dir, name, &[("root/private/var/mobile/notes.txt", b"x".to_vec())])
}

pub fn triage_archive(dir: &Path, name: &str) -> PathBuf {
    write_zip(dir, name, &[("unknown/foo.txt", b"x".to_vec())])
}

pub fn corrupt_archive(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"PK\x03\x04 truncated").unwrap();
    path
}

fn plist_xml(entries: &[(&str, Value)]) -> Vec<u8> {
    let mut dict = Dictionary::new();
    for (key, value) in entries {
        dict.insert(key.to_string(), value.clone());
    }
    let mut out = Vec::new();
    Value::Dictionary(dict).to_writer_xml(&mut out).unwrap();
    out
}

fn application_state_db(identifiers: &[&str]) -> Vec<u8> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("applicationState.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE application_identifier_tab (id INTEGER PRIMARY KEY, application_identifier TEXT);")
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

pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
