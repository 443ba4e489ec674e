#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use host::Store;
use zip::write::SimpleFileOptions;

/// Writes a zip archive with the given (path, contents) entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Fresh in-memory store with the schema synced.
pub async fn memory_store() -> Store {
    Store::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database")
}
