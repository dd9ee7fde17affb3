//! Helpers for inspecting run artifacts

use std::io::Read;
use std::path::Path;

/// Names of all entries in a ZIP (or XLSX) file
pub fn entry_names(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    zip.file_names().map(str::to_string).collect()
}

/// Decrypt one entry of an encrypted archive
pub fn decrypt_entry(archive: &Path, name: &str, password: &str) -> Vec<u8> {
    let file = std::fs::File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let index = (0..zip.len())
        .find(|&i| zip.by_index_raw(i).unwrap().name() == name)
        .unwrap_or_else(|| panic!("entry {name} not in archive"));
    let mut entry = zip
        .by_index_decrypt(index, password.as_bytes())
        .unwrap()
        .expect("password accepted");
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    content
}

/// Read a text part of an XLSX workbook (e.g. "xl/sharedStrings.xml")
pub fn xlsx_part(workbook: &Path, part: &str) -> String {
    let file = std::fs::File::open(workbook).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut entry = zip.by_name(part).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}
