use std::fs;
use std::path::Path;
use std::process;

use awe_core::dict::{BinaryDictionary, RECORD_SIZE};
use awe_core::user_dict::UserDictionary;

use crate::dict_source;

pub fn compile(input_file: &str, output_file: &str, format: Option<&str>) {
    let input = Path::new(input_file);
    let format = format.unwrap_or_else(|| dict_source::format_for_path(input));
    let source = dict_source::from_name(format).unwrap_or_else(|| {
        eprintln!("Error: unknown format '{format}' (available: cin, tsv)");
        process::exit(1);
    });

    eprintln!("Reading {input_file} as {format}...");
    let builder = die!(
        dict_source::build_from_file(source.as_ref(), input),
        "Error parsing {input_file}: {}"
    );
    eprintln!("Building index for {} entries...", builder.len());
    die!(
        builder.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {output_file} ({:.1} KB)", file_size as f64 / 1024.0);
}

/// Show a summary of a binary dictionary or a user dictionary (detected by
/// its magic bytes).
pub fn info(file: &str) {
    let head = fs::read(file)
        .ok()
        .map(|b| b.get(..4).map(|s| s.to_vec()).unwrap_or_default());
    match head.as_deref() {
        Some(b"AWUD") => info_user(file),
        Some(_) => info_binary(file),
        None => {
            eprintln!("Error reading file: {file}");
            process::exit(1);
        }
    }
}

fn info_binary(file: &str) {
    let dict = die!(
        BinaryDictionary::open(Path::new(file)),
        "Error opening dictionary: {}"
    );
    let count = die!(dict.item_count(), "Error reading header: {}");
    let file_size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
    let index_size = count as u64 * RECORD_SIZE as u64;
    println!("Binary dictionary: {file}");
    println!("  entries:    {count}");
    println!("  index:      {index_size} bytes");
    println!("  body:       {} bytes", file_size.saturating_sub(4 + index_size));
}

fn info_user(file: &str) {
    let dict = die!(
        UserDictionary::open(Path::new(file)),
        "Error opening user dictionary: {}"
    );
    println!("User dictionary: {file}");
    println!("  words:      {}", dict.len());
    if let Some(top) = dict.list().iter().max_by_key(|e| e.frequency) {
        println!("  top word:   {} ({})", top.word, top.frequency);
    }
}

pub fn lookup(dict_file: &str, prefix: &str) {
    let dict = die!(
        BinaryDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let entries = die!(
        dict.search(&prefix.to_lowercase()),
        "Error searching dictionary: {}"
    );
    if entries.is_empty() {
        println!("\"{prefix}\": not found");
        return;
    }
    println!("\"{prefix}\": {} entries", entries.len());
    for e in &entries {
        println!("  {}\t{}", e.word, e.frequency);
    }
}
