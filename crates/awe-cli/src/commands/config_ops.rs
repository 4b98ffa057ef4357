use std::fs;

pub fn settings_export() {
    print!("{}", awe_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        awe_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: correction_mode={:?}, suggest.max_suggestions={}, {} quick fixes",
        s.correction_mode(),
        s.suggest.max_suggestions,
        s.quick_fixes.len()
    );
}
