const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count into the nearest base-1024 unit.
///
/// The value is rounded to two decimal places and rendered as a plain
/// number, so trailing zeros are trimmed: `1536` becomes `"1.5 KB"` and
/// `1048576` becomes `"1 MB"`. Sizes past GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let unit_index = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(unit_index as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}
