const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count for the preview list, e.g. `532 B` or `1.46 MB`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} {}", bytes, UNITS[0]),
        _ => format!("{:.2} {}", value, UNITS[unit]),
    }
}
