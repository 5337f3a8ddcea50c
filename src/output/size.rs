const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const K: u64 = 1024;

/// Human-readable byte count: the largest 1024-based unit that fits, rounded to
/// two decimals with trailing zeros dropped (1536 → "1.5 KB").
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit < UNITS.len() - 1 && bytes >= scale * K {
        scale *= K;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(500), "500 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1500), "1.46 KB");
        assert_eq!(format_bytes(1572864), "1.5 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_format_bytes_caps_at_gigabytes() {
        assert_eq!(format_bytes(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn test_format_bytes_rounds_up_into_same_unit() {
        // 1023.999 KB rounds to 1024 KB rather than switching units
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024 KB");
    }
}
