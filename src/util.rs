use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;

static COLLECTED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}/\d{2}/\d{2})/(\d{2})(\d{2})(\d{2})").expect("timestamp pattern is valid")
});

/// Turns the collector's `YYYY-MM-DD-HHMMSS` stamp into `YYYY/MM/DD HH:MM:SS`.
///
/// Anything that does not follow that shape only gets its dashes swapped.
pub fn format_timestamp(timestamp: &str) -> String {
    let slashed = timestamp.replace('-', "/");
    COLLECTED_AT
        .replace(&slashed, "$1 $2:$3:$4")
        .into_owned()
}

pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Deterministic pair in `[-1, 1]` derived from `id`.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_collector_timestamps() {
        assert_eq!(format_timestamp("2025-03-14-092653"), "2025/03/14 09:26:53");
    }

    #[test]
    fn leaves_unknown_timestamps_mostly_alone() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp("2025-03-14"), "2025/03/14");
    }

    #[test]
    fn pluralizes() {
        assert_eq!(pluralize(1, "dependency", "dependencies"), "dependency");
        assert_eq!(pluralize(0, "dependency", "dependencies"), "dependencies");
        assert_eq!(pluralize(7, "package", "packages"), "packages");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair("linux-firmware");
        assert_eq!(first, stable_pair("linux-firmware"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }
}
