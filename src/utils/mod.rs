use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Sanitize a file name by replacing characters that are invalid on common
/// filesystems.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name used for a downloaded repository archive.
pub fn archive_file_name(label: &str) -> String {
    format!(
        "{}.zip",
        sanitize_filename(label).trim_matches(|c| c == '.' || c == ' ')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp() {
        let ts = unix_timestamp();
        assert!(ts > 1700000000); // Sanity check
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b\\c.zip"), "a_b_c.zip");
        assert_eq!(sanitize_filename("normal-name.zip"), "normal-name.zip");
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("Glide"), "Glide.zip");
        assert_eq!(archive_file_name(" Load:App "), "Load_App.zip");
    }
}
