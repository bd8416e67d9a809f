//! File-extension suffix of a URL path.

/// Return the trailing `.` + word-characters suffix of `path` (e.g. `".png"`).
///
/// Word characters are ASCII letters, digits and `_`. When the path does not
/// end in such a suffix an empty string is returned.
pub fn file_extension(path: &str) -> &str {
    let Some(dot) = path.rfind('.') else {
        return "";
    };

    let tail = &path[dot + 1..];
    if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        &path[dot..]
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_extension() {
        assert_eq!(file_extension("/abcd1234.png"), ".png");
        assert_eq!(file_extension("/abcd1234.JPEG"), ".JPEG");
    }

    #[test]
    fn test_only_last_suffix() {
        assert_eq!(file_extension("/archive.tar.gz"), ".gz");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(file_extension("/abcd1234"), "");
        assert_eq!(file_extension("/"), "");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn test_dot_not_at_end() {
        // The dot belongs to a directory, not to the last segment
        assert_eq!(file_extension("/v1.2/abcd1234"), "");
        assert_eq!(file_extension("/abcd1234."), "");
        assert_eq!(file_extension("/abcd1234.we-bp"), "");
    }
}
