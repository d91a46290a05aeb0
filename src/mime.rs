// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use crate::param::{MIME_TYPES, UNKNOWN_MIME};

/// 根据文件名最后一个 `.` 之后的后缀（不区分大小写）推断 MIME 类型。
///
/// 没有后缀或后缀未登记时返回 [`UNKNOWN_MIME`]。
pub fn mime_type(filename: &str) -> &'static str {
    let extension = match filename.rfind('.') {
        Some(pos) => &filename[pos + 1..],
        None => return UNKNOWN_MIME,
    };
    MIME_TYPES
        .get(extension.to_lowercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_MIME)
}

pub fn is_unknown(mime: &str) -> bool {
    mime == UNKNOWN_MIME
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mime_html() {
        assert_eq!(mime_type("index.html"), "text/html");
        assert_eq!(mime_type("index.htm"), "text/html");
    }

    #[test]
    fn test_mime_uppercase() {
        assert_eq!(mime_type("A.HTML"), "text/html");
        assert_eq!(mime_type("photo.JpG"), "image/jpeg");
    }

    #[test]
    fn test_mime_last_dot_wins() {
        assert_eq!(mime_type("archive.tar.zip"), "application/zip");
        assert_eq!(mime_type("notes.txt.bak"), UNKNOWN_MIME);
    }

    #[test]
    fn test_mime_no_extension() {
        assert_eq!(mime_type("README"), UNKNOWN_MIME);
        assert_eq!(mime_type(""), UNKNOWN_MIME);
        assert!(is_unknown(mime_type("Makefile")));
    }

    #[test]
    fn test_mime_trailing_dot() {
        assert_eq!(mime_type("file."), UNKNOWN_MIME);
    }

    #[test]
    fn test_mime_table() {
        for (name, expected) in [
            ("a.txt", "text/plain"),
            ("a.css", "text/css"),
            ("a.js", "text/javascript"),
            ("A.java", "text/x-java"),
            ("a.png", "image/png"),
            ("a.gif", "image/gif"),
            ("favicon.ico", "image/x-icon"),
            ("A.class", "application/java-vm"),
            ("a.jar", "application/java-archive"),
            ("a.xml", "application/xml"),
            ("a.xhtml", "application/xhtml+xml"),
        ] {
            assert_eq!(mime_type(name), expected, "{}", name);
        }
    }

    proptest! {
        #[test]
        fn prop_known_extension_ignores_case(
            stem in "[a-zA-Z0-9_-]{0,12}",
            idx in 0usize..16,
            mask in proptest::collection::vec(any::<bool>(), 8),
        ) {
            let known: Vec<(&&str, &&str)> = MIME_TYPES.iter().collect();
            let (ext, expected) = known[idx % known.len()];
            let mixed: String = ext
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            let filename = format!("{}.{}", stem, mixed);
            prop_assert_eq!(mime_type(&filename), *expected);
        }

        #[test]
        fn prop_no_dot_is_unknown(name in "[^.]*") {
            prop_assert_eq!(mime_type(&name), UNKNOWN_MIME);
        }
    }
}
