//! Reference extraction from entry-file lines (pure, no side effects).
//!
//! The entry file is treated as opaque lines of text. Each line is run
//! through an ordered table of pattern matchers; the first pattern that
//! matches yields the line's candidate reference.

use regex::Regex;
use std::sync::LazyLock;

/// Which pattern class produced a candidate reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// A quoted literal media path (`/Media/<id>/<name>.<ext>`).
    Direct,
    /// A numbered frame family, matched up to and including `_stepped-`.
    Stepped,
}

/// A candidate media reference extracted from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Matched path, normalized to carry a leading `/`.
    pub path: String,
    pub kind: RefKind,
}

/// Ordered pattern table; the first pattern matching a line wins.
///
/// The direct pattern's name segment deliberately spans quote characters:
/// compiled string-concatenation expressions embed a runtime-computed
/// fragment between quotes, and the whole expression must be captured so
/// `wildcard_template` can turn it into a glob pattern. Only the extension
/// segment is anchored to the closing quote.
static PATTERNS: LazyLock<[(Regex, RefKind); 2]> = LazyLock::new(|| {
    [
        (
            Regex::new(r#"/?Media/(?P<mid>[^/]+)/(?P<name>.+)\.(?P<ext>[^'"]*)"#).unwrap(),
            RefKind::Direct,
        ),
        (
            Regex::new(r#"/?Media/[^'"]+_stepped-"#).unwrap(),
            RefKind::Stepped,
        ),
    ]
});

/// Compiled `String.fromInt` splice shape found in the bundle output:
/// `' + ($elm$core$String$fromInt(<expr>) + '`.
static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"' \+ \(\$elm\$core\$String\$fromInt\(.+\) \+ '").unwrap());

/// Extract the candidate media reference from one line of the entry file.
///
/// Returns `None` when no pattern matches. The returned path always starts
/// with `/`, prepended when the raw match lacked one.
pub fn scan_line(line: &str) -> Option<MediaRef> {
    for (pattern, kind) in PATTERNS.iter() {
        if let Some(m) = pattern.find(line) {
            return Some(MediaRef {
                path: normalize(m.as_str()),
                kind: *kind,
            });
        }
    }
    None
}

/// Substitute every runtime-computed integer splice with a `*` wildcard,
/// turning a captured template expression into a glob pattern.
///
/// Paths without a template splice are returned unchanged.
pub fn wildcard_template(path: &str) -> String {
    TEMPLATE_RE.replace_all(path, "*").into_owned()
}

/// Guarantee a leading separator (the pattern's leading `/` is optional).
fn normalize(matched: &str) -> String {
    if matched.starts_with('/') {
        matched.to_string()
    } else {
        format!("/{matched}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_direct_quoted() {
        let m = scan_line(r#"<img src="/Media/42/logo.png">"#).unwrap();
        assert_eq!(m.kind, RefKind::Direct);
        assert_eq!(m.path, "/Media/42/logo.png");
    }

    #[test]
    fn test_scan_direct_nested_dirs() {
        let m = scan_line(r#"<img src="/Media/42/icons/small.png">"#).unwrap();
        assert_eq!(m.kind, RefKind::Direct);
        assert_eq!(m.path, "/Media/42/icons/small.png");
    }

    #[test]
    fn test_scan_normalizes_missing_leading_slash() {
        let m = scan_line(r#"url('Media/7/bg.jpg')"#).unwrap();
        assert_eq!(m.path, "/Media/7/bg.jpg");
    }

    #[test]
    fn test_scan_template_expression_captured_whole() {
        let line = r"var u = '/Media/123/frame_' + ($elm$core$String$fromInt(n) + '.png');";
        let m = scan_line(line).unwrap();
        assert_eq!(m.kind, RefKind::Direct);
        assert_eq!(
            m.path,
            "/Media/123/frame_' + ($elm$core$String$fromInt(n) + '.png"
        );
    }

    #[test]
    fn test_scan_stepped() {
        let m = scan_line(r#"var p = '/Media/abc/seq_stepped-';"#).unwrap();
        assert_eq!(m.kind, RefKind::Stepped);
        assert_eq!(m.path, "/Media/abc/seq_stepped-");
    }

    #[test]
    fn test_scan_direct_wins_over_stepped() {
        // A stepped family member with a full extension is a direct reference.
        let m = scan_line(r#"<img src="/Media/abc/seq_stepped-3.png">"#).unwrap();
        assert_eq!(m.kind, RefKind::Direct);
        assert_eq!(m.path, "/Media/abc/seq_stepped-3.png");
    }

    #[test]
    fn test_scan_no_match() {
        assert!(scan_line("<p>hello world</p>").is_none());
        assert!(scan_line("").is_none());
        assert!(scan_line("/Assets/42/logo.png").is_none());
    }

    #[test]
    fn test_wildcard_template_substitution() {
        let path = "/Media/123/frame_' + ($elm$core$String$fromInt(n) + '.png";
        assert_eq!(wildcard_template(path), "/Media/123/frame_*.png");
    }

    #[test]
    fn test_wildcard_template_passthrough() {
        assert_eq!(
            wildcard_template("/Media/42/logo.png"),
            "/Media/42/logo.png"
        );
    }
}
