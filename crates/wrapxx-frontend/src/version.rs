//! Upstream version discovery.
//!
//! The upstream header advertises its version in free-form text as
//! `Version number: <major>.<minor>`. A header without that text still
//! generates; only consumers that need the integer version treat the
//! unknown case as an error.

/// Version of the upstream API header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    Known { major: u32, minor: u32 },
    Unknown,
}

impl ApiVersion {
    /// Human-readable version text, `"Unknown"` as the sentinel.
    pub fn label(&self) -> String {
        match self {
            ApiVersion::Known { major, minor } => format!("{major}.{minor}"),
            ApiVersion::Unknown => "Unknown".to_string(),
        }
    }

    /// `major * 1000 + minor`, e.g. 3070 for version 3.70.
    pub fn integer(&self) -> Option<u32> {
        match self {
            ApiVersion::Known { major, minor } => Some(major * 1000 + minor),
            ApiVersion::Unknown => None,
        }
    }
}

/// Scan the raw header text for the version pattern.
pub fn scan_version(source: &str) -> ApiVersion {
    const NEEDLE: &str = "Version number: ";
    let Some(pos) = source.find(NEEDLE) else {
        return ApiVersion::Unknown;
    };
    let rest = &source[pos + NEEDLE.len()..];
    let Some((major, rest)) = leading_number(rest) else {
        return ApiVersion::Unknown;
    };
    let Some(rest) = rest.strip_prefix('.') else {
        return ApiVersion::Unknown;
    };
    let Some((minor, _)) = leading_number(rest) else {
        return ApiVersion::Unknown;
    };
    ApiVersion::Known { major, minor }
}

fn leading_number(s: &str) -> Option<(u32, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((s[..end].parse().ok()?, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_the_version_in_a_header_comment() {
        let source = "/*\n * VirtuoseAPI\n * Version number: 3.20\n */\n";
        let version = scan_version(source);
        assert_eq!(version, ApiVersion::Known { major: 3, minor: 20 });
        assert_eq!(version.label(), "3.20");
        assert_eq!(version.integer(), Some(3020));
    }

    #[test]
    fn missing_version_degrades_to_the_sentinel() {
        let version = scan_version("/* no version here */");
        assert_eq!(version, ApiVersion::Unknown);
        assert_eq!(version.label(), "Unknown");
        assert_eq!(version.integer(), None);
    }

    #[test]
    fn malformed_version_text_is_not_a_version() {
        assert_eq!(scan_version("Version number: x.y"), ApiVersion::Unknown);
        assert_eq!(scan_version("Version number: 3"), ApiVersion::Unknown);
        assert_eq!(scan_version("Version number: 3."), ApiVersion::Unknown);
    }

    #[test]
    fn integer_version_matches_the_upstream_convention() {
        assert_eq!(
            scan_version("Version number: 3.70").integer(),
            Some(3070)
        );
    }
}
