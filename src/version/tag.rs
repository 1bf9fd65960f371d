//! Release tag parsing and ordering
//!
//! Home Assistant switched to calendar versioning in 2021; everything before
//! that is treated as an opaque legacy tag that parses to `0.0.0`. Beta tags
//! use a `b` suffix on the patch segment (`2024.7.0b3`), and a stable release
//! always sorts above any beta of the same numeric triple.

use std::cmp::Ordering;

use crate::version::error::TagError;

/// The major version at which the upstream platform adopted calendar
/// versioning. Segments after the first are only parsed strictly once a tag
/// crosses this threshold.
pub const CALVER_THRESHOLD: u32 = 2021;

/// A parsed release tag.
///
/// `raw` keeps the original tag text so the selected maximum can be handed
/// back to git verbatim.
#[derive(Debug, Clone)]
pub struct VersionTag {
    raw: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<u32>,
}

impl VersionTag {
    /// Parse a release tag.
    ///
    /// The leading segment is lenient: a non-numeric major (legacy
    /// pre-calendar tags like `v0.118`) yields an all-zero tag rather than
    /// an error. Once the major crosses [`CALVER_THRESHOLD`], the remaining
    /// segments must be numeric and a parse failure is fatal. Missing
    /// segments default to zero/absent.
    ///
    /// Examples:
    /// - "2024.7.0"   -> major 2024, minor 7, patch 0, no prerelease
    /// - "2024.7.0b3" -> major 2024, minor 7, patch 0, prerelease 3
    /// - "0.118.5"    -> all zero (below the calendar threshold)
    /// - "legacy"     -> all zero (lenient branch)
    pub fn parse(tag: &str) -> Result<Self, TagError> {
        let mut parsed = Self {
            raw: tag.to_string(),
            major: 0,
            minor: 0,
            patch: 0,
            prerelease: None,
        };

        let segments: Vec<&str> = tag.split('.').collect();

        let Ok(major) = segments[0].parse::<u32>() else {
            return Ok(parsed);
        };
        parsed.major = major;

        if major < CALVER_THRESHOLD {
            return Ok(parsed);
        }

        if let Some(segment) = segments.get(1) {
            parsed.minor = parse_segment(tag, segment)?;
        }
        if let Some(segment) = segments.get(2) {
            // Beta tags look like "0b3": patch before the 'b', beta number
            // after. Anything other than exactly one 'b' means no prerelease.
            let parts: Vec<&str> = segment.split('b').collect();
            parsed.patch = parse_segment(tag, parts[0])?;
            if parts.len() == 2 {
                parsed.prerelease = Some(parse_segment(tag, parts[1])?);
            }
        }

        Ok(parsed)
    }

    /// The sentinel used as the starting point of a latest-tag fold.
    pub fn zero() -> Self {
        Self {
            raw: "0.0.0".to_string(),
            major: 0,
            minor: 0,
            patch: 0,
            prerelease: None,
        }
    }

    /// The original tag text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_segment(tag: &str, segment: &str) -> Result<u32, TagError> {
    segment
        .parse::<u32>()
        .map_err(|_| TagError::MalformedSegment {
            tag: tag.to_string(),
            segment: segment.to_string(),
        })
}

impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.prerelease == other.prerelease
    }
}

impl Eq for VersionTag {}

impl Ord for VersionTag {
    /// Lexicographic over (major, minor, patch, prerelease), except that the
    /// ABSENCE of a prerelease sorts above its presence: a stable release is
    /// newer than any beta of the same numeric triple.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Select the newest tag out of `tags`.
///
/// Folds every parsed tag with `>` starting from the zero sentinel, so the
/// result is the same for any enumeration order. Returns `None` when no tag
/// beats the sentinel (empty or all-legacy input). A malformed
/// calendar-versioned tag aborts the whole scan.
pub fn find_latest<'a, I>(tags: I) -> Result<Option<String>, TagError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut latest = VersionTag::zero();
    let mut latest_raw = None;

    for tag in tags {
        let parsed = VersionTag::parse(tag)?;
        if parsed > latest {
            latest = parsed;
            latest_raw = Some(tag.to_string());
        }
    }

    Ok(latest_raw)
}
