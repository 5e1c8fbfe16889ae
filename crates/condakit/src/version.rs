//! Loose ordering for conda version strings.
//!
//! Conda versions are dot-separated and frequently not semver (`"1.2"`,
//! `"1.0.0rc1"`), so strict semver parsing is the wrong tool. Segments are
//! compared numerically when both sides are numeric, lexically otherwise,
//! and a numeric segment outranks a non-numeric one at the same position
//! (release beats prerelease tail).

use std::cmp::Ordering;

/// A version string parsed for comparison. Parsing never fails.
#[derive(Debug, Clone)]
pub struct LooseVersion {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

impl Segment {
    fn cmp_segment(&self, other: &Segment) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
        }
    }
}

impl LooseVersion {
    /// Parse a version string.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .trim()
            .split('.')
            .map(|piece| match piece.parse::<u64>() {
                Ok(n) => Segment::Number(n),
                Err(_) => Segment::Text(piece.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The original version string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            // Missing trailing segments count as zero, so "1.0" == "1.0.0".
            let zero = Segment::Number(0);
            let a = self.segments.get(i).unwrap_or(&zero);
            let b = other.segments.get(i).unwrap_or(&zero);
            match a.cmp_segment(b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LooseVersion {}
