//! Dotted-numeric release version ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A release version such as `773.1.0`.
///
/// Ordering compares numeric segments left to right; a missing segment
/// counts as zero, so `1.2` < `1.2.1` and `10.0.0` > `9.0.0`. Plain
/// string comparison gets the latter wrong, which is why the image store
/// never sorts raw filenames.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    raw: String,
}

impl Version {
    /// The version string exactly as parsed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments of the version.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty version string".to_string());
        }
        let segments = s
            .split('.')
            .map(|seg| {
                seg.parse::<u64>()
                    .map_err(|_| format!("non-numeric version segment '{seg}' in '{s}'"))
            })
            .collect::<std::result::Result<Vec<u64>, String>>()?;
        Ok(Self {
            segments,
            raw: s.to_string(),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
