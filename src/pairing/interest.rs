//! Interest Tags
//!
//! Clients may name a topic they want to be matched on; sessions that do not
//! are bucketed under [`Interest::Random`] and only match each other.

use std::fmt;

/// Interest tag a session waits under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Interest {
    /// No preference expressed.
    Random,
    /// Free-form topic tag, e.g. "music".
    Topic(String),
}

impl Interest {
    /// Wire name of the no-preference bucket.
    pub const RANDOM_TAG: &'static str = "Random";

    /// Parse a client-supplied tag.
    ///
    /// Absent, empty, or whitespace-only input falls back to `Random`, as
    /// does the literal wire tag itself. Topic tags are trimmed so padding
    /// cannot split a bucket.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Interest::Random,
            Some(tag) if tag == Self::RANDOM_TAG => Interest::Random,
            Some(tag) => Interest::Topic(tag.to_string()),
        }
    }

    /// The wire tag this interest renders as.
    pub fn as_tag(&self) -> &str {
        match self {
            Interest::Random => Self::RANDOM_TAG,
            Interest::Topic(tag) => tag,
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
