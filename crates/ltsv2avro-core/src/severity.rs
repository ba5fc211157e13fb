//! Severity normalisation.
//!
//! The vocabulary is a compile-time table; anything outside it, including a
//! missing field, becomes [`Severity::Unspecified`]. Mapping never fails.

use phf::phf_map;

/// Log severity, normalised to the `LEVEL_*` names written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Unspecified,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

static VOCABULARY: phf::Map<&'static str, Severity> = phf_map! {
    "TRACE" => Severity::Trace,
    "DEBUG" => Severity::Debug,
    "INFO" => Severity::Info,
    "WARN" => Severity::Warn,
    "ERROR" => Severity::Error,
    "FATAL" => Severity::Fatal,
};

impl Severity {
    /// Case-insensitive lookup of a raw severity value.
    pub fn from_label(raw: &str) -> Severity {
        VOCABULARY
            .get(raw.to_uppercase().as_str())
            .copied()
            .unwrap_or(Severity::Unspecified)
    }

    /// Same as [`Severity::from_label`], with a missing value treated as a miss.
    pub fn from_optional(raw: Option<&str>) -> Severity {
        raw.map_or(Severity::Unspecified, Severity::from_label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Unspecified => "LEVEL_UNSPECIFIED",
            Severity::Trace => "LEVEL_TRACE",
            Severity::Debug => "LEVEL_DEBUG",
            Severity::Info => "LEVEL_INFO",
            Severity::Warn => "LEVEL_WARN",
            Severity::Error => "LEVEL_ERROR",
            Severity::Fatal => "LEVEL_FATAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", Severity::Trace)]
    #[case("Debug", Severity::Debug)]
    #[case("info", Severity::Info)]
    #[case("WARN", Severity::Warn)]
    #[case("eRRoR", Severity::Error)]
    #[case("fatal", Severity::Fatal)]
    fn known_levels_map_case_insensitively(#[case] raw: &str, #[case] expected: Severity) {
        assert_eq!(Severity::from_label(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("warning")]
    #[case("CRITICAL")]
    #[case(" info")]
    fn unknown_levels_are_unspecified(#[case] raw: &str) {
        assert_eq!(Severity::from_label(raw), Severity::Unspecified);
    }

    #[test]
    fn missing_level_is_unspecified() {
        assert_eq!(Severity::from_optional(None), Severity::Unspecified);
    }

    #[test]
    fn display_uses_level_names() {
        assert_eq!(Severity::Info.to_string(), "LEVEL_INFO");
        assert_eq!(Severity::default().to_string(), "LEVEL_UNSPECIFIED");
    }
}
