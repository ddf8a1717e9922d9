//! Row-level record types
//! One parsed CSV row, and the decision whether it enters the working dataset.

/// One input row as read from the CSV, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    pub disaster_type: Option<String>,
    pub year: Option<i32>,
}

/// A row with a non-empty disaster type and a parsed year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub disaster_type: String,
    pub year: i32,
}

/// Why a row was left out of the working dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingType,
    InvalidYear,
}

/// Result of validating a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Valid(ValidRecord),
    Skipped(SkipReason),
}

/// Parse a year field: surrounding whitespace is ignored, the rest must be a
/// base-10 integer.
pub fn parse_year(field: &str) -> Option<i32> {
    field.trim().parse::<i32>().ok()
}

impl RawRecord {
    /// Build a record from the two raw string fields of a row.
    pub fn from_fields(disaster_type: Option<&str>, year: Option<&str>) -> Self {
        Self {
            disaster_type: disaster_type.map(str::to_string),
            year: year.and_then(parse_year),
        }
    }

    /// Decide whether this row belongs to the working dataset.
    pub fn classify(self) -> ParseOutcome {
        let disaster_type = match self.disaster_type {
            Some(t) if !t.is_empty() => t,
            _ => return ParseOutcome::Skipped(SkipReason::MissingType),
        };

        match self.year {
            Some(year) => ParseOutcome::Valid(ValidRecord {
                disaster_type,
                year,
            }),
            None => ParseOutcome::Skipped(SkipReason::InvalidYear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn year_with_trailing_space_is_kept() {
        let outcome = RawRecord::from_fields(Some("Flood"), Some("2001 ")).classify();
        assert_eq!(
            outcome,
            ParseOutcome::Valid(ValidRecord {
                disaster_type: "Flood".to_string(),
                year: 2001,
            })
        );
    }

    #[test]
    fn empty_type_is_skipped() {
        let outcome = RawRecord::from_fields(Some(""), Some("1999")).classify();
        assert_eq!(outcome, ParseOutcome::Skipped(SkipReason::MissingType));

        let outcome = RawRecord::from_fields(None, Some("1999")).classify();
        assert_eq!(outcome, ParseOutcome::Skipped(SkipReason::MissingType));
    }

    #[test]
    fn non_numeric_year_is_skipped() {
        let outcome = RawRecord::from_fields(Some("Storm"), Some("abc")).classify();
        assert_eq!(outcome, ParseOutcome::Skipped(SkipReason::InvalidYear));
    }

    #[test]
    fn parse_year_edge_cases() {
        assert_eq!(parse_year("  1987\t"), Some(1987));
        assert_eq!(parse_year("+2003"), Some(2003));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("2001.5"), None);
        assert_eq!(parse_year("20 01"), None);
    }

    proptest! {
        #[test]
        fn valid_iff_type_present_and_year_parses(
            disaster_type in "[A-Za-z ]{0,8}",
            year in prop_oneof![
                (-3000i32..3000).prop_map(|y| format!(" {y} ")),
                "[a-z.]{0,4}",
            ],
        ) {
            let outcome = RawRecord::from_fields(Some(&disaster_type), Some(&year)).classify();
            let expected_valid = !disaster_type.is_empty() && year.trim().parse::<i32>().is_ok();
            prop_assert_eq!(matches!(outcome, ParseOutcome::Valid(_)), expected_valid);
        }
    }
}
