use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("unrecognized {kind} label: {value:?}")]
    InvalidLabel { kind: &'static str, value: String },
    #[error("{kind} class index {index} out of range (expected < {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// Age bucket produced by the age classifier, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeBucket {
    Infant,
    Toddler,
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBucket {
    /// All buckets in classifier output order.
    pub const ALL: [AgeBucket; 8] = [
        AgeBucket::Infant,
        AgeBucket::Toddler,
        AgeBucket::Child,
        AgeBucket::Teen,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBucket::Infant => "(0-2)",
            AgeBucket::Toddler => "(4-6)",
            AgeBucket::Child => "(8-12)",
            AgeBucket::Teen => "(15-20)",
            AgeBucket::YoungAdult => "(25-32)",
            AgeBucket::Adult => "(38-43)",
            AgeBucket::MiddleAged => "(48-53)",
            AgeBucket::Senior => "(60-100)",
        }
    }

    pub fn from_index(index: usize) -> Result<Self, LabelError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(LabelError::IndexOutOfRange {
                kind: "age",
                index,
                len: Self::ALL.len(),
            })
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBucket {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|b| b.as_str() == s)
            .copied()
            .ok_or_else(|| LabelError::InvalidLabel {
                kind: "age",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for AgeBucket {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgeBucket> for String {
    fn from(bucket: AgeBucket) -> Self {
        bucket.as_str().to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Both genders in classifier output order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_index(index: usize) -> Result<Self, LabelError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(LabelError::IndexOutOfRange {
                kind: "gender",
                index,
                len: Self::ALL.len(),
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(LabelError::InvalidLabel {
                kind: "gender",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(0-2)", AgeBucket::Infant)]
    #[case("(8-12)", AgeBucket::Child)]
    #[case("(25-32)", AgeBucket::YoungAdult)]
    #[case("(60-100)", AgeBucket::Senior)]
    fn test_age_bucket_parses_classifier_strings(#[case] text: &str, #[case] expected: AgeBucket) {
        assert_eq!(text.parse::<AgeBucket>().unwrap(), expected);
        assert_eq!(expected.to_string(), text);
    }

    #[rstest]
    #[case("25-32")]
    #[case("(25-33)")]
    #[case("")]
    fn test_age_bucket_rejects_unknown(#[case] text: &str) {
        let err = text.parse::<AgeBucket>().unwrap_err();
        assert!(matches!(err, LabelError::InvalidLabel { kind: "age", .. }));
    }

    #[test]
    fn test_age_buckets_are_ordered() {
        let mut sorted = AgeBucket::ALL;
        sorted.sort();
        assert_eq!(sorted, AgeBucket::ALL);
        assert!(AgeBucket::Infant < AgeBucket::Senior);
    }

    #[test]
    fn test_gender_parse_is_case_sensitive() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("male".parse::<Gender>().is_err());
    }

    #[test]
    fn test_from_index_matches_output_order() {
        assert_eq!(AgeBucket::from_index(4).unwrap(), AgeBucket::YoungAdult);
        assert_eq!(Gender::from_index(1).unwrap(), Gender::Female);
        assert_eq!(
            Gender::from_index(2).unwrap_err(),
            LabelError::IndexOutOfRange {
                kind: "gender",
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn test_serde_uses_label_strings() {
        let json = serde_json::to_string(&(AgeBucket::Teen, Gender::Male)).unwrap();
        assert_eq!(json, r#"["(15-20)","Male"]"#);
        let bad: Result<Gender, _> = serde_json::from_str(r#""Other""#);
        assert!(bad.is_err());
    }
}
