//! Candidate names: immutable reference data.
use std::fmt;
use std::str::FromStr;

use crate::ids::NameId;

/// Origin tag assigned to names without a known classification.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// The two fixed name categories a game can draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Boy,
    Girl,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Boy => "boy",
            Category::Girl => "girl",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category tag is neither `boy` nor `girl`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown name category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boy" => Ok(Category::Boy),
            "girl" => Ok(Category::Girl),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A candidate name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name {
    pub id: NameId,
    pub text: String,
    pub category: Category,
    /// Optional classification such as a two-letter nationality code.
    pub origin: String,
}

impl Name {
    pub fn new(id: NameId, text: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            text: text.into(),
            category,
            origin: UNKNOWN_ORIGIN.to_string(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.origin = if origin.trim().is_empty() {
            UNKNOWN_ORIGIN.to_string()
        } else {
            origin
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_defaults_to_unknown() {
        let name = Name::new(NameId(1), "Ada", Category::Girl);
        assert_eq!(name.origin, UNKNOWN_ORIGIN);

        let name = name.with_origin("  ");
        assert_eq!(name.origin, UNKNOWN_ORIGIN);

        let name = Name::new(NameId(2), "Leif", Category::Boy).with_origin("no");
        assert_eq!(name.origin, "no");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Girl".parse::<Category>(), Ok(Category::Girl));
        assert_eq!(" boy ".parse::<Category>(), Ok(Category::Boy));
        assert!("cat".parse::<Category>().is_err());
    }
}
