use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::normalize::split_tokens;

/// Label of the experience wildcard accepted on both records and queries
pub const ANY_EXPERIENCE: &str = "any";

/// Profession record as stored in the catalog
///
/// `skills` and `interests` keep the stored comma-delimited form; use
/// [`ProfessionRecord::skill_tokens`] and [`ProfessionRecord::interest_tokens`]
/// for the normalized sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub skills: String,
    pub interests: String,
    #[serde(rename = "experienceLevel")]
    pub experience_level: String,
    #[serde(rename = "salaryRange", default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub demand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProfessionRecord {
    /// Build a stored record from an insert payload and a store-assigned id
    pub fn from_new(id: i64, new: NewProfession) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            skills: new.skills,
            interests: new.interests,
            experience_level: new.experience_level,
            salary_range: new.salary_range,
            demand: new.demand,
            category: new.category,
        }
    }

    pub fn skill_tokens(&self) -> Vec<String> {
        split_tokens(&self.skills)
    }

    pub fn interest_tokens(&self) -> Vec<String> {
        split_tokens(&self.interests)
    }

    /// Category for display, defaulting to "Other"
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Other")
    }
}

/// Fields required to insert a new profession into the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfession {
    pub name: String,
    pub description: String,
    pub skills: String,
    pub interests: String,
    #[serde(alias = "experienceLevel")]
    pub experience_level: String,
    #[serde(alias = "salaryRange", default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub demand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewProfession {
    /// Check the required text fields before a store accepts the record
    ///
    /// Returns the reason on failure so each store can wrap it in its own error.
    pub fn check(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("description", &self.description),
            ("skills", &self.skills),
            ("interests", &self.interests),
            ("experience_level", &self.experience_level),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }

        if split_tokens(&self.skills).is_empty() {
            return Err("skills must contain at least one token".to_string());
        }
        if split_tokens(&self.interests).is_empty() {
            return Err("interests must contain at least one token".to_string());
        }

        self.experience_level
            .parse::<ExperienceRequirement>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Concrete experience bucket of a user or a profession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "no-experience")]
    NoExperience,
    #[serde(rename = "under-1y")]
    UnderOneYear,
    #[serde(rename = "1-3y")]
    OneToThreeYears,
    #[serde(rename = "3y-plus")]
    ThreePlusYears,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::NoExperience,
        ExperienceLevel::UnderOneYear,
        ExperienceLevel::OneToThreeYears,
        ExperienceLevel::ThreePlusYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::NoExperience => "no-experience",
            ExperienceLevel::UnderOneYear => "under-1y",
            ExperienceLevel::OneToThreeYears => "1-3y",
            ExperienceLevel::ThreePlusYears => "3y-plus",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when an experience label is not part of the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized experience label: {0:?}")]
pub struct UnknownExperienceLabel(pub String);

impl FromStr for ExperienceLevel {
    type Err = UnknownExperienceLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperienceLevel::ALL
            .into_iter()
            .find(|level| level.label() == s)
            .ok_or_else(|| UnknownExperienceLabel(s.to_string()))
    }
}

/// Experience constraint, either a concrete level or the `any` wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceRequirement {
    Any,
    Exactly(ExperienceLevel),
}

impl ExperienceRequirement {
    /// Whether a record carrying `self` is eligible for a query carrying `other`
    #[inline]
    pub fn matches(&self, other: &ExperienceRequirement) -> bool {
        match (self, other) {
            (ExperienceRequirement::Any, _) | (_, ExperienceRequirement::Any) => true,
            (ExperienceRequirement::Exactly(a), ExperienceRequirement::Exactly(b)) => a == b,
        }
    }
}

impl FromStr for ExperienceRequirement {
    type Err = UnknownExperienceLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ANY_EXPERIENCE {
            return Ok(ExperienceRequirement::Any);
        }
        s.parse().map(ExperienceRequirement::Exactly)
    }
}

impl fmt::Display for ExperienceRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceRequirement::Any => f.write_str(ANY_EXPERIENCE),
            ExperienceRequirement::Exactly(level) => level.fmt(f),
        }
    }
}

/// Query handed to the matching engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchQuery {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    #[serde(rename = "experienceLevel")]
    pub experience_level: String,
}

impl MatchQuery {
    pub fn new<S: Into<String>>(
        skills: impl IntoIterator<Item = S>,
        interests: impl IntoIterator<Item = S>,
        experience_level: impl Into<String>,
    ) -> Self {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            interests: interests.into_iter().map(Into::into).collect(),
            experience_level: experience_level.into(),
        }
    }
}

/// Scored profession, computed per request and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub profession: ProfessionRecord,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Per-token contributions of exact and partial matches
///
/// Setting both partial weights to zero gives the exact-only variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill_exact: f64,
    pub skill_partial: f64,
    pub interest_exact: f64,
    pub interest_partial: f64,
}

impl ScoringWeights {
    pub fn exact_only() -> Self {
        Self {
            skill_partial: 0.0,
            interest_partial: 0.0,
            ..Self::default()
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_exact: 3.0,
            skill_partial: 1.0,
            interest_exact: 2.0,
            interest_partial: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profession() -> NewProfession {
        NewProfession {
            name: "Data Analyst".to_string(),
            description: "Analyses data".to_string(),
            skills: "sql, excel".to_string(),
            interests: "statistics".to_string(),
            experience_level: "1-3y".to_string(),
            salary_range: None,
            demand: None,
            category: Some("Analytics".to_string()),
        }
    }

    #[test]
    fn test_experience_labels_parse() {
        for level in ExperienceLevel::ALL {
            assert_eq!(level.label().parse::<ExperienceLevel>().unwrap(), level);
        }
        assert!("".parse::<ExperienceLevel>().is_err());
        assert!("any".parse::<ExperienceLevel>().is_err());
        assert!("1-3 years".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_requirement_wildcard() {
        let any: ExperienceRequirement = "any".parse().unwrap();
        let junior: ExperienceRequirement = "under-1y".parse().unwrap();
        let senior: ExperienceRequirement = "3y-plus".parse().unwrap();

        assert!(any.matches(&junior));
        assert!(junior.matches(&any));
        assert!(junior.matches(&junior));
        assert!(!junior.matches(&senior));
    }

    #[test]
    fn test_new_profession_check() {
        assert!(new_profession().check().is_ok());

        let mut blank_name = new_profession();
        blank_name.name = "   ".to_string();
        assert!(blank_name.check().is_err());

        let mut only_commas = new_profession();
        only_commas.skills = " , ,".to_string();
        assert!(only_commas.check().is_err());

        let mut bad_label = new_profession();
        bad_label.experience_level = "senior".to_string();
        assert!(bad_label.check().is_err());
    }

    #[test]
    fn test_category_default() {
        let mut record = ProfessionRecord::from_new(1, new_profession());
        assert_eq!(record.category_or_default(), "Analytics");
        record.category = Some(" ".to_string());
        assert_eq!(record.category_or_default(), "Other");
        record.category = None;
        assert_eq!(record.category_or_default(), "Other");
    }
}
