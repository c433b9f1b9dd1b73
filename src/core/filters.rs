use crate::models::{ExperienceRequirement, ProfessionRecord};
use crate::services::catalog::StoreError;

/// A catalog record parsed into the normalized form the scorer works on
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: &'a ProfessionRecord,
    pub experience: ExperienceRequirement,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
}

/// Parse a stored record into a [`Candidate`]
///
/// A record is malformed when its name is blank, its skill or interest set is
/// empty after normalization, or its experience label is not recognized.
pub fn prepare_candidate(record: &ProfessionRecord) -> Result<Candidate<'_>, StoreError> {
    let malformed = |reason: String| StoreError::MalformedRecord {
        id: record.id,
        reason,
    };

    if record.name.trim().is_empty() {
        return Err(malformed("empty name".to_string()));
    }

    let skills = record.skill_tokens();
    if skills.is_empty() {
        return Err(malformed("empty skill set".to_string()));
    }

    let interests = record.interest_tokens();
    if interests.is_empty() {
        return Err(malformed("empty interest set".to_string()));
    }

    let experience = record
        .experience_level
        .trim()
        .parse::<ExperienceRequirement>()
        .map_err(|e| malformed(e.to_string()))?;

    Ok(Candidate {
        record,
        experience,
        skills,
        interests,
    })
}

/// Experience filter: the record is eligible for the query's level
///
/// Either side carrying the `any` wildcard makes the record eligible.
#[inline]
pub fn matches_experience(candidate: &Candidate<'_>, query: &ExperienceRequirement) -> bool {
    candidate.experience.matches(query)
}
