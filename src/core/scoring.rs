use crate::core::filters::Candidate;
use crate::core::matcher::PreparedQuery;
use crate::models::ScoringWeights;

/// Score breakdown for a single candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub skill_score: f64,
    pub interest_score: f64,
}

impl MatchScore {
    #[inline]
    pub fn total(&self) -> f64 {
        self.skill_score + self.interest_score
    }
}

/// Calculate the match score of a candidate for a prepared query
///
/// Scoring formula, summed over distinct query tokens:
/// skill_score    = Σ skill_exact    if token ∈ record skills
///                    skill_partial  if token ⊂ some record skill
/// interest_score = Σ interest_exact / interest_partial, same shape
pub fn calculate_match_score(
    query: &PreparedQuery,
    candidate: &Candidate<'_>,
    weights: &ScoringWeights,
) -> MatchScore {
    MatchScore {
        skill_score: score_tokens(
            &query.skills,
            &candidate.skills,
            weights.skill_exact,
            weights.skill_partial,
        ),
        interest_score: score_tokens(
            &query.interests,
            &candidate.interests,
            weights.interest_exact,
            weights.interest_partial,
        ),
    }
}

/// Sum per-token contributions of `user_tokens` against `record_tokens`
///
/// Both sides must already be normalized; `user_tokens` must be distinct.
#[inline]
pub fn score_tokens(
    user_tokens: &[String],
    record_tokens: &[String],
    exact: f64,
    partial: f64,
) -> f64 {
    user_tokens
        .iter()
        .map(|token| token_contribution(token, record_tokens, exact, partial))
        .sum()
}

#[inline]
fn token_contribution(token: &str, record_tokens: &[String], exact: f64, partial: f64) -> f64 {
    if record_tokens.iter().any(|r| r == token) {
        exact
    } else if record_tokens.iter().any(|r| r.contains(token)) {
        partial
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::prepare_candidate;
    use crate::models::{MatchQuery, ProfessionRecord};

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn python_record() -> ProfessionRecord {
        ProfessionRecord {
            id: 1,
            name: "Python Developer".to_string(),
            description: "Builds applications in Python".to_string(),
            skills: "python,django,sql".to_string(),
            interests: "it,automation".to_string(),
            experience_level: "1-3y".to_string(),
            salary_range: None,
            demand: None,
            category: Some("IT".to_string()),
        }
    }

    #[test]
    fn test_exact_and_partial_contributions() {
        let record = tokens(&["programming", "html"]);

        assert_eq!(score_tokens(&tokens(&["html"]), &record, 3.0, 1.0), 3.0);
        assert_eq!(score_tokens(&tokens(&["prog"]), &record, 3.0, 1.0), 1.0);
        assert_eq!(score_tokens(&tokens(&["cooking"]), &record, 3.0, 1.0), 0.0);
        assert_eq!(
            score_tokens(&tokens(&["html", "prog", "cooking"]), &record, 3.0, 1.0),
            4.0
        );
    }

    #[test]
    fn test_exact_wins_over_partial() {
        // "sql" equals one record token and is a substring of another
        let record = tokens(&["nosql", "sql"]);
        assert_eq!(score_tokens(&tokens(&["sql"]), &record, 3.0, 1.0), 3.0);
    }

    #[test]
    fn test_worked_example() {
        let record = python_record();
        let candidate = prepare_candidate(&record).unwrap();
        let query = PreparedQuery::from_query(&MatchQuery::new(
            ["Python", "SQL"],
            ["IT"],
            "1-3y",
        ))
        .unwrap();

        let score = calculate_match_score(&query, &candidate, &ScoringWeights::default());

        assert_eq!(score.skill_score, 6.0);
        assert_eq!(score.interest_score, 2.0);
        assert_eq!(score.total(), 8.0);
    }

    #[test]
    fn test_duplicate_query_tokens_count_once() {
        let record = python_record();
        let candidate = prepare_candidate(&record).unwrap();
        let query = PreparedQuery::from_query(&MatchQuery::new(
            ["python", " Python ", "PYTHON"],
            ["automat"],
            "1-3y",
        ))
        .unwrap();

        let score = calculate_match_score(&query, &candidate, &ScoringWeights::default());

        assert_eq!(score.skill_score, 3.0);
        assert_eq!(score.interest_score, 0.5);
    }

    #[test]
    fn test_exact_only_weights() {
        let record = python_record();
        let candidate = prepare_candidate(&record).unwrap();
        let query =
            PreparedQuery::from_query(&MatchQuery::new(["pyth", "sql"], ["it"], "1-3y")).unwrap();

        let score = calculate_match_score(&query, &candidate, &ScoringWeights::exact_only());

        assert_eq!(score.skill_score, 3.0);
        assert_eq!(score.interest_score, 2.0);
    }
}
