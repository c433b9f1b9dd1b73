// Unit tests for Career Match

use career_match::core::{
    filters::{matches_experience, prepare_candidate},
    normalize::{distinct_tokens, normalize_token, split_tokens},
    scoring::{calculate_match_score, score_tokens},
    PreparedQuery,
};
use career_match::models::{ExperienceRequirement, MatchQuery, ProfessionRecord, ScoringWeights};

fn create_record(skills: &str, interests: &str, experience: &str) -> ProfessionRecord {
    ProfessionRecord {
        id: 1,
        name: "Python Developer".to_string(),
        description: "Builds applications in Python".to_string(),
        skills: skills.to_string(),
        interests: interests.to_string(),
        experience_level: experience.to_string(),
        salary_range: Some("120000-250000".to_string()),
        demand: Some("High".to_string()),
        category: Some("IT".to_string()),
    }
}

fn score(record: &ProfessionRecord, query: &MatchQuery) -> (f64, f64) {
    let candidate = prepare_candidate(record).unwrap();
    let query = PreparedQuery::from_query(query).unwrap();
    let s = calculate_match_score(&query, &candidate, &ScoringWeights::default());
    (s.skill_score, s.interest_score)
}

#[test]
fn test_normalization_is_idempotent() {
    for raw in ["  Python", "SQL ", "Web Development", "ÉCOLE", "ui/ux"] {
        let once = normalize_token(raw);
        assert_eq!(normalize_token(&once), once);
        assert_eq!(once.trim(), once);
    }
}

#[test]
fn test_record_tokens_are_normalized_sets() {
    let record = create_record("Python, Django,, SQL, python", " IT ,Automation", "1-3y");
    assert_eq!(record.skill_tokens(), vec!["python", "django", "sql"]);
    assert_eq!(record.interest_tokens(), vec!["it", "automation"]);
    assert_eq!(split_tokens(""), Vec::<String>::new());
}

#[test]
fn test_worked_example_scores_eight() {
    let record = create_record("python,django,sql", "it,automation", "1-3y");
    let query = MatchQuery::new(["Python", "SQL"], ["IT"], "1-3y");

    let (skill, interest) = score(&record, &query);

    assert_eq!(skill, 6.0);
    assert_eq!(interest, 2.0);
    assert_eq!(skill + interest, 8.0);
}

#[test]
fn test_exact_skill_contributes_three_regardless_of_order_and_duplicates() {
    let record = create_record("python,django,sql", "it,automation", "1-3y");

    for skills in [
        vec!["sql"],
        vec!["cooking", "sql"],
        vec!["sql", "SQL", " sql "],
        vec!["Sql", "cooking", "sql"],
    ] {
        let query = MatchQuery::new(skills.clone(), vec![], "1-3y");
        let (skill, _) = score(&record, &query);
        assert_eq!(skill, 3.0, "skills {:?}", skills);
    }
}

#[test]
fn test_partial_skill_contributes_one() {
    let record = create_record("programming,html", "it", "any");
    let query = MatchQuery::new(["prog"], ["travel"], "no-experience");

    let (skill, interest) = score(&record, &query);

    assert_eq!(skill, 1.0);
    assert_eq!(interest, 0.0);
}

#[test]
fn test_partial_interest_contributes_half() {
    let user = distinct_tokens(["auto"]);
    let record = distinct_tokens(["it", "automation"]);
    assert_eq!(score_tokens(&user, &record, 2.0, 0.5), 0.5);
}

#[test]
fn test_experience_filter_excludes_other_levels() {
    let record = create_record("python,django,sql", "it,automation", "1-3y");
    let candidate = prepare_candidate(&record).unwrap();

    let no_experience: ExperienceRequirement = "no-experience".parse().unwrap();
    let mid: ExperienceRequirement = "1-3y".parse().unwrap();

    assert!(!matches_experience(&candidate, &no_experience));
    assert!(matches_experience(&candidate, &mid));
    assert!(matches_experience(&candidate, &ExperienceRequirement::Any));
}

#[test]
fn test_query_validation() {
    assert!(PreparedQuery::from_query(&MatchQuery::new(["python"], ["it"], "")).is_err());
    assert!(PreparedQuery::from_query(&MatchQuery::new(["python"], ["it"], "junior")).is_err());
    assert!(PreparedQuery::from_query(&MatchQuery::new(["python"], ["it"], "3y-plus")).is_ok());
    assert!(PreparedQuery::from_query(&MatchQuery::new(["python"], ["it"], "any")).is_ok());
}
