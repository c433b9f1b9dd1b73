use std::fmt::Write;

use crate::models::{ProfessionRecord, ScoredResult};

const NOT_AVAILABLE: &str = "n/a";

/// Render ranked professions as a chat-ready bullet list
pub fn recommendations_text(results: &[ScoredResult]) -> String {
    let mut out = String::from("Top recommended professions:\n\n");

    for result in results {
        let p = &result.profession;
        let _ = write!(
            out,
            "• {} ({})\n   {}\n   Salary: {}\n   Demand: {}\n   Skills: {}\n   Match: {:.1}\n\n",
            p.name,
            p.category_or_default(),
            p.description,
            p.salary_range.as_deref().unwrap_or(NOT_AVAILABLE),
            p.demand.as_deref().unwrap_or(NOT_AVAILABLE),
            p.skills,
            result.match_score,
        );
    }

    out.trim_end().to_string()
}

/// Render the random suggestions shown when nothing matched
pub fn fallback_text(records: &[ProfessionRecord]) -> String {
    if records.is_empty() {
        return "No matching professions found, and the catalog is empty.".to_string();
    }

    let mut out = String::from("No exact matches. Try these professions:\n\n");

    for p in records {
        let _ = write!(
            out,
            "• {} ({})\n   {}\n   Salary: {}\n\n",
            p.name,
            p.category_or_default(),
            p.description,
            p.salary_range.as_deref().unwrap_or(NOT_AVAILABLE),
        );
    }

    out.trim_end().to_string()
}

pub fn categories_text(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No profession categories yet.".to_string();
    }

    let list: Vec<String> = categories.iter().map(|c| format!("• {}", c)).collect();
    format!("Profession categories:\n\n{}", list.join("\n"))
}
