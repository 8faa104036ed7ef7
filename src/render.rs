//! Plain-text job cards for the terminal.

use std::fmt::Write;

use crate::models::JobRecord;
use crate::text::split_description;

/// `$50,000–$90,000`, `Up to $90,000`, `From $50,000`, or `—`.
pub fn salary_display(min: Option<i64>, max: Option<i64>) -> String {
    let min = min.filter(|v| *v > 0);
    let max = max.filter(|v| *v > 0);
    match (min, max) {
        (Some(lo), Some(hi)) => format!("${}–${}", thousands(lo), thousands(hi)),
        (None, Some(hi)) => format!("Up to ${}", thousands(hi)),
        (Some(lo), None) => format!("From ${}", thousands(lo)),
        (None, None) => "—".to_string(),
    }
}

pub fn posted_display(posted_date: &str) -> String {
    format!("Job Posted on {posted_date}")
}

/// One card: header, badges, preview of the description and the apply link.
pub fn job_card(index: usize, job: &JobRecord, description: &str, preview_chars: usize) -> String {
    let (preview, remainder) = split_description(description, preview_chars);
    let mut card = String::new();

    let _ = writeln!(card, "{}. {}", index, job.title);
    let _ = writeln!(card, "   {} · {}", job.company_name, job.category_label);
    let _ = writeln!(
        card,
        "   📍 {} | 🕒 {} | 🏡 {} | 📅 {} | 💰 {}",
        job.location_display,
        job.contract_type,
        job.remoteness,
        posted_display(&job.posted_date),
        salary_display(job.salary_min, job.salary_max)
    );
    if !preview.is_empty() {
        let _ = writeln!(card, "   {preview}");
    }
    if !remainder.is_empty() {
        let _ = writeln!(
            card,
            "   ({} more characters, use --full to show everything)",
            remainder.chars().count()
        );
    }
    let _ = writeln!(card, "   Apply: {}", job.apply_url);
    card
}

pub fn page_header(page: u32, country: &str, sort_by: &str) -> String {
    format!("Page {page} • Country: {country} • Sort: {sort_by}")
}

fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::normalize::normalize_job;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_salary_display() {
        assert_eq!(salary_display(Some(50_000), Some(90_000)), "$50,000–$90,000");
        assert_eq!(salary_display(None, Some(90_000)), "Up to $90,000");
        assert_eq!(salary_display(Some(1_250_000), Some(0)), "From $1,250,000");
        assert_eq!(salary_display(None, None), "—");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(123456789), "123,456,789");
    }

    #[test]
    fn test_card_mentions_remainder() {
        let job = normalize_job(
            json!({"title": "Analyst (Remote)", "salary_min": 60000, "created": "2024-01-02T00:00:00Z"}),
            Utc::now(),
        )
        .unwrap();
        let description = "word ".repeat(400);
        let card = job_card(1, &job, &description, 100);
        assert!(card.starts_with("1. Analyst (Remote)"));
        assert!(card.contains("Remote / Hybrid"));
        assert!(card.contains("Job Posted on 2024-01-02"));
        assert!(card.contains("From $60,000"));
        assert!(card.contains("more characters"));
        assert!(card.contains("Apply: #"));
    }
}
