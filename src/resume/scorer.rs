use secrecy::SecretString;
use thiserror::Error;
use tracing::info;

use crate::config::LlmConfig;
use crate::resume::llm::{LlmClient, LlmError};

const ADVISOR_SYSTEM: &str = "You are a strict but helpful career advisor.";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Resume scoring is not configured (set OPENAI_API_KEY)")]
    Unavailable,

    #[error("Please provide your {0}")]
    EmptyInput(&'static str),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Fill the advisor prompt in a single pass. Blank notes read as "None";
/// braces inside any of the inputs are copied through untouched.
pub fn render_prompt(resume: &str, job_description: &str, notes: Option<&str>) -> String {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("None");
    format!(
        "\
Evaluate how well the resume matches the job description.
1) Give an overall match score from 1 to 10.
2) List 5 specific, actionable suggestions for improving the resume for THIS job.
3) Identify missing keywords/skills based on the job description.
4) Propose 2-3 quantified bullets the candidate could add, tailored to the job description.

EXTRA NOTES FROM CANDIDATE (optional):
{notes}

RESUME:
{resume}

JOB DESCRIPTION:
{job_description}

Respond in this exact format:

Score: <number>/10

Suggestions:
- ...

Missing Keywords:
- ...

New Bullet Ideas:
- ...",
        notes = notes,
        resume = resume.trim(),
        job_description = job_description.trim(),
    )
}

/// Scores a resume against a job description with one LLM call
pub struct ResumeScorer {
    llm: Option<LlmClient>,
}

impl ResumeScorer {
    /// Scorer backed by `config`; unavailable when no API key is set.
    pub fn new(config: &LlmConfig) -> Result<Self, ScoreError> {
        let llm = match &config.api_key {
            Some(key) => Some(LlmClient::new(config.clone(), key.clone())?),
            None => None,
        };
        Ok(Self { llm })
    }

    pub fn with_key(config: LlmConfig, api_key: SecretString) -> Result<Self, ScoreError> {
        Ok(Self {
            llm: Some(LlmClient::new(config, api_key)?),
        })
    }

    pub fn is_available(&self) -> bool {
        self.llm.is_some()
    }

    /// Returns the model's free-text feedback: score, suggestions, missing
    /// keywords and bullet ideas.
    pub async fn score(
        &self,
        resume: &str,
        job_description: &str,
        notes: Option<&str>,
    ) -> Result<String, ScoreError> {
        if resume.trim().is_empty() {
            return Err(ScoreError::EmptyInput("resume"));
        }
        if job_description.trim().is_empty() {
            return Err(ScoreError::EmptyInput("job description"));
        }
        let llm = self.llm.as_ref().ok_or(ScoreError::Unavailable)?;

        info!("Scoring resume with {}", llm.model());
        let prompt = render_prompt(resume, job_description, notes);
        Ok(llm.complete(&prompt, ADVISOR_SYSTEM).await?)
    }
}

/// The `Score: N/10` value from a feedback text, if the model followed the
/// format.
pub fn parse_score(feedback: &str) -> Option<u8> {
    feedback.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("Score:")?;
        let number = rest.trim().split('/').next()?.trim();
        number.parse::<u8>().ok().filter(|n| (1..=10).contains(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_inputs() {
        let prompt = render_prompt("  Jane Doe, SQL  ", "Data Analyst at Acme", None);
        assert!(prompt.contains("RESUME:\nJane Doe, SQL\n"));
        assert!(prompt.contains("JOB DESCRIPTION:\nData Analyst at Acme\n"));
        assert!(prompt.contains("(optional):\nNone\n"));
    }

    #[test]
    fn test_prompt_does_not_expand_placeholders_in_resume() {
        let prompt = render_prompt("I wrote {notes} once", "JD", Some("focus on SQL"));
        assert!(prompt.contains("I wrote {notes} once"));
        assert!(prompt.contains("focus on SQL"));
    }

    #[test]
    fn test_placeholders_in_notes_are_literal() {
        let prompt = render_prompt("REAL RESUME", "REAL JD", Some("see {resume} and {job_description} above"));
        assert!(prompt.contains("(optional):\nsee {resume} and {job_description} above\n"));
        assert!(prompt.contains("RESUME:\nREAL RESUME\n"));
        assert!(prompt.contains("JOB DESCRIPTION:\nREAL JD\n"));
        assert_eq!(prompt.matches("REAL RESUME").count(), 1);
    }

    #[tokio::test]
    async fn test_empty_resume_rejected() {
        let scorer = ResumeScorer::new(&LlmConfig::default()).unwrap();
        let err = scorer.score("   ", "Some job", None).await.unwrap_err();
        assert!(matches!(err, ScoreError::EmptyInput("resume")));
    }

    #[tokio::test]
    async fn test_unavailable_without_key() {
        let scorer = ResumeScorer::new(&LlmConfig::default()).unwrap();
        assert!(!scorer.is_available());
        let err = scorer.score("resume", "job", None).await.unwrap_err();
        assert!(matches!(err, ScoreError::Unavailable));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("Score: 7/10\n\nSuggestions:\n- ..."), Some(7));
        assert_eq!(parse_score("  Score: 10 / 10"), Some(10));
        assert_eq!(parse_score("Score: eleven"), None);
        assert_eq!(parse_score("no score here"), None);
    }
}
