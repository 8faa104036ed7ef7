pub mod extract;
pub mod llm;
pub mod scorer;

pub use extract::{extract_resume_text, DocumentKind};
pub use llm::{LlmClient, LlmError};
pub use scorer::{parse_score, render_prompt, ResumeScorer, ScoreError};
