pub mod description;
pub mod posting;

pub use description::{collapse_whitespace, split_description, PREVIEW_CHARS};
pub use posting::{extract_posting_text, PostingFetcher};
