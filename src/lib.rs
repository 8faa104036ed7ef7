//! Job search assistant: builds search API requests from user filters,
//! normalizes the listings that come back, and optionally scores a resume
//! against a chosen listing.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod render;
pub mod resume;
pub mod search;
pub mod session;
pub mod text;

pub use credentials::{CredentialSource, Credentials, EnvCredentials};
pub use error::SearchError;
pub use models::{JobRecord, Remoteness, Source};
pub use search::{AdzunaClient, JobSource, SearchFilters, SearchOutcome};
pub use session::SearchSession;
