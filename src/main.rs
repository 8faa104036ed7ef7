use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use applify::config::{self, AppConfig};
use applify::render::{job_card, page_header};
use applify::resume::{extract_resume_text, parse_score, ResumeScorer};
use applify::search::{AdzunaClient, JobSource, SearchFilters, SearchForm};
use applify::text::{PostingFetcher, PREVIEW_CHARS};
use applify::{EnvCredentials, JobRecord, SearchSession};

#[derive(Debug, Parser)]
#[command(name = "applify", version, about = "Find roles. Apply smarter.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search listings and print them as cards
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Walk forward through this many pages
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Fetch the posting page when the listing text is short and print it whole
        #[arg(long)]
        full: bool,
        /// Print normalized records as JSON instead of cards
        #[arg(long)]
        json: bool,
        /// Print the request that would be sent and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Check connectivity and credentials against the search API
    Ping {
        #[arg(long, default_value = "us")]
        country: String,
    },
    /// Score a resume against one listing from a search
    Score {
        #[command(flatten)]
        filters: FilterArgs,
        /// Resume file (.pdf, .docx or .txt)
        #[arg(long)]
        resume: String,
        /// 1-based position of the listing in the search results
        #[arg(long, default_value_t = 1)]
        job: usize,
        /// Anything specific the feedback should focus on
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Filter values are taken as plain strings so malformed input degrades to
/// defaults instead of aborting.
#[derive(Debug, Args)]
struct FilterArgs {
    /// Job title / keywords
    #[arg(long, short, default_value = "")]
    query: String,
    /// City, state or country
    #[arg(long, short, default_value = "")]
    location: String,
    #[arg(long, default_value = "us")]
    country: String,
    #[arg(long, default_value = "")]
    results_per_page: String,
    #[arg(long, default_value = "")]
    page: String,
    /// relevance or date
    #[arg(long, default_value = "relevance")]
    sort_by: String,
    #[arg(long, default_value = "")]
    salary_min: String,
    #[arg(long, default_value = "")]
    salary_max: String,
    /// Taxonomy slug, e.g. it-jobs
    #[arg(long, default_value = "")]
    category: String,
    /// Radius in miles
    #[arg(long, default_value = "")]
    distance: String,
    /// any, remote or onsite
    #[arg(long, default_value = "any")]
    remote: String,
}

impl FilterArgs {
    fn to_filters(&self) -> SearchFilters {
        SearchFilters::from_form(&SearchForm {
            query: self.query.clone(),
            location: self.location.clone(),
            country: self.country.clone(),
            results_per_page: self.results_per_page.clone(),
            page: self.page.clone(),
            sort_by: self.sort_by.clone(),
            salary_min: self.salary_min.clone(),
            salary_max: self.salary_max.clone(),
            category: self.category.clone(),
            distance: self.distance.clone(),
            remote: self.remote.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv_files();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    info!("💼 Applify - Find roles. Apply smarter.");

    let client = AdzunaClient::new(config.search.clone(), EnvCredentials::new())?;

    match cli.command {
        Command::Search {
            filters,
            pages,
            full,
            json,
            dry_run,
        } => run_search(client, filters.to_filters(), pages, full, json, dry_run).await,
        Command::Ping { country } => {
            let report = client.ping(&country).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Score {
            filters,
            resume,
            job,
            notes,
        } => run_score(&config, client, filters.to_filters(), &resume, job, notes.as_deref()).await,
    }
}

async fn run_search(
    client: AdzunaClient,
    filters: SearchFilters,
    pages: u32,
    full: bool,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        match client.build_request(&filters) {
            Ok(spec) => println!("GET {}\n{:#?}", spec.url, spec.params),
            Err(e) => println!("{e}"),
        }
        return Ok(());
    }

    let fetcher = PostingFetcher::new()?;
    let start_page = filters.effective_page();
    let country = filters.effective_country();
    let sort_by = filters.sort_by;

    let mut session = SearchSession::new(client);
    session.search_at(filters, start_page).await;

    for step in 0..pages.max(1) {
        if step > 0 {
            let before = session.page();
            session.next_page().await;
            if session.page() == before {
                break;
            }
        }

        if json {
            println!("{}", serde_json::to_string_pretty(session.jobs())?);
            continue;
        }

        println!("\n{}\n", page_header(session.page(), &country, sort_by.as_str()));
        if session.jobs().is_empty() {
            if let Some(reason) = session.last_diagnostic() {
                warn!("{}", reason);
            }
            println!("No results. Adjust the filters and search again.");
            break;
        }

        for (i, job) in session.jobs().iter().enumerate() {
            let description = if full {
                fetcher.best_description(&job.description, &job.apply_url).await
            } else {
                job.description.clone()
            };
            let limit = if full { usize::MAX } else { PREVIEW_CHARS };
            println!("{}", job_card(i + 1, job, &description, limit));
        }
    }

    Ok(())
}

async fn run_score(
    config: &AppConfig,
    client: AdzunaClient,
    filters: SearchFilters,
    resume_path: &str,
    job_index: usize,
    notes: Option<&str>,
) -> Result<()> {
    let scorer = ResumeScorer::new(&config.llm)?;
    if !scorer.is_available() {
        anyhow::bail!("LLM not initialized. Set OPENAI_API_KEY to score resumes.");
    }

    let bytes = tokio::fs::read(resume_path)
        .await
        .with_context(|| format!("Failed to read resume file {resume_path}"))?;
    let resume_text = extract_resume_text(resume_path, &bytes);
    if resume_text.trim().is_empty() {
        anyhow::bail!("Could not read any text from {resume_path}");
    }

    let jobs = client.search_jobs(&filters).await;
    let job: &JobRecord = jobs
        .get(job_index.saturating_sub(1))
        .with_context(|| format!("No listing #{job_index} in the search results ({} found)", jobs.len()))?;

    let fetcher = PostingFetcher::new()?;
    let job_description = fetcher.best_description(&job.description, &job.apply_url).await;

    info!("Scoring resume for: {} at {}", job.title, job.company_name);
    let feedback = scorer.score(&resume_text, &job_description, notes).await?;

    if let Some(score) = parse_score(&feedback) {
        info!("Match score: {}/10", score);
    }
    println!("📊 Match Score & Suggestions for {} at {}\n", job.title, job.company_name);
    println!("{feedback}");

    Ok(())
}
