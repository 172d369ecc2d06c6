use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ghactivity::config::{DEFAULT_API_URL, DEFAULT_LANGUAGE_TOP_N, DashboardConfig};
use ghactivity::elapsed::elapsed_string;
use ghactivity::github::GithubClient;
use ghactivity::svg::{self, Theme};
use ghactivity::view::CommitOrder;
use ghactivity::{ActivityClient, ActivitySource, Controller};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Name,
    Commits,
}

impl From<Order> for CommitOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Name => CommitOrder::ByName,
            Order::Commits => CommitOrder::ByCommits,
        }
    }
}

/// Fetch GitHub activity and render the dashboard stats card.
#[derive(Parser, Debug)]
#[command(name = "ghactivity", version)]
struct Args {
    /// Base URL of the dashboard backend
    #[arg(long, env = "GHACTIVITY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Collect straight from GitHub for this user instead of the backend
    /// (token read from GITHUB_TOKEN)
    #[arg(long, env = "GITHUB_USERNAME")]
    github_user: Option<String>,

    /// Languages to show; 0 shows all of them
    #[arg(long, default_value_t = DEFAULT_LANGUAGE_TOP_N)]
    top_languages: usize,

    #[arg(long, value_enum, default_value = "commits")]
    order: Order,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Where dark_mode.svg and light_mode.svg are written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the assembled view models as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> DashboardConfig {
        DashboardConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            language_top_n: (self.top_languages > 0).then_some(self.top_languages),
            commit_order: self.order.into(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    match &args.github_user {
        Some(user) => {
            let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
            info!(user = %user, "collecting directly from GitHub");
            let client = GithubClient::new(user.clone(), token, config.timeout)
                .context("Failed to build GitHub client")?;
            run(client, &config, &args).await
        }
        None => {
            let client = ActivityClient::new(&config).context("Failed to build HTTP client")?;
            info!(url = client.url(), "fetching from dashboard backend");
            run(client, &config, &args).await
        }
    }
}

async fn run<S: ActivitySource>(source: S, config: &DashboardConfig, args: &Args) -> Result<()> {
    let controller = Controller::start(source).await;

    if let Some(message) = controller.error_message() {
        bail!("Error loading GitHub activity: {message}");
    }

    let view = controller
        .snapshot(&config.view_options())
        .context("No activity data after a successful fetch")?;

    let summary = &view.summary;
    info!(
        repositories = summary.total_repositories,
        commits = summary.total_commits,
        languages = summary.distinct_languages,
        "dashboard assembled"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    let updated = elapsed_string(view.updated_at, Utc::now());
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    for theme in [Theme::Dark, Theme::Light] {
        let path = args.out_dir.join(theme.file_name());
        fs::write(&path, svg::generate_svg(&view, &updated, theme))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote stats card");
    }

    Ok(())
}
