mod config;
mod output;
mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use client::poller::Poller;
use client::submit::SUBMIT_FAILED_MESSAGE;
use client::{ApiError, ContestApi, HttpClient, NewSubmission, ProblemApi, SubmissionApi, submit};
use common::problem::filter_by_difficulty;
use common::{ContestFilter, ContestStatus, Difficulty, Submission, SubmissionId};

use crate::watch::follow;

#[derive(Parser)]
#[command(name = "codehire", version, about = "Submit solutions and follow judge results")]
struct Cli {
    /// API base URL, overriding the config file.
    #[arg(long, global = true, env = "CODEHIRE_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token, overriding the config file.
    #[arg(long, global = true, env = "CODEHIRE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a solution.
    Submit {
        #[arg(long)]
        problem: String,
        #[arg(long, short)]
        language: String,
        #[arg(long)]
        contest: Option<String>,
        /// Source file; reads stdin when omitted or "-".
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// Follow the judge until a final verdict.
        #[arg(long, short)]
        watch: bool,
    },
    /// Show one submission.
    Status {
        id: String,
        #[arg(long, short)]
        watch: bool,
    },
    /// List your submissions for a problem.
    History {
        #[arg(long)]
        problem: String,
    },
    /// List problems in the catalogue.
    Problems {
        #[arg(long, value_enum)]
        difficulty: Option<DifficultyArg>,
    },
    /// Show one problem statement.
    Problem { id: String },
    /// List contests, newest first.
    Contests {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Show a contest and its problems.
    Contest { id: String },
    /// Register for a contest.
    Register { contest: String },
    /// Show a contest scoreboard.
    Scoreboard { contest: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Upcoming,
    Running,
    Finished,
}

impl From<FilterArg> for ContestFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => ContestFilter::All,
            FilterArg::Upcoming => ContestFilter::Only(ContestStatus::Upcoming),
            FilterArg::Running => ContestFilter::Only(ContestStatus::Running),
            FilterArg::Finished => ContestFilter::Only(ContestStatus::Finished),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config::ClientAppConfig::load().context("Failed to load config")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    }
    info!(base_url = %config.api.base_url, "Using API");

    let http = Arc::new(HttpClient::new(&config.api).context("Failed to build HTTP client")?);
    let poller = Poller::from_config(http.clone(), &config.poll);

    match cli.command {
        Command::Submit {
            problem,
            language,
            contest,
            file,
            watch,
        } => {
            let code = read_source(file).await?;
            let mut request = NewSubmission::new(problem, code, language);
            request.contest_id = contest;

            let id = match submit(http.as_ref(), &request).await {
                Ok(id) => id,
                Err(e) => bail!(e.user_message_or(SUBMIT_FAILED_MESSAGE)),
            };
            println!("Submitted {}", console::style(&id).cyan());

            if watch {
                follow(&poller, id, interrupted()).await?;
            }
        }
        Command::Status { id, watch } => {
            let id = SubmissionId::new(id);
            if watch {
                follow(&poller, id, interrupted()).await?;
            } else {
                let record = http.get_submission(&id).await.map_err(user_error)?;
                output::print_submission(&Submission::from(record));
            }
        }
        Command::History { problem } => {
            let records = http.list_submissions(&problem).await.map_err(user_error)?;
            output::print_history(records);
        }
        Command::Problems { difficulty } => {
            let problems = http.list_problems().await.map_err(user_error)?;
            let shown = filter_by_difficulty(&problems, difficulty.map(Difficulty::from));
            output::print_problems(&shown);
        }
        Command::Problem { id } => {
            let problem = http.get_problem(&id).await.map_err(user_error)?;
            output::print_problem(&problem);
        }
        Command::Contests { filter } => {
            let contests = http.list_contests().await.map_err(user_error)?;
            let now = chrono::Utc::now();
            let shown = ContestFilter::from(filter).apply(&contests, now);
            output::print_contests(&shown, now);
        }
        Command::Contest { id } => {
            let detail = http.get_contest(&id).await.map_err(user_error)?;
            output::print_contest(&detail, chrono::Utc::now());
        }
        Command::Register { contest } => {
            let message = http.register_for_contest(&contest).await.map_err(user_error)?;
            println!("{}", console::style(message).green());
        }
        Command::Scoreboard { contest } => {
            let rows = http.get_scoreboard(&contest).await.map_err(user_error)?;
            output::print_scoreboard(&rows);
        }
    }

    Ok(())
}

fn user_error(e: ApiError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}

/// Resolves on Ctrl+C. Only awaited while following a submission.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn read_source(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut code = String::new();
            tokio::io::stdin()
                .read_to_string(&mut code)
                .await
                .context("Failed to read source from stdin")?;
            Ok(code)
        }
    }
}
