use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use skillscope::cache::{CacheStorage, NoopStorage, ResponseCache, SqliteStorage};
use skillscope::career::client::HttpTransport;
use skillscope::career::resilient::{FetchOutcome, ResilientClient};
use skillscope::career::services::CareerServices;
use skillscope::config::Config;
use skillscope::matching;
use skillscope::stubs::{catalog, StubOptions, StubTable};

#[derive(Parser, Debug)]
#[command(name = "skillscope")]
#[command(about = "Career guidance from your skills, resilient to a flaky backend")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/skillscope/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Run the combined analysis: matches, gaps, salary impact, curriculum, insights
  Analyze {
    /// Skills you already have, comma separated
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// List jobs your skills fully qualify for
  Match {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// Score every catalog job against your skills
  Score {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// Recommend the highest-impact skills to learn next
  Gaps {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// Estimate the salary impact of learning one new skill
  Salary {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
    /// The skill you are considering
    #[arg(long)]
    new_skill: String,
  },
  /// Generate a learning path for skills you want to pick up
  Curriculum {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// Market observations relevant to your skill set
  Insights {
    #[arg(value_delimiter = ',')]
    skills: Vec<String>,
  },
  /// Ask the career coach a question
  Chat {
    question: String,
    #[arg(long, default_value = "career-coach")]
    role: String,
  },
  /// Generate a course outline for a target skill
  Course {
    skill: String,
    #[arg(long)]
    level: Option<String>,
  },
  /// Drop all cached backend responses
  ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let config = Config::load(args.config.as_deref())?;

  if config.cache.enabled {
    let storage = match &config.cache.path {
      Some(path) => SqliteStorage::open_at(path)?,
      None => SqliteStorage::open()?,
    };
    run(args.command, &config, storage).await
  } else {
    run(args.command, &config, NoopStorage).await
  }
}

async fn run<S: CacheStorage>(command: Command, config: &Config, storage: S) -> Result<()> {
  let transport = HttpTransport::new(
    &config.backend.url,
    Duration::from_secs(config.backend.timeout_secs),
  )?;

  let cache = ResponseCache::new(storage).with_max_age(
    config
      .cache
      .max_age_hours
      .map(|hours| chrono::Duration::hours(hours as i64)),
  );

  let options = StubOptions {
    guarantee_non_empty: config.stubs.guarantee_non_empty,
  };

  let client = ResilientClient::new(transport, cache, StubTable::with_defaults(options))
    .with_retry(
      config.backend.max_attempts,
      Duration::from_millis(config.backend.backoff_ms),
    );

  let services = CareerServices::new(client, config.backend.enabled, options);

  match command {
    Command::Analyze { skills } => {
      let analysis = services.full_analysis(&skills).await?;
      if analysis.degraded {
        low_data_notice();
      }
      print_json(&analysis)
    }
    Command::Match { skills } => print_outcome(services.match_jobs(&skills).await?),
    Command::Score { skills } => print_scores(&skills),
    Command::Gaps { skills } => print_outcome(services.gap_analysis(&skills).await?),
    Command::Salary { skills, new_skill } => {
      print_outcome(services.salary_impact(&skills, &new_skill).await?)
    }
    Command::Curriculum { skills } => print_outcome(services.curriculum(&skills).await?),
    Command::Insights { skills } => print_outcome(services.market_insights(&skills).await?),
    Command::Chat { question, role } => {
      print_outcome(services.coach_chat(&role, &serde_json::Value::Null, &question).await?)
    }
    Command::Course { skill, level } => {
      print_outcome(services.generate_course(&skill, level.as_deref()).await?)
    }
    Command::ClearCache => {
      services.clear_cache()?;
      println!("cache cleared");
      Ok(())
    }
  }
}

/// Score the local catalog the way the UI scores live postings.
fn print_scores(skills: &[String]) -> Result<()> {
  let user_skills = matching::normalize_skills(skills);
  for job in catalog::job_catalog() {
    let score = matching::job_match_score(&user_skills, &job);
    let category = matching::match_category(score);
    println!(
      "{:5.2}  {:32} {}",
      score,
      job.title,
      category.description()
    );
  }
  Ok(())
}

fn print_outcome<T: Serialize>(outcome: FetchOutcome<T>) -> Result<()> {
  if outcome.degraded() {
    low_data_notice();
  }
  print_json(&outcome.data)
}

fn print_json<T: Serialize>(data: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(data)?);
  Ok(())
}

fn low_data_notice() {
  eprintln!("note: backend unavailable; showing cached or locally computed results");
}
