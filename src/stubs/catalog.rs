//! Fixed in-memory catalogs backing the stub computations.
//!
//! Everything here is static reference data: the job board snapshot, the
//! ranked list of skills worth learning, salary impact tables, learning
//! resources and the market insight pool.

use chrono::{DateTime, TimeZone, Utc};

use crate::career::types::{
  GapImportance, JobOpportunity, LearningResource, SalaryRange, SkillGap,
};

fn posted(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, day, 0, 0, 0)
    .single()
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn rwf(min: u64, max: u64) -> SalaryRange {
  SalaryRange {
    min,
    max,
    currency: "RWF".to_string(),
  }
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

/// Snapshot of the job board used when the backend is unreachable.
///
/// Required skills are normalized lowercase tokens; the first entry is the
/// entry-level posting served as the guaranteed demo result.
pub fn job_catalog() -> Vec<JobOpportunity> {
  vec![
    JobOpportunity {
      id: 1,
      title: "Junior Web Developer".to_string(),
      company: "kLab".to_string(),
      location: "Kigali".to_string(),
      industry: "Technology".to_string(),
      salary_range: rwf(150_000, 300_000),
      required_skills: strings(&["html", "css", "javascript"]),
      preferred_skills: Some(strings(&["react"])),
      experience_level: "entry".to_string(),
      job_type: "full-time".to_string(),
      is_remote: false,
      posted_date: posted(2024, 1, 15),
    },
    JobOpportunity {
      id: 2,
      title: "Frontend Developer (React)".to_string(),
      company: "Fintech Co".to_string(),
      location: "Kigali".to_string(),
      industry: "Technology".to_string(),
      salary_range: rwf(400_000, 600_000),
      required_skills: strings(&["html", "css", "javascript", "react", "git"]),
      preferred_skills: Some(strings(&["typescript"])),
      experience_level: "mid".to_string(),
      job_type: "full-time".to_string(),
      is_remote: false,
      posted_date: posted(2024, 1, 12),
    },
    JobOpportunity {
      id: 3,
      title: "Backend Developer (Python)".to_string(),
      company: "SOLVIT Africa".to_string(),
      location: "Kigali".to_string(),
      industry: "Technology".to_string(),
      salary_range: rwf(500_000, 800_000),
      required_skills: strings(&["python", "fastapi", "sql", "docker", "git"]),
      preferred_skills: None,
      experience_level: "mid".to_string(),
      job_type: "full-time".to_string(),
      is_remote: true,
      posted_date: posted(2024, 1, 8),
    },
    JobOpportunity {
      id: 4,
      title: "Full-stack Developer".to_string(),
      company: "Equity Bank Rwanda".to_string(),
      location: "Kigali".to_string(),
      industry: "Banking".to_string(),
      salary_range: rwf(600_000, 1_000_000),
      required_skills: strings(&[
        "html", "css", "javascript", "react", "python", "fastapi", "sql", "git",
      ]),
      preferred_skills: Some(strings(&["docker"])),
      experience_level: "senior".to_string(),
      job_type: "full-time".to_string(),
      is_remote: true,
      posted_date: posted(2024, 1, 10),
    },
    JobOpportunity {
      id: 5,
      title: "Data Analyst".to_string(),
      company: "Bank of Kigali".to_string(),
      location: "Kigali".to_string(),
      industry: "Banking".to_string(),
      salary_range: rwf(400_000, 700_000),
      required_skills: strings(&["python", "pandas", "numpy", "sql", "powerbi"]),
      preferred_skills: Some(strings(&["statistics"])),
      experience_level: "mid".to_string(),
      job_type: "full-time".to_string(),
      is_remote: false,
      posted_date: posted(2024, 1, 10),
    },
    JobOpportunity {
      id: 6,
      title: "Digital Marketing Specialist".to_string(),
      company: "Rwanda Tourism Board".to_string(),
      location: "Kigali".to_string(),
      industry: "Tourism".to_string(),
      salary_range: rwf(300_000, 500_000),
      required_skills: strings(&["seo", "sem", "social media marketing", "google analytics"]),
      preferred_skills: Some(strings(&["copywriting"])),
      experience_level: "mid".to_string(),
      job_type: "full-time".to_string(),
      is_remote: true,
      posted_date: posted(2024, 1, 12),
    },
    JobOpportunity {
      id: 7,
      title: "Fintech Product Manager".to_string(),
      company: "MTN Mobile Money".to_string(),
      location: "Kigali".to_string(),
      industry: "FinTech".to_string(),
      salary_range: rwf(800_000, 1_500_000),
      required_skills: strings(&["product management", "fintech", "agile", "data analysis"]),
      preferred_skills: None,
      experience_level: "senior".to_string(),
      job_type: "full-time".to_string(),
      is_remote: false,
      posted_date: posted(2024, 1, 5),
    },
  ]
}

fn resource(title: &str, provider: &str, url: &str, cost: &str) -> LearningResource {
  LearningResource {
    title: title.to_string(),
    provider: provider.to_string(),
    url: url.to_string(),
    cost: cost.to_string(),
  }
}

/// Ranked candidates for gap analysis. Order is the recommendation priority.
pub fn gap_candidates() -> Vec<SkillGap> {
  vec![
    SkillGap {
      skill: "react".to_string(),
      importance: GapImportance::High,
      time_to_learn: "4-6 weeks".to_string(),
      explanation: "Unlock modern frontend roles in Kigali".to_string(),
      potential_salary_increase_rwf: 300_000,
      unlocked_opportunities: 12,
      learning_resources: vec![
        resource(
          "kLab Web Development Bootcamp",
          "kLab",
          "https://klab.rw/",
          "free",
        ),
        resource(
          "React Complete Course 2024",
          "YouTube",
          "https://www.youtube.com",
          "free",
        ),
      ],
    },
    SkillGap {
      skill: "git".to_string(),
      importance: GapImportance::Critical,
      time_to_learn: "1-2 weeks".to_string(),
      explanation: "Collaboration and workflows required by most employers".to_string(),
      potential_salary_increase_rwf: 50_000,
      unlocked_opportunities: 15,
      learning_resources: vec![resource(
        "Git and GitHub for Beginners",
        "freeCodeCamp",
        "https://www.freecodecamp.org/",
        "free",
      )],
    },
    SkillGap {
      skill: "python".to_string(),
      importance: GapImportance::High,
      time_to_learn: "6-8 weeks".to_string(),
      explanation: "Backend and data roles both ask for it".to_string(),
      potential_salary_increase_rwf: 250_000,
      unlocked_opportunities: 9,
      learning_resources: vec![resource(
        "SOLVIT Africa Python Track",
        "SOLVIT Africa",
        "https://solvit.africa/",
        "free",
      )],
    },
    SkillGap {
      skill: "sql".to_string(),
      importance: GapImportance::Medium,
      time_to_learn: "3-4 weeks".to_string(),
      explanation: "Every data and backend role queries a database".to_string(),
      potential_salary_increase_rwf: 180_000,
      unlocked_opportunities: 8,
      learning_resources: vec![resource(
        "Google Data Analytics Certificate",
        "Coursera",
        "https://coursera.org",
        "paid",
      )],
    },
    SkillGap {
      skill: "powerbi".to_string(),
      importance: GapImportance::Medium,
      time_to_learn: "3-4 weeks".to_string(),
      explanation: "Business intelligence reporting is in demand at banks".to_string(),
      potential_salary_increase_rwf: 150_000,
      unlocked_opportunities: 4,
      learning_resources: vec![resource(
        "Power BI Full Course",
        "YouTube",
        "https://www.youtube.com",
        "free",
      )],
    },
    SkillGap {
      skill: "docker".to_string(),
      importance: GapImportance::Medium,
      time_to_learn: "2-3 weeks".to_string(),
      explanation: "Deployment skills set senior candidates apart".to_string(),
      potential_salary_increase_rwf: 120_000,
      unlocked_opportunities: 5,
      learning_resources: vec![resource(
        "Docker Tutorial for Beginners",
        "freeCodeCamp",
        "https://www.freecodecamp.org/",
        "free",
      )],
    },
  ]
}

/// Base salary impact estimate for learning one skill, in RWF.
pub fn base_salary_impact(skill: &str) -> u64 {
  match skill {
    "react" => 200_000,
    "python" => 180_000,
    "typescript" => 160_000,
    "powerbi" => 150_000,
    "fastapi" => 130_000,
    "sql" => 120_000,
    "docker" => 100_000,
    "git" => 50_000,
    _ => 25_000,
  }
}

/// Bonus applied when the prerequisite for a skill is already held.
///
/// Returns (prerequisite, bonus). The canonical pair: react builds on
/// javascript, so knowing javascript raises the react estimate to 300k.
pub fn prerequisite_bonus(skill: &str) -> Option<(&'static str, u64)> {
  match skill {
    "react" => Some(("javascript", 100_000)),
    "fastapi" => Some(("python", 70_000)),
    "powerbi" => Some(("sql", 50_000)),
    _ => None,
  }
}

pub const GENERIC_RESOURCE: &str = "https://www.freecodecamp.org/";

/// Curriculum lookup: (resource URL, project brief) for recognized skills.
pub fn curriculum_entry(skill: &str) -> Option<(&'static str, &'static str)> {
  match skill {
    "react" | "frontend" => Some((
      "https://klab.rw/",
      "Build a small React dashboard that fetches and renders live data",
    )),
    "python" | "data analysis" => Some((
      "https://solvit.africa/",
      "Automate a daily report with a small Python script",
    )),
    "sql" => Some((
      "https://www.freecodecamp.org/",
      "Model a two-table schema and answer questions with join queries",
    )),
    "git" => Some((
      "https://www.freecodecamp.org/",
      "Publish a project to a remote repository with a clean commit history",
    )),
    _ => None,
  }
}

/// Broad skill categories used to pick contextual market insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillCategory {
  Web,
  Data,
  Marketing,
  Fintech,
  Mobile,
  General,
}

pub fn skill_category(skill: &str) -> Option<SkillCategory> {
  match skill {
    "html" | "css" | "javascript" | "typescript" | "react" | "frontend" | "nextjs" => {
      Some(SkillCategory::Web)
    }
    "python" | "sql" | "pandas" | "numpy" | "powerbi" | "statistics" | "data analysis"
    | "excel" => Some(SkillCategory::Data),
    "seo" | "sem" | "social media marketing" | "google analytics" | "content marketing"
    | "copywriting" => Some(SkillCategory::Marketing),
    "fintech" | "mobile money" | "product management" | "agile" | "blockchain" => {
      Some(SkillCategory::Fintech)
    }
    "react native" | "flutter" | "swift" | "kotlin" | "firebase" => Some(SkillCategory::Mobile),
    _ => None,
  }
}

/// Pool of market observations, tagged by the category they speak to.
pub const INSIGHT_POOL: &[(SkillCategory, &str)] = &[
  (
    SkillCategory::Web,
    "Front-end roles are growing in Rwanda with demand for React and TypeScript.",
  ),
  (
    SkillCategory::Web,
    "70% of digital jobs in Rwanda require web development skills.",
  ),
  (
    SkillCategory::Web,
    "Pay growth is highest for candidates who can ship production-ready UI.",
  ),
  (
    SkillCategory::Data,
    "Data analysis skills command the highest salary premiums in the banking sector.",
  ),
  (
    SkillCategory::Data,
    "Employers increasingly expect dashboards, not spreadsheets, as deliverables.",
  ),
  (
    SkillCategory::Marketing,
    "Tourism and consumer brands are shifting budgets to digital channels.",
  ),
  (
    SkillCategory::Fintech,
    "The FinTech sector is growing 45% annually with high salary premiums.",
  ),
  (
    SkillCategory::Mobile,
    "Mobile-first development is crucial for Rwanda market penetration.",
  ),
  (
    SkillCategory::General,
    "Knowledge of Git and collaborative workflows is expected for junior roles.",
  ),
  (
    SkillCategory::General,
    "Remote work availability increased 200% post-2020.",
  ),
  (
    SkillCategory::General,
    "Shipping small finished projects counts for more than certificates in local hiring.",
  ),
];

/// Minimum number of insights the market-insights stub returns.
pub const MIN_INSIGHTS: usize = 3;

pub const COACH_NEXT_STEP_ANSWER: &str = "Based on your analysis, learn React next to unlock \
  400-600k RWF roles. Start with components, hooks, and a mini CRUD app.";

pub const COACH_DEFAULT_ANSWER: &str = "Focus on one high-ROI skill, schedule 45 minutes daily, \
  and ship one small project per week.";

pub const COACH_FOLLOW_UPS: &[&str] = &[
  "Which skill unlocks the most jobs?",
  "Give me a 2-week plan.",
  "How do I build a portfolio project?",
];
