use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Salary band in whole currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
  pub min: u64,
  pub max: u64,
  pub currency: String,
}

/// A job posting from the opportunity catalog.
///
/// The match score against a user's skill set is derived on demand
/// (see `matching::job_match_score`) and never stored on the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpportunity {
  pub id: u32,
  pub title: String,
  pub company: String,
  pub location: String,
  pub industry: String,
  #[serde(rename = "salaryRange")]
  pub salary_range: SalaryRange,
  pub required_skills: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub preferred_skills: Option<Vec<String>>,
  #[serde(rename = "experienceLevel")]
  pub experience_level: String, // "entry", "mid", "senior"
  #[serde(rename = "jobType")]
  pub job_type: String,
  #[serde(rename = "isRemote")]
  pub is_remote: bool,
  #[serde(rename = "postedDate")]
  pub posted_date: DateTime<Utc>,
}

/// How urgently a missing skill should be addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapImportance {
  Critical,
  High,
  Medium,
  Low,
}

/// Somewhere to actually learn a recommended skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
  pub title: String,
  pub provider: String,
  pub url: String,
  pub cost: String, // "free" or "paid"
}

/// A recommendation to close one skill gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
  pub skill: String,
  pub importance: GapImportance,
  pub time_to_learn: String, // e.g. "4-6 weeks"
  pub explanation: String,
  pub potential_salary_increase_rwf: u64,
  pub unlocked_opportunities: u32,
  pub learning_resources: Vec<LearningResource>,
}

/// One step of a generated learning path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathItem {
  pub skill: String,
  pub resource: String,
  pub project: String,
}

/// A single lesson inside a course module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
  pub title: String,
  pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
  pub title: String,
  pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProject {
  pub title: String,
  pub brief: String,
}

/// A generated course outline for one target skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub title: String,
  pub duration: String,
  pub modules: Vec<CourseModule>,
  pub project: CourseProject,
}
