//! Wire contract with the analysis backend.
//!
//! Every logical operation is one `Operation` variant with a fixed POST path
//! and a typed request/response pair. Stub dispatch and cache keying are both
//! keyed on the variant, never on path-substring matching.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Course, JobOpportunity, LearningPathItem, SkillGap};

/// Logical backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  MatchJobs,
  GapAnalysis,
  SalaryImpact,
  Curriculum,
  MarketInsights,
  CoachChat,
  GenerateCourse,
}

impl Operation {
  pub const ALL: [Operation; 7] = [
    Operation::MatchJobs,
    Operation::GapAnalysis,
    Operation::SalaryImpact,
    Operation::Curriculum,
    Operation::MarketInsights,
    Operation::CoachChat,
    Operation::GenerateCourse,
  ];

  /// Path suffix POSTed to the backend base URL
  pub fn path(self) -> &'static str {
    match self {
      Operation::MatchJobs => "/match-jobs",
      Operation::GapAnalysis => "/opportunity-gap-analysis",
      Operation::SalaryImpact => "/salary-impact-calculator",
      Operation::Curriculum => "/generate-curriculum",
      Operation::MarketInsights => "/market-insights",
      Operation::CoachChat => "/coach-chat",
      Operation::GenerateCourse => "/generate-course",
    }
  }
}

// ============================================================================
// Request bodies
// ============================================================================

/// Request body shared by match-jobs, gap-analysis and market-insights
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsRequest {
  #[serde(default)]
  pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryImpactRequest {
  #[serde(default)]
  pub skills: Vec<String>,
  #[serde(default)]
  pub new_skill: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumRequest {
  #[serde(default)]
  pub skills_to_learn: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachChatRequest {
  #[serde(default)]
  pub role: String,
  /// Prior analysis the coach may ground its answer in; opaque to this layer
  #[serde(default)]
  pub analysis: Value,
  #[serde(default)]
  pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
  #[serde(default)]
  pub target_skill: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub level: Option<String>,
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchJobsResponse {
  pub qualified_jobs: Vec<JobOpportunity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysisResponse {
  pub analysis: GapAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
  pub recommendations: Vec<SkillGap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryImpactResponse {
  pub potential_salary_increase_rwf: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumResponse {
  pub curriculum: Curriculum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
  pub learning_path: Vec<LearningPathItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInsightsResponse {
  pub insights: InsightList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightList {
  pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachChatResponse {
  pub chat: CoachReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachReply {
  pub answer: String,
  pub follow_ups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResponse {
  pub course: Course,
}
