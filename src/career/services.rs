//! Service facade consumed by the UI layer.
//!
//! One method per logical operation, each a thin named wrapper over the
//! resilient client. When the backend is disabled by configuration the
//! methods call the local stubs directly; that is a deliberate mode, not a
//! degradation, and is reported as the stub-only response source.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStorage;
use crate::matching;
use crate::stubs::{self, StubOptions};

use super::client::{ApiError, Transport};
use super::resilient::{FetchOutcome, ResilientClient};
use super::types::{JobOpportunity, LearningPathItem, SkillGap};
use super::wire::{
  CoachChatRequest, CoachChatResponse, CourseRequest, CourseResponse, CurriculumRequest,
  CurriculumResponse, GapAnalysisResponse, MarketInsightsResponse, MatchJobsResponse, Operation,
  SalaryImpactRequest, SalaryImpactResponse, SkillsRequest,
};

/// Entry point for everything the UI asks of the analysis backend.
pub struct CareerServices<T: Transport, S: CacheStorage> {
  client: ResilientClient<T, S>,
  use_backend: bool,
  stub_options: StubOptions,
}

/// Aggregate produced by [`CareerServices::full_analysis`].
///
/// `degraded` is the OR of every step's fallback status: true when any part
/// of the analysis was served from cache or a stub instead of the backend.
#[derive(Debug, Clone, Serialize)]
pub struct FullAnalysis {
  pub qualified_jobs: Vec<JobOpportunity>,
  pub recommendations: Vec<SkillGap>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub salary_impact: Option<SalaryProjection>,
  pub learning_path: Vec<LearningPathItem>,
  pub insights: Vec<String>,
  pub degraded: bool,
}

/// Salary impact of the top recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryProjection {
  pub skill: String,
  pub potential_salary_increase_rwf: u64,
}

impl<T: Transport, S: CacheStorage> CareerServices<T, S> {
  pub fn new(client: ResilientClient<T, S>, use_backend: bool, stub_options: StubOptions) -> Self {
    Self {
      client,
      use_backend,
      stub_options,
    }
  }

  /// Jobs the given skills fully qualify for.
  pub async fn match_jobs(
    &self,
    skills: &[String],
  ) -> Result<FetchOutcome<MatchJobsResponse>, ApiError> {
    let request = SkillsRequest {
      skills: matching::normalize_skills(skills),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::match_jobs(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::MatchJobs, &request).await
  }

  /// Highest-impact skills the user should learn next.
  pub async fn gap_analysis(
    &self,
    skills: &[String],
  ) -> Result<FetchOutcome<GapAnalysisResponse>, ApiError> {
    let request = SkillsRequest {
      skills: matching::normalize_skills(skills),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::gap_analysis(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::GapAnalysis, &request).await
  }

  /// Estimated salary increase from learning `new_skill`.
  pub async fn salary_impact(
    &self,
    skills: &[String],
    new_skill: &str,
  ) -> Result<FetchOutcome<SalaryImpactResponse>, ApiError> {
    let request = SalaryImpactRequest {
      skills: matching::normalize_skills(skills),
      new_skill: new_skill.trim().to_lowercase(),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::salary_impact(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::SalaryImpact, &request).await
  }

  /// A learning path covering each skill to learn.
  pub async fn curriculum(
    &self,
    skills_to_learn: &[String],
  ) -> Result<FetchOutcome<CurriculumResponse>, ApiError> {
    let request = CurriculumRequest {
      skills_to_learn: skills_to_learn.to_vec(),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::curriculum(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::Curriculum, &request).await
  }

  /// Market observations relevant to the user's skill set.
  pub async fn market_insights(
    &self,
    skills: &[String],
  ) -> Result<FetchOutcome<MarketInsightsResponse>, ApiError> {
    let request = SkillsRequest {
      skills: matching::normalize_skills(skills),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::market_insights(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::MarketInsights, &request).await
  }

  /// One coaching exchange grounded in a prior analysis.
  pub async fn coach_chat(
    &self,
    role: &str,
    analysis: &Value,
    question: &str,
  ) -> Result<FetchOutcome<CoachChatResponse>, ApiError> {
    let request = CoachChatRequest {
      role: role.to_string(),
      analysis: analysis.clone(),
      question: question.to_string(),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::coach_chat(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::CoachChat, &request).await
  }

  /// A course outline for one target skill.
  pub async fn generate_course(
    &self,
    target_skill: &str,
    level: Option<&str>,
  ) -> Result<FetchOutcome<CourseResponse>, ApiError> {
    let request = CourseRequest {
      target_skill: target_skill.to_string(),
      level: level.map(String::from),
    };
    if !self.use_backend {
      return Ok(FetchOutcome::stub_only(stubs::generate_course(
        &request,
        &self.stub_options,
      )));
    }
    self.client.post(Operation::GenerateCourse, &request).await
  }

  /// The combined analysis the UI renders as one page.
  ///
  /// Steps run strictly in order because later ones consume earlier
  /// outputs: matches, then gaps, then salary impact for the top gap, then a
  /// curriculum over every gap, then insights.
  pub async fn full_analysis(&self, skills: &[String]) -> Result<FullAnalysis, ApiError> {
    let jobs = self.match_jobs(skills).await?;
    let gaps = self.gap_analysis(skills).await?;
    let mut degraded = jobs.degraded() || gaps.degraded();

    let recommendations = gaps.data.analysis.recommendations;

    let salary_impact = match recommendations.first() {
      Some(top) => {
        let outcome = self.salary_impact(skills, &top.skill).await?;
        degraded = degraded || outcome.degraded();
        Some(SalaryProjection {
          skill: top.skill.clone(),
          potential_salary_increase_rwf: outcome.data.potential_salary_increase_rwf,
        })
      }
      None => None,
    };

    let to_learn: Vec<String> = recommendations.iter().map(|g| g.skill.clone()).collect();
    let curriculum = self.curriculum(&to_learn).await?;
    degraded = degraded || curriculum.degraded();

    let insights = self.market_insights(skills).await?;
    degraded = degraded || insights.degraded();

    Ok(FullAnalysis {
      qualified_jobs: jobs.data.qualified_jobs,
      recommendations,
      salary_impact,
      learning_path: curriculum.data.curriculum.learning_path,
      insights: insights.data.insights.insights,
      degraded,
    })
  }

  /// Drop every cached backend response.
  pub fn clear_cache(&self) -> color_eyre::Result<()> {
    self.client.clear_cache()
  }
}
