//! Deterministic local computations mirroring the backend operations.
//!
//! Each stub is a pure function over the fixed catalogs that produces the
//! exact response shape the live backend would, so callers cannot tell the
//! tiers apart by schema. Stubs never perform I/O.

pub mod catalog;

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::career::types::{Course, CourseModule, CourseProject, LearningPathItem, Lesson};
use crate::career::wire::{
  CoachChatRequest, CoachChatResponse, CoachReply, CourseRequest, CourseResponse, Curriculum,
  CurriculumRequest, CurriculumResponse, GapAnalysis, GapAnalysisResponse, InsightList,
  MarketInsightsResponse, MatchJobsResponse, Operation, SalaryImpactRequest,
  SalaryImpactResponse, SkillsRequest,
};
use crate::matching;

/// Knobs controlling stub behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StubOptions {
  /// Force a plausible non-empty result even when the truthful answer is
  /// empty. Used for demos so the front end always has something to render.
  pub guarantee_non_empty: bool,
}

/// Jobs from the fixed catalog whose every required skill is held verbatim.
///
/// Deliberately stricter than `matching::job_match_score`: qualification is
/// exact membership, mirroring the backend's subset test.
pub fn match_jobs(request: &SkillsRequest, options: &StubOptions) -> MatchJobsResponse {
  let jobs = catalog::job_catalog();
  let mut qualified: Vec<_> = jobs
    .iter()
    .filter(|job| matching::meets_all_requirements(&request.skills, &job.required_skills))
    .cloned()
    .collect();

  if qualified.is_empty() && options.guarantee_non_empty {
    // Serve the entry-level posting rather than an empty board
    qualified.extend(jobs.into_iter().take(1));
  }

  MatchJobsResponse {
    qualified_jobs: qualified,
  }
}

/// Top two candidates from the ranked gap catalog the caller doesn't hold yet.
pub fn gap_analysis(request: &SkillsRequest, _options: &StubOptions) -> GapAnalysisResponse {
  let held: HashSet<&str> = request.skills.iter().map(String::as_str).collect();
  let recommendations = catalog::gap_candidates()
    .into_iter()
    .filter(|candidate| !held.contains(candidate.skill.as_str()))
    .take(2)
    .collect();

  GapAnalysisResponse {
    analysis: GapAnalysis { recommendations },
  }
}

/// Salary impact of learning `new_skill`: table lookup plus a prerequisite
/// bonus when the named prerequisite is already held.
pub fn salary_impact(request: &SalaryImpactRequest, _options: &StubOptions) -> SalaryImpactResponse {
  let target = request.new_skill.trim().to_lowercase();
  let mut estimate = catalog::base_salary_impact(&target);

  if let Some((prerequisite, bonus)) = catalog::prerequisite_bonus(&target) {
    if request.skills.iter().any(|s| s == prerequisite) {
      estimate += bonus;
    }
  }

  SalaryImpactResponse {
    potential_salary_increase_rwf: estimate,
  }
}

/// One (resource, project) step per skill to learn, generic fallback for
/// unrecognized skills.
pub fn curriculum(request: &CurriculumRequest, _options: &StubOptions) -> CurriculumResponse {
  let learning_path = request
    .skills_to_learn
    .iter()
    .map(|skill| {
      let (resource, project) = match catalog::curriculum_entry(&skill.to_lowercase()) {
        Some((resource, project)) => (resource.to_string(), project.to_string()),
        None => (
          catalog::GENERIC_RESOURCE.to_string(),
          format!("Build a mini project to practice {skill}"),
        ),
      };
      LearningPathItem {
        skill: skill.clone(),
        resource,
        project,
      }
    })
    .collect();

  CurriculumResponse {
    curriculum: Curriculum { learning_path },
  }
}

/// Pool sentences matching the caller's skill categories, padded with
/// generic picks up to the minimum count.
pub fn market_insights(request: &SkillsRequest, _options: &StubOptions) -> MarketInsightsResponse {
  let categories: HashSet<_> = request
    .skills
    .iter()
    .filter_map(|s| catalog::skill_category(s))
    .collect();

  let mut insights: Vec<String> = catalog::INSIGHT_POOL
    .iter()
    .filter(|&&(category, _)| categories.contains(&category))
    .map(|&(_, text)| text.to_string())
    .collect();

  // Pad with generic observations, then anything left, keeping pool order
  for pass in [true, false] {
    for &(category, text) in catalog::INSIGHT_POOL {
      if insights.len() >= catalog::MIN_INSIGHTS {
        break;
      }
      let generic = category == catalog::SkillCategory::General;
      if pass == generic && !insights.iter().any(|existing| existing == text) {
        insights.push(text.to_string());
      }
    }
  }

  MarketInsightsResponse {
    insights: InsightList { insights },
  }
}

/// Canned coaching answer picked by a keyword test on the question.
pub fn coach_chat(request: &CoachChatRequest, _options: &StubOptions) -> CoachChatResponse {
  let answer = if request.question.to_lowercase().contains("next") {
    catalog::COACH_NEXT_STEP_ANSWER
  } else {
    catalog::COACH_DEFAULT_ANSWER
  };

  CoachChatResponse {
    chat: CoachReply {
      answer: answer.to_string(),
      follow_ups: catalog::COACH_FOLLOW_UPS
        .iter()
        .map(|s| s.to_string())
        .collect(),
    },
  }
}

/// Fixed two-module course outline parameterized by the target skill.
pub fn generate_course(request: &CourseRequest, _options: &StubOptions) -> CourseResponse {
  let skill = if request.target_skill.trim().is_empty() {
    "React"
  } else {
    request.target_skill.trim()
  };

  CourseResponse {
    course: Course {
      title: format!("{skill} in 2 Weeks (Practical)"),
      duration: "2 weeks".to_string(),
      modules: vec![
        CourseModule {
          title: "Foundations".to_string(),
          lessons: vec![Lesson {
            title: "Intro".to_string(),
            resource: "https://www.freecodecamp.org/".to_string(),
          }],
        },
        CourseModule {
          title: "Core Concepts".to_string(),
          lessons: vec![Lesson {
            title: "Hands-on".to_string(),
            resource: "https://www.youtube.com".to_string(),
          }],
        },
      ],
      project: CourseProject {
        title: format!("{skill} Mini App"),
        brief: "Build and deploy a small app demonstrating key concepts.".to_string(),
      },
    },
  }
}

/// A stub entry: decodes the raw request body, computes, re-encodes.
pub type StubFn = fn(&Value, &StubOptions) -> Result<Value, serde_json::Error>;

/// Dispatch table from operation kind to its stub computation.
pub struct StubTable {
  entries: HashMap<Operation, StubFn>,
  options: StubOptions,
}

impl StubTable {
  /// Table with every operation's stub registered.
  pub fn with_defaults(options: StubOptions) -> Self {
    let mut table = Self::empty(options);
    table.register(Operation::MatchJobs, match_jobs_value);
    table.register(Operation::GapAnalysis, gap_analysis_value);
    table.register(Operation::SalaryImpact, salary_impact_value);
    table.register(Operation::Curriculum, curriculum_value);
    table.register(Operation::MarketInsights, market_insights_value);
    table.register(Operation::CoachChat, coach_chat_value);
    table.register(Operation::GenerateCourse, generate_course_value);
    table
  }

  /// Table with no stubs registered; lookups always miss.
  pub fn empty(options: StubOptions) -> Self {
    Self {
      entries: HashMap::new(),
      options,
    }
  }

  pub fn register(&mut self, operation: Operation, stub: StubFn) {
    self.entries.insert(operation, stub);
  }

  pub fn options(&self) -> &StubOptions {
    &self.options
  }

  /// Run the stub for `operation`, if one is registered.
  pub fn run(&self, operation: Operation, request: &Value) -> Option<Result<Value, serde_json::Error>> {
    self
      .entries
      .get(&operation)
      .map(|stub| stub(request, &self.options))
  }
}

fn match_jobs_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: SkillsRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(match_jobs(&request, options))
}

fn gap_analysis_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: SkillsRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(gap_analysis(&request, options))
}

fn salary_impact_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: SalaryImpactRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(salary_impact(&request, options))
}

fn curriculum_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: CurriculumRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(curriculum(&request, options))
}

fn market_insights_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: SkillsRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(market_insights(&request, options))
}

fn coach_chat_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: CoachChatRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(coach_chat(&request, options))
}

fn generate_course_value(request: &Value, options: &StubOptions) -> Result<Value, serde_json::Error> {
  let request: CourseRequest = serde_json::from_value(request.clone())?;
  serde_json::to_value(generate_course(&request, options))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn skills(s: &[&str]) -> SkillsRequest {
    SkillsRequest {
      skills: s.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn match_jobs_requires_exact_membership() {
    let response = match_jobs(&skills(&["html", "css", "javascript"]), &StubOptions::default());
    let titles: Vec<_> = response
      .qualified_jobs
      .iter()
      .map(|j| j.title.as_str())
      .collect();
    assert_eq!(titles, vec!["Junior Web Developer"]);

    // "reactjs" does not count as "react" here, unlike match scoring
    let response = match_jobs(
      &skills(&["html", "css", "javascript", "reactjs", "git"]),
      &StubOptions::default(),
    );
    let titles: Vec<_> = response
      .qualified_jobs
      .iter()
      .map(|j| j.title.as_str())
      .collect();
    assert_eq!(titles, vec!["Junior Web Developer"]);
  }

  #[test]
  fn match_jobs_is_idempotent() {
    let request = skills(&["html", "css", "javascript", "react", "git"]);
    let first = match_jobs(&request, &StubOptions::default());
    let second = match_jobs(&request, &StubOptions::default());
    assert_eq!(first, second);
  }

  #[test]
  fn match_jobs_empty_unless_demo_guaranteed() {
    let truthful = match_jobs(&skills(&["cobol"]), &StubOptions::default());
    assert!(truthful.qualified_jobs.is_empty());

    let demo = match_jobs(
      &skills(&["cobol"]),
      &StubOptions {
        guarantee_non_empty: true,
      },
    );
    assert_eq!(demo.qualified_jobs.len(), 1);
    assert_eq!(demo.qualified_jobs[0].title, "Junior Web Developer");
  }

  #[test]
  fn gap_analysis_excludes_held_skills() {
    let response = gap_analysis(&skills(&["react", "python"]), &StubOptions::default());
    let recommended: Vec<_> = response
      .analysis
      .recommendations
      .iter()
      .map(|g| g.skill.as_str())
      .collect();
    assert_eq!(recommended.len(), 2);
    assert!(!recommended.contains(&"react"));
    assert!(!recommended.contains(&"python"));
  }

  #[test]
  fn gap_analysis_returns_top_two_in_rank_order() {
    let response = gap_analysis(&skills(&["html", "css", "javascript"]), &StubOptions::default());
    let recommended: Vec<_> = response
      .analysis
      .recommendations
      .iter()
      .map(|g| g.skill.as_str())
      .collect();
    assert_eq!(recommended, vec!["react", "git"]);
  }

  #[test]
  fn salary_impact_prerequisite_bonus_is_monotonic() {
    let with_prereq = salary_impact(
      &SalaryImpactRequest {
        skills: vec!["javascript".to_string()],
        new_skill: "react".to_string(),
      },
      &StubOptions::default(),
    );
    let without = salary_impact(
      &SalaryImpactRequest {
        skills: vec![],
        new_skill: "react".to_string(),
      },
      &StubOptions::default(),
    );
    assert!(
      with_prereq.potential_salary_increase_rwf >= without.potential_salary_increase_rwf
    );
    assert_eq!(with_prereq.potential_salary_increase_rwf, 300_000);
  }

  #[test]
  fn salary_impact_normalizes_target_skill() {
    let response = salary_impact(
      &SalaryImpactRequest {
        skills: vec!["javascript".to_string()],
        new_skill: " React ".to_string(),
      },
      &StubOptions::default(),
    );
    assert_eq!(response.potential_salary_increase_rwf, 300_000);
  }

  #[test]
  fn curriculum_falls_back_to_generic_resource() {
    let response = curriculum(
      &CurriculumRequest {
        skills_to_learn: vec!["react".to_string(), "basket weaving".to_string()],
      },
      &StubOptions::default(),
    );
    let path = &response.curriculum.learning_path;
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].resource, "https://klab.rw/");
    assert_eq!(path[1].resource, catalog::GENERIC_RESOURCE);
    assert!(path[1].project.contains("basket weaving"));
  }

  #[test]
  fn market_insights_are_contextual_and_padded() {
    let web = market_insights(&skills(&["react"]), &StubOptions::default());
    assert!(web.insights.insights.len() >= catalog::MIN_INSIGHTS);
    assert!(web.insights.insights[0].contains("Front-end"));

    // No recognizable category still yields the minimum count
    let none = market_insights(&skills(&["cobol"]), &StubOptions::default());
    assert_eq!(none.insights.insights.len(), catalog::MIN_INSIGHTS);
  }

  #[test]
  fn coach_chat_keys_off_the_question() {
    let next = coach_chat(
      &CoachChatRequest {
        question: "What should I learn NEXT?".to_string(),
        ..Default::default()
      },
      &StubOptions::default(),
    );
    assert!(next.chat.answer.contains("React"));

    let general = coach_chat(
      &CoachChatRequest {
        question: "How do I stay motivated?".to_string(),
        ..Default::default()
      },
      &StubOptions::default(),
    );
    assert!(general.chat.answer.contains("45 minutes"));
    assert_eq!(general.chat.follow_ups.len(), 3);
  }

  #[test]
  fn course_outline_is_parameterized_by_skill() {
    let response = generate_course(
      &CourseRequest {
        target_skill: "sql".to_string(),
        level: None,
      },
      &StubOptions::default(),
    );
    assert_eq!(response.course.title, "sql in 2 Weeks (Practical)");
    assert_eq!(response.course.modules.len(), 2);
    assert_eq!(response.course.project.title, "sql Mini App");

    let default = generate_course(&CourseRequest::default(), &StubOptions::default());
    assert_eq!(default.course.title, "React in 2 Weeks (Practical)");
  }

  #[test]
  fn default_table_covers_every_operation() {
    let table = StubTable::with_defaults(StubOptions::default());
    // All request types default-fill their fields, so an empty body decodes
    let request = serde_json::json!({});
    for operation in Operation::ALL {
      let result = table.run(operation, &request);
      assert!(result.is_some(), "no stub for {operation:?}");
      assert!(result.expect("registered").is_ok());
    }
  }

  #[test]
  fn table_dispatches_by_operation() {
    let table = StubTable::with_defaults(StubOptions::default());
    let request = serde_json::json!({ "skills": ["html", "css", "javascript"] });

    let payload = table
      .run(Operation::MatchJobs, &request)
      .expect("stub registered")
      .expect("stub encodes");
    let response: MatchJobsResponse = serde_json::from_value(payload).expect("schema parity");
    assert_eq!(response.qualified_jobs.len(), 1);

    let empty = StubTable::empty(StubOptions::default());
    assert!(empty.run(Operation::MatchJobs, &request).is_none());
  }
}
