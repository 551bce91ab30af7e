//! Skill matching semantics.
//!
//! Two deliberately different notions of "the user has this skill" coexist
//! and must stay distinct:
//!
//! - [`tokens_match`] / [`job_match_score`]: bidirectional case-insensitive
//!   substring containment, used for scoring how well a user fits a posting.
//! - [`meets_all_requirements`]: exact membership of every required token,
//!   used by the qualification filter the backend applies and the local job
//!   matching stub mirrors.
//!
//! The divergence is intentional: scoring is forgiving ("reactjs" counts
//! toward "react"), qualification is strict.

use crate::career::types::JobOpportunity;

const REQUIRED_WEIGHT: f64 = 0.7;
const PREFERRED_WEIGHT: f64 = 0.3;

/// Normalize raw skill input into lowercase tokens, dropping blanks.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
  skills
    .iter()
    .map(|s| s.trim().to_lowercase())
    .filter(|s| !s.is_empty())
    .collect()
}

/// Bidirectional substring containment, case-insensitive.
pub fn tokens_match(user_skill: &str, required: &str) -> bool {
  let user = user_skill.to_lowercase();
  let required = required.to_lowercase();
  user.contains(&required) || required.contains(&user)
}

/// True when every required token appears verbatim in the user's skill list.
///
/// Both sides are expected to be normalized tokens already.
pub fn meets_all_requirements(user_skills: &[String], required: &[String]) -> bool {
  required.iter().all(|r| user_skills.iter().any(|u| u == r))
}

/// Weighted match score in [0, 1] for a user's skills against one posting.
///
/// Required skills carry 0.7 of the weight and preferred skills 0.3; when a
/// posting lists no preferred skills the preferred weight is redistributed to
/// the required ratio. A posting with no required skills scores 1.0.
pub fn job_match_score(user_skills: &[String], job: &JobOpportunity) -> f64 {
  if job.required_skills.is_empty() {
    return 1.0;
  }

  let met = |wanted: &[String]| {
    wanted
      .iter()
      .filter(|w| user_skills.iter().any(|u| tokens_match(u, w)))
      .count() as f64
  };

  let required_ratio = met(&job.required_skills) / job.required_skills.len() as f64;
  let mut score = required_ratio * REQUIRED_WEIGHT;

  match job.preferred_skills.as_deref() {
    Some(preferred) if !preferred.is_empty() => {
      score += met(preferred) / preferred.len() as f64 * PREFERRED_WEIGHT;
    }
    _ => {
      score += required_ratio * PREFERRED_WEIGHT;
    }
  }

  score.min(1.0)
}

/// Qualitative bucket for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCategory {
  Excellent,
  Good,
  Fair,
  Poor,
}

impl MatchCategory {
  pub fn description(self) -> &'static str {
    match self {
      MatchCategory::Excellent => "Excellent match - you qualify for this role",
      MatchCategory::Good => "Good match - strong candidate with some gaps",
      MatchCategory::Fair => "Fair match - significant skill development needed",
      MatchCategory::Poor => "Poor match - major reskilling required",
    }
  }
}

pub fn match_category(score: f64) -> MatchCategory {
  if score >= 0.8 {
    MatchCategory::Excellent
  } else if score >= 0.6 {
    MatchCategory::Good
  } else if score >= 0.4 {
    MatchCategory::Fair
  } else {
    MatchCategory::Poor
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::career::types::SalaryRange;
  use chrono::Utc;

  fn job(required: &[&str], preferred: Option<&[&str]>) -> JobOpportunity {
    JobOpportunity {
      id: 1,
      title: "Test role".to_string(),
      company: "Test Co".to_string(),
      location: "Kigali".to_string(),
      industry: "Technology".to_string(),
      salary_range: SalaryRange {
        min: 100_000,
        max: 200_000,
        currency: "RWF".to_string(),
      },
      required_skills: required.iter().map(|s| s.to_string()).collect(),
      preferred_skills: preferred.map(|p| p.iter().map(|s| s.to_string()).collect()),
      experience_level: "entry".to_string(),
      job_type: "full-time".to_string(),
      is_remote: false,
      posted_date: Utc::now(),
    }
  }

  fn skills(s: &[&str]) -> Vec<String> {
    s.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn tokens_match_is_bidirectional() {
    assert!(tokens_match("reactjs", "react"));
    assert!(tokens_match("react", "reactjs"));
    assert!(tokens_match("JavaScript", "javascript"));
    assert!(!tokens_match("python", "react"));
  }

  #[test]
  fn exact_requirements_are_strict() {
    let user = skills(&["reactjs", "css"]);
    assert!(!meets_all_requirements(&user, &skills(&["react"])));

    let user = skills(&["react", "css"]);
    assert!(meets_all_requirements(&user, &skills(&["react"])));
    assert!(meets_all_requirements(&user, &[]));
  }

  #[test]
  fn empty_required_scores_full() {
    let j = job(&[], None);
    assert_eq!(job_match_score(&skills(&[]), &j), 1.0);
  }

  #[test]
  fn preferred_weight_redistributes_when_absent() {
    // All required met, no preferred list: 0.7 + 0.3 from redistribution
    let j = job(&["html", "css"], None);
    let score = job_match_score(&skills(&["html", "css"]), &j);
    assert!((score - 1.0).abs() < 1e-9);
  }

  #[test]
  fn preferred_skills_contribute_their_share() {
    let j = job(&["html", "css"], Some(&["react", "git"]));
    // Required fully met, half the preferred met
    let score = job_match_score(&skills(&["html", "css", "git"]), &j);
    assert!((score - (0.7 + 0.15)).abs() < 1e-9);
  }

  #[test]
  fn substring_counts_toward_score() {
    let j = job(&["react"], None);
    let score = job_match_score(&skills(&["reactjs"]), &j);
    assert!((score - 1.0).abs() < 1e-9);
  }

  #[test]
  fn categories_follow_thresholds() {
    assert_eq!(match_category(0.85), MatchCategory::Excellent);
    assert_eq!(match_category(0.8), MatchCategory::Excellent);
    assert_eq!(match_category(0.7), MatchCategory::Good);
    assert_eq!(match_category(0.5), MatchCategory::Fair);
    assert_eq!(match_category(0.1), MatchCategory::Poor);
  }

  #[test]
  fn normalize_lowercases_and_trims() {
    let raw = skills(&[" React ", "SQL", ""]);
    assert_eq!(normalize_skills(&raw), skills(&["react", "sql"]));
  }
}
