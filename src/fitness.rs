//! Allocation fitness evaluation.
//!
//! The evaluator scores any allocation, feasible or not. Hard-constraint
//! violations subtract a large penalty instead of rejecting the allocation,
//! so every optimizer works on a total order over candidates.
//!
//! ```text
//! fitness = Σ wᵢ·componentᵢ − soft penalty − hard penalty
//! ```
//!
//! Components are each in `[0, 1]`, so a feasible allocation scores at most
//! `Σ wᵢ`. Each violation costs `violation_penalty` (10 by default), which
//! puts any infeasible allocation below every feasible one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Allocation, Assignment, WorkloadProblem};

/// Weights of the score components and penalty coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub fairness: f64,
    pub expertise: f64,
    pub balance: f64,
    pub preference: f64,
    pub team_teaching: f64,
    /// Multiplies the fraction of professor-course pairs without an
    /// expertise match.
    pub mismatch_penalty: f64,
    /// Cost of one hard-constraint violation.
    pub violation_penalty: f64,
    /// Cost per teaching hour outside a professor's bounds.
    pub hour_penalty: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            fairness: 0.30,
            expertise: 0.25,
            balance: 0.20,
            preference: 0.15,
            team_teaching: 0.10,
            mismatch_penalty: 0.5,
            violation_penalty: 10.0,
            hour_penalty: 1.0,
        }
    }
}

impl FitnessWeights {
    /// Sum of the component weights (the best achievable score).
    pub fn total(&self) -> f64 {
        self.fairness + self.expertise + self.balance + self.preference + self.team_teaching
    }

    /// Validates the weights.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when any weight is negative or non-finite,
    /// or when the component weights sum to zero.
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("fairness", self.fairness),
            ("expertise", self.expertise),
            ("balance", self.balance),
            ("preference", self.preference),
            ("team_teaching", self.team_teaching),
            ("mismatch_penalty", self.mismatch_penalty),
            ("violation_penalty", self.violation_penalty),
            ("hour_penalty", self.hour_penalty),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "weight {name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(Error::Config(
                "component weights must have a positive sum".into(),
            ));
        }
        Ok(())
    }
}

/// Score components, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub fairness: f64,
    pub expertise: f64,
    pub balance: f64,
    pub preference: f64,
    pub team_teaching: f64,
}

/// Hard-constraint violations found in an allocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Violations {
    /// Courses with fewer professors than their minimum.
    pub understaffed_courses: usize,
    /// Professors with no course at all.
    pub idle_professors: usize,
    /// Professors below their minimum teaching load.
    pub underloaded: usize,
    /// Professors above their maximum teaching load.
    pub overloaded: usize,
    /// Courses whose share vector is malformed or does not sum to one.
    pub invalid_shares: usize,
    /// Total teaching hours outside professors' bounds.
    pub violation_hours: f64,
}

impl Violations {
    pub fn count(&self) -> usize {
        self.understaffed_courses
            + self.idle_professors
            + self.underloaded
            + self.overloaded
            + self.invalid_shares
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Soft constraints reported alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SoftConstraints {
    /// Teaching, research and admin hours fit in the contract for everyone.
    pub workload_within_contract: bool,
    /// Every professor-course pair shares at least one expertise tag.
    pub expertise_matched: bool,
    /// Every professor teaches something.
    pub no_idle: bool,
}

/// Full evaluation of one allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fitness: f64,
    /// Weighted sum of the components, before penalties.
    pub score: f64,
    pub components: ScoreComponents,
    pub soft_penalty: f64,
    pub hard_penalty: f64,
    pub violations: Violations,
    pub feasible: bool,
    pub soft: SoftConstraints,
    /// Weekly teaching hours per professor.
    pub teaching_hours: Vec<f64>,
}

/// Scores allocations against one problem instance.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    problem: &'a WorkloadProblem,
    weights: FitnessWeights,
}

impl<'a> Evaluator<'a> {
    pub fn new(problem: &'a WorkloadProblem, weights: FitnessWeights) -> Self {
        Self { problem, weights }
    }

    pub fn problem(&self) -> &'a WorkloadProblem {
        self.problem
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Scalar fitness; higher is better.
    pub fn fitness(&self, allocation: &Allocation) -> f64 {
        self.evaluate(allocation).fitness
    }

    /// Evaluates an allocation in full.
    pub fn evaluate(&self, allocation: &Allocation) -> Evaluation {
        let problem = self.problem;
        let n_profs = problem.professor_count();
        let n_courses = problem.course_count();
        let empty = Assignment::default();

        let hours = allocation.teaching_hours(problem);
        let counts = allocation.course_counts(n_profs);

        let mut violations = Violations::default();
        let mut expertise_sum = 0.0;
        let mut preference_sum = 0.0;
        let mut team_sum = 0.0;
        let mut pairs = 0usize;
        let mut mismatched = 0usize;

        for c in 0..n_courses {
            let course = problem.course(c);
            let assignment = allocation.assignments.get(c).unwrap_or(&empty);

            if assignment.len() < course.min_professors {
                violations.understaffed_courses += 1;
            }
            if !self.well_formed(assignment) {
                violations.invalid_shares += 1;
                continue;
            }

            let mut course_expertise = 0.0;
            let mut course_preference = 0.0;
            for (&p, &share) in assignment.professors.iter().zip(&assignment.shares) {
                let prof = problem.professor(p);
                let matched = prof.matches(course);
                let primary = prof.primary_matches(course);
                pairs += 1;
                if !matched {
                    mismatched += 1;
                }
                let mut m = 0.0;
                if matched {
                    m += 1.0;
                }
                if primary {
                    m += 0.5;
                }
                course_expertise += m / 1.5;
                course_preference += share * problem.preference(p, c);
            }
            expertise_sum += course_expertise / assignment.len() as f64;
            preference_sum += course_preference;
            team_sum += team_efficiency(assignment, course.can_be_shared, course.max_professors);
        }

        for (p, prof) in problem.professors().iter().enumerate() {
            let h = hours[p];
            if counts[p] == 0 {
                violations.idle_professors += 1;
            }
            if h < prof.min_teaching_load - 1e-9 {
                violations.underloaded += 1;
                violations.violation_hours += prof.min_teaching_load - h;
            }
            if h > prof.max_teaching_load + 1e-9 {
                violations.overloaded += 1;
                violations.violation_hours += h - prof.max_teaching_load;
            }
        }

        let courses = n_courses.max(1) as f64;
        let components = ScoreComponents {
            fairness: fairness(problem, &hours),
            expertise: expertise_sum / courses,
            balance: balance(&hours),
            preference: preference_sum / courses,
            team_teaching: team_sum / courses,
        };

        let w = &self.weights;
        let score = w.fairness * components.fairness
            + w.expertise * components.expertise
            + w.balance * components.balance
            + w.preference * components.preference
            + w.team_teaching * components.team_teaching;

        let mismatch_rate = if pairs == 0 {
            0.0
        } else {
            mismatched as f64 / pairs as f64
        };
        let soft_penalty = w.mismatch_penalty * mismatch_rate;
        let hard_penalty = w.violation_penalty * violations.count() as f64
            + w.hour_penalty * violations.violation_hours;

        let soft = SoftConstraints {
            workload_within_contract: problem.professors().iter().zip(&hours).all(|(prof, h)| {
                h + prof.research_hours() + prof.admin_load <= prof.contracted_hours() + 1e-9
            }),
            expertise_matched: mismatched == 0,
            no_idle: violations.idle_professors == 0,
        };

        Evaluation {
            fitness: score - soft_penalty - hard_penalty,
            score,
            components,
            soft_penalty,
            hard_penalty,
            feasible: violations.is_empty(),
            violations,
            soft,
            teaching_hours: hours,
        }
    }

    fn well_formed(&self, assignment: &Assignment) -> bool {
        let n = self.problem.professor_count();
        if !assignment.shares_valid() || assignment.professors.iter().any(|&p| p >= n) {
            return false;
        }
        // duplicates
        let mut seen = assignment.professors.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len() == assignment.len()
    }
}

/// `max(0, 1 − CV)` of load percentages.
fn fairness(problem: &WorkloadProblem, hours: &[f64]) -> f64 {
    let loads: Vec<f64> = problem
        .professors()
        .iter()
        .zip(hours)
        .map(|(p, h)| {
            if p.max_teaching_load > 0.0 {
                h / p.max_teaching_load * 100.0
            } else {
                0.0
            }
        })
        .collect();
    let mean = mean(&loads);
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = loads.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / loads.len() as f64;
    (1.0 - variance.sqrt() / mean).max(0.0)
}

/// `max(0, 1 − MAD / mean)` of teaching hours.
fn balance(hours: &[f64]) -> f64 {
    let mean = mean(hours);
    if mean <= 0.0 {
        return 0.0;
    }
    let mad = hours.iter().map(|h| (h - mean).abs()).sum::<f64>() / hours.len() as f64;
    (1.0 - mad / mean).max(0.0)
}

fn team_efficiency(assignment: &Assignment, shareable: bool, max_professors: usize) -> f64 {
    let n = assignment.len();
    match n {
        0 => 0.0,
        1 => 1.0,
        _ if !shareable || n > max_professors => 0.0,
        _ => {
            let min_share = assignment.shares.iter().copied().fold(f64::INFINITY, f64::min);
            (n as f64 * min_share).clamp(0.0, 1.0)
        }
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}
