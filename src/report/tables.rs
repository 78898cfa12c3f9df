//! CSV report tables.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::WorkloadProblem;
use crate::search::Outcome;

/// Population statistics of per-professor teaching hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// `std / mean`, or 0 when the mean is 0.
    pub cv: f64,
}

impl WorkloadStats {
    pub fn of(hours: &[f64]) -> Self {
        if hours.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
                cv: 0.0,
            };
        }
        let n = hours.len() as f64;
        let mean = hours.iter().sum::<f64>() / n;
        let std = (hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n).sqrt();
        let min = hours.iter().copied().fold(f64::INFINITY, f64::min);
        let max = hours.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            std,
            min,
            max,
            cv: if mean > 0.0 { std / mean } else { 0.0 },
        }
    }
}

/// Teaching hours as a percentage of the maximum teaching load.
pub fn load_percentage(hours: f64, max_teaching_load: f64) -> f64 {
    if max_teaching_load > 0.0 {
        hours / max_teaching_load * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Serialize)]
struct AllocationRow<'a> {
    algorithm: &'a str,
    course_id: &'a str,
    course_name: &'a str,
    course_code: &'a str,
    department: &'a str,
    difficulty_level: u8,
    num_students: u32,
    professor_id: &'a str,
    professor_name: &'a str,
    professor_title: &'a str,
    professor_department: &'a str,
    share: f64,
    workload_hours: f64,
    lecture_hours: f64,
    lab_hours: f64,
    prep_hours: f64,
    assessment_hours: f64,
    expertise_match: bool,
    team_teaching: bool,
    num_professors: usize,
}

#[derive(Debug, Serialize)]
struct ProfessorRow<'a> {
    algorithm: &'a str,
    professor_id: &'a str,
    professor_name: &'a str,
    title: &'a str,
    department: &'a str,
    years_experience: u32,
    teaching_hours: f64,
    research_hours: f64,
    admin_hours: f64,
    total_hours: f64,
    contracted_hours: f64,
    load_percentage: f64,
    min_teaching_load: f64,
    max_teaching_load: f64,
    meets_minimum: bool,
    within_limits: bool,
    num_courses: usize,
    assigned_courses: String,
}

#[derive(Debug, Serialize)]
struct TraceRow {
    step: usize,
    best_fitness: f64,
    mean_fitness: Option<f64>,
    current_fitness: Option<f64>,
    temperature: Option<f64>,
    accepted: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    algorithm: &'a str,
    fitness: f64,
    runtime_seconds: f64,
    iterations: usize,
    score: f64,
    fairness: f64,
    expertise: f64,
    balance: f64,
    preference: f64,
    team_teaching: f64,
    soft_penalty: f64,
    hard_penalty: f64,
    hard_constraints_satisfied: bool,
    violations: usize,
    workload_within_contract: bool,
    expertise_matched: bool,
    no_idle_professors: bool,
    mean_workload: f64,
    std_workload: f64,
    min_workload: f64,
    max_workload: f64,
    cv_workload: f64,
}

/// One row per course-professor pair.
pub fn write_allocation(path: &Path, problem: &WorkloadProblem, outcome: &Outcome) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let algorithm = outcome.algorithm.label();
    for (c, assignment) in outcome.allocation.assignments.iter().enumerate() {
        let course = problem.course(c);
        for (&p, &share) in assignment.professors.iter().zip(&assignment.shares) {
            let prof = problem.professor(p);
            writer.serialize(AllocationRow {
                algorithm,
                course_id: &course.id,
                course_name: &course.name,
                course_code: &course.code,
                department: &course.department,
                difficulty_level: course.difficulty_level,
                num_students: course.num_students,
                professor_id: &prof.id,
                professor_name: &prof.name,
                professor_title: &prof.title,
                professor_department: &prof.department,
                share,
                workload_hours: share * course.workload_hours(),
                lecture_hours: share * f64::from(course.lecture_hours),
                lab_hours: share * f64::from(course.lab_hours),
                prep_hours: share * course.prep_hours(),
                assessment_hours: share * course.weekly_assessment_hours(),
                expertise_match: prof.matches(course),
                team_teaching: assignment.is_team(),
                num_professors: assignment.len(),
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// One row per professor with the hour breakdown and assigned courses.
pub fn write_professor_summary(
    path: &Path,
    problem: &WorkloadProblem,
    outcome: &Outcome,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let algorithm = outcome.algorithm.label();
    let hours = &outcome.evaluation.teaching_hours;
    for (p, prof) in problem.professors().iter().enumerate() {
        let teaching = hours.get(p).copied().unwrap_or(0.0);
        let courses = outcome.allocation.courses_of(p);
        let assigned = courses
            .iter()
            .map(|&c| {
                let share = outcome.allocation.assignments[c].share_of(p);
                format!("{} ({:.1}%)", problem.course(c).code, share * 100.0)
            })
            .collect::<Vec<_>>()
            .join("; ");
        let research = prof.research_hours();
        writer.serialize(ProfessorRow {
            algorithm,
            professor_id: &prof.id,
            professor_name: &prof.name,
            title: &prof.title,
            department: &prof.department,
            years_experience: prof.years_experience,
            teaching_hours: teaching,
            research_hours: research,
            admin_hours: prof.admin_load,
            total_hours: teaching + research + prof.admin_load,
            contracted_hours: prof.contracted_hours(),
            load_percentage: load_percentage(teaching, prof.max_teaching_load),
            min_teaching_load: prof.min_teaching_load,
            max_teaching_load: prof.max_teaching_load,
            meets_minimum: teaching >= prof.min_teaching_load,
            within_limits: teaching <= prof.max_teaching_load,
            num_courses: courses.len(),
            assigned_courses: assigned,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Per-step convergence data. Columns an algorithm does not record stay
/// empty.
pub fn write_trace(path: &Path, outcome: &Outcome) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let trace = &outcome.trace;
    let at = |series: &Option<Vec<f64>>, i: usize| series.as_ref().and_then(|s| s.get(i).copied());
    for (step, &best_fitness) in trace.best.iter().enumerate() {
        writer.serialize(TraceRow {
            step,
            best_fitness,
            mean_fitness: at(&trace.mean, step),
            current_fitness: at(&trace.current, step),
            temperature: at(&trace.temperature, step),
            accepted: step
                .checked_sub(1)
                .and_then(|i| trace.accepted.as_ref()?.get(i).copied()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per algorithm: fitness, runtime, sub-scores, constraint flags
/// and teaching-hour statistics.
pub fn write_comparison(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for outcome in outcomes {
        let eval = &outcome.evaluation;
        let stats = WorkloadStats::of(&eval.teaching_hours);
        writer.serialize(ComparisonRow {
            algorithm: outcome.algorithm.slug(),
            fitness: eval.fitness,
            runtime_seconds: outcome.elapsed.as_secs_f64(),
            iterations: outcome.iterations,
            score: eval.score,
            fairness: eval.components.fairness,
            expertise: eval.components.expertise,
            balance: eval.components.balance,
            preference: eval.components.preference,
            team_teaching: eval.components.team_teaching,
            soft_penalty: eval.soft_penalty,
            hard_penalty: eval.hard_penalty,
            hard_constraints_satisfied: eval.feasible,
            violations: eval.violations.count(),
            workload_within_contract: eval.soft.workload_within_contract,
            expertise_matched: eval.soft.expertise_matched,
            no_idle_professors: eval.soft.no_idle,
            mean_workload: stats.mean,
            std_workload: stats.std,
            min_workload: stats.min,
            max_workload: stats.max,
            cv_workload: stats.cv,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_stats() {
        let stats = WorkloadStats::of(&[10.0, 12.0, 14.0]);
        assert!((stats.mean - 12.0).abs() < 1e-12);
        assert!((stats.std - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 14.0);
        assert!((stats.cv - stats.std / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_workload_stats_empty_and_zero() {
        assert_eq!(WorkloadStats::of(&[]).cv, 0.0);
        assert_eq!(WorkloadStats::of(&[0.0, 0.0]).cv, 0.0);
    }

    #[test]
    fn test_load_percentage() {
        assert!((load_percentage(10.0, 20.0) - 50.0).abs() < 1e-12);
        assert_eq!(load_percentage(10.0, 0.0), 0.0);
    }
}
