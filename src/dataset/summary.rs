//! Dataset overview.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::model::WorkloadProblem;

/// Aggregate counts describing a problem instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub professors: usize,
    pub courses: usize,
    pub professors_per_department: BTreeMap<String, usize>,
    pub courses_per_department: BTreeMap<String, usize>,
    /// Keyed by difficulty level 1..=5.
    pub courses_per_difficulty: BTreeMap<u8, usize>,
    pub shareable_courses: usize,
    pub expertise_tags: usize,
    /// Total weekly workload hours of all courses.
    pub total_course_hours: f64,
    /// Total weekly teaching hours professors can offer.
    pub total_teaching_capacity: f64,
}

impl DatasetSummary {
    pub fn of(problem: &WorkloadProblem) -> Self {
        let mut professors_per_department = BTreeMap::new();
        let mut tags = BTreeSet::new();
        for p in problem.professors() {
            *professors_per_department
                .entry(p.department.clone())
                .or_insert(0) += 1;
            tags.extend(p.expertise.iter().map(String::as_str));
        }

        let mut courses_per_department = BTreeMap::new();
        let mut courses_per_difficulty = BTreeMap::new();
        for c in problem.courses() {
            *courses_per_department
                .entry(c.department.clone())
                .or_insert(0) += 1;
            *courses_per_difficulty.entry(c.difficulty_level).or_insert(0) += 1;
            tags.extend(c.required_expertise.iter().map(String::as_str));
        }

        Self {
            professors: problem.professor_count(),
            courses: problem.course_count(),
            professors_per_department,
            courses_per_department,
            courses_per_difficulty,
            shareable_courses: problem.courses().iter().filter(|c| c.can_be_shared).count(),
            expertise_tags: tags.len(),
            total_course_hours: problem.total_course_hours(),
            total_teaching_capacity: problem.total_teaching_capacity(),
        }
    }

    /// Course hours as a fraction of teaching capacity.
    pub fn utilization(&self) -> f64 {
        if self.total_teaching_capacity > 0.0 {
            self.total_course_hours / self.total_teaching_capacity
        } else {
            0.0
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Professors: {}", self.professors)?;
        for (dept, n) in &self.professors_per_department {
            writeln!(f, "  {dept:<28} {n:>4}")?;
        }
        writeln!(f, "Courses: {} ({} shareable)", self.courses, self.shareable_courses)?;
        for (dept, n) in &self.courses_per_department {
            writeln!(f, "  {dept:<28} {n:>4}")?;
        }
        writeln!(f, "Difficulty:")?;
        for (level, n) in &self.courses_per_difficulty {
            writeln!(f, "  level {level}{:<21} {n:>4}", "")?;
        }
        writeln!(f, "Expertise tags: {}", self.expertise_tags)?;
        write!(
            f,
            "Course hours {:.1} / teaching capacity {:.1} ({:.1}%)",
            self.total_course_hours,
            self.total_teaching_capacity,
            self.utilization() * 100.0
        )
    }
}
