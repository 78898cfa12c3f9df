//! Validated problem instance.
//!
//! [`WorkloadProblem`] owns the reference data for a run and resolves
//! string IDs to the indices used by [`Allocation`](super::Allocation).
//! Construction fails fast on inconsistent input; once built, the instance
//! is read-only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Course, Professor};
use crate::error::{Error, Result};

/// Preference assumed when none is recorded for a professor-course pair.
pub const DEFAULT_PREFERENCE: f64 = 0.5;

/// A professor's preference for teaching a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub professor_id: String,
    pub course_id: String,
    /// Preference weight in `0.0..=1.0`.
    pub preference: f64,
}

/// The faculty-course assignment problem.
#[derive(Debug, Clone)]
pub struct WorkloadProblem {
    professors: Vec<Professor>,
    courses: Vec<Course>,
    /// Row-major `professor × course` preference matrix.
    preferences: Vec<f64>,
    professor_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
}

impl WorkloadProblem {
    /// Builds a problem with neutral preferences.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] on empty inputs, duplicate IDs or
    /// out-of-range attributes.
    pub fn new(professors: Vec<Professor>, courses: Vec<Course>) -> Result<Self> {
        if professors.is_empty() {
            return Err(Error::invalid_data("no professors"));
        }
        if courses.is_empty() {
            return Err(Error::invalid_data("no courses"));
        }

        let mut professor_index = HashMap::with_capacity(professors.len());
        for (i, p) in professors.iter().enumerate() {
            validate_professor(p)?;
            if professor_index.insert(p.id.clone(), i).is_some() {
                return Err(Error::invalid_data(format!("duplicate professor id {}", p.id)));
            }
        }

        let mut course_index = HashMap::with_capacity(courses.len());
        for (i, c) in courses.iter().enumerate() {
            validate_course(c)?;
            if course_index.insert(c.id.clone(), i).is_some() {
                return Err(Error::invalid_data(format!("duplicate course id {}", c.id)));
            }
        }

        let preferences = vec![DEFAULT_PREFERENCE; professors.len() * courses.len()];

        Ok(Self {
            professors,
            courses,
            preferences,
            professor_index,
            course_index,
        })
    }

    /// Records preferences, overriding the neutral default.
    ///
    /// # Errors
    /// Fails when an entry names an unknown professor or course, or when a
    /// weight is outside `0.0..=1.0`.
    pub fn with_preferences(mut self, entries: &[Preference]) -> Result<Self> {
        for entry in entries {
            let p = self.professor_idx(&entry.professor_id).ok_or_else(|| {
                Error::invalid_data(format!(
                    "preference references unknown professor {}",
                    entry.professor_id
                ))
            })?;
            let c = self.course_idx(&entry.course_id).ok_or_else(|| {
                Error::invalid_data(format!(
                    "preference references unknown course {}",
                    entry.course_id
                ))
            })?;
            if !(0.0..=1.0).contains(&entry.preference) {
                return Err(Error::invalid_data(format!(
                    "preference {} for {}/{} outside [0, 1]",
                    entry.preference, entry.professor_id, entry.course_id
                )));
            }
            let n = self.courses.len();
            self.preferences[p * n + c] = entry.preference;
        }
        Ok(self)
    }

    pub fn professors(&self) -> &[Professor] {
        &self.professors
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn professor(&self, idx: usize) -> &Professor {
        &self.professors[idx]
    }

    pub fn course(&self, idx: usize) -> &Course {
        &self.courses[idx]
    }

    pub fn professor_count(&self) -> usize {
        self.professors.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn professor_idx(&self, id: &str) -> Option<usize> {
        self.professor_index.get(id).copied()
    }

    pub fn course_idx(&self, id: &str) -> Option<usize> {
        self.course_index.get(id).copied()
    }

    /// Preference of professor `p` for course `c`.
    pub fn preference(&self, p: usize, c: usize) -> f64 {
        self.preferences[p * self.courses.len() + c]
    }

    /// All recorded preferences, in professor-major order.
    pub fn preference_entries(&self) -> Vec<Preference> {
        let mut entries = Vec::with_capacity(self.preferences.len());
        for (p, prof) in self.professors.iter().enumerate() {
            for (c, course) in self.courses.iter().enumerate() {
                entries.push(Preference {
                    professor_id: prof.id.clone(),
                    course_id: course.id.clone(),
                    preference: self.preference(p, c),
                });
            }
        }
        entries
    }

    /// Sum of all course workloads.
    pub fn total_course_hours(&self) -> f64 {
        self.courses.iter().map(Course::workload_hours).sum()
    }

    /// Sum of all professors' maximum teaching loads.
    pub fn total_teaching_capacity(&self) -> f64 {
        self.professors.iter().map(|p| p.max_teaching_load).sum()
    }
}

fn validate_professor(p: &Professor) -> Result<()> {
    if p.id.is_empty() {
        return Err(Error::invalid_data("professor with empty id"));
    }
    for (name, hours) in [
        ("min teaching load", p.min_teaching_load),
        ("max teaching load", p.max_teaching_load),
        ("admin load", p.admin_load),
    ] {
        if !hours.is_finite() || hours < 0.0 {
            return Err(Error::invalid_data(format!(
                "professor {} has invalid {name} {hours}",
                p.id
            )));
        }
    }
    if p.min_teaching_load > p.max_teaching_load {
        return Err(Error::invalid_data(format!(
            "professor {} has min teaching load {} above max {}",
            p.id, p.min_teaching_load, p.max_teaching_load
        )));
    }
    if !(0.0..=1.0).contains(&p.research_allocation) {
        return Err(Error::invalid_data(format!(
            "professor {} research allocation {} outside [0, 1]",
            p.id, p.research_allocation
        )));
    }
    Ok(())
}

fn validate_course(c: &Course) -> Result<()> {
    if c.id.is_empty() {
        return Err(Error::invalid_data("course with empty id"));
    }
    if !(1..=5).contains(&c.difficulty_level) {
        return Err(Error::invalid_data(format!(
            "course {} difficulty {} outside 1-5",
            c.id, c.difficulty_level
        )));
    }
    if c.min_professors == 0 || c.min_professors > c.max_professors {
        return Err(Error::invalid_data(format!(
            "course {} professor bounds {}..{} invalid",
            c.id, c.min_professors, c.max_professors
        )));
    }
    if c.required_expertise.is_empty() {
        return Err(Error::invalid_data(format!(
            "course {} requires no expertise",
            c.id
        )));
    }
    if c.prep_factor < 0.0 || !c.prep_factor.is_finite() {
        return Err(Error::invalid_data(format!(
            "course {} has invalid prep factor {}",
            c.id, c.prep_factor
        )));
    }
    Ok(())
}
