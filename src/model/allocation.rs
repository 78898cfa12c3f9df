//! Allocation model: the candidate solution mutated by every optimizer.
//!
//! An [`Allocation`] holds one [`Assignment`] per course, indexed by course
//! position in the problem. Professors are referenced by index, and each
//! assignment carries one share fraction per professor.

use serde::{Deserialize, Serialize};

use super::WorkloadProblem;

/// Tolerance used when checking that shares sum to one.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Professors teaching one course and their share of its workload.
///
/// `professors` and `shares` are parallel vectors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assignment {
    pub professors: Vec<usize>,
    pub shares: Vec<f64>,
}

impl Assignment {
    /// A course taught entirely by one professor.
    pub fn single(professor: usize) -> Self {
        Self {
            professors: vec![professor],
            shares: vec![1.0],
        }
    }

    /// A course split equally among `professors`.
    pub fn equal(professors: Vec<usize>) -> Self {
        let mut assignment = Self {
            shares: Vec::with_capacity(professors.len()),
            professors,
        };
        assignment.equalize();
        assignment
    }

    pub fn len(&self) -> usize {
        self.professors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professors.is_empty()
    }

    /// Whether the course is team-taught.
    pub fn is_team(&self) -> bool {
        self.professors.len() > 1
    }

    pub fn contains(&self, professor: usize) -> bool {
        self.professors.contains(&professor)
    }

    /// Share of `professor`, or 0 when not assigned.
    pub fn share_of(&self, professor: usize) -> f64 {
        self.professors
            .iter()
            .position(|&p| p == professor)
            .map_or(0.0, |i| self.shares[i])
    }

    /// Resets all shares to `1 / n`.
    pub fn equalize(&mut self) {
        let n = self.professors.len();
        self.shares.clear();
        if n > 0 {
            self.shares.resize(n, 1.0 / n as f64);
        }
    }

    /// Rescales shares so they sum to one.
    ///
    /// Falls back to equal shares when the vector is malformed (length
    /// mismatch, negative or non-finite entries, or a zero total).
    pub fn normalize(&mut self) {
        let total: f64 = self.shares.iter().sum();
        let malformed = self.shares.len() != self.professors.len()
            || self.shares.iter().any(|s| !s.is_finite() || *s < 0.0)
            || total <= 0.0
            || !total.is_finite();
        if malformed {
            self.equalize();
            return;
        }
        for share in &mut self.shares {
            *share /= total;
        }
    }

    /// Whether the share vector is well formed and sums to one.
    pub fn shares_valid(&self) -> bool {
        if self.professors.is_empty() || self.shares.len() != self.professors.len() {
            return false;
        }
        if self.shares.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return false;
        }
        let total: f64 = self.shares.iter().sum();
        (total - 1.0).abs() <= SHARE_TOLERANCE
    }

    /// Adds a professor and redistributes shares equally.
    pub fn push_equal(&mut self, professor: usize) {
        self.professors.push(professor);
        self.equalize();
    }

    /// Removes the professor at `slot` and redistributes shares equally.
    pub fn remove_equal(&mut self, slot: usize) -> usize {
        let removed = self.professors.remove(slot);
        self.equalize();
        removed
    }
}

/// A complete candidate solution: one assignment per course.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
}

impl Allocation {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Number of courses covered.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Weekly teaching hours per professor.
    pub fn teaching_hours(&self, problem: &WorkloadProblem) -> Vec<f64> {
        let mut hours = vec![0.0; problem.professor_count()];
        for (course_idx, assignment) in self.assignments.iter().enumerate() {
            let course_hours = problem.course(course_idx).workload_hours();
            for (&p, &share) in assignment.professors.iter().zip(&assignment.shares) {
                if let Some(h) = hours.get_mut(p) {
                    *h += course_hours * share;
                }
            }
        }
        hours
    }

    /// Number of courses each professor takes part in.
    pub fn course_counts(&self, professor_count: usize) -> Vec<usize> {
        let mut counts = vec![0; professor_count];
        for assignment in &self.assignments {
            for &p in &assignment.professors {
                if let Some(c) = counts.get_mut(p) {
                    *c += 1;
                }
            }
        }
        counts
    }

    /// Indices of the courses a professor takes part in.
    pub fn courses_of(&self, professor: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.contains(professor))
            .map(|(i, _)| i)
            .collect()
    }

    /// Normalizes every assignment's shares.
    pub fn normalize(&mut self) {
        for assignment in &mut self.assignments {
            assignment.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_shares() {
        let a = Assignment::equal(vec![0, 1, 2]);
        assert!(a.shares_valid());
        assert!((a.share_of(1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(a.share_of(7), 0.0);
        assert!(a.is_team());
    }

    #[test]
    fn test_normalize_rescales() {
        let mut a = Assignment {
            professors: vec![0, 1],
            shares: vec![3.0, 1.0],
        };
        assert!(!a.shares_valid());
        a.normalize();
        assert!(a.shares_valid());
        assert!((a.shares[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_malformed_falls_back_to_equal() {
        let mut a = Assignment {
            professors: vec![0, 1],
            shares: vec![1.0],
        };
        a.normalize();
        assert_eq!(a.shares, vec![0.5, 0.5]);

        let mut b = Assignment {
            professors: vec![0, 1],
            shares: vec![0.0, 0.0],
        };
        b.normalize();
        assert_eq!(b.shares, vec![0.5, 0.5]);
    }

    #[test]
    fn test_empty_assignment_invalid() {
        let a = Assignment::default();
        assert!(!a.shares_valid());
        assert!(a.is_empty());
    }

    #[test]
    fn test_push_remove_equal() {
        let mut a = Assignment::single(4);
        a.push_equal(2);
        assert_eq!(a.shares, vec![0.5, 0.5]);
        let removed = a.remove_equal(0);
        assert_eq!(removed, 4);
        assert_eq!(a.professors, vec![2]);
        assert_eq!(a.shares, vec![1.0]);
    }

    #[test]
    fn test_course_counts() {
        let alloc = Allocation::new(vec![
            Assignment::single(0),
            Assignment::equal(vec![0, 2]),
        ]);
        assert_eq!(alloc.course_counts(3), vec![2, 0, 1]);
        assert_eq!(alloc.courses_of(0), vec![0, 1]);
        assert!(alloc.courses_of(1).is_empty());
    }
}
