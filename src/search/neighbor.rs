//! The neighbor primitive shared by every optimizer.
//!
//! A move touches exactly one course. Shares of the touched course always
//! sum to one afterwards.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::{Allocation, Assignment, Course, WorkloadProblem};

/// Perturbation applied to one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Replace one professor with one not yet on the course.
    Reassign,
    /// Draw new shares for a team.
    Reshare,
    /// Add a professor to a shareable course below its maximum.
    Add,
    /// Drop a professor from a course above its minimum.
    Remove,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Reassign, Move::Reshare, Move::Add, Move::Remove];
}

/// Returns a copy of `allocation` with one random course perturbed.
pub fn random_neighbor<R: Rng>(
    problem: &WorkloadProblem,
    allocation: &Allocation,
    min_share: f64,
    rng: &mut R,
) -> Allocation {
    let mut neighbor = allocation.clone();
    if neighbor.is_empty() {
        return neighbor;
    }
    let course = rng.random_range(0..neighbor.len());
    perturb_course(problem, &mut neighbor, course, min_share, rng);
    neighbor
}

/// Applies a random [`Move`] to one course, falling back to
/// [`Move::Reassign`] when the drawn move does not apply.
///
/// Returns the move actually applied, or `None` when nothing could change
/// (every professor already teaches the course).
pub fn perturb_course<R: Rng>(
    problem: &WorkloadProblem,
    allocation: &mut Allocation,
    course_idx: usize,
    min_share: f64,
    rng: &mut R,
) -> Option<Move> {
    let course = problem.course(course_idx);
    let n_profs = problem.professor_count();
    let assignment = &mut allocation.assignments[course_idx];

    let drawn = *Move::ALL.choose(rng)?;
    let applied = match drawn {
        Move::Reshare => reshare(assignment, min_share, rng),
        Move::Add => add(assignment, course, n_profs, rng),
        Move::Remove => remove(assignment, course, rng),
        Move::Reassign => false,
    };
    if applied {
        return Some(drawn);
    }
    reassign(assignment, n_profs, rng).then_some(Move::Reassign)
}

/// Professors not yet on the course.
fn outsiders(assignment: &Assignment, n_profs: usize) -> Vec<usize> {
    (0..n_profs).filter(|&p| !assignment.contains(p)).collect()
}

fn reassign<R: Rng>(assignment: &mut Assignment, n_profs: usize, rng: &mut R) -> bool {
    let Some(&replacement) = outsiders(assignment, n_profs).choose(rng) else {
        return false;
    };
    if assignment.is_empty() {
        *assignment = Assignment::single(replacement);
    } else {
        let slot = rng.random_range(0..assignment.len());
        assignment.professors[slot] = replacement;
        assignment.normalize();
    }
    true
}

/// Redraws team shares: each at least `min(min_share, 1/n)`, summing to 1.
fn reshare<R: Rng>(assignment: &mut Assignment, min_share: f64, rng: &mut R) -> bool {
    let n = assignment.len();
    if n < 2 {
        return false;
    }
    let floor = min_share.clamp(0.0, 1.0 / n as f64);
    let spare = 1.0 - floor * n as f64;
    let weights: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        assignment.equalize();
        return true;
    }
    assignment.shares = weights.iter().map(|w| floor + spare * w / total).collect();
    true
}

fn add<R: Rng>(assignment: &mut Assignment, course: &Course, n_profs: usize, rng: &mut R) -> bool {
    if !course.can_be_shared || assignment.len() >= course.max_professors {
        return false;
    }
    let Some(&newcomer) = outsiders(assignment, n_profs).choose(rng) else {
        return false;
    };
    assignment.push_equal(newcomer);
    true
}

fn remove<R: Rng>(assignment: &mut Assignment, course: &Course, rng: &mut R) -> bool {
    let n = assignment.len();
    if n <= 1 || n <= course.min_professors {
        return false;
    }
    let slot = rng.random_range(0..n);
    assignment.remove_equal(slot);
    true
}
