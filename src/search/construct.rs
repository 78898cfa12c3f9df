//! Initial allocation and repair.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::{Allocation, Assignment, WorkloadProblem};

/// Builds a starting allocation greedily, course by course, then repairs it.
///
/// Each course takes `min_professors` professors drawn at random from the
/// best non-empty pool: matching expertise with spare capacity, then any
/// spare capacity, then everyone.
pub fn initial_allocation<R: Rng>(problem: &WorkloadProblem, rng: &mut R) -> Allocation {
    let n_profs = problem.professor_count();
    let mut loads = vec![0.0; n_profs];
    let mut assignments = Vec::with_capacity(problem.course_count());

    for course in problem.courses() {
        let team = course.min_professors.clamp(1, n_profs);
        let portion = course.workload_hours() / team as f64;
        let mut chosen: Vec<usize> = Vec::with_capacity(team);

        for _ in 0..team {
            let fits = |p: usize| {
                !chosen.contains(&p) && loads[p] + portion <= problem.professor(p).max_teaching_load
            };
            let expert: Vec<usize> = (0..n_profs)
                .filter(|&p| fits(p) && problem.professor(p).matches(course))
                .collect();
            let pool = if !expert.is_empty() {
                expert
            } else {
                let spare: Vec<usize> = (0..n_profs).filter(|&p| fits(p)).collect();
                if !spare.is_empty() {
                    spare
                } else {
                    (0..n_profs).filter(|p| !chosen.contains(p)).collect()
                }
            };
            if let Some(&p) = pool.choose(rng) {
                loads[p] += portion;
                chosen.push(p);
            }
        }
        assignments.push(Assignment::equal(chosen));
    }

    let mut allocation = Allocation::new(assignments);
    repair(problem, &mut allocation, rng);
    allocation
}

/// Restores structural validity.
///
/// 1. Drops unknown and duplicate professors, then tops up understaffed
///    courses with random professors.
/// 2. Gives every idle professor work: joins a shareable course with room
///    (expertise match preferred), otherwise takes over a single-professor
///    course whose professor also teaches elsewhere.
/// 3. Normalizes every course's shares.
///
/// Teaching-hour bounds are left to the evaluator.
pub fn repair<R: Rng>(problem: &WorkloadProblem, allocation: &mut Allocation, rng: &mut R) {
    let n_profs = problem.professor_count();
    allocation
        .assignments
        .resize_with(problem.course_count(), Assignment::default);

    for (c, assignment) in allocation.assignments.iter_mut().enumerate() {
        sanitize(assignment, n_profs);
        let min = problem.course(c).min_professors.min(n_profs);
        while assignment.len() < min {
            let outsiders: Vec<usize> = (0..n_profs).filter(|&p| !assignment.contains(p)).collect();
            match outsiders.choose(rng) {
                Some(&p) => assignment.push_equal(p),
                None => break,
            }
        }
    }

    let mut counts = allocation.course_counts(n_profs);
    for p in 0..n_profs {
        if counts[p] > 0 {
            continue;
        }
        if let Some(c) = joinable_course(problem, allocation, p, rng) {
            allocation.assignments[c].push_equal(p);
            counts[p] += 1;
        } else if let Some(c) = takeover_course(problem, allocation, &counts, p, rng) {
            let previous = allocation.assignments[c].professors[0];
            allocation.assignments[c] = Assignment::single(p);
            counts[previous] -= 1;
            counts[p] += 1;
        }
    }

    allocation.normalize();
}

/// Removes out-of-range and repeated professors, keeping first occurrences
/// and their shares.
fn sanitize(assignment: &mut Assignment, n_profs: usize) {
    if assignment.shares.len() != assignment.professors.len() {
        assignment.equalize();
    }
    let mut professors = Vec::with_capacity(assignment.len());
    let mut shares = Vec::with_capacity(assignment.len());
    for (&p, &s) in assignment.professors.iter().zip(&assignment.shares) {
        if p < n_profs && !professors.contains(&p) {
            professors.push(p);
            shares.push(s);
        }
    }
    assignment.professors = professors;
    assignment.shares = shares;
}

fn joinable_course<R: Rng>(
    problem: &WorkloadProblem,
    allocation: &Allocation,
    p: usize,
    rng: &mut R,
) -> Option<usize> {
    let prof = problem.professor(p);
    let open: Vec<usize> = allocation
        .assignments
        .iter()
        .enumerate()
        .filter(|(c, a)| {
            let course = problem.course(*c);
            course.can_be_shared && a.len() < course.max_professors && !a.contains(p)
        })
        .map(|(c, _)| c)
        .collect();
    let matching: Vec<usize> = open
        .iter()
        .copied()
        .filter(|&c| prof.matches(problem.course(c)))
        .collect();
    if matching.is_empty() {
        open.choose(rng).copied()
    } else {
        matching.choose(rng).copied()
    }
}

fn takeover_course<R: Rng>(
    problem: &WorkloadProblem,
    allocation: &Allocation,
    counts: &[usize],
    p: usize,
    rng: &mut R,
) -> Option<usize> {
    let prof = problem.professor(p);
    let candidates: Vec<usize> = allocation
        .assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.len() == 1 && counts[a.professors[0]] > 1)
        .map(|(c, _)| c)
        .collect();
    let matching: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&c| prof.matches(problem.course(c)))
        .collect();
    if matching.is_empty() {
        candidates.choose(rng).copied()
    } else {
        matching.choose(rng).copied()
    }
}
