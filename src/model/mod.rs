//! Domain model for faculty workload allocation.
//!
//! - [`Professor`], [`Course`]: immutable reference data
//! - [`WorkloadProblem`]: validated instance with ID lookup and preferences
//! - [`Allocation`], [`Assignment`]: candidate solutions

mod allocation;
mod course;
mod problem;
mod professor;

pub use allocation::{Allocation, Assignment, SHARE_TOLERANCE};
pub use course::{Course, ASSESSMENT_WEEKS};
pub use problem::{Preference, WorkloadProblem, DEFAULT_PREFERENCE};
pub use professor::{title_for_experience, Professor, CONTRACTED_HOURS};
