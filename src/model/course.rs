//! Course model.

use serde::{Deserialize, Serialize};

/// Weeks over which assessment hours are spread.
pub const ASSESSMENT_WEEKS: f64 = 15.0;

/// A course to be staffed. Immutable reference data during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier (e.g. `C001`).
    pub id: String,
    pub name: String,
    /// Catalog code (e.g. `CS101`).
    pub code: String,
    pub department: String,
    /// Lecture hours per week.
    pub lecture_hours: u32,
    /// Lab hours per week.
    pub lab_hours: u32,
    pub num_students: u32,
    /// Expertise tags; a professor matches when any tag overlaps.
    pub required_expertise: Vec<String>,
    /// 1 (first-year undergraduate) to 5 (graduate).
    pub difficulty_level: u8,
    /// Minimum number of professors teaching the course.
    pub min_professors: usize,
    /// Maximum number of professors when team-taught.
    pub max_professors: usize,
    /// Assessment hours per semester.
    pub assessment_hours: u32,
    /// Preparation hours per contact hour.
    pub prep_factor: f64,
    /// Whether the course may be team-taught.
    pub can_be_shared: bool,
    pub semester: String,
}

impl Course {
    /// Creates a single-professor course with typical defaults.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            code: code.into(),
            department: String::new(),
            lecture_hours: 3,
            lab_hours: 0,
            num_students: 50,
            required_expertise: Vec::new(),
            difficulty_level: 1,
            min_professors: 1,
            max_professors: 1,
            assessment_hours: 15,
            prep_factor: 1.0,
            can_be_shared: false,
            semester: "Both".into(),
        }
    }

    pub fn with_required_expertise<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_expertise = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hours(mut self, lecture: u32, lab: u32) -> Self {
        self.lecture_hours = lecture;
        self.lab_hours = lab;
        self
    }

    /// Marks the course as shareable by up to `max` professors.
    pub fn with_team(mut self, min: usize, max: usize) -> Self {
        self.min_professors = min;
        self.max_professors = max;
        self.can_be_shared = max > 1;
        self
    }

    pub fn with_prep(mut self, prep_factor: f64, assessment_hours: u32) -> Self {
        self.prep_factor = prep_factor;
        self.assessment_hours = assessment_hours;
        self
    }

    /// Lecture plus lab hours per week.
    pub fn contact_hours(&self) -> f64 {
        (self.lecture_hours + self.lab_hours) as f64
    }

    /// Weekly preparation hours.
    pub fn prep_hours(&self) -> f64 {
        self.contact_hours() * self.prep_factor
    }

    /// Weekly share of assessment work.
    pub fn weekly_assessment_hours(&self) -> f64 {
        self.assessment_hours as f64 / ASSESSMENT_WEEKS
    }

    /// Total weekly workload: contact + preparation + assessment.
    pub fn workload_hours(&self) -> f64 {
        self.contact_hours() + self.prep_hours() + self.weekly_assessment_hours()
    }
}
