//! Professor model.
//!
//! A professor is a teaching resource with a bounded weekly teaching load.
//! The remainder of the 40-hour contract goes to research and administration.

use serde::{Deserialize, Serialize};

use super::Course;

/// Contracted hours per week for every professor.
pub const CONTRACTED_HOURS: f64 = 40.0;

/// A faculty member. Immutable reference data during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professor {
    /// Unique identifier (e.g. `P001`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Academic title.
    pub title: String,
    /// Home department.
    pub department: String,
    /// Expertise tags.
    pub expertise: Vec<String>,
    /// Main expertise tag; also listed in `expertise`.
    pub primary_expertise: String,
    pub years_experience: u32,
    /// Fraction of contracted time reserved for research (0.0..=1.0).
    pub research_allocation: f64,
    /// Administrative hours per week.
    pub admin_load: f64,
    /// Minimum weekly teaching hours.
    pub min_teaching_load: f64,
    /// Maximum weekly teaching hours.
    pub max_teaching_load: f64,
    /// Historical teaching score (0.0..=1.0).
    pub teaching_quality: f64,
    /// Semesters the professor can teach in.
    pub availability: Vec<String>,
}

impl Professor {
    /// Creates a professor with neutral defaults.
    pub fn new(id: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            title: title_for_experience(0).to_string(),
            department: department.into(),
            expertise: Vec::new(),
            primary_expertise: String::new(),
            years_experience: 0,
            research_allocation: 0.3,
            admin_load: 5.0,
            min_teaching_load: 8.0,
            max_teaching_load: 20.0,
            teaching_quality: 0.8,
            availability: vec!["Fall".into(), "Spring".into()],
        }
    }

    /// Sets the expertise tags; the first tag becomes the primary one.
    pub fn with_expertise<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise = tags.into_iter().map(Into::into).collect();
        self.primary_expertise = self.expertise.first().cloned().unwrap_or_default();
        self
    }

    /// Sets the teaching-hour bounds.
    pub fn with_teaching_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_teaching_load = min;
        self.max_teaching_load = max;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets years of experience and the matching title.
    pub fn with_experience(mut self, years: u32) -> Self {
        self.years_experience = years;
        self.title = title_for_experience(years).to_string();
        self
    }

    /// Weekly contracted hours.
    pub fn contracted_hours(&self) -> f64 {
        CONTRACTED_HOURS
    }

    /// Weekly hours reserved for research.
    pub fn research_hours(&self) -> f64 {
        self.contracted_hours() * self.research_allocation
    }

    /// Hours left for teaching after research and administration,
    /// capped at the maximum teaching load.
    pub fn available_teaching_hours(&self) -> f64 {
        let remaining = self.contracted_hours() - self.research_hours() - self.admin_load;
        remaining.min(self.max_teaching_load).max(0.0)
    }

    /// Whether any expertise tag is required by the course.
    pub fn matches(&self, course: &Course) -> bool {
        self.expertise
            .iter()
            .any(|tag| course.required_expertise.contains(tag))
    }

    /// Whether the primary expertise is required by the course.
    pub fn primary_matches(&self, course: &Course) -> bool {
        course.required_expertise.contains(&self.primary_expertise)
    }
}

/// Title for a given number of years in academia.
pub fn title_for_experience(years: u32) -> &'static str {
    match years {
        20.. => "Professor",
        12..=19 => "Associate Professor",
        6..=11 => "Assistant Professor",
        _ => "Lecturer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(title_for_experience(25), "Professor");
        assert_eq!(title_for_experience(20), "Professor");
        assert_eq!(title_for_experience(12), "Associate Professor");
        assert_eq!(title_for_experience(6), "Assistant Professor");
        assert_eq!(title_for_experience(5), "Lecturer");
    }

    #[test]
    fn test_available_hours() {
        let mut p = Professor::new("P1", "Math").with_teaching_bounds(8.0, 20.0);
        p.research_allocation = 0.25;
        p.admin_load = 5.0;
        // 40 - 10 - 5 = 25, capped at 20
        assert!((p.available_teaching_hours() - 20.0).abs() < 1e-12);
        p.admin_load = 12.0;
        assert!((p.available_teaching_hours() - 18.0).abs() < 1e-12);
        assert!((p.research_hours() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_expertise_match() {
        let p = Professor::new("P1", "CS").with_expertise(["Algorithms", "Databases"]);
        let c = Course::new("C1", "CS101").with_required_expertise(["Databases"]);
        assert!(p.matches(&c));
        assert!(!p.primary_matches(&c));
        let c2 = Course::new("C2", "CS102").with_required_expertise(["Algorithms"]);
        assert!(p.primary_matches(&c2));
        let c3 = Course::new("C3", "HIST101").with_required_expertise(["History"]);
        assert!(!p.matches(&c3));
    }
}
