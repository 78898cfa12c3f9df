//! Seeded synthetic dataset.
//!
//! Courses come from a fixed 80-entry catalog spanning computer science,
//! mathematics, business, engineering and the sciences and humanities.
//! Professors are drawn at random: a department, two to four expertise tags
//! from that department, workload parameters and per-course preferences.
//! The same seed always yields the same dataset.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{title_for_experience, Course, Preference, Professor, WorkloadProblem};
use crate::random::{create_rng, DEFAULT_SEED};

/// Size and seed of a generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub professors: usize,
    /// Courses taken from the front of the catalog; at most 80.
    pub courses: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            professors: 100,
            courses: CATALOG.len(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, professors: usize, courses: usize) -> Self {
        self.professors = professors;
        self.courses = courses;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// One catalog course.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub lecture_hours: u32,
    pub lab_hours: u32,
    pub num_students: u32,
    pub expertise: &'static str,
    pub difficulty_level: u8,
    pub min_professors: usize,
    pub max_professors: usize,
    pub assessment_hours: u32,
    pub prep_factor: f64,
    pub can_be_shared: bool,
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    code: &'static str,
    name: &'static str,
    department: &'static str,
    lecture_hours: u32,
    lab_hours: u32,
    num_students: u32,
    expertise: &'static str,
    difficulty_level: u8,
    min_professors: usize,
    max_professors: usize,
    assessment_hours: u32,
    prep_factor: f64,
    can_be_shared: bool,
) -> CatalogEntry {
    CatalogEntry {
        code,
        name,
        department,
        lecture_hours,
        lab_hours,
        num_students,
        expertise,
        difficulty_level,
        min_professors,
        max_professors,
        assessment_hours,
        prep_factor,
        can_be_shared,
    }
}

/// The course catalog, in ID order (`C001` first).
pub const CATALOG: [CatalogEntry; 80] = [
    entry("CS101", "Introduction to Programming", "COMP", 3, 2, 120, "Computer Science", 1, 1, 2, 30, 1.5, true),
    entry("CS102", "Data Structures", "COMP", 3, 2, 100, "Data Structures", 2, 1, 2, 25, 1.8, true),
    entry("CS201", "Algorithms", "COMP", 3, 1, 80, "Algorithms", 2, 1, 2, 20, 2.0, true),
    entry("CS202", "Computer Organization", "COMP", 3, 2, 90, "Computer Engineering", 2, 1, 2, 25, 1.7, true),
    entry("CS301", "Operating Systems", "COMP", 3, 2, 70, "Operating Systems", 3, 1, 2, 20, 2.2, true),
    entry("CS302", "Database Systems", "COMP", 3, 2, 85, "Database Systems", 3, 1, 2, 25, 1.9, true),
    entry("CS401", "Software Engineering", "COMP", 3, 2, 60, "Software Engineering", 4, 1, 3, 30, 2.5, true),
    entry("CS402", "Computer Networks", "COMP", 3, 1, 65, "Computer Networks", 4, 1, 2, 20, 2.1, true),
    entry("CS501", "Artificial Intelligence", "COMP", 3, 1, 50, "Artificial Intelligence", 5, 1, 2, 20, 2.8, true),
    entry("CS502", "Machine Learning", "COMP", 3, 1, 55, "Machine Learning", 5, 1, 2, 25, 2.6, true),
    entry("CS601", "Advanced Algorithms", "COMP", 3, 0, 40, "Algorithms", 5, 1, 2, 20, 3.0, false),
    entry("CS602", "Computer Graphics", "COMP", 3, 1, 45, "Computer Graphics", 5, 1, 2, 20, 2.4, true),
    entry("CS701", "Research Methods", "COMP", 2, 1, 30, "Computer Science", 5, 1, 2, 15, 2.5, false),
    entry("CS702", "Thesis Project", "COMP", 1, 0, 25, "Computer Science", 5, 1, 1, 40, 3.5, false),
    entry("CS801", "Advanced Topics", "COMP", 3, 0, 20, "Computer Science", 5, 1, 2, 20, 3.2, false),
    entry("CS802", "Seminar", "COMP", 2, 0, 15, "Computer Science", 5, 1, 2, 15, 2.8, false),
    entry("CS803", "Independent Study", "COMP", 1, 0, 10, "Computer Science", 5, 1, 1, 30, 3.0, false),
    entry("CS804", "Special Topics", "COMP", 3, 1, 35, "Computer Science", 4, 1, 2, 20, 2.3, true),
    entry("CS805", "Capstone Project", "COMP", 2, 2, 45, "Software Engineering", 4, 1, 3, 35, 2.7, true),
    entry("CS806", "Internship", "COMP", 0, 8, 60, "Computer Science", 4, 1, 2, 10, 1.5, true),
    entry("MATH101", "Calculus I", "MATH", 4, 1, 200, "Calculus", 1, 1, 3, 40, 1.8, true),
    entry("MATH102", "Calculus II", "MATH", 4, 1, 180, "Calculus", 1, 1, 3, 35, 1.9, true),
    entry("MATH201", "Linear Algebra", "MATH", 3, 1, 150, "Linear Algebra", 2, 1, 2, 25, 2.0, true),
    entry("MATH202", "Differential Equations", "MATH", 3, 1, 120, "Differential Equations", 2, 1, 2, 30, 2.2, true),
    entry("MATH301", "Advanced Calculus", "MATH", 3, 0, 80, "Calculus", 3, 1, 2, 25, 2.5, true),
    entry("MATH302", "Abstract Algebra", "MATH", 3, 0, 60, "Pure Mathematics", 3, 1, 2, 20, 2.8, false),
    entry("MATH401", "Real Analysis", "MATH", 3, 0, 50, "Pure Mathematics", 4, 1, 2, 25, 3.0, false),
    entry("MATH402", "Complex Analysis", "MATH", 3, 0, 45, "Pure Mathematics", 4, 1, 2, 20, 2.9, false),
    entry("MATH501", "Numerical Analysis", "MATH", 3, 1, 40, "Numerical Analysis", 5, 1, 2, 25, 2.7, true),
    entry("MATH502", "Mathematical Modeling", "MATH", 3, 1, 35, "Mathematical Modeling", 5, 1, 2, 30, 2.8, true),
    entry("MATH601", "Topology", "MATH", 3, 0, 30, "Pure Mathematics", 5, 1, 2, 20, 3.2, false),
    entry("MATH602", "Differential Geometry", "MATH", 3, 0, 25, "Pure Mathematics", 5, 1, 2, 20, 3.1, false),
    entry("MATH701", "Research Seminar", "MATH", 2, 0, 20, "Mathematics", 5, 1, 2, 15, 2.8, false),
    entry("MATH702", "Thesis", "MATH", 1, 0, 15, "Mathematics", 5, 1, 1, 40, 3.5, false),
    entry("MATH703", "Independent Study", "MATH", 1, 0, 10, "Mathematics", 5, 1, 1, 30, 3.0, false),
    entry("BUS101", "Introduction to Business", "BUS", 3, 0, 180, "Business Administration", 1, 1, 2, 25, 1.5, true),
    entry("BUS201", "Principles of Management", "BUS", 3, 0, 150, "Management", 2, 1, 2, 20, 1.8, true),
    entry("BUS202", "Financial Accounting", "BUS", 3, 1, 160, "Accounting", 2, 1, 2, 30, 2.0, true),
    entry("BUS301", "Marketing Principles", "BUS", 3, 0, 140, "Marketing", 3, 1, 2, 25, 1.9, true),
    entry("BUS302", "Corporate Finance", "BUS", 3, 0, 120, "Finance", 3, 1, 2, 30, 2.2, true),
    entry("BUS401", "Operations Management", "BUS", 3, 1, 100, "Operations Research", 4, 1, 2, 25, 2.3, true),
    entry("BUS402", "Strategic Management", "BUS", 3, 0, 90, "Management", 4, 1, 2, 30, 2.4, true),
    entry("BUS501", "Business Analytics", "BUS", 3, 1, 70, "Data Science", 5, 1, 2, 25, 2.6, true),
    entry("BUS502", "Supply Chain Management", "BUS", 3, 0, 65, "Supply Chain Management", 5, 1, 2, 20, 2.3, true),
    entry("BUS601", "Research Methods", "BUS", 2, 1, 45, "Business Administration", 5, 1, 2, 20, 2.5, true),
    entry("BUS602", "Thesis Project", "BUS", 1, 0, 35, "Business Administration", 5, 1, 1, 40, 3.2, false),
    entry("BUS603", "Capstone", "BUS", 2, 1, 50, "Business Administration", 4, 1, 3, 35, 2.7, true),
    entry("ME101", "Engineering Mechanics", "MECH", 4, 2, 150, "Mechanical Engineering", 1, 1, 2, 30, 2.0, true),
    entry("ME201", "Thermodynamics", "MECH", 3, 1, 120, "Mechanical Engineering", 2, 1, 2, 25, 2.2, true),
    entry("ME301", "Machine Design", "MECH", 3, 2, 90, "Mechanical Engineering", 3, 1, 2, 30, 2.4, true),
    entry("EE101", "Circuit Analysis", "ELEC", 4, 2, 140, "Electrical Engineering", 1, 1, 2, 30, 2.1, true),
    entry("EE201", "Electronics", "ELEC", 3, 2, 110, "Electrical Engineering", 2, 1, 2, 25, 2.3, true),
    entry("EE301", "Control Systems", "ELEC", 3, 1, 80, "Electrical Engineering", 3, 1, 2, 25, 2.5, true),
    entry("CE101", "Statics", "CIVIL", 4, 1, 130, "Civil Engineering", 1, 1, 2, 25, 2.0, true),
    entry("CE201", "Structural Analysis", "CIVIL", 3, 1, 100, "Civil Engineering", 2, 1, 2, 25, 2.2, true),
    entry("CE301", "Design of Structures", "CIVIL", 3, 2, 85, "Civil Engineering", 3, 1, 2, 30, 2.4, true),
    entry("CHE101", "Chemical Principles", "CHEM", 4, 2, 120, "Chemical Engineering", 1, 1, 2, 30, 2.1, true),
    entry("CHE201", "Process Design", "CHEM", 3, 2, 95, "Chemical Engineering", 2, 1, 2, 30, 2.3, true),
    entry("CHE301", "Reaction Engineering", "CHEM", 3, 1, 75, "Chemical Engineering", 3, 1, 2, 25, 2.5, true),
    entry("BME101", "Biomechanics", "BME", 3, 1, 80, "Biomedical Engineering", 2, 1, 2, 25, 2.2, true),
    entry("BME201", "Biomaterials", "BME", 3, 1, 60, "Biomedical Engineering", 3, 1, 2, 25, 2.4, true),
    entry("BME301", "Medical Devices", "BME", 3, 2, 50, "Biomedical Engineering", 4, 1, 2, 30, 2.6, true),
    entry("PHYS101", "General Physics I", "PHYS", 4, 2, 180, "Physics", 1, 1, 3, 35, 2.0, true),
    entry("PHYS102", "General Physics II", "PHYS", 4, 2, 160, "Physics", 1, 1, 3, 30, 2.1, true),
    entry("PHYS201", "Modern Physics", "PHYS", 3, 1, 120, "Physics", 2, 1, 2, 25, 2.3, true),
    entry("CHEM101", "General Chemistry", "CHEM", 4, 2, 200, "Chemistry", 1, 1, 3, 35, 2.0, true),
    entry("CHEM201", "Organic Chemistry", "CHEM", 3, 2, 150, "Chemistry", 2, 1, 2, 30, 2.2, true),
    entry("BIO101", "Introduction to Biology", "BIO", 4, 2, 190, "Biology", 1, 1, 3, 30, 1.9, true),
    entry("BIO201", "Cell Biology", "BIO", 3, 2, 130, "Biology", 2, 1, 2, 25, 2.1, true),
    entry("PSYCH101", "Introduction to Psychology", "PSYCH", 3, 0, 220, "Psychology", 1, 1, 3, 25, 1.6, true),
    entry("PSYCH201", "Research Methods", "PSYCH", 3, 1, 140, "Psychology", 2, 1, 2, 30, 2.0, true),
    entry("SOC101", "Introduction to Sociology", "SOC", 3, 0, 180, "Sociology", 1, 1, 2, 20, 1.7, true),
    entry("SOC201", "Social Theory", "SOC", 3, 0, 120, "Sociology", 2, 1, 2, 25, 2.1, true),
    entry("ENG101", "Composition", "ENG", 3, 0, 250, "English Literature", 1, 1, 3, 30, 1.8, true),
    entry("ENG201", "Literature Survey", "ENG", 3, 0, 160, "English Literature", 2, 1, 2, 25, 2.0, true),
    entry("HIST101", "World History", "HIST", 3, 0, 170, "History", 1, 1, 2, 20, 1.7, true),
    entry("HIST201", "American History", "HIST", 3, 0, 140, "History", 2, 1, 2, 25, 1.9, true),
    entry("PHIL101", "Introduction to Philosophy", "PHIL", 3, 0, 130, "Philosophy", 1, 1, 2, 20, 1.8, true),
    entry("ECON101", "Principles of Economics", "ECON", 3, 0, 200, "Economics", 1, 1, 3, 25, 1.8, true),
    entry("ECON201", "Microeconomics", "ECON", 3, 0, 150, "Economics", 2, 1, 2, 25, 2.0, true),
];

/// Departments professors are drawn from.
pub const DEPARTMENTS: [&str; 26] = [
    "Computer Science & Engineering",
    "Mathematics & Statistics",
    "Physics & Astronomy",
    "Mechanical Engineering",
    "Electrical Engineering",
    "Civil Engineering",
    "Chemical Engineering",
    "Biomedical Engineering",
    "Business Administration",
    "Economics",
    "Psychology",
    "Sociology",
    "Philosophy",
    "History",
    "English Literature",
    "Political Science",
    "Communication Studies",
    "Biology",
    "Chemistry",
    "Biochemistry",
    "Environmental Science",
    "Geology",
    "Medicine",
    "Nursing",
    "Public Health",
    "Pharmacy",
];

/// Expertise tags available to each department.
pub const DEPARTMENT_EXPERTISE: [(&str, &[&str]); 24] = [
    ("Computer Science & Engineering", &["Computer Science", "Software Engineering", "Computer Engineering", "Artificial Intelligence", "Machine Learning", "Deep Learning", "Data Science", "Database Systems", "Computer Networks", "Cybersecurity", "Human-Computer Interaction", "Computer Graphics", "Algorithms", "Data Structures", "Operating Systems"]),
    ("Mathematics & Statistics", &["Mathematics", "Statistics", "Applied Mathematics", "Pure Mathematics", "Linear Algebra", "Calculus", "Differential Equations", "Numerical Analysis", "Probability Theory", "Mathematical Modeling"]),
    ("Business Administration", &["Business Administration", "Finance", "Accounting", "Marketing", "Management", "Economics", "Operations Research", "Supply Chain Management"]),
    ("Mechanical Engineering", &["Mechanical Engineering", "Physics"]),
    ("Electrical Engineering", &["Electrical Engineering", "Physics"]),
    ("Civil Engineering", &["Civil Engineering", "Physics"]),
    ("Chemical Engineering", &["Chemical Engineering", "Chemistry"]),
    ("Biomedical Engineering", &["Biomedical Engineering", "Biology"]),
    ("Physics & Astronomy", &["Physics", "Applied Physics", "Quantum Physics"]),
    ("Biology", &["Biology", "Biochemistry"]),
    ("Chemistry", &["Chemistry", "Biochemistry"]),
    ("Psychology", &["Psychology"]),
    ("Sociology", &["Sociology"]),
    ("Philosophy", &["Philosophy"]),
    ("History", &["History"]),
    ("English Literature", &["English Literature", "Linguistics"]),
    ("Political Science", &["Political Science"]),
    ("Communication Studies", &["Communication"]),
    ("Economics", &["Economics"]),
    ("Medicine", &["Medicine", "Biology"]),
    ("Nursing", &["Nursing"]),
    ("Public Health", &["Public Health"]),
    ("Pharmacy", &["Pharmacy", "Chemistry"]),
    ("Physical Therapy", &["Physical Therapy", "Biology"]),
];

/// Expertise given to departments missing from [`DEPARTMENT_EXPERTISE`].
pub const FALLBACK_EXPERTISE: &str = "Computer Science";

const FALLBACK_TAGS: &[&str] = &[FALLBACK_EXPERTISE];

const FIRST_NAMES: [&str; 24] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Daniel", "Karen", "Matthew", "Nancy", "Anthony", "Lisa",
];

const LAST_NAMES: [&str; 24] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Taylor", "Moore", "Jackson",
    "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis",
];

/// Expertise tags of a department.
pub fn department_expertise(department: &str) -> &'static [&'static str] {
    DEPARTMENT_EXPERTISE
        .iter()
        .find(|(d, _)| *d == department)
        .map_or(FALLBACK_TAGS, |(_, tags)| *tags)
}

/// `(department, expertise)` pairs for every mapped department.
pub fn expertise_mapping() -> Vec<(String, String)> {
    DEPARTMENT_EXPERTISE
        .iter()
        .flat_map(|(d, tags)| tags.iter().map(move |t| (d.to_string(), t.to_string())))
        .collect()
}

/// The first `n` catalog courses.
///
/// # Errors
/// Fails when `n` exceeds the catalog size.
pub fn catalog_courses(n: usize) -> Result<Vec<Course>> {
    if n > CATALOG.len() {
        return Err(Error::Config(format!(
            "requested {n} courses but the catalog has {}",
            CATALOG.len()
        )));
    }
    Ok(CATALOG[..n]
        .iter()
        .enumerate()
        .map(|(i, e)| Course {
            id: format!("C{:03}", i + 1),
            name: e.name.to_string(),
            code: e.code.to_string(),
            department: e.department.to_string(),
            lecture_hours: e.lecture_hours,
            lab_hours: e.lab_hours,
            num_students: e.num_students,
            required_expertise: vec![e.expertise.to_string()],
            difficulty_level: e.difficulty_level,
            min_professors: e.min_professors,
            max_professors: e.max_professors,
            assessment_hours: e.assessment_hours,
            prep_factor: e.prep_factor,
            can_be_shared: e.can_be_shared,
            semester: "Both".to_string(),
        })
        .collect())
}

/// Generates a problem instance.
///
/// # Errors
/// Fails when more courses are requested than the catalog holds, or when
/// no professors are requested.
pub fn generate(config: &GeneratorConfig) -> Result<WorkloadProblem> {
    let courses = catalog_courses(config.courses)?;
    let mut rng = create_rng(config.seed);

    let mut professors = Vec::with_capacity(config.professors);
    let mut preferences = Vec::with_capacity(config.professors * courses.len());
    for i in 0..config.professors {
        let professor = random_professor(i, &mut rng);
        for course in &courses {
            preferences.push(Preference {
                professor_id: professor.id.clone(),
                course_id: course.id.clone(),
                preference: rng.random_range(0.5..1.0),
            });
        }
        professors.push(professor);
    }

    debug!(
        professors = professors.len(),
        courses = courses.len(),
        seed = config.seed,
        "generated dataset"
    );
    WorkloadProblem::new(professors, courses)?.with_preferences(&preferences)
}

fn random_professor<R: Rng>(index: usize, rng: &mut R) -> Professor {
    let department = *DEPARTMENTS.choose(rng).unwrap_or(&DEPARTMENTS[0]);
    let pool = department_expertise(department);
    let count = rng.random_range(2..=4).min(pool.len());
    let expertise: Vec<String> = pool
        .choose_multiple(rng, count)
        .map(|t| t.to_string())
        .collect();
    let primary_expertise = expertise.choose(rng).cloned().unwrap_or_default();

    let years = rng.random_range(1..=25);
    let first = FIRST_NAMES.choose(rng).unwrap_or(&FIRST_NAMES[0]);
    let last = LAST_NAMES.choose(rng).unwrap_or(&LAST_NAMES[0]);

    let research_allocation = rng.random_range(0.2..0.4);
    let admin_load = rng.random_range(2.0..10.0);
    let max_teaching_load = rng.random_range(15.0..25.0);
    let min_teaching_load = rng.random_range(8.0..12.0);
    let teaching_quality = rng.random_range(0.7..1.0);
    let mut availability = vec!["Fall".to_string(), "Spring".to_string()];
    if rng.random::<f64>() <= 0.1 {
        availability.push("Summer".to_string());
    }

    Professor {
        id: format!("P{:03}", index + 1),
        name: format!("{first} {last}"),
        title: title_for_experience(years).to_string(),
        department: department.to_string(),
        expertise,
        primary_expertise,
        years_experience: years,
        research_allocation,
        admin_load,
        min_teaching_load,
        max_teaching_load,
        teaching_quality,
        availability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_composition() {
        let prefixes = |p: &[&str]| {
            CATALOG
                .iter()
                .filter(|e| p.iter().any(|x| e.code.starts_with(x)))
                .count()
        };
        assert_eq!(prefixes(&["CS"]), 20);
        assert_eq!(prefixes(&["MATH"]), 15);
        assert_eq!(prefixes(&["BUS"]), 12);
        // CHE (chemical engineering) but not CHEM (chemistry)
        assert_eq!(prefixes(&["ME", "EE", "CE", "CHE", "BME"]) - prefixes(&["CHEM"]), 15);
        assert!(CATALOG.iter().all(|e| (1..=5).contains(&e.difficulty_level)));
        assert!(CATALOG.iter().all(|e| e.min_professors <= e.max_professors));
    }

    #[test]
    fn test_generate_default_size() {
        let problem = generate(&GeneratorConfig::default()).unwrap();
        assert_eq!(problem.professor_count(), 100);
        assert_eq!(problem.course_count(), 80);
        assert_eq!(problem.course(0).id, "C001");
        assert_eq!(problem.course(79).id, "C080");
        assert_eq!(problem.professor(99).id, "P100");
        let hours = problem.course(0).workload_hours();
        // CS101: 5 contact + 7.5 prep + 2 assessment
        assert!((hours - 14.5).abs() < 1e-9);
    }

    #[test]
    fn test_generated_professors_in_range() {
        let problem = generate(&GeneratorConfig::default().with_seed(7)).unwrap();
        for p in problem.professors() {
            assert!((1..=4).contains(&p.expertise.len()));
            assert!(p.expertise.contains(&p.primary_expertise));
            assert!((0.2..0.4).contains(&p.research_allocation));
            assert!((8.0..12.0).contains(&p.min_teaching_load));
            assert!((15.0..25.0).contains(&p.max_teaching_load));
            assert!((1..=25).contains(&p.years_experience));
            assert_eq!(p.title, title_for_experience(p.years_experience));
        }
        for p in 0..problem.professor_count() {
            for c in 0..problem.course_count() {
                assert!((0.5..1.0).contains(&problem.preference(p, c)));
            }
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = generate(&GeneratorConfig::default().with_seed(9)).unwrap();
        let b = generate(&GeneratorConfig::default().with_seed(9)).unwrap();
        assert_eq!(a.professors(), b.professors());
        assert_eq!(a.preference_entries(), b.preference_entries());
        let c = generate(&GeneratorConfig::default().with_seed(10)).unwrap();
        assert_ne!(a.professors(), c.professors());
    }

    #[test]
    fn test_too_many_courses() {
        let config = GeneratorConfig::default().with_size(10, 81);
        assert!(generate(&config).is_err());
    }

    #[test]
    fn test_department_fallback() {
        assert_eq!(department_expertise("Geology"), &[FALLBACK_EXPERTISE]);
        assert!(department_expertise("Biology").contains(&"Biochemistry"));
    }
}
