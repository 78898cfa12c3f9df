//! CSV import and export of datasets.
//!
//! A dataset directory holds:
//!
//! | File | Columns |
//! |------|---------|
//! | `professors.csv` | one row per professor; `expertise` and `availability` joined with `;` |
//! | `courses.csv` | one row per course; `required_expertise` joined with `;` |
//! | `preferences.csv` | `professor_id,course_id,preference` (optional) |
//! | `expertise_mapping.csv` | `department,expertise` (optional) |
//!
//! Missing columns and unknown IDs are errors. Boolean columns accept
//! `true/false`, `True/False`, `1/0` and `yes/no`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use super::generator;
use crate::error::{Error, Result};
use crate::model::{Course, Preference, Professor, WorkloadProblem};

pub const PROFESSORS_FILE: &str = "professors.csv";
pub const COURSES_FILE: &str = "courses.csv";
pub const PREFERENCES_FILE: &str = "preferences.csv";
pub const EXPERTISE_FILE: &str = "expertise_mapping.csv";

const LIST_SEPARATOR: char = ';';

#[derive(Debug, Serialize, Deserialize)]
struct ProfessorRecord {
    id: String,
    name: String,
    title: String,
    department: String,
    expertise: String,
    primary_expertise: String,
    years_experience: u32,
    research_allocation: f64,
    admin_load: f64,
    max_teaching_load: f64,
    min_teaching_load: f64,
    teaching_quality: f64,
    availability: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CourseRecord {
    id: String,
    name: String,
    code: String,
    department: String,
    lecture_hours: u32,
    lab_hours: u32,
    num_students: u32,
    required_expertise: String,
    difficulty_level: u8,
    min_professors: usize,
    max_professors: usize,
    assessment_hours: u32,
    prep_factor: f64,
    #[serde(deserialize_with = "flexible_bool")]
    can_be_shared: bool,
    semester: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExpertiseRecord {
    department: String,
    expertise: String,
}

fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean: {raw:?}")))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_list(items: &[String]) -> String {
    items.join(&LIST_SEPARATOR.to_string())
}

impl From<ProfessorRecord> for Professor {
    fn from(r: ProfessorRecord) -> Self {
        Professor {
            id: r.id,
            name: r.name,
            title: r.title,
            department: r.department,
            expertise: split_list(&r.expertise),
            primary_expertise: r.primary_expertise,
            years_experience: r.years_experience,
            research_allocation: r.research_allocation,
            admin_load: r.admin_load,
            min_teaching_load: r.min_teaching_load,
            max_teaching_load: r.max_teaching_load,
            teaching_quality: r.teaching_quality,
            availability: split_list(&r.availability),
        }
    }
}

impl From<&Professor> for ProfessorRecord {
    fn from(p: &Professor) -> Self {
        ProfessorRecord {
            id: p.id.clone(),
            name: p.name.clone(),
            title: p.title.clone(),
            department: p.department.clone(),
            expertise: join_list(&p.expertise),
            primary_expertise: p.primary_expertise.clone(),
            years_experience: p.years_experience,
            research_allocation: p.research_allocation,
            admin_load: p.admin_load,
            max_teaching_load: p.max_teaching_load,
            min_teaching_load: p.min_teaching_load,
            teaching_quality: p.teaching_quality,
            availability: join_list(&p.availability),
        }
    }
}

impl From<CourseRecord> for Course {
    fn from(r: CourseRecord) -> Self {
        Course {
            id: r.id,
            name: r.name,
            code: r.code,
            department: r.department,
            lecture_hours: r.lecture_hours,
            lab_hours: r.lab_hours,
            num_students: r.num_students,
            required_expertise: split_list(&r.required_expertise),
            difficulty_level: r.difficulty_level,
            min_professors: r.min_professors,
            max_professors: r.max_professors,
            assessment_hours: r.assessment_hours,
            prep_factor: r.prep_factor,
            can_be_shared: r.can_be_shared,
            semester: r.semester,
        }
    }
}

impl From<&Course> for CourseRecord {
    fn from(c: &Course) -> Self {
        CourseRecord {
            id: c.id.clone(),
            name: c.name.clone(),
            code: c.code.clone(),
            department: c.department.clone(),
            lecture_hours: c.lecture_hours,
            lab_hours: c.lab_hours,
            num_students: c.num_students,
            required_expertise: join_list(&c.required_expertise),
            difficulty_level: c.difficulty_level,
            min_professors: c.min_professors,
            max_professors: c.max_professors,
            assessment_hours: c.assessment_hours,
            prep_factor: c.prep_factor,
            can_be_shared: c.can_be_shared,
            semester: c.semester.clone(),
        }
    }
}

fn read_records<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    debug!(path = %path.display(), rows = records.len(), "read csv");
    Ok(records)
}

fn write_records<T: Serialize>(path: &Path, records: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_professors(path: &Path) -> Result<Vec<Professor>> {
    Ok(read_records::<ProfessorRecord>(path)?
        .into_iter()
        .map(Professor::from)
        .collect())
}

pub fn read_courses(path: &Path) -> Result<Vec<Course>> {
    Ok(read_records::<CourseRecord>(path)?
        .into_iter()
        .map(Course::from)
        .collect())
}

pub fn read_preferences(path: &Path) -> Result<Vec<Preference>> {
    read_records(path)
}

/// `(department, expertise)` pairs.
pub fn read_expertise_mapping(path: &Path) -> Result<Vec<(String, String)>> {
    Ok(read_records::<ExpertiseRecord>(path)?
        .into_iter()
        .map(|r| (r.department, r.expertise))
        .collect())
}

pub fn write_professors(path: &Path, professors: &[Professor]) -> Result<()> {
    write_records(path, professors.iter().map(ProfessorRecord::from))
}

pub fn write_courses(path: &Path, courses: &[Course]) -> Result<()> {
    write_records(path, courses.iter().map(CourseRecord::from))
}

pub fn write_preferences(path: &Path, preferences: &[Preference]) -> Result<()> {
    write_records(path, preferences)
}

pub fn write_expertise_mapping(path: &Path, mapping: &[(String, String)]) -> Result<()> {
    write_records(
        path,
        mapping.iter().map(|(department, expertise)| ExpertiseRecord {
            department: department.clone(),
            expertise: expertise.clone(),
        }),
    )
}

/// Loads a dataset directory into a validated problem.
///
/// # Errors
/// Fails when a required file or column is missing, a value does not
/// parse, or the data is inconsistent (see [`WorkloadProblem::new`]).
pub fn load_dir(dir: &Path) -> Result<WorkloadProblem> {
    ensure_dir(dir)?;
    let professors = read_professors(&dir.join(PROFESSORS_FILE))?;
    let courses = read_courses(&dir.join(COURSES_FILE))?;

    let mapping_path = dir.join(EXPERTISE_FILE);
    if mapping_path.exists() {
        let mapping = read_expertise_mapping(&mapping_path)?;
        warn_unmapped_expertise(&professors, &mapping);
    }

    let mut problem = WorkloadProblem::new(professors, courses)?;
    let preferences_path = dir.join(PREFERENCES_FILE);
    if preferences_path.exists() {
        let preferences = read_preferences(&preferences_path)?;
        problem = problem.with_preferences(&preferences)?;
    } else {
        debug!("no preferences file, using neutral preferences");
    }

    info!(
        dir = %dir.display(),
        professors = problem.professor_count(),
        courses = problem.course_count(),
        "loaded dataset"
    );
    Ok(problem)
}

/// Writes all four dataset files into `dir`, creating it if needed.
pub fn save_dir(problem: &WorkloadProblem, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_professors(&dir.join(PROFESSORS_FILE), problem.professors())?;
    write_courses(&dir.join(COURSES_FILE), problem.courses())?;
    write_preferences(&dir.join(PREFERENCES_FILE), &problem.preference_entries())?;
    write_expertise_mapping(&dir.join(EXPERTISE_FILE), &mapping_for(problem))?;
    info!(dir = %dir.display(), "saved dataset");
    Ok(())
}

/// The catalog mapping plus any department-tag pair professors carry
/// beyond it.
fn mapping_for(problem: &WorkloadProblem) -> Vec<(String, String)> {
    let mut mapping = generator::expertise_mapping();
    let mut seen: HashSet<(String, String)> = mapping.iter().cloned().collect();
    for p in problem.professors() {
        for tag in &p.expertise {
            let pair = (p.department.clone(), tag.clone());
            if seen.insert(pair.clone()) {
                mapping.push(pair);
            }
        }
    }
    mapping
}

fn warn_unmapped_expertise(professors: &[Professor], mapping: &[(String, String)]) {
    let known: HashSet<(&str, &str)> = mapping
        .iter()
        .map(|(d, e)| (d.as_str(), e.as_str()))
        .collect();
    for p in professors {
        for tag in &p.expertise {
            if !known.contains(&(p.department.as_str(), tag.as_str())) {
                warn!(
                    professor = %p.id,
                    department = %p.department,
                    expertise = %tag,
                    "expertise not mapped to department"
                );
            }
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "dataset directory {} does not exist",
            dir.display()
        )))
    }
}
