//! Problem datasets: seeded generation, CSV files and summaries.

pub mod csv;
mod generator;
mod summary;

pub use generator::{
    catalog_courses, department_expertise, expertise_mapping, generate, CatalogEntry,
    GeneratorConfig, CATALOG, DEPARTMENTS, DEPARTMENT_EXPERTISE, FALLBACK_EXPERTISE,
};
pub use summary::DatasetSummary;

#[cfg(test)]
mod tests {
    use super::csv as files;
    use super::{generate, GeneratorConfig};

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(12, 10)).unwrap();
        files::save_dir(&problem, dir.path()).unwrap();

        let loaded = files::load_dir(dir.path()).unwrap();
        assert_eq!(loaded.professors(), problem.professors());
        assert_eq!(loaded.courses(), problem.courses());
        assert_eq!(loaded.preference_entries(), problem.preference_entries());
    }

    #[test]
    fn test_load_without_optional_files() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(4, 3)).unwrap();
        files::save_dir(&problem, dir.path()).unwrap();
        std::fs::remove_file(dir.path().join(files::PREFERENCES_FILE)).unwrap();
        std::fs::remove_file(dir.path().join(files::EXPERTISE_FILE)).unwrap();

        let loaded = files::load_dir(dir.path()).unwrap();
        assert_eq!(loaded.preference(0, 0), crate::model::DEFAULT_PREFERENCE);
    }

    #[test]
    fn test_load_rejects_unknown_preference_id() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(4, 3)).unwrap();
        files::save_dir(&problem, dir.path()).unwrap();
        std::fs::write(
            dir.path().join(files::PREFERENCES_FILE),
            "professor_id,course_id,preference\nP999,C001,0.7\n",
        )
        .unwrap();
        assert!(files::load_dir(dir.path()).is_err());
    }
}
