#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load(None).unwrap();
        assert_eq!(config.report.cutoffs, vec![10, 30, 50, 100, 200, 500, 1000]);
        assert!(database_folder(&config).is_err());
        assert!(disease(&config).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = apply_overrides(
            RunConfig::default(),
            Some(PathBuf::from("/data/db")),
            Some("breast".to_string()),
            vec![5, 20],
        )
        .unwrap();
        assert_eq!(database_folder(&config).unwrap(), Path::new("/data/db"));
        assert_eq!(disease(&config).unwrap(), "breast");
        assert_eq!(config.report.cutoffs, vec![5, 20]);
    }

    #[test]
    fn test_empty_cutoff_override_keeps_config() {
        let config = apply_overrides(RunConfig::default(), None, None, vec![]).unwrap();
        assert_eq!(config.report.cutoffs.len(), 7);
    }

    #[test]
    fn test_zero_cutoff_rejected() {
        assert!(apply_overrides(RunConfig::default(), None, None, vec![0]).is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("novapair.yaml");
        std::fs::write(&path, "database:\n  folder: /srv/db\nreport:\n  cutoffs: [3]\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(database_folder(&config).unwrap(), Path::new("/srv/db"));
        assert_eq!(config.report.cutoffs, vec![3]);
        assert_eq!(config.database.kegg, "kegg.txt");
    }

    #[test]
    fn test_template_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.yaml");
        let mut config = RunConfig::default();
        config.report.cutoffs = vec![25, 75];
        config.evidence.disease = Some("lung".to_string());

        write_template(&config, &path).unwrap();
        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.report.cutoffs, vec![25, 75]);
        assert_eq!(disease(&loaded).unwrap(), "lung");
        assert_eq!(loaded.evidence.sources.len(), 3);
        assert!(database_folder(&loaded).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(load(Some(Path::new("/nonexistent/novapair.toml"))).is_err());
    }
}
