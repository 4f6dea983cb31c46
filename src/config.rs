use std::path::PathBuf;

/// Where the log lives and how much of it the charts look at. Built once in
/// `main` and handed to whoever needs it, tests point it at a temp dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub data_path: PathBuf,
    pub summary_path: PathBuf,
    /// Number of trailing records shown in the steps bar chart.
    pub recent_days: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("fitness_data.csv"),
            summary_path: PathBuf::from("fitness_summary.csv"),
            recent_days: 7,
        }
    }
}

impl Config {
    #[cfg(test)]
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Self {
            data_path: dir.join("fitness_data.csv"),
            summary_path: dir.join("fitness_summary.csv"),
            ..Self::default()
        }
    }
}
