use crate::bio::alignment::{FillStrategy, NamedMatrix, TracebackPriority};
use crate::bio::sequence::SequenceType;
use crate::report::Format;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alignment: AlignmentConfig,
    pub output: OutputConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Force a sequence type instead of detecting it from the first record
    pub sequence_type: Option<SequenceType>,
    /// Substitution matrix for amino-acid sequences
    pub matrix: NamedMatrix,
    pub match_score: i32,
    pub mismatch_penalty: i32,
    /// Magnitude is used; the sign is ignored
    pub gap_penalty: i32,
    pub traceback_order: TracebackPriority,
    pub fill_strategy: FillStrategy,
    pub parallel_traceback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output folder; the current directory when unset
    pub directory: Option<String>,
    pub format: Format,
    /// Write the filled matrix next to the report
    pub write_matrix: bool,
    /// Append the run log to the output folder
    pub write_log: bool,
    /// Columns per alignment block in the text report
    pub block_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// 0 uses every core
    pub threads: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            sequence_type: None,
            matrix: NamedMatrix::Blosum62,
            match_score: 1,
            mismatch_penalty: 0,
            gap_penalty: 0,
            traceback_order: TracebackPriority::default(),
            fill_strategy: FillStrategy::RowMajor,
            parallel_traceback: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: Format::Text,
            write_matrix: true,
            write_log: true,
            block_width: 60,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::LocalignError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::LocalignError::Config(format!("Failed to parse config: {}", e)))?;
    if config.output.block_width == 0 {
        return Err(crate::LocalignError::Config(
            "output.block_width must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::LocalignError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::LocalignError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("localign.toml");

        let mut config = default_config();
        config.alignment.matrix = NamedMatrix::Pam250;
        config.alignment.traceback_order = "lud".parse().unwrap();
        config.output.format = Format::Json;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[alignment]\nmatch_score = 3\nmismatch_penalty = -3\nsequence_type = \"nt\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.alignment.match_score, 3);
        assert_eq!(config.alignment.sequence_type, Some(SequenceType::Nucleotide));
        assert_eq!(config.alignment.matrix, NamedMatrix::Blosum62);
        assert_eq!(config.output.block_width, 60);
    }

    #[test]
    fn test_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[alignment]\ntraceback_order = \"ddd\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, crate::LocalignError::Config(_)));
    }
}
