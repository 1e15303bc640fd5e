#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a FASTA file with the given content
pub fn create_test_fasta(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Two-record FASTA from plain sequences
pub fn pair_fasta(seq1: &str, seq2: &str) -> String {
    format!(">seq1 first sequence\n{}\n>seq2 second sequence\n{}\n", seq1, seq2)
}

/// The classic nucleotide example pair
pub fn textbook_fasta() -> String {
    pair_fasta("GGTTGACTA", "TGTTACGG")
}

pub fn protein_fasta() -> String {
    r#">P1 first protein
HEAGAWGHEE
>P2 second protein
PAWHEAE
"#
    .to_string()
}

pub fn localign_cmd() -> Command {
    let mut cmd = Command::cargo_bin("localign").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("LOCALIGN_LOG");
    cmd
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_dir = temp_dir.path().join("input");
        let output_dir = temp_dir.path().join("output");

        fs::create_dir_all(&input_dir)?;

        Ok(Self {
            temp_dir,
            input_dir,
            output_dir,
        })
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        create_test_fasta(&self.input_dir, name, content)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Files in the output folder, sorted
    pub fn output_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
