//! Named amino-acid substitution matrices (BLOSUM and PAM families).
//!
//! Each table is built on first use and lives for the rest of the process;
//! every scoring call borrows the same `&'static SubstitutionMatrix`.

use super::scoring::Score;
use super::tables;
use crate::bio::sequence::AMINO_ACID_ALPHABET;
use crate::{LocalignError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NO_RESIDUE: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedMatrix {
    #[serde(rename = "BLOSUM45")]
    Blosum45,
    #[serde(rename = "BLOSUM50")]
    Blosum50,
    #[serde(rename = "BLOSUM62")]
    Blosum62,
    #[serde(rename = "BLOSUM80")]
    Blosum80,
    #[serde(rename = "BLOSUM90")]
    Blosum90,
    #[serde(rename = "PAM30")]
    Pam30,
    #[serde(rename = "PAM70")]
    Pam70,
    #[serde(rename = "PAM250")]
    Pam250,
}

impl NamedMatrix {
    pub const ALL: [NamedMatrix; 8] = [
        NamedMatrix::Blosum45,
        NamedMatrix::Blosum50,
        NamedMatrix::Blosum62,
        NamedMatrix::Blosum80,
        NamedMatrix::Blosum90,
        NamedMatrix::Pam30,
        NamedMatrix::Pam70,
        NamedMatrix::Pam250,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamedMatrix::Blosum45 => "BLOSUM45",
            NamedMatrix::Blosum50 => "BLOSUM50",
            NamedMatrix::Blosum62 => "BLOSUM62",
            NamedMatrix::Blosum80 => "BLOSUM80",
            NamedMatrix::Blosum90 => "BLOSUM90",
            NamedMatrix::Pam30 => "PAM30",
            NamedMatrix::Pam70 => "PAM70",
            NamedMatrix::Pam250 => "PAM250",
        }
    }

    /// Shared table for this matrix, built on first access.
    pub fn matrix(&self) -> &'static SubstitutionMatrix {
        match self {
            NamedMatrix::Blosum45 => &BLOSUM45,
            NamedMatrix::Blosum50 => &BLOSUM50,
            NamedMatrix::Blosum62 => &BLOSUM62,
            NamedMatrix::Blosum80 => &BLOSUM80,
            NamedMatrix::Blosum90 => &BLOSUM90,
            NamedMatrix::Pam30 => &PAM30,
            NamedMatrix::Pam70 => &PAM70,
            NamedMatrix::Pam250 => &PAM250,
        }
    }
}

impl Default for NamedMatrix {
    fn default() -> Self {
        NamedMatrix::Blosum62
    }
}

impl fmt::Display for NamedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NamedMatrix {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        NamedMatrix::ALL
            .iter()
            .copied()
            .find(|m| m.name() == upper)
            .ok_or_else(|| {
                let names: Vec<&str> = NamedMatrix::ALL.iter().map(|m| m.name()).collect();
                format!(
                    "Unknown substitution matrix: {} (expected one of {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Symmetric amino-acid scoring table over the 20 standard residues
#[derive(Debug)]
pub struct SubstitutionMatrix {
    name: &'static str,
    scores: [[i8; 20]; 20],
    index: [u8; 256],
}

impl SubstitutionMatrix {
    fn from_table(name: &'static str, scores: [[i8; 20]; 20]) -> Self {
        let mut index = [NO_RESIDUE; 256];
        for (i, &residue) in AMINO_ACID_ALPHABET.iter().enumerate() {
            index[residue as usize] = i as u8;
            index[residue.to_ascii_lowercase() as usize] = i as u8;
        }

        Self { name, scores, index }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Residues in table order
    pub fn alphabet(&self) -> &'static [u8] {
        AMINO_ACID_ALPHABET
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index[symbol as usize] != NO_RESIDUE
    }

    pub fn score(&self, a: u8, b: u8) -> Result<Score> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.scores[i][j] as Score)
    }

    pub fn max_score(&self) -> Score {
        self.scores
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0) as Score
    }

    pub fn is_symmetric(&self) -> bool {
        (0..20).all(|i| (0..20).all(|j| self.scores[i][j] == self.scores[j][i]))
    }

    fn index_of(&self, symbol: u8) -> Result<usize> {
        match self.index[symbol as usize] {
            NO_RESIDUE => Err(LocalignError::UnknownSymbol {
                symbol: symbol as char,
                matrix: self.name,
            }),
            idx => Ok(idx as usize),
        }
    }
}

static BLOSUM45: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("BLOSUM45", tables::BLOSUM45));
static BLOSUM50: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("BLOSUM50", tables::BLOSUM50));
static BLOSUM62: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("BLOSUM62", tables::BLOSUM62));
static BLOSUM80: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("BLOSUM80", tables::BLOSUM80));
static BLOSUM90: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("BLOSUM90", tables::BLOSUM90));
static PAM30: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("PAM30", tables::PAM30));
static PAM70: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("PAM70", tables::PAM70));
static PAM250: Lazy<SubstitutionMatrix> =
    Lazy::new(|| SubstitutionMatrix::from_table("PAM250", tables::PAM250));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_symmetric() {
        for named in NamedMatrix::ALL {
            assert!(named.matrix().is_symmetric(), "{} is not symmetric", named);
        }
    }

    #[test]
    fn test_blosum62_known_values() {
        let m = NamedMatrix::Blosum62.matrix();
        assert_eq!(m.score(b'W', b'W').unwrap(), 11);
        assert_eq!(m.score(b'A', b'A').unwrap(), 4);
        assert_eq!(m.score(b'E', b'D').unwrap(), 2);
        assert_eq!(m.score(b'd', b'e').unwrap(), 2);
        assert_eq!(m.max_score(), 11);
    }

    #[test]
    fn test_pam250_known_values() {
        let m = NamedMatrix::Pam250.matrix();
        assert_eq!(m.score(b'W', b'W').unwrap(), 17);
        assert_eq!(m.score(b'C', b'W').unwrap(), -8);
        assert_eq!(m.score(b'F', b'Y').unwrap(), 7);
    }

    #[test]
    fn test_unknown_symbol() {
        let m = NamedMatrix::Blosum62.matrix();
        match m.score(b'A', b'B') {
            Err(LocalignError::UnknownSymbol { symbol, matrix }) => {
                assert_eq!(symbol, 'B');
                assert_eq!(matrix, "BLOSUM62");
            }
            other => panic!("expected UnknownSymbol, got {:?}", other),
        }
        assert!(m.score(b'*', b'A').is_err());
        assert!(!m.contains(b'X'));
    }

    #[test]
    fn test_shared_instance() {
        let a = NamedMatrix::Pam30.matrix();
        let b = "pam30".parse::<NamedMatrix>().unwrap().matrix();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("blosum80".parse::<NamedMatrix>(), Ok(NamedMatrix::Blosum80));
        assert!("BLOSUM100".parse::<NamedMatrix>().is_err());
        assert_eq!(NamedMatrix::default(), NamedMatrix::Blosum62);
    }
}
