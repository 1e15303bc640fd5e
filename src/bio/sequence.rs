use crate::LocalignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IUPAC nucleotide codes, including `N` and the two- and three-base ambiguity codes
pub const NUCLEOTIDE_ALPHABET: &[u8] = b"ACGTUNRYKMSWBDHV";

/// The 20 standard residues covered by every named substitution matrix
pub const AMINO_ACID_ALPHABET: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    #[serde(rename = "aa")]
    Protein,
    #[serde(rename = "nt")]
    Nucleotide,
}

impl SequenceType {
    pub fn code(&self) -> &'static str {
        match self {
            SequenceType::Protein => "aa",
            SequenceType::Nucleotide => "nt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SequenceType::Protein => "Amino acid sequence",
            SequenceType::Nucleotide => "Nucleotide sequence",
        }
    }

    fn alphabet(&self) -> &'static [u8] {
        match self {
            SequenceType::Protein => AMINO_ACID_ALPHABET,
            SequenceType::Nucleotide => NUCLEOTIDE_ALPHABET,
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SequenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nt" | "nucleotide" | "dna" | "rna" => Ok(SequenceType::Nucleotide),
            "aa" | "protein" | "amino" => Ok(SequenceType::Protein),
            _ => Err(format!("Unknown sequence type: {} (expected nt or aa)", s)),
        }
    }
}

impl Sequence {
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn detect_type(&self) -> SequenceType {
        let protein_chars = b"EFILPQXZ";
        let has_protein = self
            .sequence
            .iter()
            .any(|&c| protein_chars.contains(&c.to_ascii_uppercase()));

        if has_protein {
            SequenceType::Protein
        } else {
            SequenceType::Nucleotide
        }
    }

    /// Check every symbol against the alphabet of `seq_type`.
    ///
    /// Reports the first offending symbol with its 1-based position so the
    /// caller can stop before any scoring happens.
    pub fn validate_alphabet(&self, seq_type: SequenceType) -> Result<(), LocalignError> {
        let alphabet = seq_type.alphabet();
        match self
            .sequence
            .iter()
            .position(|c| !alphabet.contains(&c.to_ascii_uppercase()))
        {
            Some(pos) => Err(LocalignError::InvalidInput(format!(
                "sequence '{}' has symbol '{}' at position {} which is not valid for {}",
                self.id,
                self.sequence[pos] as char,
                pos + 1,
                seq_type.description().to_lowercase()
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.sequence))
    }
}
