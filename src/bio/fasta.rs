use crate::bio::sequence::Sequence;
use crate::{LocalignError, Result};
use flate2::read::GzDecoder;
use memmap2::Mmap;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{line_ending, not_line_ending},
    combinator::{eof, map, opt},
    sequence::preceded,
    IResult,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a FASTA header line
fn parse_header(input: &[u8]) -> IResult<&[u8], (&str, Option<&str>)> {
    let (input, _) = tag(b">")(input)?;
    let (input, id) = map(
        take_till(|c: u8| c == b' ' || c == b'\t' || c == b'\n' || c == b'\r'),
        |s| std::str::from_utf8(s).unwrap_or(""),
    )(input)?;
    let (input, description) = opt(preceded(
        alt((tag(b" "), tag(b"\t"))),
        map(not_line_ending, |s| std::str::from_utf8(s).unwrap_or("")),
    ))(input)?;
    let (input, _) = alt((line_ending, eof))(input)?;
    Ok((input, (id, description.map(str::trim).filter(|d| !d.is_empty()))))
}

/// Parse sequence lines until next header or EOF
fn parse_sequence(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let mut sequence = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() && remaining[0] != b'>' {
        let (rest, line) =
            take_till::<_, _, nom::error::Error<_>>(|c: u8| c == b'\n' || c == b'\r')(remaining)?;
        let (rest, _) = opt(line_ending)(rest)?;

        sequence.extend(
            line.iter()
                .filter(|c| !c.is_ascii_whitespace())
                .map(|c| c.to_ascii_uppercase()),
        );

        remaining = rest;
    }

    Ok((remaining, sequence))
}

/// Parse a single FASTA record
fn parse_record(input: &[u8]) -> IResult<&[u8], Sequence> {
    let (input, (id, description)) = parse_header(input)?;
    let (input, sequence) = parse_sequence(input)?;

    let mut seq = Sequence::new(id.to_string(), sequence);
    if let Some(desc) = description {
        seq = seq.with_description(desc.to_string());
    }

    Ok((input, seq))
}

/// Parse FASTA from bytes.
///
/// Records with an empty sequence are kept so the aligner can report them.
pub fn parse_fasta_from_bytes(data: &[u8]) -> Result<Vec<Sequence>> {
    let mut input = data;
    let mut sequences = Vec::new();

    loop {
        while !input.is_empty() && input[0].is_ascii_whitespace() {
            input = &input[1..];
        }

        if input.is_empty() {
            break;
        }

        if input[0] != b'>' {
            let line = input.split(|&c| c == b'\n').next().unwrap_or_default();
            return Err(LocalignError::Parse(format!(
                "expected '>' at start of record, found '{}'",
                String::from_utf8_lossy(line).trim_end()
            )));
        }

        match parse_record(input) {
            Ok((remaining, seq)) => {
                sequences.push(seq);
                input = remaining;
            }
            Err(e) => {
                return Err(LocalignError::Parse(format!("Failed to parse FASTA: {:?}", e)));
            }
        }
    }

    Ok(sequences)
}

/// Parse a FASTA file into sequences (supports .gz compression)
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let path = path.as_ref();

    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        parse_fasta_gzip(path)
    } else {
        parse_fasta_uncompressed(path)
    }
}

fn parse_fasta_uncompressed(path: &Path) -> Result<Vec<Sequence>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    // SAFETY: the map is read-only and dropped before this function returns
    let mmap = unsafe { Mmap::map(&file)? };

    parse_fasta_from_bytes(&mmap[..])
}

fn parse_fasta_gzip(path: &Path) -> Result<Vec<Sequence>> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;

    parse_fasta_from_bytes(&buffer)
}

/// Read the two sequences to align: the first two records of `path`.
///
/// Any further records are ignored with a warning.
pub fn read_pair<P: AsRef<Path>>(path: P) -> Result<(Sequence, Sequence)> {
    let path = path.as_ref();
    let sequences = parse_fasta(path)?;

    if sequences.len() > 2 {
        tracing::warn!(
            records = sequences.len(),
            file = %path.display(),
            "more than two records, aligning the first two"
        );
    }

    let mut records = sequences.into_iter();
    match (records.next(), records.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        (first, _) => Err(LocalignError::Parse(format!(
            "{} holds {} FASTA record(s), two are required",
            path.display(),
            usize::from(first.is_some())
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let input = b">sp|P12345|PROTEIN_HUMAN Description here\nACGT";
        let (remaining, (id, desc)) = parse_header(input).unwrap();
        assert_eq!(id, "sp|P12345|PROTEIN_HUMAN");
        assert_eq!(desc, Some("Description here"));
        assert_eq!(remaining, b"ACGT");
    }

    #[test]
    fn test_parse_header_at_eof() {
        let (remaining, (id, desc)) = parse_header(b">lonely").unwrap();
        assert_eq!(id, "lonely");
        assert_eq!(desc, None);
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_wrapped_sequence() {
        let data = b">s1\nacgt\nACGT\r\n\n>s2 second\nTTTT";
        let seqs = parse_fasta_from_bytes(data).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].sequence, b"ACGTACGT");
        assert_eq!(seqs[1].description.as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_record_kept() {
        let seqs = parse_fasta_from_bytes(b">empty\n>full\nAC\n").unwrap();
        assert_eq!(seqs.len(), 2);
        assert!(seqs[0].is_empty());
    }

    #[test]
    fn test_text_before_header_rejected() {
        let err = parse_fasta_from_bytes(b"ACGT\n>s1\nACGT\n").unwrap_err();
        assert!(matches!(err, LocalignError::Parse(_)));
    }
}
