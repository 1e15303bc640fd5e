/// Tests for FASTA input: record boundaries, wrapping, compression and the
/// two-record pair used by `align`
use flate2::write::GzEncoder;
use flate2::Compression;
use localign::bio::fasta::{parse_fasta, parse_fasta_from_bytes, read_pair};
use localign::bio::sequence::{Sequence, SequenceType};
use localign::LocalignError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_header_id_and_description() {
    let fasta = b">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens\nMVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF\n";

    let sequences = parse_fasta_from_bytes(fasta).unwrap();
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].id, "sp|P69905|HBA_HUMAN");
    assert_eq!(
        sequences[0].description.as_deref(),
        Some("Hemoglobin subunit alpha OS=Homo sapiens")
    );
    assert_eq!(sequences[0].detect_type(), SequenceType::Protein);
}

#[test]
fn test_wrapped_lines_and_crlf() {
    let fasta = b">seq1\r\nGGTTG\r\nACTA\r\n>seq2\r\nTGTT\r\nACGG\r\n";

    let sequences = parse_fasta_from_bytes(fasta).unwrap();
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].sequence, b"GGTTGACTA");
    assert_eq!(sequences[1].sequence, b"TGTTACGG");
}

#[test]
fn test_blank_lines_between_records() {
    let fasta = b"\n\n>a\nAC GT\n\n\n>b\nTT\n\n";

    let sequences = parse_fasta_from_bytes(fasta).unwrap();
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].sequence, b"ACGT");
    assert_eq!(sequences[1].sequence, b"TT");
}

#[test]
fn test_lowercase_is_normalized() {
    let sequences = parse_fasta_from_bytes(b">a\nacgtn\n").unwrap();
    assert_eq!(sequences[0].sequence, b"ACGTN");
}

#[test]
fn test_read_pair_uses_first_two_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("three.fasta");
    std::fs::write(&path, ">one\nAAA\n>two\nCCC\n>three\nGGG\n").unwrap();

    let (first, second) = read_pair(&path).unwrap();
    assert_eq!(first.id, "one");
    assert_eq!(second.id, "two");
}

#[test]
fn test_read_pair_needs_two_records() {
    let dir = TempDir::new().unwrap();

    let empty = dir.path().join("empty.fasta");
    std::fs::write(&empty, "").unwrap();
    assert!(matches!(read_pair(&empty), Err(LocalignError::Parse(_))));

    let single = dir.path().join("single.fasta");
    std::fs::write(&single, ">only\nACGT\n").unwrap();
    let err = read_pair(&single).unwrap_err();
    assert!(err.to_string().contains("1 FASTA record(s)"), "got: {}", err);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = parse_fasta(dir.path().join("absent.fasta")).unwrap_err();
    assert!(matches!(err, LocalignError::Io(_)));
}

#[test]
fn test_gzip_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pair.fasta.gz");
    let mut content = String::from(">seq1 first\nGGTTGACTA\n>seq2\n");
    for chunk in "TGTTACGG".repeat(20).as_bytes().chunks(80) {
        content.push_str(std::str::from_utf8(chunk).unwrap());
        content.push('\n');
    }

    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let (first, second) = read_pair(&path).unwrap();

    assert_eq!(
        first,
        Sequence::new("seq1".to_string(), b"GGTTGACTA".to_vec())
            .with_description("first".to_string())
    );
    assert_eq!(second.sequence.len(), 160);
    assert_eq!(second.sequence, b"TGTTACGG".repeat(20));
    assert_eq!(second.description, None);
}
