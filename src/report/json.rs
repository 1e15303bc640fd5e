use crate::bio::alignment::LocalAlignment;
use crate::report::{AlignmentParameters, AlignmentRun};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    seq1: SequenceSummary<'a>,
    seq2: SequenceSummary<'a>,
    parameters: &'a AlignmentParameters,
    score: i32,
    found: bool,
    alignments: Vec<JsonAlignment<'a>>,
}

#[derive(Serialize)]
struct SequenceSummary<'a> {
    id: &'a str,
    length: usize,
}

#[derive(Serialize)]
struct JsonAlignment<'a> {
    #[serde(flatten)]
    alignment: &'a LocalAlignment,
    markers: String,
    identities: usize,
    substitutions: usize,
    gaps: usize,
    identity: f64,
}

pub fn generate_json_report(run: &AlignmentRun<'_>) -> Result<String> {
    let report = JsonReport {
        seq1: SequenceSummary {
            id: &run.seq1.id,
            length: run.seq1.len(),
        },
        seq2: SequenceSummary {
            id: &run.seq2.id,
            length: run.seq2.len(),
        },
        parameters: run.parameters,
        score: run.report.score,
        found: run.report.found(),
        alignments: run
            .report
            .iter()
            .map(|a| JsonAlignment {
                alignment: a,
                markers: a.markers(),
                identities: a.identities(),
                substitutions: a.substitutions(),
                gaps: a.gaps(),
                identity: a.identity(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
