//! Candidate CSV import/export. Every exported cell is quoted.

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use uuid::Uuid;

use crate::models::candidate::{Candidate, CandidateStatus, Compliance};

pub const CANDIDATE_HEADERS: [&str; 12] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Specialization",
    "Experience",
    "Location",
    "Status",
    "DBS",
    "Right to Work",
    "Registration",
    "Last Active",
];

/// Writer shared by every CSV export.
pub fn quoted_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

pub fn finish(writer: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV flush failed: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn export_candidates(candidates: &[Candidate]) -> anyhow::Result<String> {
    let mut writer = quoted_writer();
    writer.write_record(CANDIDATE_HEADERS)?;

    for c in candidates {
        writer.write_record(&[
            c.id.to_string(),
            c.name.clone(),
            c.email.clone(),
            c.phone.clone(),
            c.specialization.clone(),
            c.experience_years.to_string(),
            c.location.clone(),
            c.status.as_str().to_string(),
            yes_no(c.compliance.dbs).to_string(),
            yes_no(c.compliance.right_to_work).to_string(),
            yes_no(c.compliance.registration).to_string(),
            c.last_active.to_rfc3339(),
        ])?;
    }

    finish(writer)
}

#[derive(Debug, Default)]
pub struct ParsedImport {
    pub candidates: Vec<Candidate>,
    /// 1-based data row numbers that had no name or email.
    pub rejected_rows: Vec<usize>,
}

/// Parses the export layout back into candidates. Cells are read by position;
/// missing cells default to empty, 0 or `active`.
pub fn parse_candidates(content: &str) -> anyhow::Result<ParsedImport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut parsed = ParsedImport::default();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let cell = |i: usize| record.get(i).unwrap_or("");

        if cell(1).is_empty() || cell(2).is_empty() {
            parsed.rejected_rows.push(index + 1);
            continue;
        }

        parsed.candidates.push(Candidate {
            id: cell(0).parse().unwrap_or_else(|_| Uuid::new_v4()),
            name: cell(1).to_string(),
            email: cell(2).to_string(),
            phone: cell(3).to_string(),
            specialization: cell(4).to_string(),
            experience_years: leading_number(cell(5)),
            location: cell(6).to_string(),
            cv_summary: None,
            status: cell(7).parse().unwrap_or(CandidateStatus::Active),
            compliance: Compliance {
                dbs: is_yes(cell(8)),
                right_to_work: is_yes(cell(9)),
                registration: is_yes(cell(10)),
            },
            grade: None,
            assigned_agent: None,
            last_active: DateTime::parse_from_rfc3339(cell(11))
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        });
    }

    Ok(parsed)
}

fn is_yes(cell: &str) -> bool {
    cell.eq_ignore_ascii_case("yes")
}

/// "8 years" reads as 8; anything without leading digits is 0.
fn leading_number(cell: &str) -> u32 {
    let digits: String = cell.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
