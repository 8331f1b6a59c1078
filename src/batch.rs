use crate::iban::validate_iban;
use crate::models::CheckRecord;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub rejections: BTreeMap<&'static str, usize>,
}

pub fn check_value(line: u64, raw: &[u8]) -> (CheckRecord, Option<&'static str>) {
    let Ok(input) = std::str::from_utf8(raw) else {
        let record = CheckRecord {
            line,
            input: String::from_utf8_lossy(raw).into_owned(),
            valid: false,
            normalized: None,
            rejection: Some("not-text".to_string()),
            detail: Some("value is not UTF-8 text".to_string()),
        };
        return (record, Some("not-text"));
    };
    match validate_iban(input) {
        Ok(iban) => {
            let record = CheckRecord {
                line,
                input: input.to_string(),
                valid: true,
                normalized: Some(iban.as_str().to_string()),
                rejection: None,
                detail: None,
            };
            (record, None)
        }
        Err(rejection) => {
            let record = CheckRecord {
                line,
                input: input.to_string(),
                valid: false,
                normalized: None,
                rejection: Some(rejection.label().to_string()),
                detail: Some(rejection.to_string()),
            };
            (record, Some(rejection.label()))
        }
    }
}

fn find_column(headers: &csv::ByteRecord, column: &str) -> Option<usize> {
    headers.iter().position(|header| {
        std::str::from_utf8(header)
            .map(|name| name.trim().eq_ignore_ascii_case(column))
            .unwrap_or(false)
    })
}

pub fn check_csv(
    input: &Path,
    column: &str,
    output: Option<&Path>,
) -> Result<BatchReport, String> {
    let mut reader = csv::Reader::from_path(input).map_err(|err| err.to_string())?;
    let headers = reader.byte_headers().map_err(|err| err.to_string())?.clone();
    let index = find_column(&headers, column)
        .ok_or_else(|| format!("column '{}' not found in {}", column, input.display()))?;

    let mut writer = match output {
        Some(path) => Some(csv::Writer::from_path(path).map_err(|err| err.to_string())?),
        None => None,
    };

    let mut report = BatchReport::default();
    for result in reader.byte_records() {
        let record = result.map_err(|err| err.to_string())?;
        let line = record.position().map_or(0, |pos| pos.line());
        let (outcome, rejection) = check_value(line, record.get(index).unwrap_or_default());

        report.total_records += 1;
        match rejection {
            None => report.valid_records += 1,
            Some(label) => {
                report.invalid_records += 1;
                *report.rejections.entry(label).or_insert(0) += 1;
                log::debug!("line {}: {:?} rejected ({})", line, outcome.input, label);
            }
        }

        if let Some(writer) = writer.as_mut() {
            writer.serialize(&outcome).map_err(|err| err.to_string())?;
        }
    }

    if let Some(mut writer) = writer {
        writer.flush().map_err(|err| err.to_string())?;
    }
    Ok(report)
}
