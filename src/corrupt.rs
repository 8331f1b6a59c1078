use crate::iban::{is_valid_iban, normalize};
use crate::models::{CorruptedRecord, IbanRecord};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mutation {
    FlipCheckDigit,
    SwapAdjacent,
    DropCharacter,
    AppendCharacter,
    ForeignCountry,
    AlterBbanDigit,
}

impl Mutation {
    pub const ALL: [Mutation; 6] = [
        Mutation::FlipCheckDigit,
        Mutation::SwapAdjacent,
        Mutation::DropCharacter,
        Mutation::AppendCharacter,
        Mutation::ForeignCountry,
        Mutation::AlterBbanDigit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mutation::FlipCheckDigit => "flip-check-digit",
            Mutation::SwapAdjacent => "swap-adjacent",
            Mutation::DropCharacter => "drop-character",
            Mutation::AppendCharacter => "append-character",
            Mutation::ForeignCountry => "foreign-country",
            Mutation::AlterBbanDigit => "alter-bban-digit",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorruptSummary {
    pub total_records: usize,
    pub by_mutation: BTreeMap<&'static str, usize>,
    pub still_valid: usize,
}

const FOREIGN_PREFIXES: &[&str] = &["XX", "ZZ", "QQ", "AA"];

fn other_digit<R: Rng + ?Sized>(rng: &mut R, current: u8) -> u8 {
    let current = current.saturating_sub(b'0') % 10;
    let shift = rng.gen_range(1..10);
    b'0' + (current + shift) % 10
}

pub fn apply_mutation<R: Rng + ?Sized>(rng: &mut R, iban: &str, mutation: Mutation) -> String {
    let mut bytes = normalize(iban).into_bytes();
    if bytes.len() < 5 || !bytes.is_ascii() {
        return String::from_utf8_lossy(&bytes).into_owned();
    }
    match mutation {
        Mutation::FlipCheckDigit => {
            let idx = rng.gen_range(2..4);
            bytes[idx] = other_digit(rng, bytes[idx]);
        }
        Mutation::SwapAdjacent => {
            let len = bytes.len();
            let candidates: Vec<usize> = (4..len - 1)
                .filter(|idx| bytes[*idx] != bytes[idx + 1])
                .collect();
            if let Some(idx) = candidates.choose(rng) {
                bytes.swap(*idx, idx + 1);
            } else {
                bytes.pop();
            }
        }
        Mutation::DropCharacter => {
            let idx = rng.gen_range(4..bytes.len());
            bytes.remove(idx);
        }
        Mutation::AppendCharacter => {
            bytes.push(b'0' + rng.gen_range(0..10u8));
        }
        Mutation::ForeignCountry => {
            let prefix = FOREIGN_PREFIXES.choose(rng).unwrap_or(&"XX").as_bytes();
            bytes[0] = prefix[0];
            bytes[1] = prefix[1];
        }
        Mutation::AlterBbanDigit => {
            let digits: Vec<usize> = (4..bytes.len())
                .filter(|idx| bytes[*idx].is_ascii_digit())
                .collect();
            if let Some(idx) = digits.choose(rng) {
                bytes[*idx] = other_digit(rng, bytes[*idx]);
            } else {
                bytes.push(b'0');
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn pick_mutation<R: Rng + ?Sized>(rng: &mut R) -> Mutation {
    *Mutation::ALL.choose(rng).unwrap_or(&Mutation::FlipCheckDigit)
}

pub fn corrupt_iban<R: Rng + ?Sized>(
    rng: &mut R,
    iban: &str,
    mutation: Mutation,
) -> CorruptedRecord {
    let corrupted = apply_mutation(rng, iban, mutation);
    CorruptedRecord {
        original: iban.to_string(),
        still_valid: is_valid_iban(&corrupted),
        corrupted,
        mutation: mutation.name().to_string(),
    }
}

pub fn corrupt_csv(input: &Path, output: &Path, seed: u64) -> Result<CorruptSummary, String> {
    let mut reader = csv::Reader::from_path(input).map_err(|err| err.to_string())?;
    let mut records: Vec<IbanRecord> = Vec::new();
    for result in reader.deserialize() {
        let record: IbanRecord = result.map_err(|err| err.to_string())?;
        records.push(record);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = CorruptSummary::default();
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for record in &records {
        if !is_valid_iban(&record.iban) {
            log::warn!("input {} is not a valid IBAN; corrupting anyway", record.iban);
        }
        let mutation = pick_mutation(&mut rng);
        let corrupted = corrupt_iban(&mut rng, &record.iban, mutation);
        summary.total_records += 1;
        *summary.by_mutation.entry(mutation.name()).or_insert(0) += 1;
        if corrupted.still_valid {
            summary.still_valid += 1;
        }
        writer.serialize(&corrupted).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())?;

    Ok(summary)
}
