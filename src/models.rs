use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbanRecord {
    pub iban: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub line: u64,
    pub input: String,
    pub valid: bool,
    #[serde(default)]
    pub normalized: Option<String>,
    #[serde(default)]
    pub rejection: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptedRecord {
    pub original: String,
    pub corrupted: String,
    pub mutation: String,
    pub still_valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryRecord {
    pub code: String,
    pub length: usize,
    pub bban_format: String,
    pub national_checksum: Option<String>,
    pub sepa: bool,
    pub iban_registry: bool,
}
