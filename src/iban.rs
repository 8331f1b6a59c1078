use crate::mod97::{check_digits, has_valid_check_digits};
use crate::registry::{lookup, CountrySpec};
use std::fmt;
use std::str::FromStr;

pub const MIN_IBAN_LENGTH: usize = 15;
pub const MAX_IBAN_LENGTH: usize = 34;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbanRejection {
    Empty,
    Shape,
    UnsupportedCountry(String),
    Length { expected: usize, actual: usize },
    BbanFormat,
    NationalChecksum,
    Checksum,
}

impl IbanRejection {
    pub fn label(&self) -> &'static str {
        match self {
            IbanRejection::Empty => "empty",
            IbanRejection::Shape => "shape",
            IbanRejection::UnsupportedCountry(_) => "unsupported-country",
            IbanRejection::Length { .. } => "length",
            IbanRejection::BbanFormat => "bban-format",
            IbanRejection::NationalChecksum => "national-checksum",
            IbanRejection::Checksum => "checksum",
        }
    }
}

impl fmt::Display for IbanRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IbanRejection::Empty => write!(f, "input is empty"),
            IbanRejection::Shape => write!(
                f,
                "expected 2 letters, 2 digits and {}-{} alphanumerics in total",
                MIN_IBAN_LENGTH, MAX_IBAN_LENGTH
            ),
            IbanRejection::UnsupportedCountry(code) => {
                write!(f, "country {} has no IBAN specification", code)
            }
            IbanRejection::Length { expected, actual } => {
                write!(f, "length is {}, country specification requires {}", actual, expected)
            }
            IbanRejection::BbanFormat => write!(f, "BBAN does not match the country format"),
            IbanRejection::NationalChecksum => write!(f, "national BBAN checksum failed"),
            IbanRejection::Checksum => write!(f, "IBAN check digits are invalid"),
        }
    }
}

impl std::error::Error for IbanRejection {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iban {
    normalized: String,
}

impl Iban {
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn country_code(&self) -> &str {
        &self.normalized[0..2]
    }

    pub fn check_digits(&self) -> &str {
        &self.normalized[2..4]
    }

    pub fn bban(&self) -> &str {
        &self.normalized[4..]
    }

    pub fn spec(&self) -> Option<&'static CountrySpec> {
        lookup(self.country_code())
    }

    pub fn is_sepa(&self) -> bool {
        self.spec().map_or(false, |spec| spec.sepa)
    }

    // Swiss and Liechtenstein QR-IBANs carry an institution id of 30000-31999.
    pub fn is_qr_iban(&self) -> bool {
        if !matches!(self.country_code(), "CH" | "LI") {
            return false;
        }
        self.bban()
            .get(0..5)
            .and_then(|iid| iid.parse::<u32>().ok())
            .map_or(false, |iid| (30000..=31999).contains(&iid))
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for Iban {
    type Err = IbanRejection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_iban(value)
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

fn has_iban_shape(normalized: &str) -> bool {
    let bytes = normalized.as_bytes();
    if !(MIN_IBAN_LENGTH..=MAX_IBAN_LENGTH).contains(&bytes.len()) {
        return false;
    }
    bytes[0..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..4].iter().all(|b| b.is_ascii_digit())
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

pub fn validate_iban(value: &str) -> Result<Iban, IbanRejection> {
    if value.trim().is_empty() {
        return Err(IbanRejection::Empty);
    }

    let normalized = normalize(value);
    if normalized.is_empty() {
        return Err(IbanRejection::Empty);
    }
    if !has_iban_shape(&normalized) {
        return Err(IbanRejection::Shape);
    }

    // Shape check guarantees ASCII, so byte slicing below is safe.
    let country = &normalized[0..2];
    let spec =
        lookup(country).ok_or_else(|| IbanRejection::UnsupportedCountry(country.to_string()))?;

    if normalized.len() != spec.total_length {
        return Err(IbanRejection::Length {
            expected: spec.total_length,
            actual: normalized.len(),
        });
    }

    let bban = &normalized[4..];
    if !spec.bban_pattern.matches(bban) {
        return Err(IbanRejection::BbanFormat);
    }

    if let Some(checksum) = spec.national_checksum {
        if !checksum.validate(bban) {
            return Err(IbanRejection::NationalChecksum);
        }
    }

    if !has_valid_check_digits(&normalized) {
        return Err(IbanRejection::Checksum);
    }

    Ok(Iban { normalized })
}

pub fn is_valid_iban(value: &str) -> bool {
    match validate_iban(value) {
        Ok(_) => true,
        Err(rejection) => {
            log::debug!("rejected IBAN input: {}", rejection);
            false
        }
    }
}

pub fn is_valid_iban_opt(value: Option<&str>) -> bool {
    value.map_or(false, is_valid_iban)
}

pub fn is_valid_iban_bytes(value: &[u8]) -> bool {
    std::str::from_utf8(value).map_or(false, is_valid_iban)
}

pub fn is_valid_bban(bban: &str, country: &str) -> bool {
    let Some(spec) = lookup(&country.to_ascii_uppercase()) else {
        return false;
    };
    let bban = normalize(bban);
    spec.bban_pattern.matches(&bban)
        && spec
            .national_checksum
            .map_or(true, |checksum| checksum.validate(&bban))
}

pub fn compose_iban(country: &str, bban: &str) -> Result<Iban, IbanRejection> {
    let country = country.trim().to_ascii_uppercase();
    let bban = normalize(bban);
    let check = check_digits(&country, &bban).ok_or(IbanRejection::Shape)?;
    validate_iban(&format!("{}{}{}", country, check, bban))
}
