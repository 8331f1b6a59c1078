use crate::checksum::NationalChecksum;
use crate::pattern::BbanPattern;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct CountrySpec {
    pub code: &'static str,
    pub total_length: usize,
    pub bban_pattern: BbanPattern,
    pub national_checksum: Option<NationalChecksum>,
    pub sepa: bool,
    pub iban_registry: bool,
}

impl CountrySpec {
    pub fn bban_length(&self) -> usize {
        self.total_length - 4
    }
}

struct SpecRow {
    code: &'static str,
    total_length: usize,
    bban_format: &'static str,
    national_checksum: Option<NationalChecksum>,
    sepa: bool,
    iban_registry: bool,
}

const fn row(
    code: &'static str,
    total_length: usize,
    bban_format: &'static str,
    national_checksum: Option<NationalChecksum>,
    sepa: bool,
    iban_registry: bool,
) -> SpecRow {
    SpecRow {
        code,
        total_length,
        bban_format,
        national_checksum,
        sepa,
        iban_registry,
    }
}

// code, total length, BBAN format, national checksum, SEPA, in IBAN registry
const SPEC_ROWS: &[SpecRow] = &[
    row("AD", 24, "8!n12!c", None, true, true),
    row("AE", 23, "19!n", None, false, true),
    row("AL", 28, "8!n16!c", None, false, true),
    row("AO", 25, "21!n", None, false, false),
    row("AT", 20, "16!n", None, true, true),
    row("AZ", 28, "4!a20!c", None, false, true),
    row("BA", 20, "16!n", Some(NationalChecksum::Mod97), false, true),
    row("BE", 16, "12!n", Some(NationalChecksum::Belgian), true, true),
    row("BF", 28, "2!c22!n", None, false, false),
    row("BG", 22, "4!a6!n8!c", None, true, true),
    row("BH", 22, "4!a14!c", None, false, true),
    row("BI", 27, "23!n", None, false, true),
    row("BJ", 28, "1!a23!n", None, false, false),
    row("BR", 29, "23!n1!a1!c", None, false, true),
    row("BY", 28, "4!c4!n16!c", None, false, true),
    row("CF", 27, "23!n", None, false, false),
    row("CG", 27, "23!n", None, false, false),
    row("CH", 21, "5!n12!c", None, true, true),
    row("CI", 28, "1!a23!n", None, false, false),
    row("CM", 27, "23!n", None, false, false),
    row("CR", 22, "18!n", None, false, true),
    row("CV", 25, "21!n", None, false, false),
    row("CY", 28, "8!n16!c", None, true, true),
    row("CZ", 24, "20!n", Some(NationalChecksum::CzechSlovak), true, true),
    row("DE", 22, "18!n", None, true, true),
    row("DJ", 27, "23!n", None, false, true),
    row("DK", 18, "14!n", None, true, true),
    row("DO", 28, "4!c20!n", None, false, true),
    row("DZ", 26, "22!n", None, false, false),
    row("EE", 20, "16!n", Some(NationalChecksum::Estonian), true, true),
    row("EG", 29, "25!n", None, false, true),
    row("ES", 24, "20!n", Some(NationalChecksum::Spanish), true, true),
    row("FI", 18, "14!n", None, true, true),
    row("FK", 18, "2!a12!n", None, false, true),
    row("FO", 18, "14!n", None, false, true),
    row("FR", 27, "10!n11!c2!n", Some(NationalChecksum::French), true, true),
    row("GA", 27, "23!n", None, false, false),
    row("GB", 22, "4!a14!n", None, true, true),
    row("GE", 22, "2!a16!n", None, false, true),
    row("GI", 23, "4!a15!c", None, true, true),
    row("GL", 18, "14!n", None, false, true),
    row("GQ", 27, "23!n", None, false, false),
    row("GR", 27, "7!n16!c", None, true, true),
    row("GT", 28, "4!c20!c", None, false, true),
    row("GW", 25, "2!c19!n", None, false, false),
    row("HN", 28, "4!a20!n", None, false, true),
    row("HR", 21, "17!n", Some(NationalChecksum::Croatian), true, true),
    row("HU", 28, "24!n", Some(NationalChecksum::Hungarian), true, true),
    row("IE", 22, "4!a14!n", None, true, true),
    row("IL", 23, "19!n", None, false, true),
    row("IQ", 23, "4!a15!n", None, false, true),
    row("IR", 26, "22!n", None, false, false),
    row("IS", 26, "22!n", None, true, true),
    row("IT", 27, "1!a10!n12!c", None, true, true),
    row("JO", 30, "4!a4!n18!c", None, false, true),
    row("KM", 27, "23!n", None, false, false),
    row("KW", 30, "4!a22!c", None, false, true),
    row("KZ", 20, "3!n13!c", None, false, true),
    row("LB", 28, "4!n20!c", None, false, true),
    row("LC", 32, "4!a24!c", None, false, true),
    row("LI", 21, "5!n12!c", None, true, true),
    row("LT", 20, "16!n", None, true, true),
    row("LU", 20, "3!n13!c", None, true, true),
    row("LV", 21, "4!a13!c", None, true, true),
    row("LY", 25, "21!n", None, false, true),
    row("MA", 28, "24!n", None, false, false),
    row("MC", 27, "10!n11!c2!n", Some(NationalChecksum::French), true, true),
    row("MD", 24, "2!c18!c", None, false, true),
    row("ME", 22, "18!n", Some(NationalChecksum::Mod97), false, true),
    row("MG", 27, "23!n", None, false, false),
    row("MK", 19, "3!n10!c2!n", Some(NationalChecksum::Mod97), false, true),
    row("ML", 28, "1!a23!n", None, false, false),
    row("MN", 20, "16!n", None, false, true),
    row("MR", 27, "23!n", None, false, true),
    row("MT", 31, "4!a5!n18!c", None, true, true),
    row("MU", 30, "4!a19!n3!a", None, false, true),
    row("MZ", 25, "21!n", None, false, false),
    row("NE", 28, "2!a22!n", None, false, false),
    row("NI", 28, "4!a20!n", None, false, true),
    row("NL", 18, "4!a10!n", None, true, true),
    row("NO", 15, "11!n", Some(NationalChecksum::Norwegian), true, true),
    row("OM", 23, "3!n16!c", None, false, true),
    row("PK", 24, "4!a16!c", None, false, true),
    row("PL", 28, "24!n", Some(NationalChecksum::Polish), true, true),
    row("PS", 29, "4!a21!c", None, false, true),
    row("PT", 25, "21!n", Some(NationalChecksum::Mod97), true, true),
    row("QA", 29, "4!a21!c", None, false, true),
    row("RO", 24, "4!a16!c", None, true, true),
    row("RS", 22, "18!n", Some(NationalChecksum::Mod97), false, true),
    row("RU", 33, "14!n15!c", None, false, true),
    row("SA", 24, "2!n18!c", None, false, true),
    row("SC", 31, "4!a20!n3!a", None, false, true),
    row("SD", 18, "14!n", None, false, true),
    row("SE", 24, "20!n", None, true, true),
    row("SI", 19, "15!n", Some(NationalChecksum::Mod97), true, true),
    row("SK", 24, "20!n", Some(NationalChecksum::CzechSlovak), true, true),
    row("SM", 27, "1!a10!n12!c", None, true, true),
    row("SN", 28, "1!a23!n", None, false, false),
    row("SO", 23, "19!n", None, false, true),
    row("ST", 25, "21!n", None, false, true),
    row("SV", 28, "4!a20!n", None, false, true),
    row("TD", 27, "23!n", None, false, false),
    row("TG", 28, "2!a22!n", None, false, false),
    row("TL", 23, "19!n", None, false, true),
    row("TN", 24, "20!n", None, false, true),
    row("TR", 26, "6!n16!c", None, false, true),
    row("UA", 29, "6!n19!c", None, false, true),
    row("VA", 22, "18!n", None, true, true),
    row("VG", 24, "4!a16!n", None, false, true),
    row("XK", 20, "16!n", None, false, true),
    row("YE", 30, "4!a4!n18!c", None, false, true),
];

static REGISTRY: OnceLock<BTreeMap<&'static str, CountrySpec>> = OnceLock::new();

fn registry() -> &'static BTreeMap<&'static str, CountrySpec> {
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> BTreeMap<&'static str, CountrySpec> {
    let mut specs = BTreeMap::new();
    for row in SPEC_ROWS {
        let Some(bban_pattern) = BbanPattern::parse(row.bban_format) else {
            log::warn!(
                "skipping {}: malformed BBAN format {}",
                row.code,
                row.bban_format
            );
            continue;
        };
        if bban_pattern.width() + 4 != row.total_length {
            log::warn!(
                "skipping {}: BBAN format {} does not add up to length {}",
                row.code,
                row.bban_format,
                row.total_length
            );
            continue;
        }
        specs.insert(
            row.code,
            CountrySpec {
                code: row.code,
                total_length: row.total_length,
                bban_pattern,
                national_checksum: row.national_checksum,
                sepa: row.sepa,
                iban_registry: row.iban_registry,
            },
        );
    }
    log::debug!("country registry loaded with {} entries", specs.len());
    specs
}

// Exact lookup by upper-case two-letter country code.
pub fn lookup(code: &str) -> Option<&'static CountrySpec> {
    registry().get(code)
}

pub fn countries() -> impl Iterator<Item = &'static CountrySpec> {
    registry().values()
}

pub fn is_sepa_country(code: &str) -> bool {
    lookup(code).map_or(false, |spec| spec.sepa)
}
