pub mod batch;
pub mod checksum;
pub mod corrupt;
pub mod generator;
pub mod iban;
pub mod logging;
pub mod models;
pub mod mod97;
pub mod pattern;
pub mod registry;
pub mod util;

pub use checksum::NationalChecksum;
pub use iban::{
    compose_iban, is_valid_bban, is_valid_iban, is_valid_iban_bytes, is_valid_iban_opt,
    normalize, validate_iban, Iban, IbanRejection,
};
pub use pattern::BbanPattern;
pub use registry::{countries, is_sepa_country, lookup, CountrySpec};
