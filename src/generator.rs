use crate::checksum::NationalChecksum;
use crate::iban::{compose_iban, Iban};
use crate::registry::lookup;
use crate::util::{random_bban, random_mod97_bban};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Dual national checks accept roughly one draw in a hundred.
const MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub countries: Vec<String>,
    pub per_country: usize,
}

pub fn generate_iban<R: Rng + ?Sized>(rng: &mut R, country: &str) -> Result<Iban, String> {
    let spec = lookup(country).ok_or_else(|| format!("no IBAN specification for {}", country))?;
    for _ in 0..MAX_ATTEMPTS {
        let bban = if spec.national_checksum == Some(NationalChecksum::Mod97) {
            random_mod97_bban(rng, spec.bban_pattern.width())
                .ok_or_else(|| format!("{} BBAN is too short for MOD-97", country))?
        } else {
            random_bban(rng, &spec.bban_pattern)
        };
        let accepted = spec
            .national_checksum
            .map_or(true, |checksum| checksum.validate(&bban));
        if !accepted {
            continue;
        }
        match compose_iban(spec.code, &bban) {
            Ok(iban) => return Ok(iban),
            Err(err) => log::debug!("discarding generated {} BBAN {}: {}", country, bban, err),
        }
    }
    Err(format!(
        "no valid {} BBAN found after {} attempts",
        country, MAX_ATTEMPTS
    ))
}

pub fn generate_ibans(config: &GeneratorConfig, seed: u64) -> Result<Vec<Iban>, String> {
    if config.countries.is_empty() {
        return Err("at least one country is required".to_string());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(config.countries.len() * config.per_country);
    for country in &config.countries {
        for _ in 0..config.per_country {
            out.push(generate_iban(&mut rng, country)?);
        }
        log::debug!("generated {} IBANs for {}", config.per_country, country);
    }
    Ok(out)
}
