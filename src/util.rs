use crate::mod97::mod97;
use crate::pattern::{BbanPattern, CharClass};
use rand::Rng;

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn charset(class: CharClass) -> &'static [u8] {
    match class {
        CharClass::Digit => DIGITS,
        CharClass::Letter => LETTERS,
        CharClass::Alphanumeric => ALPHANUM,
    }
}

pub fn random_from<R: Rng + ?Sized>(rng: &mut R, class: CharClass, len: usize) -> String {
    let set = charset(class);
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0..set.len());
        out.push(char::from(set[idx]));
    }
    out
}

pub fn random_bban<R: Rng + ?Sized>(rng: &mut R, pattern: &BbanPattern) -> String {
    let mut out = String::with_capacity(pattern.width());
    for segment in pattern.segments() {
        out.push_str(&random_from(rng, segment.class, segment.width));
    }
    out
}

// Whole BBAN is fed to MOD-97, so draw digits only and pick the last two
// so that the remainder comes out as 1.
pub fn random_mod97_bban<R: Rng + ?Sized>(rng: &mut R, width: usize) -> Option<String> {
    if width < 2 {
        return None;
    }
    let mut out = random_from(rng, CharClass::Digit, width - 2);
    let remainder = mod97(&format!("{}00", out))?;
    out.push_str(&format!("{:02}", (98 - remainder) % 97));
    Some(out)
}

pub fn parse_country_list(input: &str) -> Result<Vec<String>, String> {
    let mut countries: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let code = trimmed.to_uppercase();
        if code.len() != 2 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(format!("invalid country code: {}", trimmed));
        }
        if !countries.contains(&code) {
            countries.push(code);
        }
    }
    Ok(countries)
}
