use crate::mod97::mod97;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NationalChecksum {
    Mod97,
    Belgian,
    Norwegian,
    Polish,
    Estonian,
    Spanish,
    CzechSlovak,
    Croatian,
    French,
    Hungarian,
}

impl NationalChecksum {
    pub fn validate(self, bban: &str) -> bool {
        let outcome = match self {
            NationalChecksum::Mod97 => check_mod97(bban),
            NationalChecksum::Belgian => check_belgian(bban),
            NationalChecksum::Norwegian => check_norwegian(bban),
            NationalChecksum::Polish => check_polish(bban),
            NationalChecksum::Estonian => check_estonian(bban),
            NationalChecksum::Spanish => check_spanish(bban),
            NationalChecksum::CzechSlovak => check_czech_slovak(bban),
            NationalChecksum::Croatian => check_croatian(bban),
            NationalChecksum::French => check_french(bban),
            NationalChecksum::Hungarian => check_hungarian(bban),
        };
        outcome.unwrap_or(false)
    }

    pub fn name(self) -> &'static str {
        match self {
            NationalChecksum::Mod97 => "mod97",
            NationalChecksum::Belgian => "belgian",
            NationalChecksum::Norwegian => "norwegian",
            NationalChecksum::Polish => "polish",
            NationalChecksum::Estonian => "estonian",
            NationalChecksum::Spanish => "spanish",
            NationalChecksum::CzechSlovak => "czech-slovak",
            NationalChecksum::Croatian => "croatian",
            NationalChecksum::French => "french",
            NationalChecksum::Hungarian => "hungarian",
        }
    }
}

fn strip_separators(bban: &str) -> String {
    bban.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '.')
        .collect()
}

fn digit_at(bban: &str, index: usize) -> Option<u32> {
    bban.as_bytes()
        .get(index)
        .and_then(|b| char::from(*b).to_digit(10))
}

fn weighted_sum(field: &str, weights: &[u32]) -> Option<u32> {
    if field.len() > weights.len() {
        return None;
    }
    field
        .chars()
        .zip(weights)
        .try_fold(0u32, |sum, (ch, weight)| Some(sum + ch.to_digit(10)? * weight))
}

fn complement(remainder: u32, base: u32) -> u32 {
    if remainder == 0 {
        0
    } else {
        base - remainder
    }
}

// Modulo-11 control digit where remainders 0 and 1 map to themselves.
fn mod11_control(sum: u32) -> u32 {
    match sum % 11 {
        0 => 0,
        1 => 1,
        remainder => 11 - remainder,
    }
}

fn check_mod97(bban: &str) -> Option<bool> {
    Some(mod97(&strip_separators(bban))? == 1)
}

fn check_belgian(bban: &str) -> Option<bool> {
    let stripped = strip_separators(bban);
    if stripped.len() < 3 || !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (checking, control) = stripped.split_at(stripped.len() - 2);
    let checksum: u32 = control.parse().ok()?;
    let remainder = match mod97(checking)? {
        0 => 97,
        value => value,
    };
    Some(remainder == checksum)
}

fn check_norwegian(bban: &str) -> Option<bool> {
    const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];
    let stripped = strip_separators(bban);
    let control = digit_at(&stripped, 10)?;
    let sum = weighted_sum(stripped.get(0..10)?, &WEIGHTS)?;
    Some(control == complement(sum % 11, 11))
}

fn check_polish(bban: &str) -> Option<bool> {
    const WEIGHTS: [u32; 7] = [3, 9, 7, 1, 3, 9, 7];
    let control = digit_at(bban, 7)?;
    let sum = weighted_sum(bban.get(0..7)?, &WEIGHTS)?;
    Some(control == complement(sum % 10, 10))
}

fn check_estonian(bban: &str) -> Option<bool> {
    const WEIGHTS: [u32; 13] = [7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3, 7];
    let control = digit_at(bban, 15)?;
    let sum = weighted_sum(bban.get(2..15)?, &WEIGHTS)?;
    Some(control == complement(sum % 10, 10))
}

fn check_spanish(bban: &str) -> Option<bool> {
    const BANK_BRANCH_WEIGHTS: [u32; 8] = [4, 8, 5, 10, 9, 7, 3, 6];
    const ACCOUNT_WEIGHTS: [u32; 10] = [1, 2, 4, 8, 5, 10, 9, 7, 3, 6];

    let bank_branch_control = digit_at(bban, 8)?;
    let account_control = digit_at(bban, 9)?;
    let bank_branch = weighted_sum(bban.get(0..8)?, &BANK_BRANCH_WEIGHTS)?;
    if bank_branch_control != mod11_control(bank_branch) {
        return Some(false);
    }
    let account = weighted_sum(bban.get(10..20)?, &ACCOUNT_WEIGHTS)?;
    Some(account_control == mod11_control(account))
}

fn check_czech_slovak(bban: &str) -> Option<bool> {
    const PREFIX_WEIGHTS: [u32; 6] = [10, 5, 8, 4, 2, 1];
    const ACCOUNT_WEIGHTS: [u32; 10] = [6, 3, 7, 9, 10, 5, 8, 4, 2, 1];

    let prefix_control = digit_at(bban, 9)?;
    let account_control = digit_at(bban, 19)?;
    let prefix = weighted_sum(bban.get(4..9)?, &PREFIX_WEIGHTS)?;
    if prefix_control != mod11_control(prefix) {
        return Some(false);
    }
    let account = weighted_sum(bban.get(10..19)?, &ACCOUNT_WEIGHTS)?;
    Some(account_control == mod11_control(account))
}

// ISO 7064 MOD 11,10 over field, compared against control.
fn mod11_10(field: &str, control: u32) -> Option<bool> {
    let mut product = 10u32;
    for ch in field.chars() {
        product += ch.to_digit(10)?;
        if product % 10 != 0 {
            product %= 10;
        }
        product = (product * 2) % 11;
    }
    let expected = match 11 - product {
        10 => 0,
        value => value,
    };
    Some(control == expected)
}

fn check_croatian(bban: &str) -> Option<bool> {
    let bank_control = digit_at(bban, 6)?;
    let account_control = digit_at(bban, 16)?;
    let bank = mod11_10(bban.get(0..6)?, bank_control)?;
    let account = mod11_10(bban.get(7..16)?, account_control)?;
    Some(bank && account)
}

// French banking letter table, not the sequential ISO mapping.
fn french_letter_value(letter: char) -> Option<char> {
    let digit = match letter {
        'A' | 'J' => '1',
        'B' | 'K' | 'S' => '2',
        'C' | 'L' | 'T' => '3',
        'D' | 'M' | 'U' => '4',
        'E' | 'N' | 'V' => '5',
        'F' | 'O' | 'W' => '6',
        'G' | 'P' | 'X' => '7',
        'H' | 'Q' | 'Y' => '8',
        'I' | 'R' | 'Z' => '9',
        _ => return None,
    };
    Some(digit)
}

fn check_french(bban: &str) -> Option<bool> {
    let digits = strip_separators(bban)
        .chars()
        .map(|ch| {
            if ch.is_ascii_digit() {
                Some(ch)
            } else {
                french_letter_value(ch)
            }
        })
        .collect::<Option<String>>()?;
    Some(mod97(&digits)? == 0)
}

fn check_hungarian(bban: &str) -> Option<bool> {
    const WEIGHTS: [u32; 15] = [9, 7, 3, 1, 9, 7, 3, 1, 9, 7, 3, 1, 9, 7, 3];

    let bank_branch_control = digit_at(bban, 7)?;
    let bank_branch = weighted_sum(bban.get(0..7)?, &WEIGHTS)?;
    if bank_branch_control != complement(bank_branch % 10, 10) {
        return Some(false);
    }

    // Short account numbers are zero padded to 16 digits; the control digit
    // then sits in the middle of the field.
    let (field, control_index) = if bban.ends_with("00000000") {
        (bban.get(8..15)?, 15)
    } else {
        (bban.get(8..23)?, 23)
    };
    let account_control = digit_at(bban, control_index)?;
    let account = weighted_sum(field, &WEIGHTS)?;
    Some(account_control == complement(account % 10, 10))
}
