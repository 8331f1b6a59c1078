// Largest prefix that always fits in a u32 (999_999_999 < 2^32).
const CHUNK_DIGITS: usize = 9;

pub fn mod97(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut remainder: Option<u32> = None;
    let mut rest = digits;
    loop {
        // Width of the spliced remainder ("5" or "42") eats into the chunk.
        let carried = match remainder {
            Some(value) if value >= 10 => 2,
            Some(_) => 1,
            None => 0,
        };
        if carried + rest.len() <= 2 {
            let tail = parse_digits(rest)?;
            let value = remainder.unwrap_or(0) * 10u32.pow(rest.len() as u32) + tail;
            return Some(value % 97);
        }

        let take = rest.len().min(CHUNK_DIGITS - carried);
        let (chunk, unread) = rest.split_at(take);
        let value = remainder.unwrap_or(0) * 10u32.pow(take as u32) + parse_digits(chunk)?;
        remainder = Some(value % 97);
        rest = unread;
    }
}

fn parse_digits(chunk: &str) -> Option<u32> {
    chunk.bytes().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
        } else {
            None
        }
    })
}

pub fn expand_letters(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch.is_ascii_alphabetic() {
            let val = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 10;
            out.push_str(&val.to_string());
        } else {
            return None;
        }
    }
    Some(out)
}

pub fn check_digits(country: &str, bban: &str) -> Option<String> {
    if country.len() != 2 || !country.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    let expanded = expand_letters(&format!("{}{}00", bban, country))?;
    let remainder = mod97(&expanded)?;
    Some(format!("{:02}", 98 - remainder))
}

pub fn has_valid_check_digits(iban: &str) -> bool {
    if iban.len() < 5 || !iban.is_char_boundary(4) {
        return false;
    }
    let (prefix, bban) = iban.split_at(4);
    expand_letters(&format!("{}{}", bban, prefix))
        .and_then(|digits| mod97(&digits))
        .map_or(false, |remainder| remainder == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_reduce_directly() {
        assert_eq!(mod97("0"), Some(0));
        assert_eq!(mod97("96"), Some(96));
        assert_eq!(mod97("97"), Some(0));
        assert_eq!(mod97("98"), Some(1));
    }

    #[test]
    fn long_values_match_u128_arithmetic() {
        let samples = [
            "123456789012345678901234567890",
            "3214282912345698765432161182",
            "99999999999999999999999999999999999",
            "100000000000000000000000000000000000000",
        ];
        for sample in samples {
            let expected = sample
                .bytes()
                .fold(0u128, |acc, b| (acc * 10 + u128::from(b - b'0')) % 97);
            assert_eq!(mod97(sample), Some(expected as u32), "mod97({})", sample);
        }
    }

    #[test]
    fn chunk_boundaries_are_exact() {
        for len in 1..=30 {
            let digits = "7".repeat(len);
            let expected = digits
                .bytes()
                .fold(0u64, |acc, b| (acc * 10 + u64::from(b - b'0')) % 97);
            assert_eq!(mod97(&digits), Some(expected as u32), "len {}", len);
        }
    }

    #[test]
    fn malformed_input_signals_failure() {
        assert_eq!(mod97(""), None);
        assert_eq!(mod97("12a4"), None);
        assert_eq!(mod97("+123"), None);
        assert_eq!(mod97("1234567890123 4"), None);
    }

    #[test]
    fn letters_expand_to_iso_values() {
        assert_eq!(expand_letters("A9Z").as_deref(), Some("10935"));
        assert_eq!(expand_letters("nl").as_deref(), Some("2321"));
        assert_eq!(expand_letters("A-B"), None);
    }

    #[test]
    fn derives_known_check_digits() {
        assert_eq!(check_digits("NL", "ABNA0417164300").as_deref(), Some("91"));
        assert_eq!(check_digits("DE", "370400440532013000").as_deref(), Some("89"));
        assert_eq!(check_digits("GB", "NWBK60161331926819").as_deref(), Some("29"));
        assert_eq!(check_digits("N1", "ABNA0417164300"), None);
    }

    #[test]
    fn universal_check_accepts_only_remainder_one() {
        assert!(has_valid_check_digits("NL91ABNA0417164300"));
        assert!(!has_valid_check_digits("NL92ABNA0417164300"));
        assert!(!has_valid_check_digits("NL91"));
    }
}
