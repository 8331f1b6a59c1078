//! Integration tests for the public validation API.
//!
//! Reference IBANs are the example numbers published for each country in the
//! ISO 13616 registry and national banking documentation.

use iban_check::{countries, is_valid_iban, is_valid_iban_opt, lookup, validate_iban, IbanRejection};

const REFERENCE_IBANS: &[&str] = &[
    "AD1200012030200359100100",
    "AE070331234567890123456",
    "AL47212110090000000235698741",
    "AT611904300234573201",
    "AZ21NABZ00000000137010001944",
    "BA391290079401028494",
    "BE68539007547034",
    "BG80BNBG96611020345678",
    "BH67BMAG00001299123456",
    "BR1800360305000010009795493C1",
    "BY13NBRB3600900000002Z00AB00",
    "CH9300762011623852957",
    "CR05015202001026284066",
    "CY17002001280000001200527600",
    "CZ6508000000192000145399",
    "DE89370400440532013000",
    "DK5000400440116243",
    "DO28BAGR00000001212453611324",
    "EE382200221020145685",
    "EG380019000500000000263180002",
    "ES9121000418450200051332",
    "FI2112345600000785",
    "FO6264600001631634",
    "FR1420041010050500013M02606",
    "GB29NWBK60161331926819",
    "GE29NB0000000101904917",
    "GI75NWBK000000007099453",
    "GL8964710001000206",
    "GR1601101250000000012300695",
    "GT82TRAJ01020000001210029690",
    "HR1210010051863000160",
    "HU42117730161111101800000000",
    "IE29AIBK93115212345678",
    "IL620108000000099999999",
    "IQ98NBIQ850123456789012",
    "IS140159260076545510730339",
    "IT60X0542811101000000123456",
    "JO94CBJO0010000000000131000302",
    "KW81CBKU0000000000001234560101",
    "KZ86125KZT5004100100",
    "LB62099900000001001901229114",
    "LC55HEMM000100010012001200023015",
    "LI21088100002324013AA",
    "LT121000011101001000",
    "LU280019400644750000",
    "LV80BANK0000435195001",
    "MC5811222000010123456789030",
    "MD24AG000225100013104168",
    "ME25505000012345678951",
    "MK07250120000058984",
    "MR1300020001010000123456753",
    "MT84MALT011000012345MTLCAST001S",
    "MU17BOMM0101101030300200000MUR",
    "NL91ABNA0417164300",
    "NO9386011117947",
    "PK36SCBL0000001123456702",
    "PL61109010140000071219812874",
    "PS92PALS000000000400123456702",
    "PT50000201231234567890154",
    "QA58DOHB00001234567890ABCDEFG",
    "RO49AAAA1B31007593840000",
    "RS35260005601001611379",
    "SA0380000000608010167519",
    "SC18SSCB11010000000000001497USD",
    "SE4550000000058398257466",
    "SI56263300012039086",
    "SK3112000000198742637541",
    "SM86U0322509800000000270100",
    "ST68000100010051845310112",
    "SV62CENR00000000000000700025",
    "TL380080012345678910157",
    "TN5910006035183598478831",
    "TR330006100519786457841326",
    "UA213223130000026007233566001",
    "VA59001123000012345678",
    "VG96VPVG0000012345678901",
    "XK051212012345678906",
    "NI45BAPR00000013000003558124",
    "LY83002048000020100120361",
    "SD2129010501234001",
    "SO211000001001000100141",
    "MN121234123456789123",
    "OM810180000001299123456",
    "FK88SC123456789012",
    "BI4210000100010000332045181",
    "DJ2100010000000154000100186",
    "HN88CABF00000000000250005469",
    "YE15CBYE0001018861234567891234",
    "RU0204452560040702810412345678901",
    "IE64IRCE92050112345678",
    "EG800002000156789012345180002",
    "IS750001121234563108962099",
];

#[test]
fn test_reference_ibans_are_valid() {
    for iban in REFERENCE_IBANS {
        assert_eq!(validate_iban(iban).map(|_| ()), Ok(()), "{}", iban);
    }
}

#[test]
fn test_every_registry_country_with_a_reference_is_covered() {
    let covered: std::collections::HashSet<&str> =
        REFERENCE_IBANS.iter().map(|iban| &iban[0..2]).collect();
    for spec in countries().filter(|spec| spec.iban_registry) {
        assert!(covered.contains(spec.code), "no reference IBAN for {}", spec.code);
    }
}

#[test]
fn test_flipping_either_check_digit_invalidates() {
    for iban in REFERENCE_IBANS {
        for idx in 2..4 {
            let mut bytes = iban.as_bytes().to_vec();
            bytes[idx] = b'0' + (bytes[idx] - b'0' + 1) % 10;
            let flipped = String::from_utf8(bytes).unwrap();
            assert!(!is_valid_iban(&flipped), "{} accepted", flipped);
        }
    }
}

#[test]
fn test_separators_do_not_change_the_result() {
    for iban in REFERENCE_IBANS {
        let grouped: Vec<String> = iban
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8(chunk.to_vec()).unwrap())
            .collect();
        let spaced = grouped.join(" ");
        let hyphenated = grouped.join("-");
        assert!(is_valid_iban(&spaced), "{}", spaced);
        assert!(is_valid_iban(&hyphenated), "{}", hyphenated);
        assert!(is_valid_iban(&format!("  {}\t", spaced)));
    }
    assert_eq!(
        is_valid_iban("NL91ABNA0417164300"),
        is_valid_iban("NL91 ABNA 0417 1643 00")
    );
    assert!(is_valid_iban("FR14-2004-1010-0505-0001-3M02-606"));
}

#[test]
fn test_case_insensitive() {
    for iban in REFERENCE_IBANS {
        assert!(is_valid_iban(&iban.to_lowercase()), "{}", iban);
    }
    assert!(!is_valid_iban("nl91abna0417164301"));
}

#[test]
fn test_unsupported_prefixes_are_rejected() {
    for prefix in ["XX", "ZZ", "QQ", "US", "12", "1N"] {
        let candidate = format!("{}91ABNA0417164300", prefix);
        assert!(!is_valid_iban(&candidate), "{}", candidate);
    }
    assert_eq!(
        validate_iban("US91ABNA0417164300"),
        Err(IbanRejection::UnsupportedCountry("US".to_string()))
    );
}

#[test]
fn test_length_sensitivity() {
    for iban in REFERENCE_IBANS {
        let truncated = &iban[..iban.len() - 1];
        let padded = format!("{}0", iban);
        assert!(!is_valid_iban(truncated), "{}", truncated);
        assert!(!is_valid_iban(&padded), "{}", padded);
    }
}

#[test]
fn test_concrete_fixtures() {
    assert!(is_valid_iban("NL91ABNA0417164300"));
    assert!(!is_valid_iban("NL91ABNA0417164301"));
    assert!(is_valid_iban("BE68539007547034"));
    assert!(!is_valid_iban("BE68539007547035"));
    assert!(is_valid_iban("NO9386011117947"));
    assert!(!is_valid_iban("NO9386011117948"));
    assert!(is_valid_iban("FR1420041010050500013M02606"));
    assert!(!is_valid_iban(""));
    assert!(!is_valid_iban_opt(None));
    assert!(!is_valid_iban("A"));
    assert!(!is_valid_iban("   "));
}

#[test]
fn test_national_checks_catch_what_mod97_accepts() {
    // Each value carries correct IBAN check digits for a BBAN whose national
    // control digits are wrong.
    let cases = [
        "ES4821000418450200051330",
        "ES2921000418460200051332",
        "NO8886011117940",
        "PL36109010150000071219812874",
        "EE762200221020145680",
        "BE79539007547030",
        "FR7920041010050500013M02600",
        "MC3111222000010123456789031",
        "HR8210010051863000161",
        "HR7410010041863000160",
        "CZ1708000000192000145390",
        "CZ3008000000182000145399",
        "SK5812000000198742637540",
        "HU86117730161111101900000000",
        "HU17117730171111101800000000",
        "HU80117730161111101812345670",
        "PT61000201231234567890150",
        "SI24263300012039080",
        "RS62260005601001611378",
    ];
    for case in cases {
        assert_eq!(
            validate_iban(case),
            Err(IbanRejection::NationalChecksum),
            "{}",
            case
        );
    }
}

#[test]
fn test_hungarian_full_length_account() {
    assert!(is_valid_iban("HU15117730161111101812345676"));
    assert!(is_valid_iban("HU42117730161111101800000000"));
}

#[test]
fn test_bban_pattern_is_exact() {
    // letter in a digit-only run
    assert_eq!(
        validate_iban("DE89370400440532O13000"),
        Err(IbanRejection::BbanFormat)
    );
    // digit where the bank code expects letters
    assert_eq!(
        validate_iban("GB29NWB160161331926819"),
        Err(IbanRejection::BbanFormat)
    );
}

#[test]
fn test_registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                REFERENCE_IBANS
                    .iter()
                    .all(|iban| is_valid_iban(iban))
                    && lookup("NL").is_some()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
