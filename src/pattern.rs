use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Letter,
    Alphanumeric,
}

impl CharClass {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'n' => Some(CharClass::Digit),
            'a' => Some(CharClass::Letter),
            'c' => Some(CharClass::Alphanumeric),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            CharClass::Digit => 'n',
            CharClass::Letter => 'a',
            CharClass::Alphanumeric => 'c',
        }
    }

    pub fn accepts(self, byte: u8) -> bool {
        match self {
            CharClass::Digit => byte.is_ascii_digit(),
            CharClass::Letter => byte.is_ascii_uppercase(),
            CharClass::Alphanumeric => byte.is_ascii_digit() || byte.is_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub width: usize,
    pub class: CharClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbanPattern {
    segments: Vec<Segment>,
}

impl BbanPattern {
    pub fn parse(notation: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut rest = notation.trim();
        while !rest.is_empty() {
            let digits_end = rest.find(|ch: char| !ch.is_ascii_digit())?;
            let width: usize = rest[..digits_end].parse().ok()?;
            let mut tail = rest[digits_end..].chars();
            if tail.next()? != '!' {
                return None;
            }
            let class = CharClass::from_code(tail.next()?)?;
            if width == 0 {
                return None;
            }
            segments.push(Segment { width, class });
            rest = tail.as_str();
        }
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn width(&self) -> usize {
        self.segments.iter().map(|segment| segment.width).sum()
    }

    pub fn matches(&self, bban: &str) -> bool {
        let bytes = bban.as_bytes();
        if bytes.len() != self.width() {
            return false;
        }
        let mut offset = 0;
        for segment in &self.segments {
            let run = &bytes[offset..offset + segment.width];
            if !run.iter().all(|b| segment.class.accepts(*b)) {
                return false;
            }
            offset += segment.width;
        }
        true
    }
}

impl fmt::Display for BbanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}!{}", segment.width, segment.class.code())?;
        }
        Ok(())
    }
}
