//! Character classes of XML names

fn search_table(c: char, table: &[(char, char)]) -> bool {
    table.iter().any(|rng| c >= rng.0 && c <= rng.1)
}

const NAME_START_CHAR_TABLE: &[(char, char)] = &[
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{2ff}'),
    ('\u{370}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

const NAME_CONTINUE_CHAR_TABLE: &[(char, char)] = &[
    ('-', '.'),
    ('0', '9'),
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{b7}', '\u{b7}'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{203f}', '\u{2040}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

/// Name characters without the colon, which is reserved for prefixes.
pub trait NcNameChar {
    /// https://www.w3.org/TR/xml-names/#NT-NCName
    fn is_ncname_start_char(&self) -> bool;

    fn is_ncname_char(&self) -> bool;
}

impl NcNameChar for char {
    #[inline]
    fn is_ncname_start_char(&self) -> bool {
        if self.is_ascii() {
            self.is_ascii_alphabetic() || *self == '_'
        } else {
            search_table(*self, NAME_START_CHAR_TABLE)
        }
    }

    #[inline]
    fn is_ncname_char(&self) -> bool {
        if self.is_ascii() {
            self.is_ascii_alphanumeric() || *self == '_' || *self == '-' || *self == '.'
        } else {
            search_table(*self, NAME_CONTINUE_CHAR_TABLE)
        }
    }
}

pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ncname_start_char() => chars.all(|c| c.is_ncname_char()),
        _ => false,
    }
}

/// A `Name` is a sequence of NCNames separated by colons.
pub fn is_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c == '-' || c == '.' || c.is_ascii_digit())
        && name.split(':').all(|part| part.is_empty() || is_ncname(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ncname() {
        assert!(is_ncname("root"));
        assert!(is_ncname("_a-b.c1"));
        assert!(is_ncname("grüße"));
        assert!(!is_ncname(""));
        assert!(!is_ncname("1a"));
        assert!(!is_ncname("a:b"));
        assert!(!is_ncname("a b"));
    }

    #[test]
    fn name() {
        assert!(is_name("xml-stylesheet"));
        assert!(is_name("a:b"));
        assert!(!is_name(""));
        assert!(!is_name("-a"));
        assert!(!is_name("a b"));
    }
}
