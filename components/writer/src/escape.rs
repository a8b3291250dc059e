use std::io;

use crate::UnicodeWrite;

/// Strategy to escape character data
///
/// see https://www.w3.org/TR/REC-xml/#dt-chardata
pub trait Escape {
    fn escape_content<W: UnicodeWrite>(&self, input: &str, write: &mut W) -> io::Result<()>;
    fn escape_attr_value<W: UnicodeWrite>(&self, input: &str, write: &mut W) -> io::Result<()>;
}

/// Escaping that survives a parse round trip unchanged.
///
/// Carriage returns are escaped everywhere and tabs and line feeds in
/// attribute values, because a parser would normalize them otherwise.
pub struct CanonicalEscaper;

impl CanonicalEscaper {
    fn escape<W: UnicodeWrite>(
        input: &str,
        write: &mut W,
        special: impl Fn(char) -> bool,
    ) -> io::Result<()> {
        let mut p = 0;
        for (i, r) in input.match_indices(special) {
            write.write_all(&input[p..i])?;
            write.write_all(match r {
                "&" => "&amp;",
                "<" => "&lt;",
                ">" => "&gt;",
                "\"" => "&quot;",
                "\t" => "&#x9;",
                "\n" => "&#xA;",
                _ => "&#xD;",
            })?;
            p = i + r.len();
        }
        write.write_all(&input[p..])
    }
}

impl Escape for CanonicalEscaper {
    fn escape_content<W: UnicodeWrite>(&self, input: &str, write: &mut W) -> io::Result<()> {
        Self::escape(input, write, |c: char| {
            c == '&' || c == '<' || c == '>' || c == '\r'
        })
    }

    fn escape_attr_value<W: UnicodeWrite>(&self, input: &str, write: &mut W) -> io::Result<()> {
        Self::escape(input, write, |c: char| {
            c == '&' || c == '<' || c == '>' || c == '"' || c == '\t' || c == '\n' || c == '\r'
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn escape_content(esc: impl Escape, input: &str) -> String {
        let mut output = String::new();
        esc.escape_content(input, &mut &mut output).unwrap();
        output
    }

    pub fn escape_attr_value(esc: impl Escape, input: &str) -> String {
        let mut output = String::new();
        esc.escape_attr_value(input, &mut &mut output).unwrap();
        output
    }

    mod canonical {
        use super::*;

        #[test]
        fn content_plain() {
            assert_eq!(" a  ", escape_content(CanonicalEscaper, " a  "));
        }

        #[test]
        fn content_markup() {
            assert_eq!("&lt;&amp;&gt;", escape_content(CanonicalEscaper, "<&>"));
        }

        #[test]
        fn content_quotes() {
            assert_eq!("'\"", escape_content(CanonicalEscaper, "'\""));
        }

        #[test]
        fn content_whitespace() {
            assert_eq!("\t\n&#xD;", escape_content(CanonicalEscaper, "\t\n\r"));
        }

        #[test]
        fn content_unicode() {
            assert_eq!("ä€", escape_content(CanonicalEscaper, "ä€"));
        }

        #[test]
        fn attr_value_quot() {
            assert_eq!("&quot;'", escape_attr_value(CanonicalEscaper, "\"'"));
        }

        #[test]
        fn attr_value_whitespace() {
            assert_eq!(
                "a&#x9;b&#xA;c&#xD;",
                escape_attr_value(CanonicalEscaper, "a\tb\nc\r")
            );
        }

        #[test]
        fn attr_value_markup() {
            assert_eq!("&lt;&amp;&gt;", escape_attr_value(CanonicalEscaper, "<&>"));
        }
    }
}
