use std::io::{self, BufRead};

use log::{debug, trace};

use crate::config::NormalizerConfig;
use crate::emit::XmlTokenWriter;
use crate::error::Result;
use crate::reader::XmlTokenizer;
use crate::token::{StartElement, Token, TokenSink, TokenSource};

/// Normalizes XML for comparisons in tests.
///
/// A pass applies the following rules:
///
///  * Namespace prefixes are replaced by prefixes derived from the namespace
///    URI.
///  * Namespace declarations are removed and only the declarations needed by
///    the renamed prefixes are written.
///  * Attributes are sorted by namespace URI and local name.
///  * Directives, the XML declaration and processing instructions are removed.
///  * Character data consisting only of whitespace is removed if configured.
///  * Comments are removed if configured.
///
/// The result is not canonical XML as defined by the W3C.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Writes the normalized content of `input` to `output`.
    ///
    /// On error `output` holds the tokens written so far and must not be used.
    pub fn normalize<W: io::Write, R: BufRead>(&self, output: W, input: R) -> Result<()> {
        self.normalize_tokens(XmlTokenizer::new(input), XmlTokenWriter::from_io(output))
    }

    pub fn normalize_str(&self, input: &str) -> Result<String> {
        let mut output = String::new();
        self.normalize_tokens(
            XmlTokenizer::new(input.as_bytes()),
            XmlTokenWriter::new(&mut output),
        )?;
        Ok(output)
    }

    /// Single pass from `source` to `sink`, flushing `sink` after the last
    /// token. Stops at the first error.
    pub fn normalize_tokens<S: TokenSource, K: TokenSink>(
        &self,
        mut source: S,
        mut sink: K,
    ) -> Result<()> {
        let result = self.run(&mut source, &mut sink);
        if let Err(err) = &result {
            debug!("normalization aborted: {}", err);
        }
        result
    }

    fn run<S: TokenSource, K: TokenSink>(&self, source: &mut S, sink: &mut K) -> Result<()> {
        while let Some(token) = source.next_token()? {
            if let Some(token) = self.apply(token) {
                sink.write_token(&token)?;
            }
        }
        sink.flush()
    }

    /// Rule for a single token, `None` drops it.
    fn apply(&self, token: Token) -> Option<Token> {
        match token {
            Token::Directive(directive) => {
                trace!("dropping directive <!{}>", directive);
                None
            }
            Token::ProcInst(pi) => {
                trace!("dropping processing instruction <?{}?>", pi.target);
                None
            }
            Token::Comment(_) if self.config.omit_comments => {
                trace!("dropping comment");
                None
            }
            Token::CharData(text) if self.config.omit_whitespace && text.trim().is_empty() => {
                trace!("dropping whitespace {:?}", text);
                None
            }
            Token::StartElement(start) => Some(Token::StartElement(normalize_start(start))),
            token @ (Token::Comment(_) | Token::CharData(_) | Token::EndElement(_)) => Some(token),
        }
    }

    /// Tests the normalized contents of `a` and `b` for equality.
    ///
    /// `a` is normalized completely before `b` is read.
    pub fn equal_xml<A: BufRead, B: BufRead>(&self, a: A, b: B) -> Result<bool> {
        let mut left = Vec::new();
        self.normalize(&mut left, a)?;
        let mut right = Vec::new();
        self.normalize(&mut right, b)?;

        let equal = left == right;
        if !equal {
            debug!(
                "normalized XML differs:\n{}\n{}",
                String::from_utf8_lossy(&left),
                String::from_utf8_lossy(&right)
            );
        }
        Ok(equal)
    }

    pub fn equal_str(&self, a: &str, b: &str) -> Result<bool> {
        self.equal_xml(a.as_bytes(), b.as_bytes())
    }
}

/// Drops namespace declarations and sorts the remaining attributes.
fn normalize_start(start: StartElement) -> StartElement {
    let mut attributes = Vec::with_capacity(start.attributes.len());
    attributes.extend(
        start
            .attributes
            .into_iter()
            .filter(|attr| !attr.is_namespace_declaration()),
    );
    attributes.sort_by(|a, b| a.name.cmp(&b.name));
    StartElement {
        name: start.name,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use xrs_writer::namespace::XMLNS_NAMESPACE;

    use super::*;
    use crate::token::{Attribute, Name, ProcInst};

    struct Tokens(std::vec::IntoIter<Token>);

    impl TokenSource for Tokens {
        fn next_token(&mut self) -> Result<Option<Token>> {
            Ok(self.0.next())
        }
    }

    #[derive(Default)]
    struct Collect {
        tokens: Vec<Token>,
        flushes: usize,
    }

    impl TokenSink for Collect {
        fn write_token(&mut self, token: &Token) -> Result<()> {
            self.tokens.push(token.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn run(normalizer: Normalizer, tokens: Vec<Token>) -> Collect {
        let mut sink = Collect::default();
        normalizer
            .normalize_tokens(Tokens(tokens.into_iter()), &mut sink)
            .unwrap();
        sink
    }

    #[test]
    fn drops_directives_and_pis() {
        let sink = run(
            Normalizer::default(),
            vec![
                Token::Directive("DOCTYPE foo".to_string()),
                Token::ProcInst(ProcInst {
                    target: "xml".to_string(),
                    data: Some("version=\"1.0\"".to_string()),
                }),
                Token::StartElement(StartElement::new(Name::local("root"))),
                Token::EndElement(Name::local("root")),
            ],
        );
        assert_eq!(
            vec![
                Token::StartElement(StartElement::new(Name::local("root"))),
                Token::EndElement(Name::local("root")),
            ],
            sink.tokens
        );
        assert_eq!(1, sink.flushes);
    }

    #[test]
    fn whitespace_tokens_are_tested_one_by_one() {
        let sink = run(
            Normalizer::new(NormalizerConfig::default().with_omit_whitespace(true)),
            vec![
                Token::CharData("  ".to_string()),
                Token::CharData(" a ".to_string()),
                Token::CharData("\n\t".to_string()),
            ],
        );
        assert_eq!(vec![Token::CharData(" a ".to_string())], sink.tokens);
    }

    #[test]
    fn comments() {
        let tokens = vec![Token::Comment(" c ".to_string())];
        assert_eq!(
            tokens,
            run(Normalizer::default(), tokens.clone()).tokens
        );
        assert!(run(
            Normalizer::new(NormalizerConfig::default().with_omit_comments(true)),
            tokens
        )
        .tokens
        .is_empty());
    }

    #[test]
    fn start_element_rewrite() {
        let start = StartElement::new(Name::local("root"))
            .with_attribute(Name::qualified("c", "bar"), "bar")
            .with_attribute(Name::qualified(XMLNS_NAMESPACE, "a"), "a")
            .with_attribute(Name::qualified("a", "baz"), "baz")
            .with_attribute(Name::local("xmlns"), "space")
            .with_attribute(Name::qualified("b", "bam"), "bam")
            .with_attribute(Name::qualified("a", "bam"), "bam")
            .with_attribute(Name::local("z"), "z");

        let normalized = normalize_start(start);
        let names: Vec<&Name> = normalized.attributes.iter().map(|attr| &attr.name).collect();
        assert_eq!(
            vec![
                &Name::local("z"),
                &Name::qualified("a", "bam"),
                &Name::qualified("a", "baz"),
                &Name::qualified("b", "bam"),
                &Name::qualified("c", "bar"),
            ],
            names
        );
    }

    #[test]
    fn attribute_less_start_element() {
        let start = StartElement::new(Name::local("root"))
            .with_attribute(Name::local("xmlns"), "space");
        assert_eq!(
            Vec::<Attribute>::new(),
            normalize_start(start).attributes
        );
    }
}
