//! Token sink on top of the namespace aware writer

use std::io::{self, BufWriter};

use xrs_writer::escape::CanonicalEscaper;
use xrs_writer::write::{UnicodeWrite, Utf8Writer};
use xrs_writer::XmlWriter;

use crate::error::Result;
use crate::token::{Token, TokenSink};

/// Serializes tokens with prefixes invented from namespace URIs
pub struct XmlTokenWriter<W: UnicodeWrite> {
    writer: XmlWriter<W, CanonicalEscaper>,
}

impl<W: UnicodeWrite> XmlTokenWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: XmlWriter::for_writer(writer, CanonicalEscaper),
        }
    }
}

impl<W: io::Write> XmlTokenWriter<Utf8Writer<BufWriter<W>>> {
    /// Buffered UTF-8 output to a byte sink
    pub fn from_io(writer: W) -> Self {
        Self::new(Utf8Writer::new(BufWriter::new(writer)))
    }
}

impl<W: UnicodeWrite> TokenSink for XmlTokenWriter<W> {
    fn write_token(&mut self, token: &Token) -> Result<()> {
        match token {
            Token::StartElement(start) => {
                let mut element = self
                    .writer
                    .element(start.name.space(), start.name.local_name())?;
                for attr in &start.attributes {
                    element =
                        element.attribute(attr.name.space(), attr.name.local_name(), &attr.value)?;
                }
                element.finish()?;
            }
            Token::EndElement(name) => self.writer.end_element(name.space(), name.local_name())?,
            Token::CharData(text) => self.writer.characters(text)?,
            Token::Comment(comment) => self.writer.comment(comment)?,
            Token::Directive(directive) => self.writer.directive(directive)?,
            Token::ProcInst(pi) => self.writer.pi(&pi.target, pi.data.as_deref())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}
