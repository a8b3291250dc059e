//! Tokenizer on top of the namespace resolving reader of quick-xml

use std::borrow::Cow;
use std::io::{self, BufRead};
use std::str::from_utf8;
use std::sync::Arc;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::NsReader;
use xrs_writer::chars::is_ncname;
use xrs_writer::namespace::{XMLNS_NAMESPACE, XML_NAMESPACE};

use crate::error::{Error, Result};
use crate::token::{Attribute, Name, ProcInst, StartElement, Token, TokenSource};

/// Pull tokenizer with resolved namespaces
///
/// Empty element tags are split into a start and an end token. Line endings
/// in text and attribute values are normalized to `\n`. Reaching the end of
/// input with open elements is a syntax error.
pub struct XmlTokenizer<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    depth: usize,
    pending_end: Option<Name>,
}

impl<R: BufRead> XmlTokenizer<R> {
    pub fn new(input: R) -> Self {
        let mut reader = NsReader::from_reader(input);
        let config = reader.config_mut();
        config.allow_unmatched_ends = false;
        config.check_comments = true;
        config.check_end_names = true;
        config.trim_markup_names_in_closing_tags = true;
        Self {
            reader,
            buf: Vec::with_capacity(1024),
            depth: 0,
            pending_end: None,
        }
    }
}

impl<R: BufRead> TokenSource for XmlTokenizer<R> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(Token::EndElement(name)));
        }

        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(err) => return Err(xml_error(err, position(&self.reader))),
        };
        let reader = &self.reader;
        let offset = position(reader);

        let token = match event {
            Event::Start(start) => {
                self.depth += 1;
                Token::StartElement(start_element(reader, &start, offset)?)
            }
            Event::Empty(start) => {
                let start = start_element(reader, &start, offset)?;
                self.pending_end = Some(start.name.clone());
                Token::StartElement(start)
            }
            Event::End(end) => {
                self.depth = self.depth.saturating_sub(1);
                Token::EndElement(element_name(reader, end.name(), offset)?)
            }
            Event::Text(text) => Token::CharData(unescape_text(&text, offset)?),
            Event::CData(cdata) => {
                Token::CharData(normalize_newlines(decode(&cdata, offset)?).into_owned())
            }
            Event::Comment(comment) => {
                Token::Comment(normalize_newlines(decode(&comment, offset)?).into_owned())
            }
            Event::Decl(decl) => {
                let version = decl.version().map_err(|err| xml_error(err, offset))?;
                let mut data = format!("version=\"{}\"", decode(&version, offset)?);
                if let Some(encoding) = decl.encoding() {
                    let encoding = encoding.map_err(|err| Error::syntax(offset, err.to_string()))?;
                    data.push_str(&format!(" encoding=\"{}\"", decode(&encoding, offset)?));
                }
                if let Some(standalone) = decl.standalone() {
                    let standalone =
                        standalone.map_err(|err| Error::syntax(offset, err.to_string()))?;
                    data.push_str(&format!(" standalone=\"{}\"", decode(&standalone, offset)?));
                }
                Token::ProcInst(ProcInst {
                    target: "xml".to_string(),
                    data: Some(data),
                })
            }
            Event::PI(pi) => {
                let target = decode(pi.target(), offset)?.to_string();
                let data = decode(pi.content(), offset)?.trim_start();
                Token::ProcInst(ProcInst {
                    target,
                    data: (!data.is_empty()).then(|| data.to_string()),
                })
            }
            Event::DocType(doctype) => {
                let content = doctype.into_inner();
                Token::Directive(format!("DOCTYPE {}", decode(&content, offset)?.trim_start()))
            }
            Event::Eof => {
                if self.depth > 0 {
                    return Err(Error::syntax(
                        offset,
                        format!("unexpected end of input, {} element(s) not closed", self.depth),
                    ));
                }
                return Ok(None);
            }
        };
        Ok(Some(token))
    }
}

fn position<R>(reader: &NsReader<R>) -> u64 {
    reader.buffer_position() as u64
}

fn xml_error(err: quick_xml::Error, offset: u64) -> Error {
    match err {
        quick_xml::Error::Io(err) => Error::Io(
            Arc::try_unwrap(err).unwrap_or_else(|err| io::Error::new(err.kind(), err.to_string())),
        ),
        err => Error::syntax(offset, err.to_string()),
    }
}

fn decode(bytes: &[u8], offset: u64) -> Result<&str> {
    from_utf8(bytes).map_err(|err| Error::syntax(offset, format!("invalid UTF-8: {}", err)))
}

/// Line end handling of XML 1.0, section 2.11
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Unescapes raw text after line end normalization, so `&#13;` survives.
fn unescape_text(raw: &[u8], offset: u64) -> Result<String> {
    let text = normalize_newlines(decode(raw, offset)?);
    let text = unescape(&text).map_err(|err| Error::syntax(offset, err.to_string()))?;
    Ok(text.into_owned())
}

fn check_local_name(local: &str, offset: u64) -> Result<()> {
    if is_ncname(local) {
        Ok(())
    } else {
        Err(Error::syntax(offset, format!("invalid name `{}`", local)))
    }
}

fn namespace_uri(ns: ResolveResult, offset: u64) -> Result<Option<String>> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(decode(uri, offset)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(Some(XML_NAMESPACE.to_string())),
        ResolveResult::Unknown(prefix) => Err(Error::syntax(
            offset,
            format!(
                "unbound namespace prefix `{}`",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

fn element_name<R>(reader: &NsReader<R>, qname: QName, offset: u64) -> Result<Name> {
    let (ns, local) = reader.resolve_element(qname);
    let space = namespace_uri(ns, offset)?;
    let local = decode(local.into_inner(), offset)?;
    check_local_name(local, offset)?;
    Ok(Name::new(space.as_deref(), local))
}

fn start_element<R>(reader: &NsReader<R>, start: &BytesStart, offset: u64) -> Result<StartElement> {
    let mut element = StartElement::new(element_name(reader, start.name(), offset)?);
    for attr in start.attributes() {
        let attr = attr.map_err(|err| Error::syntax(offset, err.to_string()))?;
        let value = unescape_text(&attr.value, offset)?;

        // namespace declarations keep their raw form, the normalizer decides
        let key = attr.key.into_inner();
        let name = if key == b"xmlns" {
            Name::local("xmlns")
        } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
            let prefix = decode(prefix, offset)?;
            check_local_name(prefix, offset)?;
            Name::qualified(XMLNS_NAMESPACE, prefix)
        } else {
            let (ns, local) = reader.resolve_attribute(attr.key);
            let space = namespace_uri(ns, offset)?;
            let local = decode(local.into_inner(), offset)?;
            check_local_name(local, offset)?;
            Name::new(space.as_deref(), local)
        };

        // different prefixes may be bound to the same namespace
        if element.attributes.iter().any(|seen| seen.name == name) {
            return Err(Error::syntax(
                offset,
                format!("duplicated attribute {:?}", name),
            ));
        }
        element.attributes.push(Attribute::new(name, value));
    }
    Ok(element)
}
