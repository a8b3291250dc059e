//! Token stream between tokenizer, normalizer and emitter

use std::fmt;

use xrs_writer::namespace::XMLNS_NAMESPACE;

use crate::error::Result;

/// Expanded name: optional namespace URI and local name
///
/// Ordered by namespace URI first, names without namespace first.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    space: Option<String>,
    local: String,
}

impl Name {
    pub fn new(space: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            space: space.filter(|uri| !uri.is_empty()).map(str::to_string),
            local: local.into(),
        }
    }

    /// Name without namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(None, local)
    }

    pub fn qualified(space: &str, local: impl Into<String>) -> Self {
        Self::new(Some(space), local)
    }

    pub fn space(&self) -> Option<&str> {
        self.space.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.space {
            Some(space) => write!(f, "{{{}}}{}", space, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

impl Attribute {
    pub fn new(name: Name, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// `xmlns` or `xmlns:*`
    pub fn is_namespace_declaration(&self) -> bool {
        self.name.local_name() == "xmlns" || self.name.space() == Some(XMLNS_NAMESPACE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartElement {
    pub name: Name,
    pub attributes: Vec<Attribute>,
}

impl StartElement {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            attributes: vec![],
        }
    }

    pub fn with_attribute(mut self, name: Name, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }
}

/// Processing Instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcInst {
    pub target: String,
    pub data: Option<String>,
}

/// Structural XML token
///
/// CDATA sections arrive as `CharData`, the XML declaration as a `ProcInst`
/// with target `xml` and a document type declaration as `Directive`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    StartElement(StartElement),
    EndElement(Name),
    CharData(String),
    Comment(String),
    Directive(String),
    ProcInst(ProcInst),
}

/// Pull side: produces tokens until end of input
pub trait TokenSource {
    /// `Ok(None)` signals end of input.
    fn next_token(&mut self) -> Result<Option<Token>>;
}

/// Push side: encodes tokens to some byte sink
pub trait TokenSink {
    fn write_token(&mut self, token: &Token) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }
}

impl<T: TokenSink + ?Sized> TokenSink for &mut T {
    fn write_token(&mut self, token: &Token) -> Result<()> {
        (**self).write_token(token)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
