//! Namespace aware XML writer
//!
//! Names are given as namespace URI and local name. The writer never uses the
//! default namespace: names in a namespace get a prefix invented from the URI
//! (see [`namespace`]) and declared where it is not yet in scope, names
//! without namespace are written unprefixed.

use std::io;

use crate::chars::{is_name, is_ncname};
use crate::escape::Escape;
use crate::namespace::{Namespaces, XMLNS_NAMESPACE, XML_NAMESPACE};
use crate::write::UnicodeWrite;

pub mod chars;
pub mod escape;
pub mod namespace;
pub mod write;

struct OpenElement {
    namespace: Option<String>,
    local: String,
    qname: String,
    declarations: usize,
}

struct PendingAttribute {
    namespace: Option<String>,
    local: String,
    value: String,
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn display_name(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(ns) => format!("{{{}}}{}", ns, local),
        None => local.to_string(),
    }
}

pub struct XmlWriter<W: UnicodeWrite, E: Escape> {
    stack: Vec<OpenElement>,
    namespaces: Namespaces,
    writer: W,
    escaper: E,
}

impl<W: UnicodeWrite, E: Escape> XmlWriter<W, E> {
    pub fn for_writer(writer: W, escaper: E) -> Self {
        Self {
            stack: vec![],
            namespaces: Namespaces::new(),
            writer,
            escaper,
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn element<'a>(
        &'a mut self,
        namespace: Option<&str>,
        local: &str,
    ) -> io::Result<XmlElementWriter<'a, W, E>> {
        check_name(namespace, local)?;
        Ok(XmlElementWriter {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
            attributes: vec![],
            ser: self,
        })
    }

    pub fn end_element(&mut self, namespace: Option<&str>, local: &str) -> io::Result<()> {
        let element = match self.stack.last() {
            Some(element) => element,
            None => {
                return Err(invalid_input(format!(
                    "end tag </{}> without open element",
                    display_name(namespace, local)
                )))
            }
        };
        if element.namespace.as_deref() != namespace || element.local != local {
            return Err(invalid_input(format!(
                "end tag </{}> does not match start tag <{}>",
                display_name(namespace, local),
                display_name(element.namespace.as_deref(), &element.local)
            )));
        }

        if let Some(element) = self.stack.pop() {
            self.writer.write_fmt(format_args!("</{}>", element.qname))?;
            self.namespaces.undeclare(element.declarations);
        }
        Ok(())
    }

    pub fn characters(&mut self, characters: &str) -> io::Result<()> {
        self.escaper.escape_content(characters, &mut self.writer)
    }

    pub fn comment(&mut self, comment: &str) -> io::Result<()> {
        if comment.contains("--") || comment.ends_with('-') {
            return Err(invalid_input(format!(
                "comment contains `--` or ends with `-`: {:?}",
                comment
            )));
        }
        self.writer.write_fmt(format_args!("<!--{}-->", comment))
    }

    pub fn pi(&mut self, target: &str, data: Option<&str>) -> io::Result<()> {
        if !is_name(target) {
            return Err(invalid_input(format!(
                "invalid processing instruction target: {:?}",
                target
            )));
        }
        match data {
            Some(data) if data.contains("?>") => Err(invalid_input(format!(
                "processing instruction contains `?>`: {:?}",
                data
            ))),
            Some(data) if !data.is_empty() => {
                self.writer.write_fmt(format_args!("<?{} {}?>", target, data))
            }
            _ => self.writer.write_fmt(format_args!("<?{}?>", target)),
        }
    }

    pub fn directive(&mut self, directive: &str) -> io::Result<()> {
        if directive.contains('>') && !directive.starts_with("DOCTYPE") {
            return Err(invalid_input(format!(
                "directive contains `>`: {:?}",
                directive
            )));
        }
        self.writer.write_fmt(format_args!("<!{}>", directive))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Qualified name for writing, collects the namespace declarations the
    /// current element needs.
    fn qualify(
        &mut self,
        namespace: Option<&str>,
        local: &str,
        declarations: &mut Vec<(String, String)>,
    ) -> String {
        match namespace {
            None => local.to_string(),
            Some(XML_NAMESPACE) => format!("xml:{}", local),
            Some(uri) => {
                let prefix = self.namespaces.prefix(uri).to_string();
                if !self.namespaces.is_declared(uri) {
                    self.namespaces.declare(uri);
                    declarations.push((prefix.clone(), uri.to_string()));
                }
                format!("{}:{}", prefix, local)
            }
        }
    }
}

fn check_name(namespace: Option<&str>, local: &str) -> io::Result<()> {
    if namespace == Some(XMLNS_NAMESPACE) {
        return Err(invalid_input(format!(
            "namespace declaration can not be written as name: {}",
            display_name(namespace, local)
        )));
    }
    if namespace == Some("") {
        return Err(invalid_input(format!("empty namespace URI for {}", local)));
    }
    if !is_ncname(local) {
        return Err(invalid_input(format!("invalid local name: {:?}", local)));
    }
    Ok(())
}

pub struct XmlElementWriter<'ser, W: UnicodeWrite, E: Escape> {
    namespace: Option<String>,
    local: String,
    attributes: Vec<PendingAttribute>,
    ser: &'ser mut XmlWriter<W, E>,
}

impl<'ser, W: UnicodeWrite, E: Escape> XmlElementWriter<'ser, W, E> {
    pub fn attribute(mut self, namespace: Option<&str>, local: &str, value: &str) -> io::Result<Self> {
        check_name(namespace, local)?;
        if namespace.is_none() && local == "xmlns" {
            return Err(invalid_input(
                "namespace declaration can not be written as attribute".to_string(),
            ));
        }
        self.attributes.push(PendingAttribute {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
            value: value.to_string(),
        });
        Ok(self)
    }

    /// Writes the start tag with all namespace declarations and attributes.
    pub fn finish(self) -> io::Result<()> {
        let ser = self.ser;
        let mut declarations = vec![];
        let qname = ser.qualify(self.namespace.as_deref(), &self.local, &mut declarations);
        let attributes: Vec<(String, &str)> = self
            .attributes
            .iter()
            .map(|attr| {
                let qname = ser.qualify(attr.namespace.as_deref(), &attr.local, &mut declarations);
                (qname, attr.value.as_str())
            })
            .collect();

        ser.stack.push(OpenElement {
            namespace: self.namespace,
            local: self.local,
            qname,
            declarations: declarations.len(),
        });
        let qname = &ser.stack[ser.stack.len() - 1].qname;

        ser.writer.write_fmt(format_args!("<{}", qname))?;
        for (prefix, uri) in &declarations {
            ser.writer.write_fmt(format_args!(" xmlns:{}=\"", prefix))?;
            ser.escaper.escape_attr_value(uri, &mut ser.writer)?;
            ser.writer.write_all("\"")?;
        }
        for (qname, value) in attributes {
            ser.writer.write_all(" ")?;
            ser.writer.write_all(&qname)?;
            ser.writer.write_all("=\"")?;
            ser.escaper.escape_attr_value(value, &mut ser.writer)?;
            ser.writer.write_all("\"")?;
        }
        ser.writer.write_all(">")
    }
}
