//! Utilities for XML testing
//!
//! [`Normalizer`] rewrites XML into a form where documents that only differ
//! in namespace prefixes, attribute order, namespace declarations, directives
//! and processing instructions (and optionally whitespace and comments) are
//! byte-identical.
//!
//! ```
//! use xrs_xmltest::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! let equal = normalizer
//!     .equal_str(r#"<root xmlns="space"/>"#, r#"<s:root xmlns:s="space"></s:root>"#)
//!     .unwrap();
//! assert!(equal);
//! ```

pub use config::NormalizerConfig;
pub use emit::XmlTokenWriter;
pub use error::{Error, ErrorKind, Result, SyntaxError};
pub use normalizer::Normalizer;
pub use reader::XmlTokenizer;
pub use token::{Attribute, Name, ProcInst, StartElement, Token, TokenSink, TokenSource};

mod config;
mod emit;
mod error;
mod normalizer;
mod reader;
mod token;

/// Asserts that two XML documents are equal after normalization.
///
/// Panics with both normalized documents when they differ and when one of
/// them can not be normalized. A [`Normalizer`] can be passed as first
/// argument, the default one is used otherwise.
///
/// ```
/// use xrs_xmltest::{assert_xml_eq, Normalizer, NormalizerConfig};
///
/// assert_xml_eq!(r#"<a y="2" x="1"/>"#, r#"<a x="1" y="2"></a>"#);
/// assert_xml_eq!(
///     Normalizer::new(NormalizerConfig::default().with_omit_whitespace(true)),
///     "<a>\n  <b/>\n</a>",
///     "<a><b/></a>"
/// );
/// ```
#[macro_export]
macro_rules! assert_xml_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_xml_eq!($crate::Normalizer::default(), $left, $right)
    };
    ($normalizer:expr, $left:expr, $right:expr $(,)?) => {{
        let normalizer: $crate::Normalizer = $normalizer;
        let left = match normalizer.normalize_str($left) {
            Ok(left) => left,
            Err(err) => panic!("left XML can not be normalized: {}", err),
        };
        let right = match normalizer.normalize_str($right) {
            Ok(right) => right,
            Err(err) => panic!("right XML can not be normalized: {}", err),
        };
        assert_eq!(left, right, "normalized XML differs");
    }};
}
