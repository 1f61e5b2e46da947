//! Nodes of an RDF statement.
//!
//! A `Node` is one slot of a quad: a resource, a blank node, a literal, or the
//! `Empty` node that stands for "no value" (and acts as a wildcard in patterns).

use crate::vocabulary::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single term of an RDF statement.
///
/// Nodes are immutable values: they compare and hash by content, so two
/// independently constructed resources with the same URI are the same node.
///
/// # Examples
///
/// ```
/// use aingle_triples::{Literal, Node};
///
/// let alice = Node::resource("http://example.org/alice");
/// assert!(alice.is_resource());
/// assert_eq!(alice.to_sparql(), "<http://example.org/alice>");
///
/// let age = Node::literal(Literal::integer(42));
/// assert!(age.is_literal());
///
/// assert!(Node::Empty.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    /// No value. Inside a pattern this slot matches anything.
    #[default]
    Empty,

    /// A resource identified by a URI.
    Resource(String),

    /// A blank node identified by a store-local label.
    Blank(String),

    /// A literal value.
    Literal(Literal),
}

impl Node {
    /// Creates a `Resource` node.
    pub fn resource(uri: impl Into<String>) -> Self {
        Self::Resource(uri.into())
    }

    /// Creates a `Blank` node with the given label.
    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    /// Creates a `Literal` node.
    pub fn literal(literal: impl Into<Literal>) -> Self {
        Self::Literal(literal.into())
    }

    /// Returns `true` for the `Empty` node.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this is a `Resource` node.
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// Returns `true` if this is a `Blank` node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// Returns `true` if this is a `Literal` node.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns `true` for every node except `Empty` and a blank node without a label.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Blank(label) => !label.is_empty(),
            _ => true,
        }
    }

    /// Returns the URI if this is a `Resource` node.
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Resource(uri) => Some(uri),
            _ => None,
        }
    }

    /// Returns the label if this is a `Blank` node.
    pub fn as_blank(&self) -> Option<&str> {
        match self {
            Self::Blank(label) => Some(label),
            _ => None,
        }
    }

    /// Returns the literal if this is a `Literal` node.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Renders the node in SPARQL / N-Triples term syntax.
    ///
    /// `Empty` renders as an empty string since it has no term form. Blank
    /// labels percent-encode every character the query parser would not read
    /// back as part of the label, and IRIs escape `>` and `\` as `\u`
    /// sequences, so the rendering always parses back to the same node.
    pub fn to_sparql(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Resource(uri) => format!("<{}>", escape_iri(uri)),
            Self::Blank(label) => format!("_:{}", escape_blank_label(label)),
            Self::Literal(literal) => literal.to_sparql(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "(empty)"),
            other => write!(f, "{}", other.to_sparql()),
        }
    }
}

/// A literal value, resolved to one of a small set of primitive kinds when it is created.
///
/// Datatypes without a dedicated variant are kept in lexical form as `Typed`.
///
/// # Examples
///
/// ```
/// use aingle_triples::Literal;
///
/// let n = Literal::typed("17", "http://www.w3.org/2001/XMLSchema#integer");
/// assert_eq!(n, Literal::Integer(17));
///
/// let d = Literal::typed("2024-01-01", "http://www.w3.org/2001/XMLSchema#date");
/// assert_eq!(d.lexical(), "2024-01-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Literal {
    /// A plain string (`xsd:string`).
    String(String),

    /// A string tagged with a language.
    LangString { value: String, lang: String },

    /// An integer (`xsd:integer` and its `int`/`long` subtypes).
    Integer(i64),

    /// A boolean (`xsd:boolean`).
    Boolean(bool),

    /// Any other datatype, kept in its lexical form.
    Typed { value: String, datatype: String },
}

impl Literal {
    /// Creates a plain string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a language-tagged string literal.
    pub fn lang_string(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::LangString {
            value: value.into(),
            lang: lang.into(),
        }
    }

    /// Creates an integer literal.
    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Creates a boolean literal.
    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    /// Creates a literal from its lexical form and datatype URI.
    ///
    /// Known datatypes resolve to their dedicated variant when the lexical form
    /// is well formed; anything else is kept as `Typed`.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        let value = value.into();
        let datatype = datatype.into();

        match datatype.as_str() {
            xsd::STRING => Self::String(value),
            xsd::INTEGER | xsd::INT | xsd::LONG => match value.trim().parse::<i64>() {
                Ok(n) => Self::Integer(n),
                Err(_) => Self::Typed { value, datatype },
            },
            xsd::BOOLEAN => match value.as_str() {
                "true" | "1" => Self::Boolean(true),
                "false" | "0" => Self::Boolean(false),
                _ => Self::Typed { value, datatype },
            },
            _ => Self::Typed { value, datatype },
        }
    }

    /// Returns the lexical form of the literal.
    pub fn lexical(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::LangString { value, .. } => value.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Typed { value, .. } => value.clone(),
        }
    }

    /// Returns the datatype URI of the literal.
    pub fn datatype(&self) -> &str {
        match self {
            Self::String(_) => xsd::STRING,
            Self::LangString { .. } => rdf::LANG_STRING,
            Self::Integer(_) => xsd::INTEGER,
            Self::Boolean(_) => xsd::BOOLEAN,
            Self::Typed { datatype, .. } => datatype,
        }
    }

    /// Returns the language tag of a language-tagged string.
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::LangString { lang, .. } => Some(lang),
            _ => None,
        }
    }

    /// Renders the literal in SPARQL term syntax.
    pub fn to_sparql(&self) -> String {
        match self {
            Self::String(value) => format!("\"{}\"", escape(value)),
            Self::LangString { value, lang } => format!("\"{}\"@{}", escape(value), lang),
            other => format!("\"{}\"^^<{}>", escape(&other.lexical()), other.datatype()),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sparql())
    }
}

/// Characters a blank label may carry verbatim.
pub(crate) fn is_label_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// A `.` stays verbatim only between label characters; everything else
/// outside the label set is written as `%XX` per UTF-8 byte.
fn escape_blank_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        let verbatim = is_label_char(c)
            || (c == '.' && chars.peek().is_some_and(|&next| is_label_char(next)));
        if verbatim {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    out
}

fn escape_iri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for c in uri.chars() {
        match c {
            '>' => out.push_str("\\u003E"),
            '\\' => out.push_str("\\u005C"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a string for use inside a double-quoted SPARQL literal.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
