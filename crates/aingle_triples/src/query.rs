//! SELECT queries over the statement store.
//!
//! The supported language is the basic-graph-pattern core of SPARQL:
//!
//! ```text
//! SELECT * WHERE { ?a <urn:p> ?b . ?b <urn:p> ?c }
//! SELECT ?a WHERE { { ?a <urn:p> <urn:x> } UNION { ?a <urn:q> "x"@en } }
//! ```
//!
//! Terms are variables (`?v` or `$v`), IRIs (`<...>`), blank nodes (`_:b`,
//! matched as concrete nodes), quoted literals with an optional `@lang` or
//! `^^<datatype>` suffix, integers, `true`/`false`, and `a` for `rdf:type`.
//! Triple patterns match statements in every graph.

use crate::node::is_label_char;
use crate::vocabulary::{rdf, xsd};
use crate::{BindingSet, Error, Literal, Node, Result, Statement};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Anything that can answer single-pattern lookups.
pub trait PatternSource {
    /// Returns every statement matching `pattern` (`Empty` slots are wildcards).
    fn find(&self, pattern: &Statement) -> Result<Vec<Statement>>;
}

/// A slot of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A named variable.
    Variable(String),
    /// A constant node.
    Node(Node),
}

impl Term {
    fn resolve(&self, solution: &BindingSet) -> Node {
        match self {
            Self::Variable(name) => solution.get(name).cloned().unwrap_or_default(),
            Self::Node(node) => node.clone(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "?{}", name),
            Self::Node(node) => write!(f, "{}", node.to_sparql()),
        }
    }
}

/// A triple pattern inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    /// Builds the lookup pattern for this triple under `solution`.
    fn to_lookup(&self, solution: &BindingSet) -> Statement {
        Statement::new(
            self.subject.resolve(solution),
            self.predicate.resolve(solution),
            self.object.resolve(solution),
        )
    }

    /// Extends `solution` with the variables of this pattern bound from `statement`.
    ///
    /// Returns `None` if a variable repeated inside the pattern would receive two values.
    fn extend(&self, solution: &BindingSet, statement: &Statement) -> Option<BindingSet> {
        let mut extended = solution.clone();
        for (term, node) in [
            (&self.subject, &statement.subject),
            (&self.predicate, &statement.predicate),
            (&self.object, &statement.object),
        ] {
            if let Term::Variable(name) = term {
                match extended.get(name) {
                    Some(existing) if existing != node => return None,
                    Some(_) => {}
                    None => extended.insert(name.clone(), node.clone()),
                }
            }
        }
        Some(extended)
    }
}

/// One element of a group graph pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupElement {
    Triple(TriplePattern),
    Group(GroupPattern),
    Union(Vec<GroupPattern>),
}

/// A `{ ... }` block: the join of its elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPattern {
    pub elements: Vec<GroupElement>,
}

/// The variables a query returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Variables(Vec<String>),
}

/// A parsed SELECT query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub projection: Projection,
    pub pattern: GroupPattern,
}

impl SelectQuery {
    /// Parses a SELECT query.
    ///
    /// # Examples
    ///
    /// ```
    /// use aingle_triples::query::{Projection, SelectQuery};
    ///
    /// let query = SelectQuery::parse("SELECT * WHERE { ?s <urn:p> ?o }").unwrap();
    /// assert_eq!(query.projection, Projection::All);
    /// assert_eq!(query.pattern.elements.len(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars().peekable();

        skip_ws(&mut chars);
        let keyword = read_word(&mut chars);
        if !keyword.eq_ignore_ascii_case("SELECT") {
            return Err(Error::Query(format!("expected SELECT, found '{}'", keyword)));
        }

        skip_ws(&mut chars);
        let projection = if chars.peek() == Some(&'*') {
            chars.next();
            Projection::All
        } else {
            let mut variables = Vec::new();
            while matches!(chars.peek(), Some('?') | Some('$')) {
                chars.next();
                variables.push(read_variable_name(&mut chars)?);
                skip_ws(&mut chars);
            }
            if variables.is_empty() {
                return Err(Error::Query("expected '*' or a variable list".into()));
            }
            Projection::Variables(variables)
        };

        skip_ws(&mut chars);
        if peek_word(&chars).eq_ignore_ascii_case("WHERE") {
            read_word(&mut chars);
        }

        let pattern = parse_group(&mut chars)?;

        skip_ws(&mut chars);
        if let Some(c) = chars.peek() {
            return Err(Error::Query(format!("unexpected '{}' after query", c)));
        }

        Ok(Self {
            projection,
            pattern,
        })
    }

    /// Evaluates the query, returning one `BindingSet` per solution.
    pub fn evaluate(&self, source: &dyn PatternSource) -> Result<Vec<BindingSet>> {
        let solutions = eval_group(&self.pattern, vec![BindingSet::new()], source)?;

        Ok(match &self.projection {
            Projection::All => solutions,
            Projection::Variables(names) => solutions
                .into_iter()
                .map(|solution| {
                    names
                        .iter()
                        .filter_map(|name| {
                            solution.get(name).map(|node| (name.clone(), node.clone()))
                        })
                        .collect()
                })
                .collect(),
        })
    }
}

fn eval_group(
    group: &GroupPattern,
    input: Vec<BindingSet>,
    source: &dyn PatternSource,
) -> Result<Vec<BindingSet>> {
    let mut solutions = input;

    for element in &group.elements {
        if solutions.is_empty() {
            break;
        }

        solutions = match element {
            GroupElement::Triple(triple) => {
                let mut next = Vec::new();
                for solution in &solutions {
                    let lookup = triple.to_lookup(solution);
                    for statement in source.find(&lookup)? {
                        if let Some(extended) = triple.extend(solution, &statement) {
                            next.push(extended);
                        }
                    }
                }
                next
            }
            GroupElement::Group(inner) => eval_group(inner, solutions, source)?,
            GroupElement::Union(branches) => {
                let mut next = Vec::new();
                for branch in branches {
                    next.extend(eval_group(branch, solutions.clone(), source)?);
                }
                next
            }
        };
    }

    Ok(solutions)
}

type Cursor<'a> = Peekable<Chars<'a>>;

fn parse_group(chars: &mut Cursor<'_>) -> Result<GroupPattern> {
    skip_ws(chars);
    expect_char(chars, '{')?;

    let mut group = GroupPattern::default();
    loop {
        skip_ws(chars);
        match chars.peek() {
            Some('}') => {
                chars.next();
                return Ok(group);
            }
            Some('.') => {
                chars.next();
            }
            Some('{') => {
                let mut branches = vec![parse_group(chars)?];
                loop {
                    skip_ws(chars);
                    if !peek_word(chars).eq_ignore_ascii_case("UNION") {
                        break;
                    }
                    read_word(chars);
                    branches.push(parse_group(chars)?);
                }
                let element = if branches.len() == 1 {
                    GroupElement::Group(branches.remove(0))
                } else {
                    GroupElement::Union(branches)
                };
                group.elements.push(element);
            }
            Some(_) => {
                let subject = parse_term(chars)?;
                let predicate = parse_term(chars)?;
                let object = parse_term(chars)?;
                group.elements.push(GroupElement::Triple(TriplePattern {
                    subject,
                    predicate,
                    object,
                }));
            }
            None => return Err(Error::Query("unterminated group pattern".into())),
        }
    }
}

fn parse_term(chars: &mut Cursor<'_>) -> Result<Term> {
    skip_ws(chars);

    match chars.peek() {
        Some('?') | Some('$') => {
            chars.next();
            Ok(Term::Variable(read_variable_name(chars)?))
        }
        Some('<') => Ok(Term::Node(Node::Resource(read_iri(chars)?))),
        Some('_') => {
            chars.next();
            expect_char(chars, ':')?;
            let label = read_blank_label(chars)?;
            if label.is_empty() {
                return Err(Error::Query("empty blank node label".into()));
            }
            Ok(Term::Node(Node::Blank(label)))
        }
        Some('"') => Ok(Term::Node(Node::Literal(parse_literal(chars)?))),
        Some(c) if c.is_ascii_digit() || *c == '-' || *c == '+' => {
            let mut digits = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || ((c == '-' || c == '+') && digits.is_empty()) {
                    digits.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            digits
                .parse::<i64>()
                .map(|n| Term::Node(Node::Literal(Literal::Integer(n))))
                .map_err(|_| Error::Query(format!("invalid integer '{}'", digits)))
        }
        Some(_) => {
            let word = read_word(chars);
            match word.as_str() {
                "a" => Ok(Term::Node(Node::resource(rdf::TYPE))),
                "true" => Ok(Term::Node(Node::Literal(Literal::Boolean(true)))),
                "false" => Ok(Term::Node(Node::Literal(Literal::Boolean(false)))),
                "" => Err(Error::Query(format!(
                    "unexpected character '{}'",
                    chars.peek().copied().unwrap_or(' ')
                ))),
                other => Err(Error::Query(format!("unexpected token '{}'", other))),
            }
        }
        None => Err(Error::Query("unexpected end of query".into())),
    }
}

fn parse_literal(chars: &mut Cursor<'_>) -> Result<Literal> {
    chars.next(); // opening quote

    let mut value = String::new();
    let mut escaped = false;
    let mut closed = false;

    for c in chars.by_ref() {
        if escaped {
            match c {
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                '\\' => value.push('\\'),
                '"' => value.push('"'),
                _ => {
                    value.push('\\');
                    value.push(c);
                }
            }
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            closed = true;
            break;
        } else {
            value.push(c);
        }
    }

    if !closed {
        return Err(Error::Query("unterminated literal".into()));
    }

    match chars.peek() {
        Some('^') => {
            chars.next();
            expect_char(chars, '^')?;
            let datatype = read_iri(chars)?;
            Ok(Literal::typed(value, datatype))
        }
        Some('@') => {
            chars.next();
            let lang = read_word(chars);
            if lang.is_empty() {
                return Err(Error::Query("empty language tag".into()));
            }
            Ok(Literal::lang_string(value, lang))
        }
        _ => Ok(Literal::typed(value, xsd::STRING)),
    }
}

fn skip_ws(chars: &mut Cursor<'_>) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

fn is_word_char(c: char) -> bool {
    is_label_char(c)
}

fn read_word(chars: &mut Cursor<'_>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if is_word_char(c) {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}

fn peek_word(chars: &Cursor<'_>) -> String {
    let mut peeker = chars.clone();
    read_word(&mut peeker)
}

fn read_variable_name(chars: &mut Cursor<'_>) -> Result<String> {
    let name = read_word(chars);
    if name.is_empty() {
        return Err(Error::Query("empty variable name".into()));
    }
    Ok(name)
}

fn expect_char(chars: &mut Cursor<'_>, expected: char) -> Result<()> {
    match chars.next() {
        Some(c) if c == expected => Ok(()),
        Some(c) => Err(Error::Query(format!(
            "expected '{}', found '{}'",
            expected, c
        ))),
        None => Err(Error::Query(format!("expected '{}', found end of query", expected))),
    }
}

/// Reads a blank node label: label characters, `%XX` byte escapes, and
/// dots that are followed by a label character.
fn read_blank_label(chars: &mut Cursor<'_>) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        match chars.peek().copied() {
            Some(c) if is_label_char(c) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                chars.next();
            }
            Some('.') => {
                let mut ahead = chars.clone();
                ahead.next();
                if !ahead.peek().is_some_and(|&next| is_label_char(next)) {
                    break;
                }
                bytes.push(b'.');
                chars.next();
            }
            Some('%') => {
                chars.next();
                let hex = read_hex(chars, 2)?;
                bytes.push(hex as u8);
            }
            _ => break,
        }
    }

    String::from_utf8(bytes).map_err(|_| Error::Query("blank node label is not UTF-8".into()))
}

fn read_hex(chars: &mut Cursor<'_>, digits: usize) -> Result<u32> {
    let mut value = 0;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| Error::Query("invalid hex escape".into()))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn read_iri(chars: &mut Cursor<'_>) -> Result<String> {
    expect_char(chars, '<')?;

    let mut iri = String::new();
    while let Some(c) = chars.next() {
        match c {
            '>' => return Ok(iri),
            '\\' => {
                let digits = match chars.next() {
                    Some('u') => 4,
                    Some('U') => 8,
                    _ => return Err(Error::Query("invalid escape in IRI".into())),
                };
                let code = read_hex(chars, digits)?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| Error::Query(format!("invalid code point {:X} in IRI", code)))?;
                iri.push(decoded);
            }
            _ => iri.push(c),
        }
    }

    Err(Error::Query("unterminated IRI".into()))
}
