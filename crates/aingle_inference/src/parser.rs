//! Parser for the line-oriented rule file format.
//!
//! ```text
//! # comment
//! PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
//! [rdfs9: (?a rdfs:subClassOf ?b), (?b rdfs:subClassOf ?c) -> (?a rdfs:subClassOf ?c)]
//! ```
//!
//! Every line is either blank, a `#` comment, a prefix declaration or a rule.
//! Terms are variables (`?x`), IRIs (`<...>`), prefixed names (`rdfs:Class`),
//! quoted literals (`"text"`, `"text"@en`, `"5"^^xsd:integer`) or integers.
//! A single bad line fails the whole parse.

use crate::error::{Error, Result};
use crate::pattern::{NodePattern, StatementPattern};
use crate::rule::Rule;
use crate::rule_set::RuleSet;
use aingle_triples::vocabulary::xsd;
use aingle_triples::{Literal, Node};
use indexmap::IndexMap;
use log::{debug, warn};
use std::iter::Peekable;
use std::path::Path;
use std::str::CharIndices;

/// A lexical token of a rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Arrow,
    /// A bare name: a keyword, rule name or prefix name.
    Word(String),
    Variable(String),
    Iri(String),
    QName {
        prefix: String,
        local: String,
    },
    Literal(Literal),
    /// Datatype given as a prefixed name, resolved by the parser.
    PrefixedLiteral {
        value: String,
        prefix: String,
        local: String,
    },
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    /// 1-based column of the first character.
    column: usize,
}

/// A lexing or grammar failure inside one line.
struct LineError {
    column: usize,
    message: String,
}

impl LineError {
    fn new(column: usize, message: impl Into<String>) -> Self {
        Self {
            column,
            message: message.into(),
        }
    }
}

type LineResult<T> = std::result::Result<T, LineError>;

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.char_indices().peekable(),
        }
    }

    fn tokenize(mut self) -> LineResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(&(offset, c)) = self.chars.peek() {
            let column = offset + 1;
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }

            let kind = match c {
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                '?' => {
                    self.chars.next();
                    let name = self.read_name();
                    if name.is_empty() {
                        return Err(LineError::new(column, "empty variable name"));
                    }
                    TokenKind::Variable(name)
                }
                '<' => TokenKind::Iri(self.read_iri(column)?),
                '"' => self.read_literal(column)?,
                '-' => {
                    self.chars.next();
                    match self.chars.peek() {
                        Some((_, '>')) => {
                            self.chars.next();
                            TokenKind::Arrow
                        }
                        Some((_, d)) if d.is_ascii_digit() => {
                            let digits = self.read_name();
                            let n = format!("-{}", digits)
                                .parse::<i64>()
                                .map_err(|_| LineError::new(column, "invalid integer"))?;
                            TokenKind::Literal(Literal::Integer(n))
                        }
                        _ => return Err(LineError::new(column, "expected '->'")),
                    }
                }
                ':' => {
                    self.chars.next();
                    self.after_colon(String::new())
                }
                c if c.is_ascii_digit() => {
                    let word = self.read_name();
                    match word.parse::<i64>() {
                        Ok(n) if !matches!(self.chars.peek(), Some((_, ':'))) => {
                            TokenKind::Literal(Literal::Integer(n))
                        }
                        _ => self.after_word(word),
                    }
                }
                c if is_name_char(c) => {
                    let word = self.read_name();
                    self.after_word(word)
                }
                other => {
                    return Err(LineError::new(
                        column,
                        format!("unexpected character '{}'", other),
                    ))
                }
            };

            tokens.push(Token { kind, column });
        }
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.chars.next();
        kind
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if is_name_char(c) {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        name
    }

    /// A word directly followed by `:` is either a prefixed name or a name plus a colon.
    fn after_word(&mut self, word: String) -> TokenKind {
        if matches!(self.chars.peek(), Some((_, ':'))) {
            if let Some(next) = self.peek_second() {
                if is_name_char(next) {
                    self.chars.next();
                    let local = self.read_name();
                    return TokenKind::QName {
                        prefix: word,
                        local,
                    };
                }
            }
        }
        TokenKind::Word(word)
    }

    /// Called after a leading `:`; yields `:local` names or a bare colon.
    fn after_colon(&mut self, prefix: String) -> TokenKind {
        match self.chars.peek() {
            Some(&(_, c)) if is_name_char(c) => {
                let local = self.read_name();
                TokenKind::QName { prefix, local }
            }
            _ => TokenKind::Colon,
        }
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn read_iri(&mut self, column: usize) -> LineResult<String> {
        self.chars.next(); // '<'
        let mut iri = String::new();
        for (_, c) in self.chars.by_ref() {
            match c {
                '>' => return Ok(iri),
                c if c.is_whitespace() => {
                    return Err(LineError::new(column, "whitespace inside IRI"))
                }
                c => iri.push(c),
            }
        }
        Err(LineError::new(column, "unterminated IRI"))
    }

    fn read_literal(&mut self, column: usize) -> LineResult<TokenKind> {
        self.chars.next(); // opening quote

        let mut value = String::new();
        let mut escaped = false;
        let mut closed = false;
        for (_, c) in self.chars.by_ref() {
            if escaped {
                match c {
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    other => value.push(other),
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
            return Err(LineError::new(column, "unterminated literal"));
        }

        match self.chars.peek() {
            Some((_, '@')) => {
                self.chars.next();
                let lang = self.read_name();
                if lang.is_empty() {
                    return Err(LineError::new(column, "empty language tag"));
                }
                Ok(TokenKind::Literal(Literal::lang_string(value, lang)))
            }
            Some((_, '^')) => {
                self.chars.next();
                if !matches!(self.chars.next(), Some((_, '^'))) {
                    return Err(LineError::new(column, "expected '^^'"));
                }
                match self.chars.peek() {
                    Some((_, '<')) => {
                        let datatype = self.read_iri(column)?;
                        Ok(TokenKind::Literal(Literal::typed(value, datatype)))
                    }
                    _ => {
                        let prefix = self.read_name();
                        if !matches!(self.chars.next(), Some((_, ':'))) {
                            return Err(LineError::new(column, "expected datatype"));
                        }
                        let local = self.read_name();
                        Ok(TokenKind::PrefixedLiteral {
                            value,
                            prefix,
                            local,
                        })
                    }
                }
            }
            _ => Ok(TokenKind::Literal(Literal::typed(value, xsd::STRING))),
        }
    }
}

/// A directive recognised on one line.
enum Directive {
    Prefix { name: String, uri: String },
    Rule { name: String, rule: Rule },
}

/// Recursive-descent parser over the tokens of a single line.
struct LineParser<'p> {
    tokens: Vec<Token>,
    pos: usize,
    end_column: usize,
    prefixes: &'p IndexMap<String, String>,
}

impl<'p> LineParser<'p> {
    fn new(line: &str, prefixes: &'p IndexMap<String, String>) -> LineResult<Self> {
        Ok(Self {
            tokens: Lexer::new(line).tokenize()?,
            pos: 0,
            end_column: line.chars().count() + 1,
            prefixes,
        })
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn column(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.column)
            .unwrap_or(self.end_column)
    }

    fn next(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos).map(|t| t.kind.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> LineResult<()> {
        let column = self.column();
        match self.next() {
            Some(kind) if kind == expected => Ok(()),
            Some(_) => Err(LineError::new(column, format!("expected {}", what))),
            None => Err(LineError::new(column, format!("expected {}, found end of line", what))),
        }
    }

    fn expect_end(&self) -> LineResult<()> {
        if self.pos < self.tokens.len() {
            return Err(LineError::new(self.column(), "unexpected trailing input"));
        }
        Ok(())
    }

    fn directive(&mut self) -> LineResult<Directive> {
        match self.peek() {
            Some(TokenKind::Word(word)) if word.eq_ignore_ascii_case("PREFIX") => {
                self.next();
                self.prefix_declaration()
            }
            Some(TokenKind::LBracket) => {
                let (name, rule) = self.rule_line()?;
                Ok(Directive::Rule { name, rule })
            }
            _ => Err(LineError::new(
                self.column(),
                "expected a PREFIX declaration or a rule",
            )),
        }
    }

    /// `PREFIX name: <uri>`
    fn prefix_declaration(&mut self) -> LineResult<Directive> {
        let column = self.column();
        let name = match self.next() {
            Some(TokenKind::Word(name)) => {
                self.expect(TokenKind::Colon, "':' after prefix name")?;
                name
            }
            Some(TokenKind::Colon) => String::new(),
            _ => return Err(LineError::new(column, "expected prefix name")),
        };

        let column = self.column();
        let uri = match self.next() {
            Some(TokenKind::Iri(uri)) => uri,
            _ => return Err(LineError::new(column, "expected <uri>")),
        };
        self.expect_end()?;

        Ok(Directive::Prefix { name, uri })
    }

    /// `[name: pattern, pattern -> pattern]`
    fn rule_line(&mut self) -> LineResult<(String, Rule)> {
        self.expect(TokenKind::LBracket, "'['")?;

        let column = self.column();
        let name = match self.next() {
            Some(TokenKind::Word(name)) => name,
            _ => return Err(LineError::new(column, "expected rule name")),
        };
        self.expect(TokenKind::Colon, "':' after rule name")?;

        let mut preconditions = vec![self.pattern()?];
        loop {
            match self.peek() {
                Some(TokenKind::Comma) => {
                    self.next();
                    preconditions.push(self.pattern()?);
                }
                Some(TokenKind::Arrow) => {
                    self.next();
                    break;
                }
                _ => return Err(LineError::new(self.column(), "expected ',' or '->'")),
            }
        }

        let effect = self.pattern()?;
        self.expect(TokenKind::RBracket, "']'")?;
        self.expect_end()?;

        Ok((name, Rule::new(preconditions, effect)))
    }

    /// `(term term term)`
    fn pattern(&mut self) -> LineResult<StatementPattern> {
        self.expect(TokenKind::LParen, "'('")?;
        let subject = self.term()?;
        let predicate = self.term()?;
        let object = self.term()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(StatementPattern::new(subject, predicate, object))
    }

    fn term(&mut self) -> LineResult<NodePattern> {
        let column = self.column();
        match self.next() {
            Some(TokenKind::Variable(name)) => Ok(NodePattern::Variable(name)),
            Some(TokenKind::Iri(uri)) => Ok(NodePattern::Bound(Node::Resource(uri))),
            Some(TokenKind::QName { prefix, local }) => {
                let uri = self.resolve(&prefix, &local, column)?;
                Ok(NodePattern::Bound(Node::Resource(uri)))
            }
            Some(TokenKind::Literal(literal)) => Ok(NodePattern::Bound(Node::Literal(literal))),
            Some(TokenKind::PrefixedLiteral {
                value,
                prefix,
                local,
            }) => {
                let datatype = self.resolve(&prefix, &local, column)?;
                Ok(NodePattern::Bound(Node::Literal(Literal::typed(
                    value, datatype,
                ))))
            }
            Some(_) => Err(LineError::new(column, "expected a term")),
            None => Err(LineError::new(column, "expected a term, found end of line")),
        }
    }

    fn resolve(&self, prefix: &str, local: &str, column: usize) -> LineResult<String> {
        self.prefixes
            .get(prefix)
            .map(|ns| format!("{}{}", ns, local))
            .ok_or_else(|| LineError::new(column, format!("undeclared prefix '{}'", prefix)))
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parses rule files and single rule lines into rules.
///
/// Prefixes declared in parsed files, or added with [`RuleParser::add_prefix`],
/// stay available for later calls. Rules from every successful parse are
/// accumulated in [`RuleParser::rules`].
///
/// # Examples
///
/// ```
/// use aingle_inference::RuleParser;
///
/// let mut parser = RuleParser::new();
/// let rules = parser.parse_str(
///     "PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>\n\
///      [rdfs9: (?a rdfs:subClassOf ?b), (?b rdfs:subClassOf ?c) -> (?a rdfs:subClassOf ?c)]",
/// )?;
/// assert_eq!(rules.len(), 1);
/// assert!(rules.get("rdfs9").is_some());
/// # Ok::<(), aingle_inference::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleParser {
    prefixes: IndexMap<String, String>,
    rules: RuleSet,
}

impl RuleParser {
    /// Creates a parser with no prefixes declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a prefix for subsequent parses.
    pub fn add_prefix(&mut self, name: impl Into<String>, uri: impl Into<String>) {
        self.prefixes.insert(name.into(), uri.into());
    }

    /// Returns the declared prefixes.
    pub fn prefixes(&self) -> &IndexMap<String, String> {
        &self.prefixes
    }

    /// Returns every rule parsed so far.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Forgets all parsed rules and declared prefixes.
    pub fn clear(&mut self) {
        self.prefixes.clear();
        self.rules.clear();
    }

    /// Parses a rule file.
    ///
    /// The returned set is named after the file stem.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::RuleParse` for the
    /// first line that does not follow the grammar.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<RuleSet> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut rules = self.parse_str(&text)?;
        rules.set_name(name);
        debug!("loaded {} rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Parses rule-file content held in memory.
    ///
    /// Nothing is committed to the parser unless every line parses.
    pub fn parse_str(&mut self, text: &str) -> Result<RuleSet> {
        let mut prefixes = self.prefixes.clone();
        let mut parsed = RuleSet::default();

        for (index, line) in text.lines().enumerate() {
            if is_skippable(line) {
                continue;
            }

            let directive = LineParser::new(line, &prefixes)
                .and_then(|mut parser| parser.directive())
                .map_err(|e| {
                    warn!("rejecting rule line {}: {}", index + 1, e.message);
                    Error::RuleParse {
                        line: index + 1,
                        column: e.column,
                        content: line.to_string(),
                        message: e.message,
                    }
                })?;

            match directive {
                Directive::Prefix { name, uri } => {
                    prefixes.insert(name, uri);
                }
                Directive::Rule { name, rule } => {
                    if parsed.contains(&name) {
                        warn!("rejecting rule line {}: duplicate rule {}", index + 1, name);
                        let column = line
                            .find(name.as_str())
                            .map(|at| line[..at].chars().count() + 1)
                            .unwrap_or(1);
                        return Err(Error::RuleParse {
                            line: index + 1,
                            column,
                            content: line.to_string(),
                            message: format!("rule '{}' is already defined", name),
                        });
                    }
                    parsed.insert(name, rule);
                }
            }
        }

        self.prefixes = prefixes;
        self.rules.extend(&parsed);
        Ok(parsed)
    }

    /// Parses a single rule line using the declared prefixes.
    pub fn parse_line(&self, line: &str) -> Result<Rule> {
        self.parse_named_rule(line).map(|(_, rule)| rule)
    }

    /// Parses a single rule line and returns its name along with the rule.
    pub fn parse_named_rule(&self, line: &str) -> Result<(String, Rule)> {
        let to_error = |e: LineError| Error::RuleParse {
            line: 1,
            column: e.column,
            content: line.to_string(),
            message: e.message,
        };

        let mut parser = LineParser::new(line.trim(), &self.prefixes).map_err(to_error)?;
        parser.rule_line().map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    fn parser_with_rdfs() -> RuleParser {
        let mut parser = RuleParser::new();
        parser.add_prefix("rdfs", RDFS);
        parser
    }

    #[test]
    fn test_parse_line() {
        let rule = parser_with_rdfs()
            .parse_line("[rdfs9: (?a rdfs:subClassOf ?b), (?b rdfs:subClassOf ?c) -> (?a rdfs:subClassOf ?c)]")
            .unwrap();

        assert!(rule.is_valid());
        assert_eq!(rule.preconditions().len(), 2);
        assert_eq!(
            rule.effect().predicate,
            NodePattern::resource(format!("{}subClassOf", RDFS))
        );
        assert_eq!(rule.effect().subject, NodePattern::variable("a"));
    }

    #[test]
    fn test_parse_named_rule() {
        let (name, rule) = parser_with_rdfs()
            .parse_named_rule("  [my-rule.1: (?x <urn:p> ?y) -> (?y <urn:p> ?x)]  ")
            .unwrap();
        assert_eq!(name, "my-rule.1");
        assert_eq!(rule.preconditions().len(), 1);
    }

    #[test]
    fn test_literal_terms() {
        let mut parser = parser_with_rdfs();
        parser.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        let rule = parser
            .parse_line(r#"[lit: (?x <urn:label> "cat"@en), (?x <urn:legs> "4"^^xsd:integer), (?x <urn:n> -2) -> (?x <urn:is> "a \"cat\"")]"#)
            .unwrap();

        let pre = rule.preconditions();
        assert_eq!(
            pre[0].object,
            NodePattern::Bound(Node::literal(Literal::lang_string("cat", "en")))
        );
        assert_eq!(pre[1].object, NodePattern::Bound(Node::literal(4i64)));
        assert_eq!(pre[2].object, NodePattern::Bound(Node::literal(-2i64)));
        assert_eq!(
            rule.effect().object,
            NodePattern::Bound(Node::literal("a \"cat\""))
        );
    }

    #[test]
    fn test_undeclared_prefix() {
        let err = RuleParser::new()
            .parse_line("[r: (?a rdfs:subClassOf ?b) -> (?b rdfs:subClassOf ?a)]")
            .unwrap_err();
        match err {
            Error::RuleParse {
                line,
                column,
                message,
                ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(column, 9);
                assert!(message.contains("rdfs"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_malformed_lines() {
        let parser = parser_with_rdfs();
        for line in [
            "[r: (?a rdfs:subClassOf ?b) (?b rdfs:subClassOf ?c) -> (?a rdfs:subClassOf ?c)]",
            "[r: (?a rdfs:subClassOf) -> (?a rdfs:subClassOf ?a)]",
            "[r: (?a rdfs:subClassOf ?b) -> (?a rdfs:subClassOf ?b)",
            "[r (?a rdfs:subClassOf ?b) -> (?a rdfs:subClassOf ?b)]",
            "[: (?a rdfs:subClassOf ?b) -> (?a rdfs:subClassOf ?b)]",
            "[r: -> (?a rdfs:subClassOf ?b)]",
            "[r: (? rdfs:subClassOf ?b) -> (?b rdfs:subClassOf ?b)]",
            "[r: (?a <urn:p ?b) -> (?a <urn:p> ?b)]",
            "[r: (?a <urn:p> ?b) -> (?a <urn:p> ?b)] trailing",
        ] {
            assert!(parser.parse_line(line).is_err(), "accepted: {}", line);
        }
    }

    #[test]
    fn test_parse_str_counts_rules_and_prefixes() {
        let mut parser = RuleParser::new();
        let text = "\
# two prefixes, three rules
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>

[a: (?x rdf:type ?c), (?c rdfs:subClassOf ?d) -> (?x rdf:type ?d)]
[b: (?p rdfs:subPropertyOf ?q), (?q rdfs:subPropertyOf ?r) -> (?p rdfs:subPropertyOf ?r)]
   # indented comment
[c: (?x ?p ?y) -> (?p rdf:type rdf:Property)]
";
        let rules = parser.parse_str(text).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.names(), vec!["a", "b", "c"]);
        assert_eq!(parser.prefixes().len(), 2);
        assert_eq!(parser.rules().len(), 3);
    }

    #[test]
    fn test_failed_parse_commits_nothing() {
        let mut parser = RuleParser::new();
        let text = "\
PREFIX ex: <urn:ex:>
[good: (?a ex:p ?b) -> (?b ex:p ?a)]
this line is not a rule
";
        let err = parser.parse_str(text).unwrap_err();
        assert!(matches!(err, Error::RuleParse { line: 3, .. }));
        assert!(parser.rules().is_empty());
        assert!(parser.prefixes().is_empty());
    }

    #[test]
    fn test_duplicate_rule_name() {
        let mut parser = RuleParser::new();
        let text = "\
[twice: (?a <urn:p> ?b) -> (?b <urn:p> ?a)]
[once: (?a <urn:q> ?b) -> (?b <urn:q> ?a)]
  [twice: (?a <urn:r> ?b) -> (?b <urn:r> ?a)]
";
        match parser.parse_str(text).unwrap_err() {
            Error::RuleParse {
                line,
                column,
                message,
                ..
            } => {
                assert_eq!((line, column), (3, 4));
                assert!(message.contains("twice"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(parser.rules().is_empty());
    }

    #[test]
    fn test_prefix_forms() {
        let mut parser = RuleParser::new();
        parser
            .parse_str("PREFIX ex:<urn:ex:>\nPREFIX : <urn:default:>\n[r: (?a :p ?b) -> (?b ex:q ?a)]")
            .unwrap();
        assert_eq!(parser.prefixes().get("ex").map(String::as_str), Some("urn:ex:"));
        assert_eq!(parser.prefixes().get("").map(String::as_str), Some("urn:default:"));

        let rule = parser.rules().get("r").unwrap();
        assert_eq!(rule.preconditions()[0].predicate, NodePattern::resource("urn:default:p"));
        assert_eq!(rule.effect().predicate, NodePattern::resource("urn:ex:q"));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.rules");
        std::fs::write(
            &path,
            "PREFIX ex: <urn:ex:>\n[sym: (?a ex:knows ?b) -> (?b ex:knows ?a)]\n",
        )
        .unwrap();

        let mut parser = RuleParser::new();
        let rules = parser.parse_file(&path).unwrap();
        assert_eq!(rules.name(), "custom");
        assert_eq!(rules.len(), 1);

        let missing = parser.parse_file(dir.path().join("missing.rules"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }

    #[test]
    fn test_clear() {
        let mut parser = parser_with_rdfs();
        parser
            .parse_str("[r: (?a rdfs:subClassOf ?b) -> (?a rdfs:subClassOf ?b)]")
            .unwrap();
        parser.clear();
        assert!(parser.rules().is_empty());
        assert!(parser.prefixes().is_empty());
    }
}
