//! AIngle Inference - Rule-based forward chaining over RDF statements
//!
//! This crate keeps an `aingle_triples` model closed under a set of rules.
//! Statements added through the engine trigger the rules whose preconditions
//! they match; derived statements are stored together with the derivations
//! that justify them, so removing a statement retracts exactly what no
//! longer follows from the remaining data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     AIngle Inference                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Rule Parser                         │   │
//! │  │  PREFIX lines │ [name: p1, p2 -> effect]             │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Rule Sets                           │   │
//! │  │  RDFS │ NRL │ custom rule files                      │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                 Inference Model                       │   │
//! │  │  Query synthesis │ Justifications │ Retraction       │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │                    aingle_triples::Model                     │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use aingle_inference::{InferenceModel, StandardRuleSet};
//! use aingle_triples::vocabulary::{rdf, rdfs};
//! use aingle_triples::{Model, Node, Statement, TripleStore};
//!
//! let mut model = InferenceModel::new(TripleStore::memory()?)?;
//! model.add_standard_rules(StandardRuleSet::Rdfs)?;
//!
//! model.add_statement(&Statement::new(
//!     Node::resource("urn:Cat"),
//!     Node::resource(rdfs::SUB_CLASS_OF),
//!     Node::resource("urn:Animal"),
//! ))?;
//! model.add_statement(&Statement::new(
//!     Node::resource("urn:tom"),
//!     Node::resource(rdf::TYPE),
//!     Node::resource("urn:Cat"),
//! ))?;
//!
//! let tom_is_animal = Statement::new(
//!     Node::resource("urn:tom"),
//!     Node::resource(rdf::TYPE),
//!     Node::resource("urn:Animal"),
//! );
//! assert!(model.store().contains_statement(&tom_is_animal)?);
//! assert!(model.is_inferred(&tom_is_animal));
//! # Ok::<(), aingle_inference::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod pattern;
pub mod rule;
pub mod rule_set;

// Re-exports
pub use config::{InferenceConfig, RuleSource};
pub use engine::{InferenceModel, InferenceStats, Justification, PROVENANCE_PREFIX};
pub use error::{Error, Result};
pub use parser::RuleParser;
pub use pattern::{NodePattern, StatementPattern};
pub use rule::Rule;
pub use rule_set::{RuleSet, StandardRuleSet};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
