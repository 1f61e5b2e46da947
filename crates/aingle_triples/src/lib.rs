//! AIngle Triples - RDF statement store
//!
//! An indexed quad store for RDF statements (subject, predicate, object and
//! graph). It provides the `Model` interface that higher layers, such as the
//! AIngle inference engine, build on: statement insertion and removal by
//! pattern, pattern listing, and SELECT queries over basic graph patterns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     AIngle Triples                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Model interface                     │   │
//! │  │  add │ remove by pattern │ list │ SELECT queries     │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Statement Store                     │   │
//! │  │  ┌─────────┐  ┌─────────┐  ┌─────────┐              │   │
//! │  │  │   SPO   │  │   POS   │  │   OSP   │  Indexes     │   │
//! │  │  └─────────┘  └─────────┘  └─────────┘              │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │              Storage Backends                         │   │
//! │  │  Sled (default) │ Memory                              │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use aingle_triples::{Model, Node, Statement, TripleStore};
//!
//! let store = TripleStore::memory()?;
//!
//! store.add_statement(&Statement::new(
//!     Node::resource("http://example.org/Cat"),
//!     Node::resource("http://www.w3.org/2000/01/rdf-schema#subClassOf"),
//!     Node::resource("http://example.org/Animal"),
//! ))?;
//!
//! let solutions: Vec<_> = store
//!     .execute_query(
//!         "SELECT * WHERE { ?c <http://www.w3.org/2000/01/rdf-schema#subClassOf> ?super }",
//!     )?
//!     .collect();
//! assert_eq!(solutions.len(), 1);
//! # Ok::<(), aingle_triples::Error>(())
//! ```

pub mod backends;
pub mod binding;
pub mod error;
pub mod index;
pub mod model;
pub mod node;
pub mod query;
pub mod statement;
pub mod store;
pub mod vocabulary;

// Re-exports
pub use binding::BindingSet;
pub use error::{Error, Result};
pub use index::{IndexType, StatementIndex};
pub use model::{Model, QueryResultIter, StatementIter};
pub use node::{Literal, Node};
pub use query::{PatternSource, SelectQuery};
pub use statement::{Statement, StatementId};
pub use store::{StoreStats, TripleStore};

#[cfg(feature = "sled-backend")]
pub use backends::sled::SledBackend;

pub use backends::memory::MemoryBackend;
pub use backends::StorageBackend;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
