//! Integration tests for TripleStore
//!
//! Tests store operations across backends, pattern lookups, the
//! `Model` interface and SELECT query evaluation.

use aingle_triples::vocabulary::{rdf, rdfs};
use aingle_triples::{BindingSet, Literal, Model, Node, Statement, TripleStore};
use std::collections::HashSet;

fn res(uri: &str) -> Node {
    Node::resource(format!("http://example.org/{}", uri))
}

fn sub_class(a: &str, b: &str) -> Statement {
    Statement::new(res(a), Node::resource(rdfs::SUB_CLASS_OF), res(b))
}

fn names(solutions: &[BindingSet], var: &str) -> HashSet<Node> {
    solutions
        .iter()
        .filter_map(|b| b.get(var).cloned())
        .collect()
}

// ============================================================================
// Model Interface Tests
// ============================================================================

#[test]
fn test_model_add_is_idempotent() {
    let store = TripleStore::memory().unwrap();
    let st = sub_class("Cat", "Animal");

    store.add_statement(&st).unwrap();
    store.add_statement(&st).unwrap();

    assert_eq!(store.statement_count().unwrap(), 1);
    assert!(store.contains_statement(&st).unwrap());
}

#[test]
fn test_model_wildcards() {
    let store = TripleStore::memory().unwrap();
    store.add_statement(&sub_class("Cat", "Animal")).unwrap();
    store.add_statement(&sub_class("Dog", "Animal")).unwrap();
    store
        .add_statement(&Statement::new(
            res("tom"),
            Node::resource(rdf::TYPE),
            res("Cat"),
        ))
        .unwrap();

    let to_animal = Statement::new(Node::Empty, Node::Empty, res("Animal"));
    let listed: Vec<_> = store.list_statements(&to_animal).unwrap().collect();
    assert_eq!(listed.len(), 2);

    assert!(store
        .contains_any_statement(&Statement::new(res("tom"), Node::Empty, Node::Empty))
        .unwrap());
    assert!(!store
        .contains_any_statement(&Statement::new(res("jerry"), Node::Empty, Node::Empty))
        .unwrap());

    store.remove_all_statements(&to_animal).unwrap();
    assert_eq!(store.statement_count().unwrap(), 1);
}

#[test]
fn test_contains_statement_rejects_patterns() {
    let store = TripleStore::memory().unwrap();
    store.add_statement(&sub_class("Cat", "Animal")).unwrap();

    let pattern = Statement::new(res("Cat"), Node::Empty, Node::Empty);
    assert!(store.contains_any_statement(&pattern).unwrap());
    assert!(!store.contains_statement(&pattern).unwrap());
}

#[test]
fn test_named_graphs_are_distinct() {
    let store = TripleStore::memory().unwrap();
    let st = sub_class("Cat", "Animal");
    let g1 = st.in_context(res("g1"));
    let g2 = st.in_context(res("g2"));

    store.add_statement(&g1).unwrap();
    store.add_statement(&g2).unwrap();
    assert_eq!(store.count(), 2);

    // Empty context in a pattern matches every graph
    assert!(store.contains_any_statement(&st).unwrap());

    store.remove_all_statements(&g1).unwrap();
    assert!(store.contains_any_statement(&st).unwrap());
    store.remove_all_statements(&g2).unwrap();
    assert!(!store.contains_any_statement(&st).unwrap());
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_query_join_and_union() {
    let store = TripleStore::memory().unwrap();
    for (a, b) in [("A", "B"), ("B", "C"), ("C", "D"), ("X", "C")] {
        store.add_statement(&sub_class(a, b)).unwrap();
    }

    let sco = rdfs::SUB_CLASS_OF;
    let query = format!(
        "SELECT * WHERE {{ {{ ?a <{sco}> <http://example.org/C> }} UNION {{ <http://example.org/C> <{sco}> ?a }} }}"
    );
    let solutions: Vec<_> = store.execute_query(&query).unwrap().collect();
    assert_eq!(
        names(&solutions, "a"),
        [res("B"), res("X"), res("D")].into_iter().collect()
    );

    let join = format!("SELECT * WHERE {{ ?a <{sco}> ?b . ?b <{sco}> ?c }}");
    let solutions: Vec<_> = store.execute_query(&join).unwrap().collect();
    assert_eq!(solutions.len(), 3);
    assert_eq!(
        names(&solutions, "c"),
        [res("C"), res("D")].into_iter().collect()
    );
}

#[test]
fn test_query_literals() {
    let store = TripleStore::memory().unwrap();
    let label = Node::resource("http://www.w3.org/2000/01/rdf-schema#label");
    store
        .add_statement(&Statement::new(
            res("Cat"),
            label.clone(),
            Node::literal(Literal::lang_string("Katze", "de")),
        ))
        .unwrap();
    store
        .add_statement(&Statement::new(
            res("Cat"),
            res("legs"),
            Node::literal(Literal::integer(4)),
        ))
        .unwrap();

    let by_lang: Vec<_> = store
        .execute_query(&format!("SELECT * WHERE {{ ?x {} \"Katze\"@de }}", label))
        .unwrap()
        .collect();
    assert_eq!(by_lang.len(), 1);

    let by_number: Vec<_> = store
        .execute_query(
            "SELECT * WHERE { ?x <http://example.org/legs> \"4\"^^<http://www.w3.org/2001/XMLSchema#integer> }",
        )
        .unwrap()
        .collect();
    assert_eq!(by_number.len(), 1);

    let bare_number: Vec<_> = store
        .execute_query("SELECT * WHERE { ?x <http://example.org/legs> 4 }")
        .unwrap()
        .collect();
    assert_eq!(bare_number.len(), 1);
}

#[test]
fn test_query_blank_nodes_are_concrete() {
    let store = TripleStore::memory().unwrap();
    store
        .add_statement(&Statement::new(
            Node::blank("n1"),
            Node::resource(rdf::TYPE),
            res("Cat"),
        ))
        .unwrap();
    store
        .add_statement(&Statement::new(
            Node::blank("n2"),
            Node::resource(rdf::TYPE),
            res("Dog"),
        ))
        .unwrap();

    let solutions: Vec<_> = store
        .execute_query("SELECT * WHERE { _:n1 a ?t }")
        .unwrap()
        .collect();
    assert_eq!(names(&solutions, "t"), [res("Cat")].into_iter().collect());
}

#[test]
fn test_query_with_rendered_blank_labels() {
    let store = TripleStore::memory().unwrap();
    let labels = ["genid.1", "with space", "trailing.", "{braced}"];
    for label in labels {
        store
            .add_statement(&sub_class_of(Node::blank(label), res("Thing")))
            .unwrap();
    }

    for label in labels {
        let query = format!(
            "SELECT * WHERE {{ {} <{}> ?c . }}",
            Node::blank(label).to_sparql(),
            rdfs::SUB_CLASS_OF
        );
        let solutions: Vec<_> = store.execute_query(&query).unwrap().collect();
        assert_eq!(solutions.len(), 1, "label {:?}", label);
        assert_eq!(solutions[0].get("c"), Some(&res("Thing")));
    }
}

fn sub_class_of(subject: Node, object: Node) -> Statement {
    Statement::new(subject, Node::resource(rdfs::SUB_CLASS_OF), object)
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[cfg(feature = "sled-backend")]
#[test]
fn test_sled_store_reopens_with_indexes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = TripleStore::sled(&path).unwrap();
        store.add_statement(&sub_class("Cat", "Animal")).unwrap();
        store.add_statement(&sub_class("Dog", "Animal")).unwrap();
        store.flush().unwrap();
    }

    let store = TripleStore::sled(&path).unwrap();
    assert_eq!(store.count(), 2);

    let pattern = Statement::new(Node::Empty, Node::Empty, res("Animal"));
    assert_eq!(store.find(&pattern).unwrap().len(), 2);
    assert_eq!(store.stats().subject_count, 2);
}

#[cfg(feature = "sled-backend")]
#[test]
fn test_sled_store_reopens_with_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = TripleStore::sled(&path).unwrap();
        store.add_statement(&sub_class("Cat", "Animal")).unwrap();
        store.put_metadata(b"layer/cat", b"state").unwrap();
        store.flush().unwrap();
    }

    let store = TripleStore::sled(&path).unwrap();
    assert_eq!(store.statement_count().unwrap(), 1);
    assert_eq!(
        store.scan_metadata(b"layer/").unwrap(),
        vec![(b"layer/cat".to_vec(), b"state".to_vec())]
    );
}
