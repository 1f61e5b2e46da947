//! Well-known vocabularies used by the store and the inference layer.
//!
//! Each module exposes its namespace and the terms the crates reference.

/// RDF namespace
pub const PREFIX_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDF Schema namespace
pub const PREFIX_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XML Schema datatypes namespace
pub const PREFIX_XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// NEPOMUK Representational Language namespace
pub const PREFIX_NRL: &str = "http://www.semanticdesktop.org/ontologies/2007/08/15/nrl/";

/// Terms of the RDF vocabulary.
pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// Terms of the RDF Schema vocabulary.
pub mod rdfs {
    pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

/// XML Schema datatypes with a dedicated literal representation.
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// Terms of the NRL vocabulary.
pub mod nrl {
    pub const TRANSITIVE_PROPERTY: &str =
        "http://www.semanticdesktop.org/ontologies/2007/08/15/nrl/TransitiveProperty";
    pub const SYMMETRIC_PROPERTY: &str =
        "http://www.semanticdesktop.org/ontologies/2007/08/15/nrl/SymmetricProperty";
    pub const INVERSE_PROPERTY: &str =
        "http://www.semanticdesktop.org/ontologies/2007/08/15/nrl/inverseProperty";
}
