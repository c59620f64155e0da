// 🕸️ Graph Builder - the in-memory triple set
//
// The builder is owned by the assembler and handed `&mut` to every pass.
// Triples live in a BTreeSet: duplicates collapse (the same fact emitted
// from two tables is one triple) and iteration order is deterministic.

use crate::identity::EntityId;
use crate::ontology::{
    DataProperty, Datatype, ObjectProperty, OntologyClass, RDFS_LABEL, RDF_TYPE,
};
use std::collections::BTreeSet;

// ============================================================================
// TERMS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Predicate {
    Type,
    Label,
    Data(DataProperty),
    Object(ObjectProperty),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Object {
    Resource(EntityId),
    Class(OntologyClass),
    Literal { value: String, datatype: Datatype },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: EntityId,
    pub predicate: Predicate,
    pub object: Object,
}

/// IRI layout for one run
#[derive(Debug, Clone)]
pub struct Namespace {
    base: String,
}

impl Namespace {
    pub fn new(base: &str) -> Self {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') && !base.ends_with('#') {
            base.push('/');
        }
        Namespace { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resource(&self, id: &EntityId) -> String {
        format!("{}resource/{}", self.base, id)
    }

    pub fn term(&self, local_name: &str) -> String {
        format!("{}ontology/{}", self.base, local_name)
    }

    pub fn predicate(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Type => RDF_TYPE.to_string(),
            Predicate::Label => RDFS_LABEL.to_string(),
            Predicate::Data(p) => self.term(p.local_name()),
            Predicate::Object(p) => self.term(p.local_name()),
        }
    }
}

impl Triple {
    /// One N-Triples statement, terminated by " ."
    pub fn to_ntriples(&self, ns: &Namespace) -> String {
        let object = match &self.object {
            Object::Resource(id) => format!("<{}>", ns.resource(id)),
            Object::Class(class) => format!("<{}>", ns.term(class.local_name())),
            Object::Literal { value, datatype } => {
                format!("\"{}\"^^<{}>", escape_literal(value), datatype.iri())
            }
        };

        format!(
            "<{}> <{}> {} .",
            ns.resource(&self.subject),
            ns.predicate(&self.predicate),
            object
        )
    }
}

fn escape_literal(value: &str) -> String {
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

// ============================================================================
// GRAPH BUILDER
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    triples: BTreeSet<Triple>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            triples: BTreeSet::new(),
        }
    }

    pub fn add_type(&mut self, subject: &EntityId, class: OntologyClass) {
        self.triples.insert(Triple {
            subject: subject.clone(),
            predicate: Predicate::Type,
            object: Object::Class(class),
        });
    }

    pub fn add_label(&mut self, subject: &EntityId, label: &str) {
        self.triples.insert(Triple {
            subject: subject.clone(),
            predicate: Predicate::Label,
            object: Object::Literal {
                value: label.to_string(),
                datatype: Datatype::String,
            },
        });
    }

    /// Literal attribute; datatype comes from the property
    pub fn add_literal(&mut self, subject: &EntityId, property: DataProperty, value: &str) {
        self.triples.insert(Triple {
            subject: subject.clone(),
            predicate: Predicate::Data(property),
            object: Object::Literal {
                value: value.to_string(),
                datatype: property.datatype(),
            },
        });
    }

    /// The only way to relate two resources: the edge and its inverse go in together.
    pub fn add_bidirectional(
        &mut self,
        subject: &EntityId,
        property: ObjectProperty,
        object: &EntityId,
    ) {
        self.triples.insert(Triple {
            subject: subject.clone(),
            predicate: Predicate::Object(property),
            object: Object::Resource(object.clone()),
        });
        self.triples.insert(Triple {
            subject: object.clone(),
            predicate: Predicate::Object(property.inverse()),
            object: Object::Resource(subject.clone()),
        });
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Sorted N-Triples lines
    pub fn to_ntriples(&self, ns: &Namespace) -> Vec<String> {
        let mut lines: Vec<String> = self.triples.iter().map(|t| t.to_ntriples(ns)).collect();
        lines.sort();
        lines
    }

    // ========================================================================
    // INSPECTION (reports and tests)
    // ========================================================================

    pub fn has_type(&self, subject: &EntityId, class: OntologyClass) -> bool {
        self.triples.contains(&Triple {
            subject: subject.clone(),
            predicate: Predicate::Type,
            object: Object::Class(class),
        })
    }

    pub fn has_literal(&self, subject: &EntityId, property: DataProperty, value: &str) -> bool {
        self.triples.contains(&Triple {
            subject: subject.clone(),
            predicate: Predicate::Data(property),
            object: Object::Literal {
                value: value.to_string(),
                datatype: property.datatype(),
            },
        })
    }

    pub fn has_edge(&self, subject: &EntityId, property: ObjectProperty, object: &EntityId) -> bool {
        self.triples.contains(&Triple {
            subject: subject.clone(),
            predicate: Predicate::Object(property),
            object: Object::Resource(object.clone()),
        })
    }

    /// Objects reachable from `subject` through `property`
    pub fn objects(&self, subject: &EntityId, property: ObjectProperty) -> Vec<EntityId> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && t.predicate == Predicate::Object(property))
            .filter_map(|t| match &t.object {
                Object::Resource(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn label_of(&self, subject: &EntityId) -> Option<&str> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && t.predicate == Predicate::Label)
            .find_map(|t| match &t.object {
                Object::Literal { value, .. } => Some(value.as_str()),
                _ => None,
            })
    }

    pub fn subjects_of_type(&self, class: OntologyClass) -> Vec<EntityId> {
        self.triples
            .iter()
            .filter(|t| t.predicate == Predicate::Type && t.object == Object::Class(class))
            .map(|t| t.subject.clone())
            .collect()
    }

    /// True when the id appears anywhere, as subject or object
    pub fn mentions(&self, id: &EntityId) -> bool {
        self.triples.iter().any(|t| {
            &t.subject == id || matches!(&t.object, Object::Resource(o) if o == id)
        })
    }

    /// Object edges whose declared inverse is missing (should always be empty)
    pub fn dangling_edges(&self) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|t| match (&t.predicate, &t.object) {
                (Predicate::Object(p), Object::Resource(o)) => !self.has_edge(o, p.inverse(), &t.subject),
                _ => false,
            })
            .collect()
    }
}
