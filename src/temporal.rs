// ⏰ Temporal Classifier - dates become typed time nodes
//
// Precision rule:
//   Jan 1 or Dec 31  → Approximate Date (year precision, labelled "YYYY")
//   any other day    → Exact Date       (day precision,  labelled "YYYY-MM-DD")
//   sentinel/invalid → no node at all
//
// Year-only source values are padded to a year boundary upstream, so a real
// event on Dec 31 cannot be told apart from one. It is always approximate.

use crate::graph::GraphBuilder;
use crate::identity::{hash_label, EntityId};
use crate::normalize::parse_date;
use crate::ontology::{DataProperty, OntologyClass};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// PRECISION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    /// Day precision
    Exact,

    /// Year precision
    Approximate,
}

impl Precision {
    /// Year-boundary days are evidence of a padded year-only value
    pub fn of(date: NaiveDate) -> Self {
        match (date.month(), date.day()) {
            (1, 1) | (12, 31) => Precision::Approximate,
            _ => Precision::Exact,
        }
    }
}

// ============================================================================
// TIME NODE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeNode {
    pub precision: Precision,
    pub date: NaiveDate,
    pub label: String,
}

impl TimeNode {
    pub fn from_date(date: NaiveDate) -> Self {
        let precision = Precision::of(date);
        let label = match precision {
            Precision::Approximate => format!("{:04}", date.year()),
            Precision::Exact => date.format("%Y-%m-%d").to_string(),
        };

        TimeNode {
            precision,
            date,
            label,
        }
    }

    /// Identical labels share one node across the whole graph
    pub fn id(&self) -> EntityId {
        hash_label(&self.label)
    }

    pub fn class(&self) -> OntologyClass {
        match self.precision {
            Precision::Exact => OntologyClass::ExactDate,
            Precision::Approximate => OntologyClass::ApproximateDate,
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.precision == Precision::Approximate
    }

    /// Write the node's own triples and return its id
    pub fn emit(&self, graph: &mut GraphBuilder) -> EntityId {
        let id = self.id();
        graph.add_type(&id, self.class());
        graph.add_label(&id, &self.label);

        match self.precision {
            Precision::Exact => graph.add_literal(&id, DataProperty::InXsdDate, &self.label),
            Precision::Approximate => {
                graph.add_literal(&id, DataProperty::InXsdGYear, &self.label)
            }
        }

        id
    }
}

/// Classify a raw date string. None for the sentinel or anything unparsable.
pub fn classify(raw: &str) -> Option<TimeNode> {
    parse_date(raw).map(TimeNode::from_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_start_is_approximate() {
        let node = classify("1980-01-01").unwrap();
        assert_eq!(node.precision, Precision::Approximate);
        assert_eq!(node.label, "1980");
        assert_eq!(node.class(), OntologyClass::ApproximateDate);
    }

    #[test]
    fn test_year_end_is_approximate() {
        let node = classify("1980-12-31").unwrap();
        assert!(node.is_approximate());
        assert_eq!(node.label, "1980");
    }

    #[test]
    fn test_mid_year_is_exact() {
        let node = classify("1980-06-15").unwrap();
        assert_eq!(node.precision, Precision::Exact);
        assert_eq!(node.label, "1980-06-15");
        assert_eq!(node.class(), OntologyClass::ExactDate);
    }

    #[test]
    fn test_sentinel_and_garbage_are_absent() {
        assert!(classify("0001-01-01").is_none());
        assert!(classify("0000-00-00").is_none());
        assert!(classify("none").is_none());
        assert!(classify("mid 1980s").is_none());
    }

    #[test]
    fn test_same_label_same_node() {
        let a = classify("1980-01-01").unwrap();
        let b = classify("1980-12-31").unwrap();
        let c = classify("1980-06-15").unwrap();

        assert_eq!(a.id(), b.id(), "both collapse to year 1980");
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_emit_writes_typed_literal() {
        let mut graph = GraphBuilder::new();
        let node = classify("1936-07-18").unwrap();
        let id = node.emit(&mut graph);

        assert!(graph.has_type(&id, OntologyClass::ExactDate));
        assert!(graph.has_literal(&id, DataProperty::InXsdDate, "1936-07-18"));
        assert_eq!(graph.len(), 3);
    }
}
