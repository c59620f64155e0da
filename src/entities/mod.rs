// 🧱 Entity Records - one module per source table family
//
// Each family knows how to read its rows, which class and discriminator its
// records get, which literal/event attributes they carry, and which
// relationship tables belong to its pass.
//
// Rows are resolved to ids once (Registry, keyed by source id); relationship
// tables only ever see resolved EntityRefs.

pub mod artwork;
pub mod catalog;
pub mod company;
pub mod exhibition;
pub mod institution;
pub mod person;

pub use artwork::ArtworkRecord;
pub use catalog::CatalogRecord;
pub use company::CompanyRecord;
pub use exhibition::ExhibitionRecord;
pub use institution::InstitutionRecord;
pub use person::{ActantKind, PersonRecord};

use crate::assembler::PassStats;
use crate::error::Result;
use crate::graph::GraphBuilder;
use crate::identity::{Discriminator, EntityId};
use crate::normalize::{clean_text, read_date, DateValue};
use crate::ontology::{DataProperty, ObjectProperty, OntologyClass};
use crate::places::{self, PlaceHierarchy};
use crate::reify::{Activity, EntityRef, EventKind, Reification, RoleKind};
use crate::snapshot::{Row, SourceKey, Table};
use crate::temporal::TimeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// FAMILIES & ACTORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityFamily {
    Person,
    Institution,
    Company,
    Catalog,
    Exhibition,
    Artwork,
}

impl EntityFamily {
    /// Source table holding the primary records
    pub fn table(&self) -> &'static str {
        match self {
            EntityFamily::Person => "persons",
            EntityFamily::Institution => "institutions",
            EntityFamily::Company => "companies",
            EntityFamily::Catalog => "catalogs",
            EntityFamily::Exhibition => "exhibitions",
            EntityFamily::Artwork => "artworks",
        }
    }

    /// Relationship tables evaluated in this family's pass
    pub fn relations(&self) -> &'static [Relation] {
        match self {
            EntityFamily::Person => person::RELATIONS,
            EntityFamily::Institution => institution::RELATIONS,
            EntityFamily::Company => company::RELATIONS,
            EntityFamily::Catalog => catalog::RELATIONS,
            EntityFamily::Exhibition => exhibition::RELATIONS,
            EntityFamily::Artwork => artwork::RELATIONS,
        }
    }
}

/// `actor_type` column of the polymorphic link tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorType {
    Person,
    Institution,
    Company,
}

impl ActorType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "person" | "persona" => Some(ActorType::Person),
            "institution" | "institucion" | "institución" => Some(ActorType::Institution),
            "company" | "empresa" => Some(ActorType::Company),
            _ => None,
        }
    }

    pub fn family(&self) -> EntityFamily {
        match self {
            ActorType::Person => EntityFamily::Person,
            ActorType::Institution => EntityFamily::Institution,
            ActorType::Company => EntityFamily::Company,
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Source id → resolved entity, per family. Filled as passes complete.
#[derive(Debug, Default)]
pub struct Registry {
    index: HashMap<EntityFamily, HashMap<SourceKey, EntityRef>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: EntityFamily, key: SourceKey, entity: EntityRef) {
        self.index.entry(family).or_default().insert(key, entity);
    }

    pub fn lookup(&self, family: EntityFamily, key: &SourceKey) -> Option<&EntityRef> {
        self.index.get(&family).and_then(|m| m.get(key))
    }
}

// ============================================================================
// EMISSIONS
// ============================================================================

/// A unit of graph output. Built anywhere (including worker threads),
/// applied by the single writer.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Literal {
        subject: EntityId,
        property: DataProperty,
        value: String,
    },
    Link {
        subject: EntityId,
        property: ObjectProperty,
        object: EntityId,
    },
    Reify(Reification),
}

impl Emission {
    pub fn apply(&self, graph: &mut GraphBuilder) {
        match self {
            Emission::Literal {
                subject,
                property,
                value,
            } => graph.add_literal(subject, *property, value),
            Emission::Link {
                subject,
                property,
                object,
            } => graph.add_bidirectional(subject, *property, object),
            Emission::Reify(reification) => {
                reification.emit(graph);
            }
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A primary-table row of one family
pub trait EntityRecord: Sized {
    const FAMILY: EntityFamily;

    fn from_row(row: &Row) -> Result<Self>;

    fn key(&self) -> Option<&SourceKey>;

    fn raw_name(&self) -> Option<&str>;

    fn discriminator(&self) -> Discriminator;

    fn class(&self) -> OntologyClass;

    /// Literals, events and direct links of one accepted record
    fn attributes(
        &self,
        me: &EntityRef,
        registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>>;
}

/// Push a free-text literal when the value is present
pub(crate) fn push_literal(
    out: &mut Vec<Emission>,
    subject: &EntityRef,
    property: DataProperty,
    raw: Option<&str>,
) {
    if let Some(value) = raw.and_then(clean_text) {
        out.push(Emission::Literal {
            subject: subject.id.clone(),
            property,
            value,
        });
    }
}

/// Classify a date field; a present but unparsable value counts as degraded
pub(crate) fn date_field(
    raw: Option<&str>,
    column: &str,
    stats: &mut PassStats,
) -> Option<TimeNode> {
    let raw = raw?;
    match read_date(raw) {
        DateValue::Valid(date) => Some(TimeNode::from_date(date)),
        DateValue::Absent => None,
        DateValue::Invalid => {
            debug!(column, value = raw, "Unparsable date, field dropped");
            stats.degraded_fields += 1;
            None
        }
    }
}

pub(crate) fn place_field(raw: Option<&str>) -> Result<Option<PlaceHierarchy>> {
    match raw {
        Some(raw) => places::build(raw),
        None => Ok(None),
    }
}

/// Event with optional date and place. None when it would carry nothing.
pub(crate) fn dated_event(
    kind: EventKind,
    subject: &EntityRef,
    date: Option<(&str, Option<&str>)>,
    place: Option<&str>,
    stats: &mut PassStats,
) -> Result<Option<Emission>> {
    let time = match date {
        Some((column, raw)) => date_field(raw, column, stats),
        None => None,
    };
    let event = Reification::event(kind, subject.clone())
        .with_time(time)
        .with_place(place_field(place)?);

    Ok(event.is_informative().then_some(Emission::Reify(event)))
}

/// Direct link to another registered entity; an unknown key is counted.
/// A reference that resolves back to the entity itself is dropped.
pub(crate) fn registry_link(
    out: &mut Vec<Emission>,
    me: &EntityRef,
    property: ObjectProperty,
    family: EntityFamily,
    key: Option<&SourceKey>,
    registry: &Registry,
    stats: &mut PassStats,
) {
    let Some(key) = key else { return };
    match registry.lookup(family, key) {
        Some(other) if other.id == me.id => {
            debug!(%key, ?family, "Reference resolves to the entity itself");
        }
        Some(other) => out.push(Emission::Link {
            subject: me.id.clone(),
            property,
            object: other.id.clone(),
        }),
        None => {
            debug!(%key, ?family, "Reference to unknown or excluded record");
            stats.skipped_links += 1;
        }
    }
}

// ============================================================================
// RELATIONSHIP TABLES
// ============================================================================

/// How one side of a link row is found
#[derive(Debug, Clone, Copy)]
pub enum Endpoint {
    /// Column holds the id of a record of a fixed family
    Fixed {
        column: &'static str,
        family: EntityFamily,
    },
    /// `actor_type` + `actor_id` pair
    Actor {
        type_column: &'static str,
        id_column: &'static str,
    },
}

impl Endpoint {
    fn resolve<'r>(&self, row: &Row, registry: &'r Registry) -> Result<Option<&'r EntityRef>> {
        let (family, key) = match self {
            Endpoint::Fixed { column, family } => (*family, row.key(column)?),
            Endpoint::Actor {
                type_column,
                id_column,
            } => {
                let Some(actor) = row.text(type_column)?.as_deref().and_then(ActorType::parse)
                else {
                    return Ok(None);
                };
                (actor.family(), row.key(id_column)?)
            }
        };

        Ok(key.and_then(|k| registry.lookup(family, &k)))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Reified role; holder is the actor, target the thing acted upon
    Role {
        kind: RoleKind,
        activity: Option<Activity>,
        attribute: Option<(&'static str, DataProperty)>,
    },
    /// Plain bidirectional edge holder → target
    Direct(ObjectProperty),
}

#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub table: &'static str,
    pub holder: Endpoint,
    pub target: Endpoint,
    pub shape: Shape,
}

/// Result of evaluating one relationship table
#[derive(Debug, Default)]
pub struct RelationOutcome {
    pub table: &'static str,
    pub emissions: Vec<Emission>,
    pub skipped: usize,
}

impl Relation {
    pub const fn role(
        table: &'static str,
        holder: Endpoint,
        target: Endpoint,
        kind: RoleKind,
    ) -> Self {
        Relation {
            table,
            holder,
            target,
            shape: Shape::Role {
                kind,
                activity: None,
                attribute: None,
            },
        }
    }

    pub const fn direct(
        table: &'static str,
        holder: Endpoint,
        target: Endpoint,
        property: ObjectProperty,
    ) -> Self {
        Relation {
            table,
            holder,
            target,
            shape: Shape::Direct(property),
        }
    }

    /// Pure: reads rows and the registry, writes nothing
    pub fn evaluate(&self, table: &Table, registry: &Registry) -> Result<RelationOutcome> {
        let mut outcome = RelationOutcome {
            table: self.table,
            ..Default::default()
        };

        for row in &table.rows {
            let holder = self.holder.resolve(row, registry)?;
            let target = self.target.resolve(row, registry)?;
            let (Some(holder), Some(target)) = (holder, target) else {
                outcome.skipped += 1;
                continue;
            };

            let emission = match self.shape {
                Shape::Direct(property) => Emission::Link {
                    subject: holder.id.clone(),
                    property,
                    object: target.id.clone(),
                },
                Shape::Role {
                    kind,
                    activity,
                    attribute,
                } => {
                    let mut role = Reification::role(kind, holder.clone(), target.clone());
                    if let Some(activity) = activity {
                        role = role.in_activity(activity);
                    }
                    if let Some((column, property)) = attribute {
                        if let Some(value) = row.text(column)?.as_deref().and_then(clean_text) {
                            role = role.with_attribute(property, value);
                        }
                    }
                    Emission::Reify(role)
                }
            };
            outcome.emissions.push(emission);
        }

        if outcome.skipped > 0 {
            debug!(table = self.table, skipped = outcome.skipped, "Links skipped");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::resolve;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn row(table: &str, cells: &[(&str, &str)]) -> Row {
        let cells: BTreeMap<String, crate::snapshot::Cell> = cells
            .iter()
            .map(|(k, v)| (k.to_string(), crate::snapshot::Cell::Text(v.to_string())))
            .collect();
        Row::new(Arc::from(table), cells)
    }

    fn entity(name: &str, discriminator: Discriminator) -> EntityRef {
        EntityRef::new(resolve(name, discriminator).unwrap(), name)
    }

    #[test]
    fn test_actor_type_parsing() {
        assert_eq!(ActorType::parse("Persona"), Some(ActorType::Person));
        assert_eq!(ActorType::parse(" institución "), Some(ActorType::Institution));
        assert_eq!(ActorType::parse("EMPRESA"), Some(ActorType::Company));
        assert_eq!(ActorType::parse("robot"), None);
    }

    #[test]
    fn test_actor_endpoint_routes_by_type() {
        let mut registry = Registry::new();
        let museum = entity("Museo Del Prado", Discriminator::Institution);
        registry.insert(EntityFamily::Institution, SourceKey::new("3"), museum.clone());

        let endpoint = Endpoint::Actor {
            type_column: "actor_type",
            id_column: "actor_id",
        };

        let hit = row("artwork_owners", &[("actor_type", "institucion"), ("actor_id", "3")]);
        assert_eq!(endpoint.resolve(&hit, &registry).unwrap(), Some(&museum));

        // same id, wrong family
        let miss = row("artwork_owners", &[("actor_type", "person"), ("actor_id", "3")]);
        assert_eq!(endpoint.resolve(&miss, &registry).unwrap(), None);
    }

    #[test]
    fn test_relation_counts_unresolved_rows() {
        let mut registry = Registry::new();
        registry.insert(
            EntityFamily::Person,
            SourceKey::new("1"),
            entity("Ada Lovelace", Discriminator::Person),
        );
        registry.insert(
            EntityFamily::Exhibition,
            SourceKey::new("10"),
            entity("Expo Uno", Discriminator::Exhibition),
        );

        let table = Table {
            name: "exhibition_curators".to_string(),
            rows: vec![
                row("exhibition_curators", &[("exhibition_id", "10"), ("person_id", "1")]),
                row("exhibition_curators", &[("exhibition_id", "10"), ("person_id", "99")]),
                row("exhibition_curators", &[("exhibition_id", "10")]),
            ],
        };

        let relation = exhibition::RELATIONS
            .iter()
            .find(|r| r.table == "exhibition_curators")
            .unwrap();
        let outcome = relation.evaluate(&table, &registry).unwrap();

        assert_eq!(outcome.emissions.len(), 1);
        assert_eq!(outcome.skipped, 2);
        assert!(matches!(
            &outcome.emissions[0],
            Emission::Reify(Reification::Role { kind: RoleKind::Curator, .. })
        ));
    }

    #[test]
    fn test_date_field_degrades_garbage_only() {
        let mut stats = PassStats::default();

        assert!(date_field(Some("1980-06-15"), "birth_date", &mut stats).is_some());
        assert!(date_field(Some("0001-01-01"), "birth_date", &mut stats).is_none());
        assert!(date_field(None, "birth_date", &mut stats).is_none());
        assert_eq!(stats.degraded_fields, 0);

        assert!(date_field(Some("0001-01-01 00:00:00"), "birth_date", &mut stats).is_none());
        assert!(date_field(Some("0000-00-00T00:00:00"), "death_date", &mut stats).is_none());
        assert_eq!(stats.degraded_fields, 0);

        assert!(date_field(Some("circa 1980"), "birth_date", &mut stats).is_none());
        assert_eq!(stats.degraded_fields, 1);
    }

    #[test]
    fn test_uninformative_event_is_dropped() {
        let mut stats = PassStats::default();
        let me = entity("Ada Lovelace", Discriminator::Person);

        let none = dated_event(
            EventKind::Birth,
            &me,
            Some(("birth_date", Some("none"))),
            Some("Sin determinar"),
            &mut stats,
        )
        .unwrap();
        assert!(none.is_none());

        let some = dated_event(
            EventKind::Birth,
            &me,
            Some(("birth_date", Some("1815-12-10"))),
            None,
            &mut stats,
        )
        .unwrap();
        assert!(some.is_some());
    }
}
