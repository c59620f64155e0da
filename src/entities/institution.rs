// 🏛️ Institution Records
//
// Besides foundation/dissolution, an institution's whereabouts become a
// Location event: postal address, coordinates and the place hierarchy all
// hang off that one node.

use super::{
    dated_event, place_field, push_literal, registry_link, EntityFamily, EntityRecord, Emission,
    Endpoint, Registry, Relation, Shape,
};
use crate::assembler::PassStats;
use crate::class_map::{map_class, MappedFamily};
use crate::error::Result;
use crate::identity::Discriminator;
use crate::normalize::{clean_text, is_null_marker, parse_coordinates};
use crate::ontology::{DataProperty, ObjectProperty, OntologyClass};
use crate::reify::{EntityRef, EventKind, Reification, RoleKind};
use crate::snapshot::{Row, SourceKey};
use tracing::debug;

pub const RELATIONS: &[Relation] = &[
    Relation::role(
        "institution_affiliations",
        Endpoint::Fixed {
            column: "person_id",
            family: EntityFamily::Person,
        },
        Endpoint::Fixed {
            column: "institution_id",
            family: EntityFamily::Institution,
        },
        RoleKind::Affiliation,
    ),
    Relation {
        table: "institution_executives",
        holder: Endpoint::Fixed {
            column: "person_id",
            family: EntityFamily::Person,
        },
        target: Endpoint::Fixed {
            column: "institution_id",
            family: EntityFamily::Institution,
        },
        shape: Shape::Role {
            kind: RoleKind::ExecutivePosition,
            activity: None,
            attribute: Some(("position", DataProperty::Position)),
        },
    },
];

#[derive(Debug, Clone)]
pub struct InstitutionRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub place: Option<String>,
    pub coordinates: Option<String>,
    pub founded: Option<String>,
    pub dissolved: Option<String>,
    pub parent: Option<SourceKey>,
    pub website: Option<String>,
}

impl InstitutionRecord {
    fn location(&self, me: &EntityRef, stats: &mut PassStats) -> Result<Option<Emission>> {
        let mut event =
            Reification::event(EventKind::Location, me.clone()).with_place(place_field(self.place.as_deref())?);

        if let Some(address) = self.address.as_deref().and_then(clean_text) {
            event = event.with_attribute(DataProperty::Address, address);
        }

        if let Some(raw) = self.coordinates.as_deref() {
            match parse_coordinates(raw) {
                Some((lat, lon)) => {
                    event = event
                        .with_attribute(DataProperty::Latitude, lat.to_string())
                        .with_attribute(DataProperty::Longitude, lon.to_string());
                }
                None if !is_null_marker(raw) => {
                    debug!(value = raw, "Unparsable coordinates, field dropped");
                    stats.degraded_fields += 1;
                }
                None => {}
            }
        }

        Ok(event.is_informative().then_some(Emission::Reify(event)))
    }
}

impl EntityRecord for InstitutionRecord {
    const FAMILY: EntityFamily = EntityFamily::Institution;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(InstitutionRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: row.text("type")?,
            address: row.text("address")?,
            place: row.text("place")?,
            coordinates: row.text("coordinates")?,
            founded: row.text("founded")?,
            dissolved: row.text("dissolved")?,
            parent: row.key("parent_id")?,
            website: row.text("website")?,
        })
    }

    fn key(&self) -> Option<&SourceKey> {
        self.key.as_ref()
    }

    fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn discriminator(&self) -> Discriminator {
        Discriminator::Institution
    }

    fn class(&self) -> OntologyClass {
        map_class(MappedFamily::Institution, self.kind.as_deref())
    }

    fn attributes(
        &self,
        me: &EntityRef,
        registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        push_literal(&mut out, me, DataProperty::SourceType, self.kind.as_deref());
        push_literal(&mut out, me, DataProperty::Website, self.website.as_deref());

        out.extend(dated_event(
            EventKind::Foundation,
            me,
            Some(("founded", self.founded.as_deref())),
            None,
            stats,
        )?);
        out.extend(dated_event(
            EventKind::Dissolution,
            me,
            Some(("dissolved", self.dissolved.as_deref())),
            None,
            stats,
        )?);
        out.extend(self.location(me, stats)?);

        // parents resolving to this same institution are dropped there
        registry_link(
            &mut out,
            me,
            ObjectProperty::IsSubInstitutionOf,
            EntityFamily::Institution,
            self.parent.as_ref(),
            registry,
            stats,
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::resolve;

    fn record() -> InstitutionRecord {
        InstitutionRecord {
            key: Some(SourceKey::new("1")),
            name: Some("Museo del Prado".to_string()),
            kind: Some("Museo".to_string()),
            address: Some("Calle Ruiz de Alarcón 23".to_string()),
            place: Some("Madrid;Comunidad de Madrid;España".to_string()),
            coordinates: Some("40.4138, -3.6921".to_string()),
            founded: Some("1819-11-19".to_string()),
            dissolved: None,
            parent: None,
            website: Some("https://www.museodelprado.es".to_string()),
        }
    }

    fn me() -> EntityRef {
        EntityRef::new(
            resolve("Museo Del Prado", Discriminator::Institution).unwrap(),
            "Museo Del Prado",
        )
    }

    #[test]
    fn test_class_from_type() {
        assert_eq!(record().class(), OntologyClass::Museum);

        let mut untyped = record();
        untyped.kind = None;
        assert_eq!(untyped.class(), OntologyClass::Institution);
    }

    #[test]
    fn test_location_event_carries_address_and_coordinates() {
        let mut stats = PassStats::default();
        let emission = record().location(&me(), &mut stats).unwrap().unwrap();

        match emission {
            Emission::Reify(Reification::Event {
                kind,
                place,
                attributes,
                ..
            }) => {
                assert_eq!(kind, EventKind::Location);
                assert!(place.is_some());
                assert!(attributes.contains(&(DataProperty::Latitude, "40.4138".to_string())));
                assert!(attributes.contains(&(DataProperty::Longitude, "-3.6921".to_string())));
                assert_eq!(attributes.len(), 3);
            }
            other => panic!("expected a location event, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_coordinates_are_degraded() {
        let mut bad = record();
        bad.coordinates = Some("north of the river".to_string());

        let mut stats = PassStats::default();
        assert!(bad.location(&me(), &mut stats).unwrap().is_some());
        assert_eq!(stats.degraded_fields, 1);
    }

    #[test]
    fn test_unknown_parent_counts_as_skipped_link() {
        let mut child = record();
        child.parent = Some(SourceKey::new("42"));

        let mut stats = PassStats::default();
        child.attributes(&me(), &Registry::new(), &mut stats).unwrap();
        assert_eq!(stats.skipped_links, 1);
    }

    #[test]
    fn test_parent_with_same_name_is_not_a_self_loop() {
        // row 11 spells row 10's name differently and points at it
        let mut registry = Registry::new();
        registry.insert(EntityFamily::Institution, SourceKey::new("10"), me());

        let mut twin = record();
        twin.key = Some(SourceKey::new("11"));
        twin.name = Some(" museo  del prado ".to_string());
        twin.parent = Some(SourceKey::new("10"));

        let mut stats = PassStats::default();
        let emissions = twin.attributes(&me(), &registry, &mut stats).unwrap();

        assert!(!emissions.iter().any(|e| matches!(e, Emission::Link { .. })));
        assert_eq!(stats.skipped_links, 0);
    }

    #[test]
    fn test_parent_link_to_other_institution() {
        let mut registry = Registry::new();
        let parent = EntityRef::new(
            resolve("Patrimonio Nacional", Discriminator::Institution).unwrap(),
            "Patrimonio Nacional",
        );
        registry.insert(EntityFamily::Institution, SourceKey::new("2"), parent.clone());

        let mut child = record();
        child.parent = Some(SourceKey::new("2"));

        let mut stats = PassStats::default();
        let emissions = child.attributes(&me(), &registry, &mut stats).unwrap();

        assert!(emissions.contains(&Emission::Link {
            subject: me().id,
            property: ObjectProperty::IsSubInstitutionOf,
            object: parent.id,
        }));
    }
}
