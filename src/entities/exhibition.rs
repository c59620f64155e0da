// 🖼️ Exhibition Records
//
// Every exhibition role (curator, organizer, funder, lender, exhibitor,
// museographer) participates in the exhibition's single ExhibitionMaking
// node.

use super::{
    dated_event, push_literal, registry_link, EntityFamily, EntityRecord, Emission, Endpoint,
    Registry, Relation,
};
use crate::assembler::PassStats;
use crate::class_map::{map_class, MappedFamily};
use crate::error::Result;
use crate::identity::Discriminator;
use crate::ontology::{DataProperty, ObjectProperty, OntologyClass};
use crate::reify::{EntityRef, EventKind, RoleKind};
use crate::snapshot::{Row, SourceKey};

const EXHIBITION_ID: Endpoint = Endpoint::Fixed {
    column: "exhibition_id",
    family: EntityFamily::Exhibition,
};

const PERSON_ID: Endpoint = Endpoint::Fixed {
    column: "person_id",
    family: EntityFamily::Person,
};

const ACTOR: Endpoint = Endpoint::Actor {
    type_column: "actor_type",
    id_column: "actor_id",
};

pub const RELATIONS: &[Relation] = &[
    Relation::role("exhibition_curators", PERSON_ID, EXHIBITION_ID, RoleKind::Curator),
    Relation::role("exhibition_organizers", ACTOR, EXHIBITION_ID, RoleKind::Organizer),
    Relation::role("exhibition_funders", ACTOR, EXHIBITION_ID, RoleKind::Funder),
    Relation::role("exhibition_lenders", ACTOR, EXHIBITION_ID, RoleKind::Lender),
    Relation::role("exhibition_exhibitors", ACTOR, EXHIBITION_ID, RoleKind::Exhibitor),
    Relation::role(
        "exhibition_museographers",
        PERSON_ID,
        EXHIBITION_ID,
        RoleKind::Museographer,
    ),
    Relation::direct(
        "exhibition_catalogs",
        EXHIBITION_ID,
        Endpoint::Fixed {
            column: "catalog_id",
            family: EntityFamily::Catalog,
        },
        ObjectProperty::HasCatalog,
    ),
];

#[derive(Debug, Clone)]
pub struct ExhibitionRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub opening_date: Option<String>,
    pub closing_date: Option<String>,
    pub place: Option<String>,
    pub venue: Option<SourceKey>,
    pub uri: Option<String>,
}

impl EntityRecord for ExhibitionRecord {
    const FAMILY: EntityFamily = EntityFamily::Exhibition;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(ExhibitionRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: row.text("type")?,
            opening_date: row.text("opening_date")?,
            closing_date: row.text("closing_date")?,
            place: row.text("place")?,
            venue: row.key("venue_id")?,
            uri: row.text("uri")?,
        })
    }

    fn key(&self) -> Option<&SourceKey> {
        self.key.as_ref()
    }

    fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn discriminator(&self) -> Discriminator {
        Discriminator::Exhibition
    }

    fn class(&self) -> OntologyClass {
        map_class(MappedFamily::Exhibition, self.kind.as_deref())
    }

    fn attributes(
        &self,
        me: &EntityRef,
        registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        push_literal(&mut out, me, DataProperty::SourceType, self.kind.as_deref());
        push_literal(&mut out, me, DataProperty::Uri, self.uri.as_deref());

        out.extend(dated_event(
            EventKind::Opening,
            me,
            Some(("opening_date", self.opening_date.as_deref())),
            None,
            stats,
        )?);
        out.extend(dated_event(
            EventKind::Closing,
            me,
            Some(("closing_date", self.closing_date.as_deref())),
            None,
            stats,
        )?);
        out.extend(dated_event(EventKind::Location, me, None, self.place.as_deref(), stats)?);

        registry_link(
            &mut out,
            me,
            ObjectProperty::IsHeldAt,
            EntityFamily::Institution,
            self.venue.as_ref(),
            registry,
            stats,
        );

        Ok(out)
    }
}
