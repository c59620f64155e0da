// 🎨 Artwork Records (work manifestations)
//
// Authors and producers take part in the Production event; owners in the
// artwork's Ownership mediator. Display in exhibitions is a plain edge
// resolved here because exhibitions are already registered.

use super::{
    dated_event, push_literal, EntityFamily, EntityRecord, Emission, Endpoint, Registry,
    Relation,
};
use crate::assembler::PassStats;
use crate::class_map::{map_class, MappedFamily};
use crate::error::Result;
use crate::identity::Discriminator;
use crate::ontology::{DataProperty, ObjectProperty, OntologyClass};
use crate::reify::{EntityRef, EventKind, RoleKind};
use crate::snapshot::{Row, SourceKey};

const ARTWORK_ID: Endpoint = Endpoint::Fixed {
    column: "artwork_id",
    family: EntityFamily::Artwork,
};

const ACTOR: Endpoint = Endpoint::Actor {
    type_column: "actor_type",
    id_column: "actor_id",
};

pub const RELATIONS: &[Relation] = &[
    Relation::role(
        "artwork_authors",
        Endpoint::Fixed {
            column: "person_id",
            family: EntityFamily::Person,
        },
        ARTWORK_ID,
        RoleKind::Author,
    ),
    Relation::role("artwork_producers", ACTOR, ARTWORK_ID, RoleKind::Producer),
    Relation::role("artwork_owners", ACTOR, ARTWORK_ID, RoleKind::Owner),
    Relation::direct(
        "exhibition_artworks",
        Endpoint::Fixed {
            column: "exhibition_id",
            family: EntityFamily::Exhibition,
        },
        ARTWORK_ID,
        ObjectProperty::Displays,
    ),
];

#[derive(Debug, Clone)]
pub struct ArtworkRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub production_date: Option<String>,
    pub production_place: Option<String>,
    pub technique: Option<String>,
    pub dimensions: Option<String>,
    pub uri: Option<String>,
}

impl EntityRecord for ArtworkRecord {
    const FAMILY: EntityFamily = EntityFamily::Artwork;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(ArtworkRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: row.text("type")?,
            production_date: row.text("production_date")?,
            production_place: row.text("production_place")?,
            technique: row.text("technique")?,
            dimensions: row.text("dimensions")?,
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
        Discriminator::WorkManifestation
    }

    fn class(&self) -> OntologyClass {
        map_class(MappedFamily::Artwork, self.kind.as_deref())
    }

    fn attributes(
        &self,
        me: &EntityRef,
        _registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        push_literal(&mut out, me, DataProperty::SourceType, self.kind.as_deref());
        push_literal(&mut out, me, DataProperty::Technique, self.technique.as_deref());
        push_literal(&mut out, me, DataProperty::Dimensions, self.dimensions.as_deref());
        push_literal(&mut out, me, DataProperty::Uri, self.uri.as_deref());

        out.extend(dated_event(
            EventKind::Production,
            me,
            Some(("production_date", self.production_date.as_deref())),
            self.production_place.as_deref(),
            stats,
        )?);

        Ok(out)
    }
}
