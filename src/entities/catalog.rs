// 📚 Catalog Records
//
// Authors and publishers both take part in the catalog's Publication event,
// the same node that carries the publication date and place.

use super::{
    dated_event, push_literal, EntityFamily, EntityRecord, Emission, Endpoint, Registry,
    Relation, Shape,
};
use crate::assembler::PassStats;
use crate::class_map::{map_class, MappedFamily};
use crate::error::Result;
use crate::identity::Discriminator;
use crate::ontology::{DataProperty, OntologyClass};
use crate::reify::{Activity, EntityRef, EventKind, RoleKind};
use crate::snapshot::{Row, SourceKey};

const CATALOG_ID: Endpoint = Endpoint::Fixed {
    column: "catalog_id",
    family: EntityFamily::Catalog,
};

pub const RELATIONS: &[Relation] = &[
    Relation {
        table: "catalog_authors",
        holder: Endpoint::Fixed {
            column: "person_id",
            family: EntityFamily::Person,
        },
        target: CATALOG_ID,
        shape: Shape::Role {
            kind: RoleKind::Author,
            activity: Some(Activity::Event(EventKind::Publication)),
            attribute: None,
        },
    },
    Relation::role(
        "catalog_publishers",
        Endpoint::Actor {
            type_column: "actor_type",
            id_column: "actor_id",
        },
        CATALOG_ID,
        RoleKind::Publisher,
    ),
];

#[derive(Debug, Clone)]
pub struct CatalogRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub publication_date: Option<String>,
    pub publication_place: Option<String>,
    pub isbn: Option<String>,
    pub uri: Option<String>,
}

impl EntityRecord for CatalogRecord {
    const FAMILY: EntityFamily = EntityFamily::Catalog;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(CatalogRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: row.text("type")?,
            publication_date: row.text("publication_date")?,
            publication_place: row.text("publication_place")?,
            isbn: row.text("isbn")?,
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
        Discriminator::Catalog
    }

    fn class(&self) -> OntologyClass {
        map_class(MappedFamily::Catalog, self.kind.as_deref())
    }

    fn attributes(
        &self,
        me: &EntityRef,
        _registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        push_literal(&mut out, me, DataProperty::SourceType, self.kind.as_deref());
        push_literal(&mut out, me, DataProperty::Isbn, self.isbn.as_deref());
        push_literal(&mut out, me, DataProperty::Uri, self.uri.as_deref());

        out.extend(dated_event(
            EventKind::Publication,
            me,
            Some(("publication_date", self.publication_date.as_deref())),
            self.publication_place.as_deref(),
            stats,
        )?);

        Ok(out)
    }
}
