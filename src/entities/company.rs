// 🏢 Company Records

use super::{
    dated_event, push_literal, EntityFamily, EntityRecord, Emission, Endpoint, Registry,
    Relation, Shape,
};
use crate::assembler::PassStats;
use crate::class_map::{map_class, MappedFamily};
use crate::error::Result;
use crate::identity::Discriminator;
use crate::ontology::{DataProperty, OntologyClass};
use crate::reify::{EntityRef, EventKind, RoleKind};
use crate::snapshot::{Row, SourceKey};

pub const RELATIONS: &[Relation] = &[Relation {
    table: "company_executives",
    holder: Endpoint::Fixed {
        column: "person_id",
        family: EntityFamily::Person,
    },
    target: Endpoint::Fixed {
        column: "company_id",
        family: EntityFamily::Company,
    },
    shape: Shape::Role {
        kind: RoleKind::ExecutivePosition,
        activity: None,
        attribute: Some(("position", DataProperty::Position)),
    },
}];

#[derive(Debug, Clone)]
pub struct CompanyRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub place: Option<String>,
    pub founded: Option<String>,
    pub dissolved: Option<String>,
    pub website: Option<String>,
}

impl EntityRecord for CompanyRecord {
    const FAMILY: EntityFamily = EntityFamily::Company;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(CompanyRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: row.text("type")?,
            place: row.text("place")?,
            founded: row.text("founded")?,
            dissolved: row.text("dissolved")?,
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
        Discriminator::Company
    }

    fn class(&self) -> OntologyClass {
        map_class(MappedFamily::Company, self.kind.as_deref())
    }

    fn attributes(
        &self,
        me: &EntityRef,
        _registry: &Registry,
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
        out.extend(dated_event(
            EventKind::Headquarters,
            me,
            None,
            self.place.as_deref(),
            stats,
        )?);

        Ok(out)
    }
}
