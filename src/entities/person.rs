// 👤 Person Records - individuals, groups and other human actants
//
// `kind` decides both the class and the identity discriminator, so an
// individual and a collective sharing a name stay distinct nodes.

use super::{
    dated_event, push_literal, EntityFamily, EntityRecord, Emission, Endpoint, Registry,
    Relation,
};
use crate::assembler::PassStats;
use crate::error::Result;
use crate::identity::Discriminator;
use crate::normalize::clean_text;
use crate::ontology::{DataProperty, OntologyClass};
use crate::reify::{EntityRef, EventKind, RoleKind};
use crate::snapshot::{Row, SourceKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActantKind {
    /// "Individuo"
    Individual,

    /// "Grupo de personas"
    Group,

    /// Anything else, including no kind at all
    Other,
}

impl ActantKind {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(clean_text).map(|k| k.to_lowercase()).as_deref() {
            Some("individuo") | Some("individual") | Some("person") => ActantKind::Individual,
            Some("grupo de personas") | Some("grupo") | Some("group") => ActantKind::Group,
            _ => ActantKind::Other,
        }
    }

    pub fn discriminator(&self) -> Discriminator {
        match self {
            ActantKind::Individual => Discriminator::Person,
            ActantKind::Group => Discriminator::Group,
            ActantKind::Other => Discriminator::HumanActant,
        }
    }

    pub fn class(&self) -> OntologyClass {
        match self {
            ActantKind::Individual => OntologyClass::Person,
            ActantKind::Group => OntologyClass::Group,
            ActantKind::Other => OntologyClass::HumanActant,
        }
    }
}

const PERSON_ID: Endpoint = Endpoint::Fixed {
    column: "person_id",
    family: EntityFamily::Person,
};

pub const RELATIONS: &[Relation] = &[Relation::role(
    "person_memberships",
    PERSON_ID,
    Endpoint::Fixed {
        column: "group_id",
        family: EntityFamily::Person,
    },
    RoleKind::Membership,
)];

#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub key: Option<SourceKey>,
    pub name: Option<String>,
    pub kind: ActantKind,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub activity: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_date: Option<String>,
    pub death_place: Option<String>,
    pub uri: Option<String>,
}

impl EntityRecord for PersonRecord {
    const FAMILY: EntityFamily = EntityFamily::Person;

    fn from_row(row: &Row) -> Result<Self> {
        Ok(PersonRecord {
            key: row.key("id")?,
            name: row.text("name")?,
            kind: ActantKind::parse(row.text("kind")?.as_deref()),
            gender: row.text("gender")?,
            nationality: row.text("nationality")?,
            activity: row.text("activity")?,
            birth_date: row.text("birth_date")?,
            birth_place: row.text("birth_place")?,
            death_date: row.text("death_date")?,
            death_place: row.text("death_place")?,
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
        self.kind.discriminator()
    }

    fn class(&self) -> OntologyClass {
        self.kind.class()
    }

    fn attributes(
        &self,
        me: &EntityRef,
        _registry: &Registry,
        stats: &mut PassStats,
    ) -> Result<Vec<Emission>> {
        let mut out = Vec::new();
        push_literal(&mut out, me, DataProperty::Gender, self.gender.as_deref());
        push_literal(&mut out, me, DataProperty::Nationality, self.nationality.as_deref());
        push_literal(&mut out, me, DataProperty::Activity, self.activity.as_deref());
        push_literal(&mut out, me, DataProperty::Uri, self.uri.as_deref());

        out.extend(dated_event(
            EventKind::Birth,
            me,
            Some(("birth_date", self.birth_date.as_deref())),
            self.birth_place.as_deref(),
            stats,
        )?);
        out.extend(dated_event(
            EventKind::Death,
            me,
            Some(("death_date", self.death_date.as_deref())),
            self.death_place.as_deref(),
            stats,
        )?);

        Ok(out)
    }
}
