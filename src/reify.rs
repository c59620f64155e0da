// 🧩 Relation Reifier
//
// Relationships are nodes, never direct entity-to-entity edges:
//
//   Person ──hasRole──▶ Curator ──participatesIn──▶ ExhibitionMaking ──isActivityOf──▶ Exhibition
//   Person ──hasEvent──▶ Birth ──hasTime──▶ ApproximateDate
//                              ──tookPlaceAt──▶ TerritorialEntity (composite)
//
// Ids are scoped: a role by (kind, holder, target), an event or mediator by
// (kind, subject). The same person curating two exhibitions gets two Curator
// nodes; every curator of one exhibition shares its ExhibitionMaking node.

use crate::graph::GraphBuilder;
use crate::identity::{scoped, EntityId};
use crate::ontology::{DataProperty, ObjectProperty, OntologyClass};
use crate::places::PlaceHierarchy;
use crate::temporal::TimeNode;
use serde::{Deserialize, Serialize};

// ============================================================================
// KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleKind {
    Curator,
    Organizer,
    Funder,
    Lender,
    Owner,
    Author,
    Producer,
    Exhibitor,
    Museographer,
    Publisher,
    Affiliation,
    Membership,
    ExecutivePosition,
}

impl RoleKind {
    pub fn token(&self) -> &'static str {
        match self {
            RoleKind::Curator => "curator",
            RoleKind::Organizer => "organizer",
            RoleKind::Funder => "funder",
            RoleKind::Lender => "lender",
            RoleKind::Owner => "owner",
            RoleKind::Author => "author",
            RoleKind::Producer => "producer",
            RoleKind::Exhibitor => "exhibitor",
            RoleKind::Museographer => "museographer",
            RoleKind::Publisher => "publisher",
            RoleKind::Affiliation => "affiliation",
            RoleKind::Membership => "membership",
            RoleKind::ExecutivePosition => "executive position",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            RoleKind::Curator => "Curator",
            RoleKind::Organizer => "Organizer",
            RoleKind::Funder => "Funder",
            RoleKind::Lender => "Lender",
            RoleKind::Owner => "Owner",
            RoleKind::Author => "Author",
            RoleKind::Producer => "Producer",
            RoleKind::Exhibitor => "Exhibitor",
            RoleKind::Museographer => "Museographer",
            RoleKind::Publisher => "Publisher",
            RoleKind::Affiliation => "Affiliation",
            RoleKind::Membership => "Membership",
            RoleKind::ExecutivePosition => "ExecutivePosition",
        }
    }

    /// Sentence-case form used in node labels
    pub fn label(&self) -> &'static str {
        match self {
            RoleKind::ExecutivePosition => "Executive position",
            other => other.class_name(),
        }
    }

    /// Where the role plugs in when the caller does not say otherwise
    pub fn default_activity(&self) -> Activity {
        match self {
            RoleKind::Curator
            | RoleKind::Organizer
            | RoleKind::Funder
            | RoleKind::Lender
            | RoleKind::Exhibitor
            | RoleKind::Museographer => Activity::Mediator(MediatorKind::ExhibitionMaking),
            RoleKind::Owner => Activity::Mediator(MediatorKind::Ownership),
            RoleKind::Author | RoleKind::Producer => Activity::Event(EventKind::Production),
            RoleKind::Publisher => Activity::Event(EventKind::Publication),
            RoleKind::Affiliation | RoleKind::Membership | RoleKind::ExecutivePosition => {
                Activity::Direct
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Birth,
    Death,
    Foundation,
    Dissolution,
    Production,
    Opening,
    Closing,
    Publication,
    Location,
    Headquarters,
}

impl EventKind {
    pub fn token(&self) -> &'static str {
        match self {
            EventKind::Birth => "birth",
            EventKind::Death => "death",
            EventKind::Foundation => "foundation",
            EventKind::Dissolution => "dissolution",
            EventKind::Production => "production",
            EventKind::Opening => "opening",
            EventKind::Closing => "closing",
            EventKind::Publication => "publication",
            EventKind::Location => "location",
            EventKind::Headquarters => "headquarters",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            EventKind::Birth => "Birth",
            EventKind::Death => "Death",
            EventKind::Foundation => "Foundation",
            EventKind::Dissolution => "Dissolution",
            EventKind::Production => "Production",
            EventKind::Opening => "Opening",
            EventKind::Closing => "Closing",
            EventKind::Publication => "Publication",
            EventKind::Location => "Location",
            EventKind::Headquarters => "Headquarters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MediatorKind {
    ExhibitionMaking,
    Ownership,
}

impl MediatorKind {
    pub fn token(&self) -> &'static str {
        match self {
            MediatorKind::ExhibitionMaking => "exhibition making",
            MediatorKind::Ownership => "ownership",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            MediatorKind::ExhibitionMaking => "ExhibitionMaking",
            MediatorKind::Ownership => "Ownership",
        }
    }
}

/// What a role participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Mediator(MediatorKind),
    Event(EventKind),
    /// Role sits directly within the target organisation
    Direct,
}

// ============================================================================
// REIFICATION
// ============================================================================

/// Resolved entity mention: id plus the label used in descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: EntityId,
    pub label: String,
}

impl EntityRef {
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        EntityRef {
            id,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reification {
    Role {
        kind: RoleKind,
        holder: EntityRef,
        target: EntityRef,
        activity: Activity,
        attributes: Vec<(DataProperty, String)>,
    },
    Event {
        kind: EventKind,
        subject: EntityRef,
        time: Option<TimeNode>,
        place: Option<PlaceHierarchy>,
        attributes: Vec<(DataProperty, String)>,
    },
    Mediator {
        kind: MediatorKind,
        target: EntityRef,
    },
}

impl Reification {
    /// Role wired to the kind's default activity
    pub fn role(kind: RoleKind, holder: EntityRef, target: EntityRef) -> Self {
        Reification::Role {
            kind,
            holder,
            target,
            activity: kind.default_activity(),
            attributes: Vec::new(),
        }
    }

    pub fn event(kind: EventKind, subject: EntityRef) -> Self {
        Reification::Event {
            kind,
            subject,
            time: None,
            place: None,
            attributes: Vec::new(),
        }
    }

    /// Override the activity a role plugs into
    pub fn in_activity(mut self, activity: Activity) -> Self {
        if let Reification::Role { activity: a, .. } = &mut self {
            *a = activity;
        }
        self
    }

    pub fn with_time(mut self, node: Option<TimeNode>) -> Self {
        if let Reification::Event { time, .. } = &mut self {
            *time = node;
        }
        self
    }

    pub fn with_place(mut self, hierarchy: Option<PlaceHierarchy>) -> Self {
        if let Reification::Event { place, .. } = &mut self {
            *place = hierarchy;
        }
        self
    }

    pub fn with_attribute(mut self, property: DataProperty, value: impl Into<String>) -> Self {
        match &mut self {
            Reification::Role { attributes, .. } | Reification::Event { attributes, .. } => {
                attributes.push((property, value.into()))
            }
            Reification::Mediator { .. } => {}
        }
        self
    }

    /// An event with nothing to say beyond its existence is not worth a node
    pub fn is_informative(&self) -> bool {
        match self {
            Reification::Event {
                time,
                place,
                attributes,
                ..
            } => time.is_some() || place.is_some() || !attributes.is_empty(),
            _ => true,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Reification::Role {
                kind,
                holder,
                target,
                ..
            } => scoped(kind.token(), &[&holder.id, &target.id]),
            Reification::Event { kind, subject, .. } => scoped(kind.token(), &[&subject.id]),
            Reification::Mediator { kind, target } => scoped(kind.token(), &[&target.id]),
        }
    }

    pub fn class(&self) -> OntologyClass {
        match self {
            Reification::Role { kind, .. } => OntologyClass::Role(*kind),
            Reification::Event { kind, .. } => OntologyClass::Event(*kind),
            Reification::Mediator { kind, .. } => OntologyClass::Mediator(*kind),
        }
    }

    /// Human-readable description carried as the node label
    pub fn description(&self) -> String {
        match self {
            Reification::Role {
                kind,
                holder,
                target,
                ..
            } => format!("{} {} of {}", kind.label(), holder.label, target.label),
            Reification::Event { kind, subject, .. } => {
                format!("{} of {}", kind.class_name(), subject.label)
            }
            Reification::Mediator { kind, target } => match kind {
                MediatorKind::ExhibitionMaking => format!("Making of {}", target.label),
                MediatorKind::Ownership => format!("Ownership of {}", target.label),
            },
        }
    }

    /// Write the node, its links and anything it depends on; returns its id.
    pub fn emit(&self, graph: &mut GraphBuilder) -> EntityId {
        let id = self.id();
        graph.add_type(&id, self.class());
        graph.add_label(&id, &self.description());

        match self {
            Reification::Role {
                holder,
                target,
                activity,
                attributes,
                ..
            } => {
                for (property, value) in attributes {
                    graph.add_literal(&id, *property, value);
                }
                graph.add_bidirectional(&holder.id, ObjectProperty::HasRole, &id);

                match activity {
                    Activity::Mediator(kind) => {
                        let mediator = Reification::Mediator {
                            kind: *kind,
                            target: target.clone(),
                        }
                        .emit(graph);
                        graph.add_bidirectional(&id, ObjectProperty::ParticipatesIn, &mediator);
                    }
                    Activity::Event(kind) => {
                        let event = Reification::event(*kind, target.clone()).emit(graph);
                        graph.add_bidirectional(&id, ObjectProperty::ParticipatesIn, &event);
                    }
                    Activity::Direct => {
                        graph.add_bidirectional(&id, ObjectProperty::IsRoleWithin, &target.id);
                    }
                }
            }
            Reification::Event {
                subject,
                time,
                place,
                attributes,
                ..
            } => {
                for (property, value) in attributes {
                    graph.add_literal(&id, *property, value);
                }
                graph.add_bidirectional(&subject.id, ObjectProperty::HasEvent, &id);

                if let Some(node) = time {
                    let time_id = node.emit(graph);
                    graph.add_bidirectional(&id, ObjectProperty::HasTime, &time_id);
                }
                if let Some(hierarchy) = place {
                    let place_id = hierarchy.emit(graph);
                    graph.add_bidirectional(&id, ObjectProperty::TookPlaceAt, &place_id);
                }
            }
            Reification::Mediator { target, .. } => {
                graph.add_bidirectional(&id, ObjectProperty::IsActivityOf, &target.id);
            }
        }

        id
    }
}
