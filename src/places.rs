// 🗺️ Place Hierarchy Builder
//
// "Madrid;Comunidad de Madrid;España"
//   → Settlement "Madrid" ──isPartOfTerritory──▶ Region "Comunidad De Madrid"
//                          ──isPartOfTerritory──▶ Country "España"
//   → composite "Madrid; Comunidad De Madrid; España" (the node events point at)
//
// Segments are positional (settlement; region; country). Unknown segments are
// dropped; when the region is missing the settlement links straight to the
// country.

use crate::error::Result;
use crate::graph::GraphBuilder;
use crate::identity::{resolve, Discriminator, EntityId};
use crate::normalize::clean_name;
use crate::ontology::{ObjectProperty, OntologyClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Settlement,
    Region,
    Country,
}

impl Granularity {
    const ORDER: [Granularity; 3] = [
        Granularity::Settlement,
        Granularity::Region,
        Granularity::Country,
    ];

    fn discriminator(&self) -> Discriminator {
        match self {
            Granularity::Settlement => Discriminator::Settlement,
            Granularity::Region => Discriminator::Region,
            Granularity::Country => Discriminator::Country,
        }
    }

    pub fn class(&self) -> OntologyClass {
        match self {
            Granularity::Settlement => OntologyClass::Settlement,
            Granularity::Region => OntologyClass::Region,
            Granularity::Country => OntologyClass::Country,
        }
    }
}

/// One territorial entity node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub id: EntityId,
    pub label: String,
    pub class: OntologyClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceHierarchy {
    pub composite: Territory,
    pub settlement: Option<Territory>,
    pub region: Option<Territory>,
    pub country: Option<Territory>,
}

impl PlaceHierarchy {
    /// Present levels, finest first
    pub fn levels(&self) -> Vec<&Territory> {
        [&self.settlement, &self.region, &self.country]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Write every node and edge; returns the composite id for event binding
    pub fn emit(&self, graph: &mut GraphBuilder) -> EntityId {
        let levels = self.levels();

        for territory in &levels {
            graph.add_type(&territory.id, territory.class);
            graph.add_type(&territory.id, OntologyClass::TerritorialEntity);
            graph.add_label(&territory.id, &territory.label);
        }

        // finer → coarser for each adjacent present pair
        for pair in levels.windows(2) {
            graph.add_bidirectional(&pair[0].id, ObjectProperty::IsPartOfTerritory, &pair[1].id);
        }

        let composite = &self.composite;
        graph.add_type(&composite.id, composite.class);
        graph.add_label(&composite.id, &composite.label);
        for territory in &levels {
            graph.add_bidirectional(
                &composite.id,
                ObjectProperty::HasTerritorialComponent,
                &territory.id,
            );
        }

        composite.id.clone()
    }
}

/// Decompose a place string. Ok(None) when no segment survives.
pub fn build(raw: &str) -> Result<Option<PlaceHierarchy>> {
    let mut levels: [Option<Territory>; 3] = [None, None, None];
    let mut present = Vec::new();

    for (granularity, segment) in Granularity::ORDER.iter().zip(raw.split(';')) {
        let Some(label) = clean_name(segment) else {
            continue;
        };

        let id = resolve(&label, granularity.discriminator())?;
        present.push(label.clone());
        levels[*granularity as usize] = Some(Territory {
            id,
            label,
            class: granularity.class(),
        });
    }

    if present.is_empty() {
        return Ok(None);
    }

    let composite_label = present.join("; ");
    let composite = Territory {
        id: resolve(&composite_label, Discriminator::Place)?,
        label: composite_label,
        class: OntologyClass::TerritorialEntity,
    };

    let [settlement, region, country] = levels;
    Ok(Some(PlaceHierarchy {
        composite,
        settlement,
        region,
        country,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hierarchy() {
        let place = build("Madrid;Comunidad de Madrid;España").unwrap().unwrap();

        assert_eq!(place.levels().len(), 3);
        assert_eq!(place.settlement.as_ref().unwrap().label, "Madrid");
        assert_eq!(place.region.as_ref().unwrap().label, "Comunidad De Madrid");
        assert_eq!(place.country.as_ref().unwrap().label, "España");
        assert_eq!(place.composite.label, "Madrid; Comunidad De Madrid; España");

        let mut graph = GraphBuilder::new();
        let composite = place.emit(&mut graph);

        let settlement = &place.settlement.as_ref().unwrap().id;
        let region = &place.region.as_ref().unwrap().id;
        let country = &place.country.as_ref().unwrap().id;

        assert!(graph.has_edge(settlement, ObjectProperty::IsPartOfTerritory, region));
        assert!(graph.has_edge(region, ObjectProperty::IsPartOfTerritory, country));
        assert!(graph.has_edge(country, ObjectProperty::HasTerritorialPart, region));
        assert!(!graph.has_edge(settlement, ObjectProperty::IsPartOfTerritory, country));

        assert_eq!(composite, place.composite.id);
        assert_eq!(graph.objects(&composite, ObjectProperty::HasTerritorialComponent).len(), 3);
        assert!(graph.has_type(settlement, OntologyClass::Settlement));
        assert!(graph.has_type(country, OntologyClass::TerritorialEntity));
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_missing_region_skips_to_country() {
        let place = build("Bilbao;Sin determinar;España").unwrap().unwrap();

        assert!(place.region.is_none());
        assert_eq!(place.composite.label, "Bilbao; España");

        let mut graph = GraphBuilder::new();
        place.emit(&mut graph);

        let settlement = &place.settlement.as_ref().unwrap().id;
        let country = &place.country.as_ref().unwrap().id;
        assert!(graph.has_edge(settlement, ObjectProperty::IsPartOfTerritory, country));
    }

    #[test]
    fn test_single_segment_has_no_parent_edges() {
        let place = build("  paris ").unwrap().unwrap();
        let mut graph = GraphBuilder::new();
        place.emit(&mut graph);

        let settlement = &place.settlement.as_ref().unwrap().id;
        assert!(graph.objects(settlement, ObjectProperty::IsPartOfTerritory).is_empty());
        assert_ne!(settlement, &place.composite.id, "composite is its own node");
    }

    #[test]
    fn test_all_unknown_is_absent() {
        assert!(build("Sin determinar;Sin determinar;Sin determinar").unwrap().is_none());
        assert!(build("").unwrap().is_none());
        assert!(build(";;").unwrap().is_none());
    }

    #[test]
    fn test_segments_dedupe_across_places() {
        let a = build("Madrid;Comunidad de Madrid;España").unwrap().unwrap();
        let b = build("Sevilla;Andalucía;España").unwrap().unwrap();

        assert_eq!(a.country.unwrap().id, b.country.unwrap().id);
        assert_ne!(a.composite.id, b.composite.id);
    }

    #[test]
    fn test_granularity_keeps_same_name_apart() {
        // city of Madrid vs. a region literally named Madrid
        let a = build("Madrid;;España").unwrap().unwrap();
        let b = build(";Madrid;España").unwrap().unwrap();

        assert_ne!(a.settlement.unwrap().id, b.region.unwrap().id);
    }
}
