// 🏗️ Graph Assembler - snapshot in, graph out
//
// Passes run in a declared order:
//   persons → institutions → companies → catalogs → exhibitions → artworks
//
// Each pass:
//   1. reads its primary table, gates names, resolves ids, registers source keys
//   2. emits type + label + attributes for every accepted record
//   3. evaluates its relationship tables in parallel (rayon) into emission
//      lists, which are then merged by this thread alone
//
// A pass may only look up records from passes declared as its dependencies;
// PassPlan::new rejects an order that breaks that.

use crate::entities::{
    ArtworkRecord, CatalogRecord, CompanyRecord, EntityFamily, EntityRecord, ExhibitionRecord,
    InstitutionRecord, PersonRecord, Registry, RelationOutcome,
};
use crate::error::{Error, Result};
use crate::graph::GraphBuilder;
use crate::identity::resolve;
use crate::normalize::valid_name;
use crate::reify::EntityRef;
use crate::snapshot::Snapshot;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

// ============================================================================
// PASSES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Persons,
    Institutions,
    Companies,
    Catalogs,
    Exhibitions,
    Artworks,
}

impl Pass {
    pub const ALL: [Pass; 6] = [
        Pass::Persons,
        Pass::Institutions,
        Pass::Companies,
        Pass::Catalogs,
        Pass::Exhibitions,
        Pass::Artworks,
    ];

    pub fn family(&self) -> EntityFamily {
        match self {
            Pass::Persons => EntityFamily::Person,
            Pass::Institutions => EntityFamily::Institution,
            Pass::Companies => EntityFamily::Company,
            Pass::Catalogs => EntityFamily::Catalog,
            Pass::Exhibitions => EntityFamily::Exhibition,
            Pass::Artworks => EntityFamily::Artwork,
        }
    }

    /// Passes whose records this pass references
    pub fn dependencies(&self) -> &'static [Pass] {
        match self {
            Pass::Persons => &[],
            Pass::Institutions => &[Pass::Persons],
            Pass::Companies => &[Pass::Persons],
            Pass::Catalogs => &[Pass::Persons, Pass::Institutions, Pass::Companies],
            Pass::Exhibitions => &[
                Pass::Persons,
                Pass::Institutions,
                Pass::Companies,
                Pass::Catalogs,
            ],
            Pass::Artworks => &[
                Pass::Persons,
                Pass::Institutions,
                Pass::Companies,
                Pass::Exhibitions,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        self.family().table()
    }
}

/// A validated pass order
#[derive(Debug, Clone)]
pub struct PassPlan {
    order: Vec<Pass>,
}

impl PassPlan {
    /// Every pass exactly once, each after all of its dependencies
    pub fn new(order: Vec<Pass>) -> Result<Self> {
        let unique: BTreeSet<_> = order.iter().map(|p| p.name()).collect();
        if order.len() != Pass::ALL.len() || unique.len() != order.len() {
            return Err(Error::PassOrder(format!(
                "expected each of {} passes exactly once, got {:?}",
                Pass::ALL.len(),
                order
            )));
        }

        for (position, pass) in order.iter().enumerate() {
            for dependency in pass.dependencies() {
                if !order[..position].contains(dependency) {
                    return Err(Error::PassOrder(format!(
                        "{} must run after {}",
                        pass.name(),
                        dependency.name()
                    )));
                }
            }
        }

        Ok(PassPlan { order })
    }

    /// The canonical order
    pub fn standard() -> Result<Self> {
        Self::new(Pass::ALL.to_vec())
    }

    pub fn passes(&self) -> &[Pass] {
        &self.order
    }
}

// ============================================================================
// REPORTING
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Rows read from the primary table
    pub records: usize,

    /// Distinct entities emitted (rows sharing a name merge)
    pub entities: usize,

    /// Rows dropped by the name gate
    pub skipped_names: usize,

    /// Link rows or references whose endpoints did not resolve
    pub skipped_links: usize,

    /// Present but unparsable fields (dates, coordinates)
    pub degraded_fields: usize,

    /// Relationship rows turned into nodes or edges
    pub relationships: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub pass: Pass,
    #[serde(flatten)]
    pub stats: PassStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub passes: Vec<PassReport>,
    pub triples: usize,
}

impl AssemblyReport {
    pub fn stats(&self, pass: Pass) -> Option<&PassStats> {
        self.passes.iter().find(|r| r.pass == pass).map(|r| &r.stats)
    }

    pub fn total_entities(&self) -> usize {
        self.passes.iter().map(|r| r.stats.entities).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.passes
            .iter()
            .map(|r| r.stats.skipped_names + r.stats.skipped_links)
            .sum()
    }
}

// ============================================================================
// ASSEMBLER
// ============================================================================

pub struct Assembler {
    plan: PassPlan,
}

impl Assembler {
    pub fn new(plan: PassPlan) -> Self {
        Assembler { plan }
    }

    /// Build the whole graph. Structural errors abort; record-level problems
    /// are counted in the report.
    pub fn run(&self, snapshot: &Snapshot) -> Result<(GraphBuilder, AssemblyReport)> {
        let mut graph = GraphBuilder::new();
        let mut registry = Registry::new();
        let mut report = AssemblyReport::default();

        for pass in self.plan.passes() {
            let stats = match pass {
                Pass::Persons => run_pass::<PersonRecord>(snapshot, &mut registry, &mut graph)?,
                Pass::Institutions => {
                    run_pass::<InstitutionRecord>(snapshot, &mut registry, &mut graph)?
                }
                Pass::Companies => run_pass::<CompanyRecord>(snapshot, &mut registry, &mut graph)?,
                Pass::Catalogs => run_pass::<CatalogRecord>(snapshot, &mut registry, &mut graph)?,
                Pass::Exhibitions => {
                    run_pass::<ExhibitionRecord>(snapshot, &mut registry, &mut graph)?
                }
                Pass::Artworks => run_pass::<ArtworkRecord>(snapshot, &mut registry, &mut graph)?,
            };

            info!(
                pass = pass.name(),
                records = stats.records,
                entities = stats.entities,
                relationships = stats.relationships,
                skipped_names = stats.skipped_names,
                skipped_links = stats.skipped_links,
                degraded_fields = stats.degraded_fields,
                "Pass complete"
            );
            report.passes.push(PassReport { pass: *pass, stats });
        }

        let dangling = graph.dangling_edges().len();
        if dangling > 0 {
            warn!(dangling, "Object edges without their inverse");
        }

        report.triples = graph.len();
        info!(triples = report.triples, "Graph assembled");
        Ok((graph, report))
    }
}

fn run_pass<R: EntityRecord>(
    snapshot: &Snapshot,
    registry: &mut Registry,
    graph: &mut GraphBuilder,
) -> Result<PassStats> {
    let family = R::FAMILY;
    let table = snapshot.table(family.table())?;
    let mut stats = PassStats::default();

    // 1. gate + resolve + register
    let mut accepted = Vec::new();
    for row in &table.rows {
        stats.records += 1;
        let record = R::from_row(row)?;

        let Some(name) = record.raw_name().and_then(valid_name) else {
            debug!(
                table = family.table(),
                name = record.raw_name().unwrap_or(""),
                "Record skipped by name gate"
            );
            stats.skipped_names += 1;
            continue;
        };

        let me = EntityRef::new(resolve(&name, record.discriminator())?, name);
        if let Some(key) = record.key() {
            registry.insert(family, key.clone(), me.clone());
        }
        accepted.push((record, me));
    }

    // 2. entity nodes and attributes
    let mut emitted = BTreeSet::new();
    for (record, me) in &accepted {
        graph.add_type(&me.id, record.class());
        graph.add_label(&me.id, &me.label);
        emitted.insert(me.id.clone());

        for emission in record.attributes(me, registry, &mut stats)? {
            emission.apply(graph);
        }
    }
    stats.entities = emitted.len();

    // 3. relationship tables, evaluated concurrently
    let registry: &Registry = registry;
    let outcomes = family
        .relations()
        .par_iter()
        .map(|relation| {
            let table = snapshot.table(relation.table)?;
            relation.evaluate(table, registry)
        })
        .collect::<Result<Vec<RelationOutcome>>>()?;

    for outcome in outcomes {
        debug!(
            table = outcome.table,
            emitted = outcome.emissions.len(),
            skipped = outcome.skipped,
            "Relationship table merged"
        );
        stats.relationships += outcome.emissions.len();
        stats.skipped_links += outcome.skipped;
        for emission in &outcome.emissions {
            emission.apply(graph);
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Discriminator;
    use crate::ontology::{ObjectProperty, OntologyClass};
    use crate::snapshot::{create_schema, SqliteSnapshot};
    use rusqlite::Connection;

    fn snapshot(setup: &str) -> Snapshot {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch(setup).unwrap();
        Snapshot::load(&SqliteSnapshot::from_connection(conn)).unwrap()
    }

    fn assemble(setup: &str) -> (GraphBuilder, AssemblyReport) {
        Assembler::new(PassPlan::standard().unwrap())
            .run(&snapshot(setup))
            .unwrap()
    }

    #[test]
    fn test_standard_plan_is_valid() {
        let plan = PassPlan::standard().unwrap();
        assert_eq!(plan.passes(), &Pass::ALL);
    }

    #[test]
    fn test_plan_rejects_dependency_after_dependent() {
        let order = vec![
            Pass::Institutions,
            Pass::Persons,
            Pass::Companies,
            Pass::Catalogs,
            Pass::Exhibitions,
            Pass::Artworks,
        ];
        assert!(matches!(PassPlan::new(order), Err(Error::PassOrder(_))));
    }

    #[test]
    fn test_plan_rejects_duplicates_and_gaps() {
        let duplicated = vec![Pass::Persons; 6];
        assert!(matches!(PassPlan::new(duplicated), Err(Error::PassOrder(_))));

        let short = vec![Pass::Persons, Pass::Institutions];
        assert!(matches!(PassPlan::new(short), Err(Error::PassOrder(_))));
    }

    #[test]
    fn test_plan_accepts_other_valid_order() {
        // companies before institutions is fine: neither depends on the other
        let order = vec![
            Pass::Persons,
            Pass::Companies,
            Pass::Institutions,
            Pass::Catalogs,
            Pass::Exhibitions,
            Pass::Artworks,
        ];
        assert!(PassPlan::new(order).is_ok());
    }

    #[test]
    fn test_curator_chain() {
        let (graph, report) = assemble(
            "INSERT INTO persons (id, name, kind) VALUES (1, 'Ada Lovelace', 'Individuo');
             INSERT INTO exhibitions (id, name, type) VALUES (10, 'Expo Uno', 'Exposición individual');
             INSERT INTO exhibition_curators (exhibition_id, person_id) VALUES (10, 1);",
        );

        let ada = resolve("Ada Lovelace", Discriminator::Person).unwrap();
        let expo = resolve("Expo Uno", Discriminator::Exhibition).unwrap();

        let roles = graph.objects(&ada, ObjectProperty::HasRole);
        assert_eq!(roles.len(), 1);
        let making = graph.objects(&roles[0], ObjectProperty::ParticipatesIn);
        assert_eq!(making.len(), 1);
        assert!(graph.has_edge(&making[0], ObjectProperty::IsActivityOf, &expo));
        assert!(graph.dangling_edges().is_empty());

        assert_eq!(report.stats(Pass::Exhibitions).unwrap().relationships, 1);
        assert_eq!(report.triples, graph.len());
    }

    #[test]
    fn test_excluded_record_breaks_its_links() {
        let (graph, report) = assemble(
            "INSERT INTO persons (id, name, kind) VALUES (1, 'Sin determinar', 'Individuo');
             INSERT INTO exhibitions (id, name) VALUES (10, 'Expo Uno');
             INSERT INTO exhibition_curators (exhibition_id, person_id) VALUES (10, 1);",
        );

        let persons = report.stats(Pass::Persons).unwrap();
        assert_eq!(persons.records, 1);
        assert_eq!(persons.skipped_names, 1);
        assert_eq!(persons.entities, 0);
        assert_eq!(report.stats(Pass::Exhibitions).unwrap().skipped_links, 1);
        assert!(graph.subjects_of_type(OntologyClass::Person).is_empty());
    }

    #[test]
    fn test_same_name_rows_merge() {
        let (graph, report) = assemble(
            "INSERT INTO persons (id, name, kind) VALUES (1, ' Ada Lovelace ', 'Individuo');
             INSERT INTO persons (id, name, kind) VALUES (2, 'ada lovelace', 'Individuo');",
        );

        assert_eq!(report.stats(Pass::Persons).unwrap().entities, 1);
        assert_eq!(graph.subjects_of_type(OntologyClass::Person).len(), 1);
    }

    #[test]
    fn test_owner_of_artwork_via_actor_type() {
        let (graph, _) = assemble(
            "INSERT INTO institutions (id, name, type) VALUES (5, 'Museo del Prado', 'Museo');
             INSERT INTO artworks (id, name, type) VALUES (7, 'Las Meninas', 'Pintura');
             INSERT INTO artwork_owners (artwork_id, actor_type, actor_id) VALUES (7, 'institución', 5);",
        );

        let prado = resolve("Museo Del Prado", Discriminator::Institution).unwrap();
        let meninas = resolve("Las Meninas", Discriminator::WorkManifestation).unwrap();

        let roles = graph.objects(&prado, ObjectProperty::HasRole);
        assert_eq!(roles.len(), 1);
        let ownership = graph.objects(&roles[0], ObjectProperty::ParticipatesIn);
        assert!(graph.has_edge(&ownership[0], ObjectProperty::IsActivityOf, &meninas));
        assert!(graph.has_type(&prado, OntologyClass::Museum));
    }

    #[test]
    fn test_missing_link_table_is_fatal() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch("DROP TABLE artwork_owners;").unwrap();

        let result = Snapshot::load(&SqliteSnapshot::from_connection(conn));
        assert!(matches!(result, Err(Error::MissingTable(t)) if t == "artwork_owners"));
    }
}
