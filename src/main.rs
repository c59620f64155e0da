use anyhow::{Context, Result};
use heritage_graph::snapshot;
use heritage_graph::{
    publish, write_ntriples, Assembler, Config, GraphBuilder, MemoryStore, PassPlan, RunReport,
    Snapshot, SparqlStore,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Transform,
    Publish { dry_run: bool },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let verb = args.iter().skip(1).find(|a| !a.starts_with("--"));

    match verb.map(String::as_str) {
        None | Some("transform") => Ok(Command::Transform),
        Some("publish") => Ok(Command::Publish { dry_run }),
        Some(other) => anyhow::bail!(
            "unknown command {:?} (usage: heritage-graph [transform|publish] [--dry-run])",
            other
        ),
    }
}

/// RUST_LOG filters, LOG_FORMAT=json switches to structured output
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "heritage_graph=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false) {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let command = parse_args(&args)?;
    let config = Config::from_env().context("Invalid configuration")?;

    let name = match command {
        Command::Transform => "transform",
        Command::Publish { .. } => "publish",
    };
    let mut report = RunReport::start(name, &config.snapshot_path.display().to_string());

    println!("🏛️  Heritage Graph v{} - {}", heritage_graph::VERSION, name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let (graph, lines) = run_transform(&config, &mut report)?;

    if let Command::Publish { dry_run } = command {
        run_publish(&config, &lines, dry_run, &mut report).await?;
    }

    report.finish();
    let report_path = config.report_path();
    report
        .write(&report_path)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Entities:  {}", report.assembly.total_entities());
    println!("✓ Triples:   {}", graph.len());
    println!("✓ Skipped:   {}", report.assembly.total_skipped());
    println!("✓ Report:    {}", report_path.display());

    if !report.is_success() {
        eprintln!("❌ Publication failed (see report)");
        std::process::exit(1);
    }

    println!("🎉 Done!");
    Ok(())
}

fn run_transform(config: &Config, report: &mut RunReport) -> Result<(GraphBuilder, Vec<String>)> {
    // 1. Load snapshot
    println!("\n📂 Loading snapshot {}...", config.snapshot_path.display());
    let source = snapshot::open(&config.snapshot_path).context("Failed to open snapshot")?;
    let snapshot = Snapshot::load(source.as_ref()).context("Failed to read snapshot")?;
    println!("✓ Loaded {} rows", snapshot.row_count());

    // 2. Assemble graph
    println!("\n🏗️  Assembling graph...");
    let plan = PassPlan::standard().context("Invalid pass order")?;
    let (graph, assembly) = Assembler::new(plan)
        .run(&snapshot)
        .context("Graph assembly failed")?;
    for pass in &assembly.passes {
        println!(
            "✓ {:<12} {} entities, {} relationships",
            pass.pass.name(),
            pass.stats.entities,
            pass.stats.relationships
        );
    }
    report.assembly = assembly;

    // 3. Write artifact
    println!("\n💾 Writing {}...", config.output_path.display());
    let lines = graph.to_ntriples(&config.namespace);
    write_ntriples(&config.output_path, &lines).context("Failed to write N-Triples")?;
    println!("✓ {} triples written", lines.len());

    Ok((graph, lines))
}

async fn run_publish(
    config: &Config,
    lines: &[String],
    dry_run: bool,
    report: &mut RunReport,
) -> Result<()> {
    println!("\n🚚 Publishing to <{}>...", config.graph_uri);

    let published = if dry_run {
        println!("   (dry run: in-memory store)");
        let store = MemoryStore::new();
        publish(&store, &config.graph_uri, lines, config.publish_options()).await
    } else {
        let store = SparqlStore::new(config.sparql_config()?)?;
        publish(&store, &config.graph_uri, lines, config.publish_options()).await
    };
    let outcome = published.context("Publication aborted")?;

    match outcome.actual {
        Some(actual) => println!("✓ Store holds {} of {} triples", actual, outcome.expected),
        None => println!("⚠️  Store count unavailable"),
    }
    if !outcome.failures.is_empty() {
        println!("⚠️  {} of {} batches failed", outcome.failures.len(), outcome.batches);
    }

    report.publish = Some(outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("heritage-graph")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Transform);
        assert_eq!(parse_args(&args(&["transform"])).unwrap(), Command::Transform);
        assert_eq!(
            parse_args(&args(&["publish", "--dry-run"])).unwrap(),
            Command::Publish { dry_run: true }
        );
        assert_eq!(
            parse_args(&args(&["--dry-run", "publish"])).unwrap(),
            Command::Publish { dry_run: true }
        );
        assert!(parse_args(&args(&["import"])).is_err());
    }
}
