use crate::{
    AppConfig, IOArgs,
    catalog::{Catalog, CatalogFile},
    distance::Distances,
    session::optimize_sessions,
};
use sourcing_engine::AllocationEngine;
use std::{fs::File, io::BufReader, path::Path};
use tracing::{Level, event};

pub async fn optimize(
    config: AppConfig,
    catalog: &Path,
    io: &IOArgs,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let AppConfig {
        engine,
        mut distance,
    } = config;
    if seed.is_some() {
        distance.seed = seed;
    }

    let file = serde_json::from_reader::<_, CatalogFile>(BufReader::new(File::open(catalog)?))?;
    let resolver = Catalog::new(&file)?;
    let distances = Distances::select(&file.distances, &distance)?;
    let engine = AllocationEngine::new(&engine)?;

    let sessions = io.read_sessions()?;
    event!(
        Level::INFO,
        products = resolver.len(),
        sessions = sessions.len(),
        transport_rate = %engine.transport_rate(),
    );

    let reports = optimize_sessions(&engine, &resolver, &distances, sessions).await;
    io.write_reports(&reports)
}
