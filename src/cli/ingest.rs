use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use ps_app::usecases::IngestGeneratedBatch;
use ps_app::{FetchOutcome, ListController};
use ps_core::ListKind;
use ps_infra::{HttpRecordStore, SystemClock};
use tracing::info;

pub async fn run_ingest(list: ListKind, server: String) -> Result<()> {
    if list != ListKind::Generated {
        return Err(anyhow::anyhow!(
            "ingest only feeds the generated list, not {}",
            list
        ));
    }

    let lines = std::io::stdin()
        .lock()
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .context("Failed to read stdin")?;

    let store = Arc::new(HttpRecordStore::new(server)?);
    let controller = ListController::new(list, store, 1);
    let usecase = IngestGeneratedBatch::new(controller.clone(), Arc::new(SystemClock))?;

    let batch = usecase.execute(&lines)?;
    batch.persist.await.context("Persistence task panicked")?;

    // Persistence failures are only logged by the controller; confirm the
    // newest record of the batch is what the store now returns first.
    match controller.reload().await {
        FetchOutcome::Applied { .. } => {}
        other => return Err(anyhow::anyhow!("Could not confirm batch: {:?}", other)),
    }
    let head = controller.snapshot().items.into_iter().next();
    if head.map(|r| r.id) != batch.records.first().map(|r| r.id.clone()) {
        return Err(anyhow::anyhow!("Batch was not persisted by the record service"));
    }

    info!(count = batch.records.len(), batch_ms = batch.batch_ms, "batch stored");
    println!("ingested {} records", batch.records.len());
    Ok(())
}
