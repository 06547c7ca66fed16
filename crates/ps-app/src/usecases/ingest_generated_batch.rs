use std::sync::Arc;

use anyhow::Result;
use ps_core::ports::ClockPort;
use ps_core::{ListKind, Record};
use tracing::info;

use crate::list::{ListController, PersistHandle};

/// Outcome of one generation intake.
#[derive(Debug)]
pub struct IngestedBatch {
    /// Shared `created_at_ms` of every record in the batch.
    pub batch_ms: i64,
    pub records: Vec<Record>,
    pub persist: PersistHandle,
}

/// Use case for turning raw generator output into generated records.
/// 将生成器输出的原始文本转换为 generated 列表记录的用例。
pub struct IngestGeneratedBatch {
    generated: ListController,
    clock: Arc<dyn ClockPort>,
}

impl IngestGeneratedBatch {
    /// `generated` must be the controller of [`ListKind::Generated`].
    pub fn new(generated: ListController, clock: Arc<dyn ClockPort>) -> Result<Self> {
        if generated.list() != ListKind::Generated {
            return Err(anyhow::anyhow!(
                "Generated batches can only be ingested into the generated list, got {}",
                generated.list()
            ));
        }
        Ok(Self { generated, clock })
    }

    /// Trims every line, drops blank ones and prepends the rest as one batch.
    ///
    /// The first surviving line ends up at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if no line survives trimming.
    #[tracing::instrument(
        name = "usecase.ingest_generated_batch.execute",
        skip(self, lines),
        fields(line_count = lines.len())
    )]
    pub fn execute(&self, lines: &[String]) -> Result<IngestedBatch> {
        let batch_ms = self.clock.now_ms();
        let records: Vec<Record> = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|text| Record::new(text, ListKind::Generated, batch_ms))
            .collect();

        if records.is_empty() {
            return Err(anyhow::anyhow!("Generated batch contains no text"));
        }

        let persist = self.generated.prepend(records.clone());
        info!(batch_ms, count = records.len(), "Ingested generated batch");

        Ok(IngestedBatch {
            batch_ms,
            records,
            persist,
        })
    }
}
