use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a run produced, for the final status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    pub output_path: String,
    pub records_written: usize,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl EtlSummary {
    pub fn status_line(&self) -> String {
        format!(
            "Successfully converted {} records to {}",
            self.records_written, self.output_path
        )
    }

    pub fn dry_run_line(&self) -> String {
        format!(
            "Dry run: {} records would be written to {}",
            self.records_written, self.output_path
        )
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitoring: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitoring: bool) -> Self {
        Self {
            pipeline,
            monitoring,
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<EtlSummary> {
        self.execute(false)
    }

    /// Extract and transform only; nothing is written.
    pub fn dry_run(&self) -> Result<EtlSummary> {
        self.execute(true)
    }

    fn execute(&self, dry_run: bool) -> Result<EtlSummary> {
        let mut monitor = SystemMonitor::new(self.monitoring);
        tracing::info!("Starting ETL process...");

        // Extract
        let sheet = self.pipeline.extract()?;
        tracing::info!("Extracted {} rows from sheet '{}'", sheet.rows.len(), sheet.name);
        monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(sheet)?;
        tracing::info!(
            "Transformed {} of {} rows into customer records",
            result.records.len(),
            result.rows_read
        );
        monitor.log_stats("Transform");

        let mut summary = EtlSummary {
            output_path: self.pipeline.output_path().to_string(),
            records_written: result.records.len(),
            rows_read: result.rows_read,
            rows_dropped: result.dropped.len(),
        };

        // Load
        if dry_run {
            tracing::info!("🔍 Dry run - skipping load");
        } else {
            summary.output_path = self.pipeline.load(&result)?;
            tracing::info!("📁 Output saved to: {}", summary.output_path);
            monitor.log_stats("Load");
        }

        monitor.log_final_stats();
        Ok(summary)
    }
}
