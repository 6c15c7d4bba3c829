use crate::core::table::{parse_csv, write_csv};
use crate::core::{
    AnnotationStats, ColorClassifier, ColorResult, ConfigProvider, Pipeline, ReachabilityCheck,
    Storage, Table, TransformResult,
};
use crate::utils::error::{AnnotateError, Result};
use chrono::{DateTime, Local};
use std::path::Path;

pub const OUTPUT_PREFIX: &str = "color_output_";

/// Loads the product table, tags every row with its colors, and writes a
/// timestamped copy next to the input.
pub struct ColorPipeline<S, C, R, K>
where
    S: Storage,
    C: ConfigProvider,
    R: ReachabilityCheck,
    K: ColorClassifier,
{
    storage: S,
    config: C,
    reachability: R,
    classifier: K,
}

impl<S, C, R, K> ColorPipeline<S, C, R, K>
where
    S: Storage,
    C: ConfigProvider,
    R: ReachabilityCheck,
    K: ColorClassifier,
{
    pub fn new(storage: S, config: C, reachability: R, classifier: K) -> Self {
        Self {
            storage,
            config,
            reachability,
            classifier,
        }
    }

    /// Colors for one image. Never fails: unreachable or unclassifiable images
    /// yield empty strings.
    pub async fn annotate_row(&self, image_url: &str) -> (ColorResult, bool) {
        if !self.reachability.is_reachable(image_url).await {
            return (ColorResult::default(), false);
        }
        (self.classifier.classify(image_url).await, true)
    }

    /// Output path for a run started at `now`, in the input's directory.
    pub fn output_path(&self, now: DateTime<Local>) -> String {
        let file_name = format!("{}{}.csv", OUTPUT_PREFIX, now.format("%Y%m%d_%H%M%S"));
        match Path::new(self.config.input_path()).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                dir.join(file_name).to_string_lossy().into_owned()
            }
            _ => file_name,
        }
    }
}

#[async_trait::async_trait]
impl<S, C, R, K> Pipeline for ColorPipeline<S, C, R, K>
where
    S: Storage,
    C: ConfigProvider,
    R: ReachabilityCheck,
    K: ColorClassifier,
{
    async fn extract(&self) -> Result<Table> {
        let input = self.config.input_path();
        tracing::info!("📥 Reading product table: {}", input);

        let data = match self.storage.read_file(input).await {
            Ok(data) => data,
            Err(AnnotateError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AnnotateError::FileNotFound {
                    path: input.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        let table = parse_csv(&data)?;
        tracing::info!("📊 Loaded {} rows", table.len());
        Ok(table)
    }

    async fn transform(&self, mut table: Table) -> Result<TransformResult> {
        let total = table.len();
        let delay = self.config.row_delay();
        let mut stats = AnnotationStats {
            total,
            ..AnnotationStats::default()
        };

        tracing::info!("🎨 Analyzing colors for {} rows", total);

        for row in 0..total {
            // 固定節流，避免對外部服務造成壓力
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let image_url = table.image_url(row).unwrap_or_default().to_string();
            let (colors, reachable) = self.annotate_row(&image_url).await;

            if !reachable {
                stats.unreachable += 1;
            } else if colors.is_undetermined() {
                stats.undetermined += 1;
            } else {
                stats.annotated += 1;
            }

            tracing::info!(
                "[{}/{}] ID {}: primary='{}' secondary='{}'",
                row + 1,
                total,
                table.id(row).unwrap_or_default(),
                colors.primary,
                colors.secondary
            );
            table.set_colors(row, colors);
        }

        tracing::info!(
            "✅ Color analysis complete: {} annotated, {} undetermined, {} unreachable",
            stats.annotated,
            stats.undetermined,
            stats.unreachable
        );
        Ok(TransformResult { table, stats })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.output_path(Local::now());
        let data = write_csv(&result.table)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(&output_path, &data).await?;

        let full_path = Path::new(self.config.base_dir())
            .join(&output_path)
            .to_string_lossy()
            .into_owned();
        tracing::info!("💾 Color detection complete. Output saved to: {}", full_path);
        Ok(full_path)
    }
}
