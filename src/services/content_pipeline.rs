use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    constants::building_prompt::building_entry_prompt,
    errors::AppResult,
    models::domain::{BuildingRecord, GenerationReport, WorklistEntry},
    repositories::building_repository::{ensure_unique_ids, BuildingRepository},
    services::{
        model_service::TextGenerator, rate_limiter::RateLimiter,
        response_parser::parse_building_reply,
    },
};

/// Generates one record per worklist entry and appends the successes to the dataset.
pub struct ContentPipeline {
    generator: Arc<dyn TextGenerator>,
    repository: Arc<dyn BuildingRepository>,
    limiter: Arc<dyn RateLimiter>,
    target_count: usize,
}

impl ContentPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        repository: Arc<dyn BuildingRepository>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            generator,
            repository,
            limiter,
            target_count: 0,
        }
    }

    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub async fn run(&self, worklist: &[WorklistEntry]) -> AppResult<GenerationReport> {
        let existing = self.repository.load_all().await?;
        // Surface a broken dataset before spending any API calls.
        ensure_unique_ids(&existing)?;

        println!("Current buildings: {}", existing.len());
        if self.target_count > 0 {
            println!(
                "Target: {} buildings (need {} more)\n",
                self.target_count,
                self.target_count.saturating_sub(existing.len())
            );
        }

        let total = worklist.len();
        println!("Will generate {} new building entries\n", total);

        let mut report = GenerationReport::new(existing.len());
        let mut generated: Vec<(&WorklistEntry, BuildingRecord)> = Vec::new();

        for (index, entry) in worklist.iter().enumerate() {
            let position = index + 1;
            println!("[{}/{}] Generating: {}", position, total, entry);

            match self.generate_entry(entry).await {
                Ok(record) => {
                    if let Some(warnings) = record.validation_warnings() {
                        log::warn!("Entry for {} has field issues: {}", entry.name, warnings);
                    }
                    println!("  ✓ Generated successfully");
                    generated.push((entry, record));
                }
                Err(err) => {
                    println!("  ❌ Failed: {}", err);
                    log::warn!("Generation failed for {}: {}", entry.name, err);
                    report.record_failure(entry, err.to_string());
                }
            }

            if position < total {
                self.limiter.wait().await;
            }
        }

        self.commit(existing, generated, &mut report).await?;
        report.finish();
        print_summary(&report);
        Ok(report)
    }

    /// Prompt, call, and parse for a single entry.
    pub async fn generate_entry(&self, entry: &WorklistEntry) -> AppResult<BuildingRecord> {
        let prompt = building_entry_prompt(&entry.name, &entry.style);
        let reply = self.generator.generate(&prompt).await?;
        parse_building_reply(&reply)
    }

    async fn commit(
        &self,
        existing: Vec<BuildingRecord>,
        generated: Vec<(&WorklistEntry, BuildingRecord)>,
        report: &mut GenerationReport,
    ) -> AppResult<()> {
        let mut seen: HashSet<String> = existing.iter().map(|b| b.id.clone()).collect();

        for (entry, record) in generated {
            if seen.insert(record.id.clone()) {
                report.generated.push(record);
            } else {
                log::warn!(
                    "Dropping generated entry for {}: id '{}' is already taken",
                    entry.name,
                    record.id
                );
                report.record_failure(entry, format!("Duplicate identifier '{}'", record.id));
            }
        }

        if report.generated.is_empty() {
            log::info!("Nothing generated; dataset left untouched");
            return Ok(());
        }

        let mut all_buildings = existing;
        all_buildings.extend(report.generated.iter().cloned());
        self.repository.save_all(&all_buildings).await?;
        report.total_written = Some(all_buildings.len());
        Ok(())
    }
}

fn print_summary(report: &GenerationReport) {
    let rule = "=".repeat(50);

    let Some(total_written) = report.total_written else {
        println!("\n❌ No buildings were generated successfully");
        print_failures(report);
        return;
    };

    println!("\n{}", rule);
    println!("✓ Added {} buildings to the dataset", report.generated.len());
    println!("Total buildings: {}", total_written);
    print_failures(report);
    println!("{}", rule);
}

fn print_failures(report: &GenerationReport) {
    if report.failed.is_empty() {
        return;
    }
    println!("\n❌ Failed to generate {} buildings:", report.failed.len());
    for name in report.failed_names() {
        println!("  - {}", name);
    }
}
