pub mod logger;

use crate::multiplexing::{Schedule, ScheduledJob};
use crate::network::UtilizationReport;
use anyhow::Result;
use logger::ScheduleLogger;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRow {
    pub position: usize,
    pub turn_order: usize,
    pub file_size_bytes: u64,
    pub needed_packets: u64,
    pub packets_at_done: u64,
    pub completion_time_seconds: f64,
}

impl ScheduleRow {
    pub fn new(position: usize, job: &ScheduledJob) -> Self {
        Self {
            position,
            turn_order: job.job.turn_order,
            file_size_bytes: job.job.file_size_bytes,
            needed_packets: job.job.needed_packets,
            packets_at_done: job.packets_at_done,
            completion_time_seconds: job.completion_time_seconds,
        }
    }
}

pub fn schedule_rows(schedule: &Schedule) -> Vec<ScheduleRow> {
    schedule
        .jobs()
        .iter()
        .enumerate()
        .map(|(position, job)| ScheduleRow::new(position, job))
        .collect()
}

#[derive(Debug, Clone)]
pub struct SavedFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

// <dir>/<name>_<timestamp>.csv and .json
pub fn save_schedule(schedule: &Schedule, dir: impl AsRef<Path>, name: &str) -> Result<SavedFiles> {
    let dir = dir.as_ref();
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    
    std::fs::create_dir_all(dir)?;
    
    let csv = dir.join(format!("{}_{}.csv", name, timestamp));
    let mut logger = ScheduleLogger::new(&csv)?;
    let rows = logger.log_schedule(schedule)?;
    info!("Schedule saved to: {} ({} rows)", csv.display(), rows);
    
    let json = dir.join(format!("{}_{}.json", name, timestamp));
    std::fs::write(&json, serde_json::to_string_pretty(schedule)?)?;
    info!("Schedule details saved to: {}", json.display());
    
    Ok(SavedFiles { csv, json })
}

pub fn utilization_summary(report: &UtilizationReport) -> String {
    format!(
        "transmission time: {}ms\nutilization: {}, which is {}%",
        report.transmission_time_ms, report.utilization, report.utilization_percent
    )
}

// [(0.5, 1), (4.9, 0)]
pub fn completions_summary(schedule: &Schedule) -> String {
    let pairs: Vec<String> = schedule
        .completions()
        .iter()
        .map(|c| c.to_string())
        .collect();
    format!("[{}]", pairs.join(", "))
}

pub fn schedule_table(schedule: &Schedule) {
    println!("\n╔══════╦════════╦══════════════╦═══════════╦═════════════╦══════════════╗");
    println!("║ #    ║ Turn   ║ File         ║ Packets   ║ Link total  ║ Done at      ║");
    println!("║      ║        ║ (bytes)      ║           ║ (packets)   ║ (s)          ║");
    println!("╠══════╬════════╬══════════════╬═══════════╬═════════════╬══════════════╣");
    
    for row in schedule_rows(schedule) {
        println!(
            "║ {:<4} ║ {:>6} ║ {:>12} ║ {:>9} ║ {:>11} ║ {:>12.6} ║",
            row.position,
            row.turn_order,
            row.file_size_bytes,
            row.needed_packets,
            row.packets_at_done,
            row.completion_time_seconds,
        );
    }
    
    println!("╚══════╩════════╩══════════════╩═══════════╩═════════════╩══════════════╝\n");
    
    println!(
        "Link: {} Mbps, {} bit packets, {} packets carried, last file done at {:.6}s",
        schedule.link.rate_mbps,
        schedule.link.packet_size_bits(),
        schedule.total_packets(),
        schedule.finish_time_seconds()
    );
    println!();
}
