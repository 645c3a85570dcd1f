pub mod config;
pub use config::{MultiplexConfig, MultiplexOverrides};

use crate::error::{CalcError, Result};
use crate::network::LinkParameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

// last packet is padded to a full payload
pub fn needed_packets(file_size_bytes: u64, payload_size_bytes: u64) -> u64 {
    file_size_bytes.div_ceil(payload_size_bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplexingJob {
    pub turn_order: usize,
    pub file_size_bytes: u64,
    pub needed_packets: u64,
}

impl MultiplexingJob {
    pub fn new(turn_order: usize, file_size_bytes: u64, payload_size_bytes: u64) -> Self {
        Self {
            turn_order,
            file_size_bytes,
            needed_packets: needed_packets(file_size_bytes, payload_size_bytes),
        }
    }

    fn processing_key(&self) -> (u64, usize) {
        (self.needed_packets, self.turn_order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub completion_time_seconds: f64,
    pub turn_order: usize,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.completion_time_seconds, self.turn_order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub job: MultiplexingJob,
    // across all senders
    pub packets_at_done: u64,
    pub completion_time_seconds: f64,
}

impl ScheduledJob {
    pub fn completion(&self) -> Completion {
        Completion {
            completion_time_seconds: self.completion_time_seconds,
            turn_order: self.job.turn_order,
        }
    }
}

// Processing order, not input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub link: LinkParameters,
    pub starting_time_seconds: f64,
    jobs: Vec<ScheduledJob>,
}

impl Schedule {
    pub fn jobs(&self) -> &[ScheduledJob] {
        &self.jobs
    }

    pub fn completions(&self) -> Vec<Completion> {
        self.jobs.iter().map(ScheduledJob::completion).collect()
    }

    pub fn total_packets(&self) -> u64 {
        self.jobs.last().map(|j| j.packets_at_done).unwrap_or(0)
    }

    pub fn finish_time_seconds(&self) -> f64 {
        self.jobs
            .last()
            .map(|j| j.completion_time_seconds)
            .unwrap_or(self.starting_time_seconds)
    }
}

pub struct MultiplexingScheduler {
    config: MultiplexConfig,
}

impl MultiplexingScheduler {
    pub fn new(config: MultiplexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn jobs(&self) -> Vec<MultiplexingJob> {
        let payload = self.config.packet_payload_size_bytes;
        let mut jobs: Vec<MultiplexingJob> = self
            .config
            .file_sizes_bytes
            .iter()
            .enumerate()
            .map(|(turn_order, &size)| MultiplexingJob::new(turn_order, size, payload))
            .collect();

        // keys are unique because turn order is
        jobs.sort_unstable_by_key(MultiplexingJob::processing_key);
        jobs
    }

    pub fn run(&self) -> Result<Schedule> {
        let link = self.config.link();
        let senders = self.config.sharing_computers_count as u64;
        let start = self.config.starting_time_seconds;

        info!(
            "Scheduling {} files over {} Mbps ({} bit packets)",
            senders,
            link.rate_mbps,
            link.packet_size_bits()
        );

        let mut scheduled: Vec<ScheduledJob> = Vec::with_capacity(self.config.file_sizes_bytes.len());
        for (position, job) in self.jobs().into_iter().enumerate() {
            let packets_at_done = match scheduled.last() {
                None => job.needed_packets.checked_mul(senders),
                Some(previous) => {
                    let prev_total = previous.packets_at_done;
                    let active = senders - position as u64;
                    // a file already covered by prev_total finishes with the previous one
                    let remaining = job.needed_packets.saturating_sub(prev_total);
                    remaining
                        .checked_mul(active)
                        .and_then(|p| p.checked_add(prev_total))
                }
            }
            .ok_or_else(|| {
                CalcError::invalid(
                    "file_sizes_bytes",
                    format!("packet count for turn {} overflows", job.turn_order),
                )
            })?;
            let completion_time_seconds = link.seconds_for_packets(packets_at_done) + start;

            debug!(
                "turn {} needs {} packets, done after {} packets at {}s",
                job.turn_order, job.needed_packets, packets_at_done, completion_time_seconds
            );

            scheduled.push(ScheduledJob {
                job,
                packets_at_done,
                completion_time_seconds,
            });
        }

        Ok(Schedule {
            link,
            starting_time_seconds: start,
            jobs: scheduled,
        })
    }
}

/// `(completion seconds, turn order)` for every file, smallest file first.
/// Fails with `InvalidArgument` if the link-wide packet count overflows a u64.
pub fn schedule(config: &MultiplexConfig) -> Result<Vec<Completion>> {
    let scheduler = MultiplexingScheduler::new(config.clone())?;
    Ok(scheduler.run()?.completions())
}
