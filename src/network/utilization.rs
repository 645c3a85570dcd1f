use super::transmission::transmission_time;
use crate::error::{Result, ensure_non_negative};
use crate::units::round_to;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const FRACTION_PRECISION: u32 = 5;
pub const PERCENTAGE_PRECISION: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationInput {
    pub length_bytes: u64,
    pub rate_mbps: f64,
    // 2 * propagation delay
    pub rtt_ms: f64,
    #[serde(default)]
    pub window_size_bytes: Option<u64>,
}

impl Default for UtilizationInput {
    fn default() -> Self {
        Self {
            length_bytes: 1000,
            rate_mbps: 1000.0,
            rtt_ms: 15.0 * 2.0,
            window_size_bytes: Some(5020),
        }
    }
}

impl UtilizationInput {
    pub fn stop_and_wait(length_bytes: u64, rate_mbps: f64, rtt_ms: f64) -> Self {
        Self {
            length_bytes,
            rate_mbps,
            rtt_ms,
            window_size_bytes: None,
        }
    }

    pub fn with_window(mut self, window_size_bytes: u64) -> Self {
        self.window_size_bytes = Some(window_size_bytes);
        self
    }

    // fractional, not rounded
    pub fn pipelined_packet_count(&self) -> f64 {
        match self.window_size_bytes {
            Some(window) => window as f64 / self.length_bytes as f64,
            None => 1.0,
        }
    }
}

// Not clamped, a large window can push this past 1.0
pub fn utilization(input: &UtilizationInput) -> Result<f64> {
    let transmission_ms = transmission_time(input.length_bytes, input.rate_mbps)?;
    let rtt_ms = ensure_non_negative("rtt_ms", input.rtt_ms)?;

    if let Some(window) = input.window_size_bytes {
        if window < input.length_bytes {
            warn!(
                "Window of {} bytes is smaller than one {} byte packet",
                window, input.length_bytes
            );
        }
    }

    let total_ms = transmission_ms + rtt_ms;
    let utilization = transmission_ms / total_ms * input.pipelined_packet_count();

    debug!(
        "transmission={}ms total={}ms pipelined={} utilization={}",
        transmission_ms,
        total_ms,
        input.pipelined_packet_count(),
        utilization
    );

    Ok(utilization)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub transmission_time_ms: f64,
    pub utilization: f64,
    pub utilization_percent: f64,
}

impl UtilizationReport {
    // Percentage comes from the already rounded fraction. Exact ties round away
    // from zero, not half-to-even.
    pub fn compute(input: &UtilizationInput) -> Result<Self> {
        let transmission_time_ms = transmission_time(input.length_bytes, input.rate_mbps)?;
        let utilization = round_to(utilization(input)?, FRACTION_PRECISION);
        let utilization_percent = round_to(utilization * 100.0, PERCENTAGE_PRECISION);

        Ok(Self {
            transmission_time_ms,
            utilization,
            utilization_percent,
        })
    }
}
