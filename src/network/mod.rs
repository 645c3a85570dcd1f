pub mod transmission;
pub mod utilization;

pub use transmission::transmission_time;
pub use utilization::{UtilizationInput, UtilizationReport, utilization};

use crate::error::{Result, ensure_positive};
use crate::units;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkParameters {
    pub rate_mbps: f64,
    pub header_size_bytes: u64,
    pub payload_size_bytes: u64,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            rate_mbps: 5.2,
            header_size_bytes: 24,
            payload_size_bytes: 1000,
        }
    }
}

impl LinkParameters {
    pub fn new(rate_mbps: f64, header_size_bytes: u64, payload_size_bytes: u64) -> Self {
        Self {
            rate_mbps,
            header_size_bytes,
            payload_size_bytes,
        }
    }

    pub fn rate_bps(&self) -> f64 {
        units::mbps_to_bps(self.rate_mbps)
    }

    // every packet is padded to header + payload
    pub fn packet_size_bits(&self) -> f64 {
        units::bytes_to_bits((self.header_size_bytes + self.payload_size_bytes) as f64)
    }

    pub fn seconds_for_packets(&self, packets: u64) -> f64 {
        packets as f64 * self.packet_size_bits() / self.rate_bps()
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("total_link_rate_mbps", self.rate_mbps)?;
        if self.payload_size_bytes == 0 {
            return Err(crate::CalcError::invalid(
                "packet_payload_size_bytes",
                "payload must hold at least one byte",
            ));
        }
        Ok(())
    }
}
