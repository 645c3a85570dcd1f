use crate::error::{CalcError, Result, ensure_positive};
use crate::units;

// Milliseconds, no propagation or queuing delay
pub fn transmission_time(length_bytes: u64, rate_mbps: f64) -> Result<f64> {
    if length_bytes == 0 {
        return Err(CalcError::invalid("length_bytes", "packet must hold at least one byte"));
    }
    let rate_bps = units::mbps_to_bps(ensure_positive("rate_mbps", rate_mbps)?);
    let bits = units::bytes_to_bits(length_bytes as f64);

    Ok(units::secs_to_ms(bits / rate_bps))
}
