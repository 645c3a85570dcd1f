use crate::error::{CalcError, Result};

pub const BITS_PER_BYTE: f64 = 8.0;
pub const BPS_PER_MBPS: f64 = 1_000_000.0;
pub const MS_PER_SEC: f64 = 1000.0;
pub const BYTES_PER_KIB: u64 = 1024;
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

pub fn bytes_to_bits(bytes: f64) -> f64 {
    bytes * BITS_PER_BYTE
}

pub fn mbps_to_bps(mbps: f64) -> f64 {
    mbps * BPS_PER_MBPS
}

pub fn secs_to_ms(secs: f64) -> f64 {
    secs * MS_PER_SEC
}

pub fn kib_to_bytes(kib: u64) -> u64 {
    kib * BYTES_PER_KIB
}

pub fn mib_to_bytes(mib: u64) -> u64 {
    mib * BYTES_PER_MIB
}

// "168960", "165KiB", "3 MiB", "1.5MiB". Partial bytes round up.
pub fn parse_size(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    let (number, multiplier) = if let Some(n) = lower.strip_suffix("mib") {
        (n, BYTES_PER_MIB)
    } else if let Some(n) = lower.strip_suffix("kib") {
        (n, BYTES_PER_KIB)
    } else if let Some(n) = lower.strip_suffix('b') {
        (n, 1)
    } else {
        (lower.as_str(), 1)
    };

    let number = number.trim();
    if let Ok(whole) = number.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| CalcError::InvalidSize(trimmed.to_string()));
    }

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {
            let bytes = (value * multiplier as f64).ceil();
            // the cast would clamp to u64::MAX
            if bytes >= u64::MAX as f64 {
                return Err(CalcError::InvalidSize(trimmed.to_string()));
            }
            Ok(bytes as u64)
        }
        _ => Err(CalcError::InvalidSize(trimmed.to_string())),
    }
}

// Ties go away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
