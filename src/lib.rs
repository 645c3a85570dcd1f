pub mod error;
pub mod units;
pub mod network;
pub mod multiplexing;
pub mod report;

pub use error::{CalcError, Result};
pub use network::{LinkParameters, UtilizationInput, transmission_time, utilization};
pub use multiplexing::{MultiplexConfig, MultiplexingScheduler, schedule};

pub mod prelude {
    pub use crate::error::CalcError;
    pub use crate::network::{LinkParameters, UtilizationInput, UtilizationReport};
    pub use crate::multiplexing::{Completion, MultiplexConfig, MultiplexOverrides, MultiplexingScheduler, Schedule};
    pub use crate::units::{kib_to_bytes, mib_to_bytes, parse_size};
}
