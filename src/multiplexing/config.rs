use crate::error::{CalcError, Result, ensure_non_negative};
use crate::network::LinkParameters;
use crate::units::{kib_to_bytes, mib_to_bytes, parse_size};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// File order is turn order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplexConfig {
    pub total_link_rate_mbps: f64,
    // one file per computer
    pub sharing_computers_count: usize,
    #[serde(default)]
    pub starting_time_seconds: f64,
    pub file_sizes_bytes: Vec<u64>,
    pub packet_payload_size_bytes: u64,
    pub packet_header_size_bytes: u64,
}

impl Default for MultiplexConfig {
    fn default() -> Self {
        Self {
            total_link_rate_mbps: 5.2,
            sharing_computers_count: 2,
            starting_time_seconds: 0.0,
            file_sizes_bytes: vec![mib_to_bytes(3), kib_to_bytes(165)],
            packet_payload_size_bytes: 1000,
            packet_header_size_bytes: 24,
        }
    }
}

impl MultiplexConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    // also resets the sender count to match
    pub fn with_files(mut self, file_sizes_bytes: Vec<u64>) -> Self {
        self.sharing_computers_count = file_sizes_bytes.len();
        self.file_sizes_bytes = file_sizes_bytes;
        self
    }

    pub fn with_rate(mut self, rate_mbps: f64) -> Self {
        self.total_link_rate_mbps = rate_mbps;
        self
    }

    pub fn with_start(mut self, seconds: f64) -> Self {
        self.starting_time_seconds = seconds;
        self
    }

    pub fn with_framing(mut self, payload_bytes: u64, header_bytes: u64) -> Self {
        self.packet_payload_size_bytes = payload_bytes;
        self.packet_header_size_bytes = header_bytes;
        self
    }

    pub fn with_senders(mut self, count: usize) -> Self {
        self.sharing_computers_count = count;
        self
    }

    pub fn link(&self) -> LinkParameters {
        LinkParameters::new(
            self.total_link_rate_mbps,
            self.packet_header_size_bytes,
            self.packet_payload_size_bytes,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.link().validate()?;
        ensure_non_negative("starting_time_seconds", self.starting_time_seconds)?;

        if self.file_sizes_bytes.is_empty() {
            return Err(CalcError::NoFiles);
        }
        if self.sharing_computers_count != self.file_sizes_bytes.len() {
            return Err(CalcError::SenderCountMismatch {
                senders: self.sharing_computers_count,
                files: self.file_sizes_bytes.len(),
            });
        }
        Ok(())
    }
}

/// Command-line values layered over a config. Anything set here wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiplexOverrides {
    pub rate_mbps: Option<f64>,
    pub start_seconds: Option<f64>,
    pub payload_bytes: Option<u64>,
    pub header_bytes: Option<u64>,
    // e.g. 3MiB,165KiB
    pub files: Option<String>,
    pub senders: Option<usize>,
}

impl MultiplexOverrides {
    pub fn apply(self, mut config: MultiplexConfig) -> Result<MultiplexConfig> {
        // files first so an explicit sender count still wins
        if let Some(files) = self.files {
            let sizes = files
                .split(',')
                .map(parse_size)
                .collect::<Result<Vec<_>>>()?;
            config = config.with_files(sizes);
        }
        if let Some(rate) = self.rate_mbps {
            config = config.with_rate(rate);
        }
        if let Some(start) = self.start_seconds {
            config = config.with_start(start);
        }
        if self.payload_bytes.is_some() || self.header_bytes.is_some() {
            let payload = self.payload_bytes.unwrap_or(config.packet_payload_size_bytes);
            let header = self.header_bytes.unwrap_or(config.packet_header_size_bytes);
            config = config.with_framing(payload, header);
        }
        if let Some(senders) = self.senders {
            config = config.with_senders(senders);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        let config = MultiplexConfig::default();
        assert_eq!(config.file_sizes_bytes, vec![3_145_728, 168_960]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mismatched_sender_count() {
        let config = MultiplexConfig::default().with_senders(3);
        assert_eq!(
            config.validate(),
            Err(CalcError::SenderCountMismatch { senders: 3, files: 2 })
        );
    }

    #[test]
    fn empty_file_list() {
        let config = MultiplexConfig::default().with_files(Vec::new());
        assert_eq!(config.validate(), Err(CalcError::NoFiles));
    }

    #[test]
    fn negative_start_and_zero_rate() {
        assert!(MultiplexConfig::default().with_start(-1.0).validate().is_err());
        assert!(MultiplexConfig::default().with_rate(0.0).validate().is_err());
        assert!(MultiplexConfig::default().with_framing(0, 24).validate().is_err());
    }

    #[test]
    fn loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "total_link_rate_mbps": 10.0,
                "sharing_computers_count": 3,
                "file_sizes_bytes": [1000, 2000, 3000],
                "packet_payload_size_bytes": 500,
                "packet_header_size_bytes": 20
            }}"#
        )
        .unwrap();

        let config = MultiplexConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.starting_time_seconds, 0.0);
        assert_eq!(config.sharing_computers_count, 3);
        assert!(config.validate().is_ok());
    }

    fn file_config() -> (tempfile::NamedTempFile, MultiplexConfig) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "total_link_rate_mbps": 10.0,
                "sharing_computers_count": 3,
                "starting_time_seconds": 1.5,
                "file_sizes_bytes": [1000, 2000, 3000],
                "packet_payload_size_bytes": 500,
                "packet_header_size_bytes": 20
            }}"#
        )
        .unwrap();
        let config = MultiplexConfig::from_json_file(file.path()).unwrap();
        (file, config)
    }

    #[test]
    fn no_overrides_keeps_the_file() {
        let (_file, config) = file_config();
        let merged = MultiplexOverrides::default().apply(config.clone()).unwrap();
        assert_eq!(merged, config);
    }

    #[test]
    fn files_flag_resets_sender_count() {
        let (_file, config) = file_config();
        let overrides = MultiplexOverrides {
            files: Some("3MiB,165KiB".to_string()),
            ..Default::default()
        };
        let merged = overrides.apply(config).unwrap();
        assert_eq!(merged.file_sizes_bytes, vec![3_145_728, 168_960]);
        assert_eq!(merged.sharing_computers_count, 2);
        assert_eq!(merged.total_link_rate_mbps, 10.0);
        assert_eq!(merged.starting_time_seconds, 1.5);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn senders_flag_wins_over_files_flag() {
        let (_file, config) = file_config();
        let overrides = MultiplexOverrides {
            files: Some("1000,2000".to_string()),
            senders: Some(4),
            ..Default::default()
        };
        let merged = overrides.apply(config).unwrap();
        assert_eq!(merged.sharing_computers_count, 4);
        assert_eq!(
            merged.validate(),
            Err(CalcError::SenderCountMismatch { senders: 4, files: 2 })
        );
    }

    #[test]
    fn payload_alone_keeps_file_header() {
        let (_file, config) = file_config();
        let overrides = MultiplexOverrides {
            payload_bytes: Some(1460),
            rate_mbps: Some(100.0),
            start_seconds: Some(0.0),
            ..Default::default()
        };
        let merged = overrides.apply(config).unwrap();
        assert_eq!(merged.packet_payload_size_bytes, 1460);
        assert_eq!(merged.packet_header_size_bytes, 20);
        assert_eq!(merged.total_link_rate_mbps, 100.0);
        assert_eq!(merged.starting_time_seconds, 0.0);
        assert_eq!(merged.file_sizes_bytes, vec![1000, 2000, 3000]);
    }

    #[test]
    fn header_alone_keeps_file_payload() {
        let (_file, config) = file_config();
        let overrides = MultiplexOverrides {
            header_bytes: Some(40),
            ..Default::default()
        };
        let merged = overrides.apply(config).unwrap();
        assert_eq!(merged.packet_payload_size_bytes, 500);
        assert_eq!(merged.packet_header_size_bytes, 40);
    }

    #[test]
    fn bad_size_in_files_flag() {
        let overrides = MultiplexOverrides {
            files: Some("3MiB,lots".to_string()),
            ..Default::default()
        };
        assert_eq!(
            overrides.apply(MultiplexConfig::default()),
            Err(CalcError::InvalidSize("lots".to_string()))
        );
    }

    #[test]
    fn missing_file_has_context() {
        let err = MultiplexConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
