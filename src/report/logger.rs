use super::schedule_rows;
use crate::multiplexing::Schedule;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct ScheduleLogger {
    writer: Writer<File>,
}

impl ScheduleLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }
    
    pub fn log_schedule(&mut self, schedule: &Schedule) -> Result<usize> {
        let rows = schedule_rows(schedule);
        for row in &rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(rows.len())
    }
}
