use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FILE_COUNT, MIN_FILE_COUNT};
use crate::error::{ReadoutError, Result};

/// The time span of one observation, as passed to [`crate::extract::extract_photons`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ObservationWindow {
    /// Seconds since the Unix epoch (UTC) at which the integration starts.
    pub start_timestamp: i64,
    /// Integration length in seconds.
    pub integration_time: i64,
}

impl ObservationWindow {
    pub fn new(start_timestamp: i64, integration_time: i64) -> Self {
        Self {
            start_timestamp,
            integration_time,
        }
    }

    /// Number of per-second `.bin` files the nominal window spans
    /// (`integration_time + 1`, per SS3).
    pub fn file_count(&self) -> i64 {
        self.integration_time + 1
    }

    /// Validates `file_count() in [1, 1800]`, the range the reference readout enforces
    /// to bound a single call to at most 30 minutes of data.
    pub fn validate(&self) -> Result<()> {
        let file_count = self.file_count();
        if !(MIN_FILE_COUNT..=MAX_FILE_COUNT).contains(&file_count) {
            return Err(ReadoutError::InvalidWindow { file_count });
        }
        Ok(())
    }
}

/// Dimensions of the logical 2D beam-map grid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BeamMapDims {
    pub cols: u32,
    pub rows: u32,
}

impl BeamMapDims {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.cols && y < self.rows
    }
}
