//! Translates packet-header timestamps into an observation-relative time base,
//! anchoring to the start of the enclosing calendar year and correcting the 36-bit
//! half-millisecond counter's periodic wrap.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::consts::WRAP_FUDGE_SECONDS;
use crate::consts::WRAP_PERIOD_SECONDS;
use crate::error::{ReadoutError, Result};
use crate::window::ObservationWindow;

/// Per-call time base: the UTC start-of-year anchor and the observation's `tstart`
/// (SS4.3), both derived once from the observation window and held read-only for the
/// life of the call.
#[derive(Clone, Copy, Debug)]
pub struct ObservationClock {
    year_start_utc: i64,
    tstart: i64,
}

impl ObservationClock {
    /// Computes the UTC year-start anchor for `window.start_timestamp` and the
    /// half-millisecond `tstart` offset from it.
    ///
    /// Fails if `start_timestamp` is not a UTC instant `chrono` can represent.
    pub fn new(window: ObservationWindow) -> Result<Self> {
        let year_start_utc = year_start_utc(window.start_timestamp)?;
        let tstart = (window.start_timestamp - year_start_utc) * 2000;
        Ok(Self {
            year_start_utc,
            tstart,
        })
    }

    /// Corrects `raw_timestamp` (half-ms since year start, as read off the wire) for
    /// any 36-bit rollover relative to the filename-second `file_name_time`, then
    /// returns the resulting base time relative to `tstart` (SS4.3).
    ///
    /// A packet should be accepted only when the returned value lies in
    /// `[0, 2000 * n_files)`; out-of-range base times are the caller's signal to drop
    /// the packet's data words as a group.
    pub fn basetime(&self, file_name_time: i64, raw_timestamp: u64) -> i64 {
        let corrected = self.correct_wraps(file_name_time, raw_timestamp);
        corrected - self.tstart
    }

    fn correct_wraps(&self, file_name_time: i64, raw_timestamp: u64) -> i64 {
        let raw_timestamp = raw_timestamp as i64;
        // Truncating division, matching the reference C's plain integer division --
        // `div_euclid` would round a negative numerator down instead of toward zero
        // and spuriously apply a wrap correction to ordinary jitter well within the
        // window.
        let n_wraps = (file_name_time - self.year_start_utc - (raw_timestamp / 2000)
            + WRAP_FUDGE_SECONDS)
            / WRAP_PERIOD_SECONDS;
        raw_timestamp + 2000 * n_wraps * WRAP_PERIOD_SECONDS
    }
}

/// Epoch seconds for January 1st, 00:00 UTC, of the calendar year containing
/// `timestamp` (seconds since the Unix epoch, UTC).
fn year_start_utc(timestamp: i64) -> Result<i64> {
    let invalid = || ReadoutError::InvalidTimestamp { timestamp };
    let date_time = Utc.timestamp_opt(timestamp, 0).single().ok_or_else(invalid)?;
    let jan_1 = NaiveDate::from_ymd_opt(date_time.date_naive().year(), 1, 1)
        .ok_or_else(invalid)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&jan_1).timestamp())
}
