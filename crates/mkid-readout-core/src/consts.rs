/// Per-pixel photon buffers grow in chunks of this many events; also the physical
/// upper envelope on per-pixel, per-second event rate the reference readout assumes.
pub const MAX_CNT_RATE: usize = 2500;

/// Top byte of a 64-bit packet word that marks it as a header rather than data.
pub const HEADER_TAG: u8 = 0xFF;

/// Divisor converting the 18-bit signed fixed-point wavelength field to degrees.
pub const WAVELENGTH_DIVISOR: f32 = 32768.0;

/// Divisor converting the 17-bit signed fixed-point baseline field to degrees.
pub const BASELINE_DIVISOR: f32 = 16384.0;

/// `180 / pi`, used to convert the fixed-point wavelength/baseline fields to degrees.
pub const RAD_TO_DEG: f32 = 57.295_779_513_082_32;

/// Multiplier converting a header's corrected base time (half-ms) to microseconds.
pub const HALF_MS_TO_US: u32 = 500;

/// Wrap period, in seconds, of the 36-bit half-millisecond header timestamp counter
/// (`2^36 half-ms / 2000 half-ms-per-s = 2^20 s`).
pub const WRAP_PERIOD_SECONDS: i64 = 1 << 20;

/// Fudge factor tolerating header timestamps that slightly precede the
/// filename-second boundary when correcting for wraps.
pub const WRAP_FUDGE_SECONDS: i64 = 3;

/// A packet larger than this many bytes between headers is logged as anomalous,
/// though it is still decoded.
pub const ANOMALOUS_PACKET_BYTES: usize = 816;

/// Minimum number of per-second files a single call may span (`integration_time + 1`).
pub const MIN_FILE_COUNT: i64 = 1;

/// Maximum number of per-second files a single call may span (30 minutes).
pub const MAX_FILE_COUNT: i64 = 1800;

/// Sentinel `resID` marking a beam-map cell with no pixel assigned.
pub const UNASSIGNED_RES_ID: u32 = u32::MAX;

/// Multiplier applied to the theoretical max data volume when sizing the reused
/// per-file read buffer, giving headroom above `MAX_CNT_RATE`.
pub const READ_BUFFER_HEADROOM: f64 = 1.1;

/// Size in bytes of one packet word on the wire.
pub const WORD_BYTES: usize = 8;
