//! Enumerates the per-second files spanning an observation window and streams their
//! bytes through packet framing into the accumulator (C5).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::accumulator::PixelAccumulator;
use crate::beammap::BeamMapImage;
use crate::consts::{ANOMALOUS_PACKET_BYTES, READ_BUFFER_HEADROOM, WORD_BYTES};
use crate::error::{ReadoutError, Result};
use crate::framing::{self, word_at};
use crate::packet::{decode_word, Header, PacketWord};
use crate::timestamp::ObservationClock;
use crate::window::{BeamMapDims, ObservationWindow};

/// Size in bytes of the reused per-file read buffer, matching SS4.5/SS5's
/// `ceil(1.1 * MAX_CNT_RATE * beamCols * beamRows * 8)` sizing policy.
pub fn read_buffer_capacity(dims: BeamMapDims) -> u64 {
    let cells = dims.cols as f64 * dims.rows as f64;
    (READ_BUFFER_HEADROOM * crate::consts::MAX_CNT_RATE as f64 * cells * WORD_BYTES as f64).ceil()
        as u64
}

/// Reads every `{second}.bin` file in `directory` spanning `window` (widened by one
/// second on each side) and feeds decoded events into `accumulator`.
///
/// Returns an error only for the call-level failures named in SS7 (a file larger
/// than the read buffer); a missing file mid-window is logged and skipped.
pub fn run(
    directory: &Path,
    window: ObservationWindow,
    clock: &ObservationClock,
    beam_map: &BeamMapImage,
    accumulator: &mut PixelAccumulator,
) -> Result<()> {
    let n_files = window.file_count();
    let buffer_capacity = read_buffer_capacity(beam_map.dims());
    let mut buffer = Vec::with_capacity(buffer_capacity as usize);

    for i in -1..=n_files {
        let second = window.start_timestamp + i;
        let path = directory.join(format!("{second}.bin"));

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => {
                warn!(file = %path.display(), "window file does not exist, skipping");
                continue;
            }
        };

        let size = metadata.len();
        if size > buffer_capacity {
            return Err(ReadoutError::FileTooLarge {
                path,
                size,
                limit: buffer_capacity,
            });
        }

        let mut file = File::open(&path)?;
        buffer.clear();
        buffer.resize(size as usize, 0);
        let read = file.read(&mut buffer)?;
        if (read as u64) != size {
            warn!(
                file = %path.display(),
                expected = size,
                got = read,
                "short read, using bytes actually read"
            );
            buffer.truncate(read);
        }

        frame_and_ingest(&buffer, second, n_files, clock, beam_map, accumulator);
    }

    Ok(())
}

fn frame_and_ingest(
    buf: &[u8],
    file_name_time: i64,
    n_files: i64,
    clock: &ObservationClock,
    beam_map: &BeamMapImage,
    accumulator: &mut PixelAccumulator,
) {
    framing::for_each_packet(buf, |packet| {
        if framing::is_anomalous(packet) {
            warn!(
                bytes = packet.len(),
                limit = ANOMALOUS_PACKET_BYTES,
                "packet exceeds the expected size, processing anyway"
            );
        }

        let header = match decode_word(word_at(packet, 0)) {
            PacketWord::Header(header) => header,
            PacketWord::Data(_) => return, // framing always starts a packet on a header
        };
        let Header { timestamp, .. } = header;

        let basetime = clock.basetime(file_name_time, timestamp);
        if basetime < 0 || basetime >= 2000 * n_files {
            return;
        }

        for word_index in 1..framing::word_count(packet) {
            if let PacketWord::Data(data) = decode_word(word_at(packet, word_index)) {
                accumulator.ingest(beam_map, basetime, data);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_buffer_capacity_matches_spec_formula() {
        let dims = BeamMapDims::new(10, 10);
        let expected = (1.1 * 2500.0 * 100.0 * 8.0_f64).ceil() as u64;
        assert_eq!(read_buffer_capacity(dims), expected);
    }
}
