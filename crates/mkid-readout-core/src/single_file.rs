//! Standalone low-level packet dump for one file (C7), independent of the beam map
//! and observation re-anchoring used by [`crate::extract::extract_photons`].

use std::fs;
use std::path::Path;

use crate::consts::HALF_MS_TO_US;
use crate::error::Result;
use crate::framing::{self, word_at};
use crate::packet::{decode_word, Data, Header, PacketWord};

/// One decoded data word, reported in file order with no beam-map attribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawEvent {
    pub x: u16,
    pub y: u16,
    /// Microseconds since the start of the enclosing calendar year (no re-anchoring).
    pub time: u32,
    pub wavelength: f32,
    pub baseline: f32,
    /// Readout board identifier, inherited from the event's enclosing header.
    pub roach: u8,
}

/// Result of [`parse_single`]: up to `max_len` events plus the true total, which may
/// exceed the number of events actually retained.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleFileDump {
    pub events: Vec<RawEvent>,
    pub total_events: usize,
}

/// Decodes every data word in `path` in file order.
///
/// If the file contains more than `max_len` events, slots `0..max_len - 1` hold the
/// first events seen and slot `max_len - 1` is repeatedly overwritten by every event
/// past that point, ending on the most recent one (SS4.7). `total_events` always
/// reports the true count, truncated or not.
pub fn parse_single(path: &Path, max_len: usize) -> Result<SingleFileDump> {
    let bytes = fs::read(path)?;

    let mut events = Vec::with_capacity(max_len.min(bytes.len() / 8));
    let mut total_events = 0usize;

    framing::for_each_packet(&bytes, |packet| {
        let header = match decode_word(word_at(packet, 0)) {
            PacketWord::Header(header) => header,
            PacketWord::Data(_) => return,
        };

        for word_index in 1..framing::word_count(packet) {
            if let PacketWord::Data(data) = decode_word(word_at(packet, word_index)) {
                let event = to_event(header, data);
                total_events += 1;
                record(&mut events, max_len, event);
            }
        }
    });

    Ok(SingleFileDump {
        events,
        total_events,
    })
}

fn to_event(header: Header, data: Data) -> RawEvent {
    RawEvent {
        x: data.x,
        y: data.y,
        time: (header.timestamp * HALF_MS_TO_US as u64 + data.t_sub as u64) as u32,
        wavelength: data.wavelength_degrees(),
        baseline: data.baseline_degrees(),
        roach: header.roach,
    }
}

fn record(events: &mut Vec<RawEvent>, max_len: usize, event: RawEvent) {
    if max_len == 0 {
        return;
    }
    if events.len() < max_len {
        events.push(event);
    } else {
        events[max_len - 1] = event;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HEADER_TAG;
    use std::io::Write;

    fn header_bytes(timestamp: u64) -> [u8; 8] {
        header_bytes_with_roach(0, timestamp)
    }

    fn header_bytes_with_roach(roach: u8, timestamp: u64) -> [u8; 8] {
        (((HEADER_TAG as u64) << 56) | ((roach as u64) << 48) | (timestamp & 0xF_FFFF_FFFF))
            .to_be_bytes()
    }

    fn data_bytes(x: u16, y: u16, t_sub: u16) -> [u8; 8] {
        ((x as u64 & 0x3FF) << 54 | (y as u64 & 0x3FF) << 44 | (t_sub as u64 & 0x1FF) << 35)
            .to_be_bytes()
    }

    fn write_fixture(words: &[[u8; 8]]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for word in words {
            file.write_all(word).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn reports_events_in_file_order_under_the_limit() {
        let file = write_fixture(&[
            header_bytes(100),
            data_bytes(1, 2, 10),
            data_bytes(3, 4, 20),
        ]);
        let dump = parse_single(file.path(), 10).unwrap();
        assert_eq!(dump.total_events, 2);
        assert_eq!(dump.events.len(), 2);
        assert_eq!(dump.events[0].x, 1);
        assert_eq!(dump.events[1].x, 3);
    }

    #[test]
    fn overflow_keeps_first_slots_and_overwrites_the_last_with_the_latest_event() {
        let file = write_fixture(&[
            header_bytes(0),
            data_bytes(1, 0, 0),
            data_bytes(2, 0, 0),
            data_bytes(3, 0, 0),
            data_bytes(4, 0, 0),
        ]);
        let dump = parse_single(file.path(), 2).unwrap();
        assert_eq!(dump.total_events, 4);
        assert_eq!(dump.events.len(), 2);
        assert_eq!(dump.events[0].x, 1);
        assert_eq!(dump.events[1].x, 4); // last slot holds the most recent event
    }

    #[test]
    fn zero_max_len_counts_but_retains_nothing() {
        let file = write_fixture(&[header_bytes(0), data_bytes(1, 0, 0)]);
        let dump = parse_single(file.path(), 0).unwrap();
        assert_eq!(dump.total_events, 1);
        assert!(dump.events.is_empty());
    }

    #[test]
    fn events_inherit_their_header_roach_id() {
        let file = write_fixture(&[
            header_bytes_with_roach(0x12, 0),
            data_bytes(1, 2, 10),
            header_bytes_with_roach(0x34, 0),
            data_bytes(3, 4, 20),
        ]);
        let dump = parse_single(file.path(), 10).unwrap();
        assert_eq!(dump.events[0].roach, 0x12);
        assert_eq!(dump.events[1].roach, 0x34);
    }
}
