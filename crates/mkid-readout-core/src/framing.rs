//! Splits a buffer of 64-bit big-endian words into packets: a header word followed by
//! the data words that inherit its timestamp, up to (but not including) the next
//! header. Shared by the file-window driver (C5) and the single-file dump (C7).

use byteorder::{BigEndian, ByteOrder};

use crate::consts::{ANOMALOUS_PACKET_BYTES, HEADER_TAG, WORD_BYTES};

/// Scans `buf` (a whole number of 8-byte words) for packet boundaries and invokes
/// `on_packet` once per complete packet found.
///
/// Leading words before the first header are discarded (SS4.5/SS6.1 -- the first
/// word of a file need not be a header). The trailing partial packet after the last
/// header is also discarded, since there is no following header to close it.
/// `on_packet` receives the packet's raw bytes, starting with its header word.
pub fn for_each_packet<'a>(buf: &'a [u8], mut on_packet: impl FnMut(&'a [u8])) {
    let word_count = buf.len() / WORD_BYTES;

    let Some(first_header) = (0..word_count).find(|&i| is_header(buf, i)) else {
        return;
    };

    let mut packet_start = first_header;
    for k in (first_header + 1)..word_count {
        if is_header(buf, k) {
            on_packet(&buf[packet_start * WORD_BYTES..k * WORD_BYTES]);
            packet_start = k;
        }
    }
    // The run from `packet_start` to the end of the buffer, if any, is a trailing
    // partial packet (no closing header) and is intentionally dropped.
}

fn is_header(buf: &[u8], word_index: usize) -> bool {
    buf[word_index * WORD_BYTES] == HEADER_TAG
}

/// Reads the 64-bit big-endian word at `word_index` within `packet`.
pub fn word_at(packet: &[u8], word_index: usize) -> u64 {
    BigEndian::read_u64(&packet[word_index * WORD_BYTES..(word_index + 1) * WORD_BYTES])
}

/// Number of 64-bit words in `packet`.
pub fn word_count(packet: &[u8]) -> usize {
    packet.len() / WORD_BYTES
}

/// Whether `packet` is larger than the anomaly threshold (SS4.5), still processed but
/// worth a diagnostic.
pub fn is_anomalous(packet: &[u8]) -> bool {
    packet.len() > ANOMALOUS_PACKET_BYTES
}
