//! Per-pixel growable photon buffers, gated by the beam-map image (C4).

use crate::beammap::BeamMapImage;
use crate::consts::{HALF_MS_TO_US, MAX_CNT_RATE};
use crate::packet::Data;
use crate::photon::Photon;
use crate::window::BeamMapDims;

/// Owns one growable photon buffer per in-range, assigned pixel, created lazily on
/// first ingest. Lives for exactly one `extract_photons` call.
pub struct PixelAccumulator {
    dims: BeamMapDims,
    buffers: Vec<Option<Vec<Photon>>>,
}

impl PixelAccumulator {
    pub fn new(dims: BeamMapDims) -> Self {
        let cells = dims.cols as usize * dims.rows as usize;
        Self {
            dims,
            buffers: (0..cells).map(|_| None).collect(),
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.dims.rows as usize + y as usize
    }

    /// Ingests one data word under the already-corrected header base time.
    ///
    /// Applies bounds and beam-map gating (SS4.4 steps 1-2), grows the pixel's buffer
    /// at the documented chunk boundary (step 3), and appends the converted
    /// [`Photon`] (steps 4-5). `basetime_half_ms` is the header's corrected base time,
    /// already validated by the caller to lie within the observation window.
    pub fn ingest(&mut self, beam_map: &BeamMapImage, basetime_half_ms: i64, data: Data) {
        let (x, y) = (data.x as u32, data.y as u32);
        if !self.dims.contains(x, y) {
            return;
        }
        if beam_map.flag(x, y) > 0 {
            return;
        }

        let idx = self.index(x, y);
        let buffer = self.buffers[idx].get_or_insert_with(Vec::new);
        grow_if_at_chunk_boundary(buffer);

        buffer.push(Photon {
            res_id: beam_map.res_id(x, y),
            time: (basetime_half_ms * HALF_MS_TO_US as i64 + data.t_sub as i64) as u32,
            wavelength: data.wavelength_degrees(),
            baseline: data.baseline_degrees(),
        });
    }

    /// The buffered events for one pixel, in append order, or `None` if the pixel has
    /// never received an event.
    pub fn buffer(&self, x: u32, y: u32) -> Option<&[Photon]> {
        self.buffers
            .get(self.index(x, y))
            .and_then(|slot| slot.as_deref())
    }
}

/// Reserves capacity for the next growth chunk when `buffer.len()` is one short of a
/// `MAX_CNT_RATE` boundary, matching the reference implementation's `realloc` points
/// (SS4.4 step 3) without ever shrinking or reallocating more than once per chunk.
fn grow_if_at_chunk_boundary(buffer: &mut Vec<Photon>) {
    let len = buffer.len();
    if len % MAX_CNT_RATE == MAX_CNT_RATE - 2 {
        let chunks = len.div_ceil(MAX_CNT_RATE) + 1;
        let target_capacity = MAX_CNT_RATE * chunks;
        if buffer.capacity() < target_capacity {
            buffer.reserve_exact(target_capacity - buffer.capacity());
        }
    }
}
