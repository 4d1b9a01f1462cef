//! Flattens the accumulator's per-pixel buffers into the output photon list, in
//! beam-map order (C6).

use crate::accumulator::PixelAccumulator;
use crate::beammap::{BeamMapEntry, BeamMapImage};
use crate::photon::Photon;

/// Walks `entries` -- the original, caller-supplied beam-map entry list -- in order,
/// appending each assigned, non-empty pixel's buffered photons (in their original
/// append order) to the result.
///
/// `(0, 0)` is skipped unconditionally: it is the beam map's sentinel coordinate for
/// "no pixel here" in the reference layout, so an entry at that cell (even if it was
/// assigned a real resID) is still excluded from the materialized result. Entries
/// whose `(x, y)` fall outside the grid, or land on an unassigned cell, or whose
/// pixel has received no events, contribute nothing. Walking the entry list rather
/// than the 2D grid means two entries that collide on the same `(x, y)` each cause
/// that pixel's buffer to be appended again, once per matching entry -- matching the
/// reference implementation's behavior for a beam map with duplicate coordinates.
pub fn materialize(
    entries: &[BeamMapEntry],
    beam_map: &BeamMapImage,
    accumulator: &PixelAccumulator,
) -> Vec<Photon> {
    let mut photons = Vec::new();
    for entry in entries {
        if entry.x == 0 && entry.y == 0 {
            continue;
        }
        if entry.x < 0 || entry.y < 0 {
            continue;
        }
        let (x, y) = (entry.x as u32, entry.y as u32);
        if !beam_map.is_assigned(x, y) {
            continue;
        }
        match accumulator.buffer(x, y) {
            Some(buffered) if !buffered.is_empty() => photons.extend_from_slice(buffered),
            _ => {}
        }
    }
    photons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Data;
    use crate::window::BeamMapDims;

    fn data_at(x: u16, y: u16) -> Data {
        Data {
            x,
            y,
            t_sub: 0,
            wavelength_raw: 0,
            baseline_raw: 0,
        }
    }

    #[test]
    fn origin_cell_is_always_skipped() {
        let dims = BeamMapDims::new(4, 4);
        let entries = [BeamMapEntry {
            res_id: 1,
            flag: 0,
            x: 0,
            y: 0,
        }];
        let beam_map = BeamMapImage::build(&entries, dims);
        let mut accumulator = PixelAccumulator::new(dims);
        accumulator.ingest(&beam_map, 0, data_at(0, 0));

        let photons = materialize(&entries, &beam_map, &accumulator);
        assert!(photons.is_empty());
    }

    #[test]
    fn photons_follow_entry_list_order_not_grid_order() {
        let dims = BeamMapDims::new(2, 2);
        // (1,0) is listed before (0,1), which is the reverse of x-major grid order;
        // the output must follow the entry list, not the grid.
        let entries = [
            BeamMapEntry {
                res_id: 20,
                flag: 0,
                x: 1,
                y: 0,
            },
            BeamMapEntry {
                res_id: 10,
                flag: 0,
                x: 0,
                y: 1,
            },
        ];
        let beam_map = BeamMapImage::build(&entries, dims);
        let mut accumulator = PixelAccumulator::new(dims);
        accumulator.ingest(&beam_map, 0, data_at(1, 0));
        accumulator.ingest(&beam_map, 0, data_at(0, 1));
        accumulator.ingest(&beam_map, 0, data_at(1, 0));

        let photons = materialize(&entries, &beam_map, &accumulator);
        let res_ids: Vec<u32> = photons.iter().map(|p| p.res_id).collect();
        // (1,0)'s two events precede (0,1)'s one, matching entry order; append order
        // within (1,0) is kept.
        assert_eq!(res_ids, vec![20, 20, 10]);
    }

    #[test]
    fn colliding_entries_each_append_the_pixel_buffer() {
        let dims = BeamMapDims::new(2, 2);
        // Two entries at the same cell: BeamMapImage::build lets the later one win
        // for resID/flag, but the entry list itself still names the cell twice, so
        // materializing against the entry list appends its buffer once per entry.
        let entries = [
            BeamMapEntry {
                res_id: 1,
                flag: 0,
                x: 1,
                y: 1,
            },
            BeamMapEntry {
                res_id: 2,
                flag: 0,
                x: 1,
                y: 1,
            },
        ];
        let beam_map = BeamMapImage::build(&entries, dims);
        let mut accumulator = PixelAccumulator::new(dims);
        accumulator.ingest(&beam_map, 0, data_at(1, 1));

        let photons = materialize(&entries, &beam_map, &accumulator);
        assert_eq!(photons.len(), 2);
        assert_eq!(photons[0].res_id, 2);
        assert_eq!(photons[1].res_id, 2);
    }

    #[test]
    fn never_touched_pixel_contributes_nothing() {
        let dims = BeamMapDims::new(2, 2);
        let entries = [BeamMapEntry {
            res_id: 1,
            flag: 0,
            x: 1,
            y: 1,
        }];
        let beam_map = BeamMapImage::build(&entries, dims);
        let accumulator = PixelAccumulator::new(dims);
        let photons = materialize(&entries, &beam_map, &accumulator);
        assert!(photons.is_empty());
    }
}
