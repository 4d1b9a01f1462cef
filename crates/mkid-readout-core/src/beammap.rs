//! Builds the 2D pixel -> (resID, flag) image the accumulator gates ingestion on.

use serde::{Deserialize, Serialize};

use crate::consts::UNASSIGNED_RES_ID;
use crate::window::BeamMapDims;

/// One raw beam-map record, as supplied by the external beam-map loader (SS6.2).
///
/// `res_id`, `x`, and `y` are carried as `i64` because the external format transmits
/// all four fields as signed 64-bit integers and an out-of-range `x`/`y` (including
/// negative) must be detectable and skipped rather than wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamMapEntry {
    pub res_id: i64,
    pub flag: i64,
    pub x: i64,
    pub y: i64,
}

impl BeamMapEntry {
    /// Parses a flat `(resID, flag, x, y)`-quadruple array (SS6.2) into entries.
    pub fn parse_flat(raw: &[i64]) -> Vec<BeamMapEntry> {
        raw.chunks_exact(4)
            .map(|c| BeamMapEntry {
                res_id: c[0],
                flag: c[1],
                x: c[2],
                y: c[3],
            })
            .collect()
    }
}

/// The built `BeamMap[x][y] -> resID` / `BeamFlag[x][y] -> flag` image (C2).
///
/// Initialized to the "no pixel assigned" sentinel everywhere, then overridden by the
/// in-bounds entries of a [`BeamMapEntry`] list. Read-only once built.
pub struct BeamMapImage {
    dims: BeamMapDims,
    res_id: Vec<u32>,
    flag: Vec<u32>,
}

impl BeamMapImage {
    /// Builds the image from a flat entry list, in order. Out-of-bounds entries are
    /// skipped; a later entry at the same `(x, y)` overrides an earlier one. Flags
    /// greater than 1 are clamped to 2 (SS4.2).
    pub fn build(entries: &[BeamMapEntry], dims: BeamMapDims) -> Self {
        let cells = dims.cols as usize * dims.rows as usize;
        let mut image = Self {
            dims,
            res_id: vec![UNASSIGNED_RES_ID; cells],
            flag: vec![1; cells],
        };

        for entry in entries {
            let Some((x, y)) = image.in_bounds(entry.x, entry.y) else {
                continue;
            };
            let idx = image.index(x, y);
            image.res_id[idx] = entry.res_id as u32;
            image.flag[idx] = if entry.flag > 1 { 2 } else { entry.flag as u32 };
        }

        image
    }

    fn in_bounds(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        self.dims.contains(x, y).then_some((x, y))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.dims.rows as usize + y as usize
    }

    pub fn dims(&self) -> BeamMapDims {
        self.dims
    }

    pub fn res_id(&self, x: u32, y: u32) -> u32 {
        self.res_id[self.index(x, y)]
    }

    pub fn flag(&self, x: u32, y: u32) -> u32 {
        self.flag[self.index(x, y)]
    }

    pub fn is_assigned(&self, x: u32, y: u32) -> bool {
        self.dims.contains(x, y) && self.res_id(x, y) != UNASSIGNED_RES_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(res_id: i64, flag: i64, x: i64, y: i64) -> BeamMapEntry {
        BeamMapEntry { res_id, flag, x, y }
    }

    #[test]
    fn unassigned_cells_report_sentinel() {
        let image = BeamMapImage::build(&[], BeamMapDims::new(4, 4));
        assert_eq!(image.res_id(0, 0), UNASSIGNED_RES_ID);
        assert_eq!(image.flag(0, 0), 1);
        assert!(!image.is_assigned(0, 0));
    }

    #[test]
    fn in_bounds_entry_is_applied() {
        let image = BeamMapImage::build(&[entry(42, 0, 3, 4)], BeamMapDims::new(10, 10));
        assert_eq!(image.res_id(3, 4), 42);
        assert_eq!(image.flag(3, 4), 0);
        assert!(image.is_assigned(3, 4));
    }

    #[test]
    fn out_of_bounds_entries_are_skipped() {
        let image = BeamMapImage::build(
            &[entry(1, 0, -1, 0), entry(2, 0, 0, -1), entry(3, 0, 10, 0), entry(4, 0, 0, 10)],
            BeamMapDims::new(10, 10),
        );
        assert!(!image.is_assigned(0, 0));
    }

    #[test]
    fn flags_greater_than_one_are_clamped_to_two() {
        let image = BeamMapImage::build(&[entry(1, 5, 0, 0)], BeamMapDims::new(10, 10));
        assert_eq!(image.flag(0, 0), 2);
    }

    #[test]
    fn later_entry_wins_on_collision() {
        let image = BeamMapImage::build(
            &[entry(1, 0, 2, 2), entry(2, 1, 2, 2)],
            BeamMapDims::new(10, 10),
        );
        assert_eq!(image.res_id(2, 2), 2);
        assert_eq!(image.flag(2, 2), 1);
    }
}
