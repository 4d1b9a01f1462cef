//! Top-level orchestration: validates a request, builds the call-scoped state, drives
//! the file window, and materializes the result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accumulator::PixelAccumulator;
use crate::beammap::{BeamMapEntry, BeamMapImage};
use crate::driver;
use crate::error::{ReadoutError, Result};
use crate::materializer;
use crate::photon::Photon;
use crate::timestamp::ObservationClock;
use crate::window::{BeamMapDims, ObservationWindow};

/// Bundles the parameters of one [`extract_photons`] call: a plain data holder kept
/// separate from the orchestration logic that validates and consumes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub directory: PathBuf,
    pub window: ObservationWindow,
    pub dims: BeamMapDims,
    pub beam_map: Vec<BeamMapEntry>,
}

/// Convenience wrapper calling [`extract_photons`] with an [`ExtractRequest`]'s fields.
pub fn extract_photons_from_request(request: &ExtractRequest) -> Result<Vec<Photon>> {
    extract_photons(
        &request.directory,
        request.window,
        request.dims,
        &request.beam_map,
    )
}

/// Decodes and aggregates every photon event in `directory` falling within `window`,
/// attributed to pixels via `beam_map` (SS6.3).
///
/// Validates `window` and the existence of `directory` before any allocation, so a
/// parameter failure never yields a partial result.
pub fn extract_photons(
    directory: &Path,
    window: ObservationWindow,
    dims: BeamMapDims,
    beam_map: &[BeamMapEntry],
) -> Result<Vec<Photon>> {
    window.validate()?;
    if !directory.is_dir() {
        return Err(ReadoutError::DirectoryNotFound(directory.to_path_buf()));
    }

    let started = Instant::now();
    info!(
        directory = %directory.display(),
        file_count = window.file_count(),
        "starting photon extraction"
    );

    let beam_map_image = BeamMapImage::build(beam_map, dims);
    let clock = ObservationClock::new(window)?;
    let mut accumulator = PixelAccumulator::new(dims);

    driver::run(directory, window, &clock, &beam_map_image, &mut accumulator)?;

    let photons = materializer::materialize(beam_map, &beam_map_image, &accumulator);

    info!(
        photon_count = photons.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "finished photon extraction"
    );

    Ok(photons)
}
