pub mod accumulator;
pub mod beammap;
pub mod consts;
pub mod driver;
pub mod error;
pub mod extract;
pub mod framing;
pub mod materializer;
pub mod packet;
pub mod photon;
pub mod single_file;
pub mod timestamp;
pub mod window;

pub use beammap::BeamMapEntry;
pub use error::{ReadoutError, Result};
pub use extract::{extract_photons, extract_photons_from_request, ExtractRequest};
pub use photon::Photon;
pub use single_file::{parse_single, RawEvent, SingleFileDump};
pub use window::{BeamMapDims, ObservationWindow};
