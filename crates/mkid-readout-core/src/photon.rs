/// A single decoded photon event, attributed to a detector pixel via the beam map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photon {
    /// Detector resource identifier for the pixel this event was attributed to.
    pub res_id: u32,
    /// Microseconds since the start of the observation.
    pub time: u32,
    /// Wavelength-proportional phase response, in degrees.
    pub wavelength: f32,
    /// Baseline (pulse-height) phase response, in degrees.
    pub baseline: f32,
}
