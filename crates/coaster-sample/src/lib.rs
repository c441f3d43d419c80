mod builder;
mod sample;

pub use builder::{build_samples, SampleConfig, TieSpacing};
pub use sample::{RailSample, TieSample, TrackSamples};
