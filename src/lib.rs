pub mod approximant;
pub mod bank;
pub mod error;
pub mod estimate;
pub mod phase;
pub mod provider;
pub mod series;
pub mod utils;
pub mod waveform;

pub use approximant::{Approximant, Domain};
pub use error::{ConfigurationError, EstimateError, GenerationError};
pub use estimate::{FinalFreq, FinalFreqOptions};
pub use waveform::{BinaryParams, PnOrders, WaveformSpec};
