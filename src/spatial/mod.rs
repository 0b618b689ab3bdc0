// Environment simulation
//
// Geometric proxies for reverb and occlusion, the interval sampling that keeps
// them cheap, and the curves that turn them into filter parameters.

pub mod filters;
mod sampler;
mod smoothing;

// Public API
pub use filters::{ReverbParams, low_pass_cutoff, reverb_params};
pub use sampler::EnvironmentSampler;
pub use smoothing::SampledValue;
