//! Sampling of NAIF ephemerides: the Solar System Barycentre seen from the Sun.
pub mod barytrack_errors;
pub mod config;
pub mod constants;
pub mod context;
pub mod ephemeris;
pub mod frames;
pub mod kernels;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod sampler;
pub mod spk;
pub mod time;
