//! # Constants and type definitions for barytrack
//!
//! Physical constants, unit conversions and the scalar type aliases shared by the
//! kernel readers, the sampler and the presenter.
//!
//! ## Overview
//!
//! - Speed of light and astronomical unit
//! - Unit conversions (arcseconds → radians, days → seconds)
//! - DAF layout constants (record and word sizes)
//! - Type aliases for ephemeris time and distances

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Mean obliquity of the ecliptic at J2000 (IAU 1976), in arcseconds.
/// This is the angle NAIF uses to define the ECLIPJ2000 frame.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.448;

// -------------------------------------------------------------------------------------------------
// DAF layout
// -------------------------------------------------------------------------------------------------

/// Size in bytes of one DAF physical record
pub const DAF_RECORD_BYTES: usize = 1024;

/// Size in bytes of one double precision word
pub const DAF_WORD_BYTES: usize = 8;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Ephemeris time, TDB seconds past J2000
pub type EtSeconds = f64;
/// One-way light time in seconds
pub type LightTime = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Angle in radians
pub type Radian = f64;
