//! Binary SPK (DAF/SPK) trajectory kernels.
//!
//! Only Chebyshev segments (types 2 and 3) expressed in the J2000 frame can
//! be evaluated; other segments are rejected when the file is loaded.
mod daf_header;
mod directory;
mod ephemeris_record;
pub mod naif_ids;
pub mod spk_data;
pub mod spk_type;
mod summary_record;

pub use daf_header::DAFHeader;
pub use directory::DirectoryData;
pub use ephemeris_record::EphemerisRecord;
pub use summary_record::Summary;
