use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaryTrackError {
    #[error("Kernel file not found at: {0}")]
    KernelNotFound(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unrecognized kernel file: {0}")]
    UnknownKernelKind(String),

    #[error("Invalid DAF file: {0}")]
    InvalidDafFile(String),

    #[error("Unsupported DAF binary format: {0} (only LTL-IEEE is supported)")]
    UnsupportedBinaryFormat(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("SPK data type not supported by the reader: {0}")]
    UnsupportedSpkDataType(i32),

    #[error("SPK segment expressed in unsupported frame code: {0}")]
    UnsupportedSegmentFrame(i32),

    #[error("Error during the text kernel parsing: {0}")]
    TextKernelParsing(String),

    #[error("No leap seconds kernel loaded, cannot convert UTC to ephemeris time")]
    LeapSecondsNotLoaded,

    #[error("Invalid leap seconds table: {0}")]
    InvalidLeapSecondTable(String),

    #[error("Invalid UTC timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid NAIF ID: {0}")]
    InvalidNaifId(i32),

    #[error("Unknown reference frame: {0}")]
    UnknownFrame(String),

    #[error("No loaded SPK segment covers body {body} at ET {et}")]
    NoSegmentCoverage { body: i32, et: f64 },

    #[error("SPK center chain starting at body {0} is too deep")]
    SegmentChainTooDeep(i32),

    #[error("Body constant not found in the kernel pool: {0}")]
    BodyConstantNotFound(String),

    #[error("Body constant {name} holds {found} values, at most {max} requested")]
    BodyConstantTooLarge {
        name: String,
        found: usize,
        max: usize,
    },

    #[error("Invalid sample count: {0} (at least one sample is required)")]
    InvalidSampleCount(usize),

    #[error("Invalid sampling range: end {end} must be after start {start}")]
    InvalidTimeRange { start: f64, end: f64 },

    #[error("Scaling radius must be strictly positive and finite, got {0}")]
    NonPositiveRadius(f64),

    #[error("Plot rendering error: {0}")]
    PlotError(String),
}

impl PartialEq for BaryTrackError {
    fn eq(&self, other: &Self) -> bool {
        use BaryTrackError::*;
        match (self, other) {
            (KernelNotFound(a), KernelNotFound(b)) => a == b,
            // io::Error is not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (UnknownKernelKind(a), UnknownKernelKind(b)) => a == b,
            (InvalidDafFile(a), InvalidDafFile(b)) => a == b,
            (UnsupportedBinaryFormat(a), UnsupportedBinaryFormat(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (UnsupportedSpkDataType(a), UnsupportedSpkDataType(b)) => a == b,
            (UnsupportedSegmentFrame(a), UnsupportedSegmentFrame(b)) => a == b,
            (TextKernelParsing(a), TextKernelParsing(b)) => a == b,
            (InvalidLeapSecondTable(a), InvalidLeapSecondTable(b)) => a == b,
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (InvalidNaifId(a), InvalidNaifId(b)) => a == b,
            (UnknownFrame(a), UnknownFrame(b)) => a == b,
            (
                NoSegmentCoverage { body: b1, et: e1 },
                NoSegmentCoverage { body: b2, et: e2 },
            ) => b1 == b2 && e1 == e2,
            (SegmentChainTooDeep(a), SegmentChainTooDeep(b)) => a == b,
            (BodyConstantNotFound(a), BodyConstantNotFound(b)) => a == b,
            (
                BodyConstantTooLarge {
                    name: n1,
                    found: f1,
                    max: m1,
                },
                BodyConstantTooLarge {
                    name: n2,
                    found: f2,
                    max: m2,
                },
            ) => n1 == n2 && f1 == f2 && m1 == m2,
            (InvalidSampleCount(a), InvalidSampleCount(b)) => a == b,
            (
                InvalidTimeRange { start: s1, end: e1 },
                InvalidTimeRange { start: s2, end: e2 },
            ) => s1 == s2 && e1 == e2,
            (NonPositiveRadius(a), NonPositiveRadius(b)) => a == b,
            (PlotError(a), PlotError(b)) => a == b,

            (LeapSecondsNotLoaded, LeapSecondsNotLoaded) => true,

            _ => false,
        }
    }
}
