//! SPK segment data types.
//!
//! NAIF numbers the SPK representations from 1 to 21. The reader evaluates
//! the two Chebyshev layouts found in the DE planetary kernels; any other
//! known code is refused when the segment is loaded, and codes outside the
//! NAIF range are reported as invalid.
use std::fmt;

use crate::barytrack_errors::BaryTrackError;

const LAST_NAIF_TYPE: i32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpkDataType {
    /// Type 2: position coefficients, velocity from their derivative.
    ChebyshevPosition,
    /// Type 3: position and velocity coefficients.
    ChebyshevPositionVelocity,
}

impl SpkDataType {
    pub fn from_i32(code: i32) -> Result<Self, BaryTrackError> {
        match code {
            2 => Ok(SpkDataType::ChebyshevPosition),
            3 => Ok(SpkDataType::ChebyshevPositionVelocity),
            1..=LAST_NAIF_TYPE => Err(BaryTrackError::UnsupportedSpkDataType(code)),
            _ => Err(BaryTrackError::InvalidSpkDataType(code)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            SpkDataType::ChebyshevPosition => 2,
            SpkDataType::ChebyshevPositionVelocity => 3,
        }
    }

    /// Coefficient sets stored per record.
    pub(crate) fn chebyshev_components(self) -> usize {
        match self {
            SpkDataType::ChebyshevPosition => 3,
            SpkDataType::ChebyshevPositionVelocity => 6,
        }
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpkDataType::ChebyshevPosition => write!(f, "Chebyshev position (type 2)"),
            SpkDataType::ChebyshevPositionVelocity => {
                write!(f, "Chebyshev position/velocity (type 3)")
            }
        }
    }
}

#[cfg(test)]
mod test_spk_type {
    use super::*;

    #[test]
    fn test_supported_codes() {
        assert_eq!(SpkDataType::from_i32(2), Ok(SpkDataType::ChebyshevPosition));
        assert_eq!(
            SpkDataType::from_i32(3),
            Ok(SpkDataType::ChebyshevPositionVelocity)
        );
        assert_eq!(SpkDataType::ChebyshevPosition.code(), 2);
        assert_eq!(SpkDataType::ChebyshevPosition.chebyshev_components(), 3);
        assert_eq!(SpkDataType::ChebyshevPositionVelocity.chebyshev_components(), 6);
    }

    #[test]
    fn test_refused_codes() {
        assert_eq!(
            SpkDataType::from_i32(13),
            Err(BaryTrackError::UnsupportedSpkDataType(13))
        );
        assert_eq!(
            SpkDataType::from_i32(1),
            Err(BaryTrackError::UnsupportedSpkDataType(1))
        );
        assert_eq!(
            SpkDataType::from_i32(22),
            Err(BaryTrackError::InvalidSpkDataType(22))
        );
        assert_eq!(
            SpkDataType::from_i32(0),
            Err(BaryTrackError::InvalidSpkDataType(0))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SpkDataType::ChebyshevPositionVelocity.to_string(),
            "Chebyshev position/velocity (type 3)"
        );
    }
}
