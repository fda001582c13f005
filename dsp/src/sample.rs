use std::{iter::Sum, ops};

use crate::math::Real;

/// Common arithmetic surface for the sample types the filters and
/// channels are generic over: real samples ([`Real`]) and complex
/// baseband samples ([`crate::iq::IQ`]).
pub trait Sample:
    Copy
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Real, Output = Self>
    + ops::MulAssign<Real>
    + ops::Div<Real, Output = Self>
    + Sum
{
    const ZERO: Self;

    fn magnitude_squared(&self) -> Real;

    fn magnitude(&self) -> Real {
        self.magnitude_squared().sqrt()
    }
}

impl Sample for Real {
    const ZERO: Self = 0.0;

    fn magnitude_squared(&self) -> Real {
        self * self
    }

    fn magnitude(&self) -> Real {
        self.abs()
    }
}
