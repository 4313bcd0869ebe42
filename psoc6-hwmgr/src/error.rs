//! Resource manager errors

use core::fmt;

/// Error returned by the resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The block or channel is outside what the catalog declares for the type.
    InvalidResource,
    /// The resource is already reserved.
    InUse,
    /// Every candidate of the requested type is reserved.
    NoneFree,
    /// The resource was freed without being reserved.
    NotReserved,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidResource => write!(f, "Invalid resource"),
            Error::InUse => write!(f, "Resource in use"),
            Error::NoneFree => write!(f, "No free resources"),
            Error::NotReserved => write!(f, "Resource not reserved"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}",
            match self {
                Error::InvalidResource => "InvalidResource",
                Error::InUse => "InUse",
                Error::NoneFree => "NoneFree",
                Error::NotReserved => "NotReserved",
            }
        );
    }
}
