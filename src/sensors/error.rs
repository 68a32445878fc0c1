use core::fmt::Debug;

/// A parameter outside the range the device accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub &'static str);

/// Everything that can go wrong talking to the sensor. `E` is the transport error.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error<E: Debug> {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("TSL2561 not found on address {address:#04x}")]
    DeviceNotFound { address: u8 },

    /// The power control register did not read back as powered up.
    #[error("startup of TSL2561 sensor failed (power register read back {readback:#04x})")]
    StartupFailed { readback: u8 },

    #[error("bus transport error: {0:?}")]
    Bus(E),
}

/// Coarse classification of [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    DeviceNotFound,
    DeviceCommunication,
}

impl<E: Debug> Error<E> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::DeviceNotFound { .. } => ErrorKind::DeviceNotFound,
            Error::StartupFailed { .. } | Error::Bus(_) => ErrorKind::DeviceCommunication,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let invalid: Error<()> = InvalidArgument("timing code 7").into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::<()>::DeviceNotFound { address: 0x39 }.kind(),
            ErrorKind::DeviceNotFound
        );
        assert_eq!(
            Error::<()>::StartupFailed { readback: 0 }.kind(),
            ErrorKind::DeviceCommunication
        );
        assert_eq!(Error::Bus(()).kind(), ErrorKind::DeviceCommunication);
    }

    #[test]
    fn messages_name_the_address() {
        let err = Error::<()>::DeviceNotFound { address: 0x39 };
        assert_eq!(err.to_string(), "TSL2561 not found on address 0x39");

        let err = Error::<()>::StartupFailed { readback: 0x00 };
        assert!(err.to_string().starts_with("startup of TSL2561 sensor failed"));

        let err: Error<()> = InvalidArgument("timing code 4").into();
        assert_eq!(err.to_string(), "invalid argument: timing code 4");
    }
}
