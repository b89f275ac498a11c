//! Error types for the ndn-edge implementation.

use thiserror::Error;

/// All possible errors that can occur within the ndn-edge implementation.
///
/// Each kind carries a stable integer code (see [`Error::code`]) so that
/// results can be reported across FFI-ish boundaries the same way the wire
/// format is: as small, stable numbers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A value does not fit the fixed-capacity buffer it was headed for.
    #[error("value exceeds the fixed buffer capacity")]
    Oversize,

    /// The decoder found a TLV type it did not expect.
    #[error("unexpected TLV type")]
    WrongTlvType,

    /// A name string was not in NDN URI form.
    #[error("name string is not in NDN URI form")]
    NameInvalidFormat,

    /// The requested signature type is not one the library supports.
    #[error("unsupported signature type")]
    UnsupportedSignType,

    /// A signature value size is inconsistent with its signature type.
    #[error("signature size does not match the signature type")]
    WrongSigSize,

    /// Key material was rejected by the crypto backend.
    #[error("crypto backend rejected the key material")]
    KeyImport,

    /// The crypto backend failed to produce a signature.
    #[error("crypto backend failed to sign")]
    Signing,

    /// A signature did not verify.
    #[error("signature verification failed")]
    SigVerification,

    /// A cipher operation failed (bad input length, backend failure).
    #[error("cipher operation failed")]
    Cipher,

    /// The random source failed to produce bytes.
    #[error("random source failure")]
    Rng,

    /// No registered callback matched the dispatched packet name.
    #[error("no registered callback matched the packet name")]
    NoMatchedCallback,

    /// The application face callback table has no free slot.
    #[error("application face callback table is full")]
    AppFaceCbTableFull,

    /// A dispatched packet arrived without a decoded name.
    #[error("packet name is missing or invalid")]
    InvalidNameSize,
}

impl Error {
    /// Stable integer code for this error kind. Codes are negative and never
    /// reused; crypto backend failures occupy the -2x range, face dispatch
    /// the -3x range.
    pub const fn code(self) -> i32 {
        match self {
            Error::Oversize => -10,
            Error::WrongTlvType => -11,
            Error::NameInvalidFormat => -12,
            Error::UnsupportedSignType => -20,
            Error::WrongSigSize => -21,
            Error::KeyImport => -22,
            Error::Signing => -23,
            Error::SigVerification => -24,
            Error::Cipher => -25,
            Error::Rng => -26,
            Error::NoMatchedCallback => -30,
            Error::AppFaceCbTableFull => -31,
            Error::InvalidNameSize => -32,
        }
    }
}
