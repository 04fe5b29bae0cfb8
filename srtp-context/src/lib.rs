//! Receive-side SRTP crypto context as defined in RFC 3711.
//!
//! The crate decrypts SRTP packets protected by AES-128 in counter mode. One
//! [`CryptoContext`] handles exactly one stream (SSRC). The context derives
//! the session key and salt from a master key/salt pair once (the key
//! derivation rate is always zero), tracks the rollover counter of the
//! stream and decrypts packets in place.
//!
//! Authentication tags are stripped, but they are NOT verified.
//!
//! # Usage example
//! ```ignore
//! use srtp_context::{CryptoContext, RtpPacket};
//!
//! // master key and salt, e.g. from SDES or DTLS-SRTP
//! let master_key = [0u8; 16];
//! let master_salt = [0u8; 14];
//!
//! let mut context = CryptoContext::new(&master_key, &master_salt)?;
//!
//! // an SRTP frame received from the network
//! let frame = ...;
//!
//! let mut packet = RtpPacket::decode(&frame)?;
//!
//! if context.decrypt_packet(&mut packet) {
//!     let plaintext = packet.payload();
//! }
//! ```

#[macro_use]
mod log;

mod context;
mod counter;
mod key;
mod key_stream;
mod packet;
mod profile;
mod utils;

pub mod rollover;

use std::fmt::{self, Display, Formatter};

pub use self::{
    context::{CryptoContext, CryptoContextBuilder},
    counter::generate_counter,
    packet::RtpPacket,
    profile::{SrtpProfileId, UnknownProfile},
};

#[cfg(feature = "slog")]
pub use self::log::Logger;

/// Invalid input.
#[derive(Debug, Copy, Clone)]
pub struct InvalidInput;

impl InvalidInput {
    /// Create a new error.
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Display for InvalidInput {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("invalid input")
    }
}

impl std::error::Error for InvalidInput {}

impl Default for InvalidInput {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Crypto context construction error.
#[derive(Debug)]
pub enum Error {
    /// The master key does not have the expected length (in bytes).
    InvalidMasterKeyLength { expected: usize, actual: usize },
    /// The master salt does not have the expected length (in bytes).
    InvalidMasterSaltLength { expected: usize, actual: usize },
    /// The cipher could not be initialized.
    OpenSslError(openssl::error::ErrorStack),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidMasterKeyLength { expected, actual } => write!(
                f,
                "invalid master key length (expected {}, got {})",
                expected, actual
            ),
            Self::InvalidMasterSaltLength { expected, actual } => write!(
                f,
                "invalid master salt length (expected {}, got {})",
                expected, actual
            ),
            Self::OpenSslError(err) => write!(f, "SSL error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenSslError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<openssl::error::ErrorStack> for Error {
    #[inline]
    fn from(err: openssl::error::ErrorStack) -> Self {
        Self::OpenSslError(err)
    }
}

/// Packet decryption error.
#[derive(Debug)]
pub enum DecryptionError {
    /// The packet belongs to a different stream than the one the context is
    /// bound to.
    StreamMismatch { expected: u32, actual: u32 },
    /// The payload is shorter than the authentication tag.
    InvalidInput,
    /// The cipher failed.
    OpenSslError(openssl::error::ErrorStack),
}

impl Display for DecryptionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::StreamMismatch { expected, actual } => write!(
                f,
                "SSRC mismatch (expected {:08x}, got {:08x})",
                expected, actual
            ),
            Self::InvalidInput => f.write_str("invalid input"),
            Self::OpenSslError(err) => write!(f, "SSL error: {}", err),
        }
    }
}

impl std::error::Error for DecryptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenSslError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<openssl::error::ErrorStack> for DecryptionError {
    #[inline]
    fn from(err: openssl::error::ErrorStack) -> Self {
        Self::OpenSslError(err)
    }
}

impl From<InvalidInput> for DecryptionError {
    #[inline]
    fn from(_: InvalidInput) -> Self {
        Self::InvalidInput
    }
}
