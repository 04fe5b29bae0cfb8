use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Unknown SRTP profile.
#[derive(Debug, Copy, Clone)]
pub struct UnknownProfile;

impl Display for UnknownProfile {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("unknown SRTP profile")
    }
}

impl std::error::Error for UnknownProfile {}

/// SRTP profile ID.
///
/// Only the AES counter mode profiles are supported.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum SrtpProfileId {
    #[default]
    SRTP_AES128_CM_SHA1_80,
    SRTP_AES128_CM_SHA1_32,
}

impl Display for SrtpProfileId {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let id = match self {
            Self::SRTP_AES128_CM_SHA1_80 => "SRTP_AES128_CM_SHA1_80",
            Self::SRTP_AES128_CM_SHA1_32 => "SRTP_AES128_CM_SHA1_32",
        };

        f.write_str(id)
    }
}

impl FromStr for SrtpProfileId {
    type Err = UnknownProfile;

    /// Parse a profile ID from either its DTLS-SRTP name (RFC 5764) or its
    /// SDES crypto-suite name (RFC 4568).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let res = match s {
            "SRTP_AES128_CM_SHA1_80" | "AES_CM_128_HMAC_SHA1_80" => Self::SRTP_AES128_CM_SHA1_80,
            "SRTP_AES128_CM_SHA1_32" | "AES_CM_128_HMAC_SHA1_32" => Self::SRTP_AES128_CM_SHA1_32,
            _ => return Err(UnknownProfile),
        };

        Ok(res)
    }
}

/// SRTP profile information.
#[derive(Copy, Clone)]
pub struct SrtpProfile {
    inner: &'static InnerProfileParameters,
}

impl SrtpProfile {
    /// Get SRTP profile ID.
    #[inline]
    pub fn id(&self) -> SrtpProfileId {
        self.inner.id
    }

    /// Get length of the master key in bits.
    #[inline]
    pub fn master_key_len(&self) -> u32 {
        self.inner.master_key_len
    }

    /// Get length of the master salt in bits.
    #[inline]
    pub fn master_salt_len(&self) -> u32 {
        self.inner.master_salt_len
    }

    /// Get length of the RTP authentication tag in bits.
    #[inline]
    pub fn rtp_auth_tag_len(&self) -> u32 {
        self.inner.rtp_auth_tag_len
    }
}

impl Default for SrtpProfile {
    #[inline]
    fn default() -> Self {
        Self::from(SrtpProfileId::default())
    }
}

impl From<SrtpProfileId> for SrtpProfile {
    fn from(id: SrtpProfileId) -> Self {
        let params = match id {
            SrtpProfileId::SRTP_AES128_CM_SHA1_80 => &PARAMS_SRTP_AES128_CM_SHA1_80,
            SrtpProfileId::SRTP_AES128_CM_SHA1_32 => &PARAMS_SRTP_AES128_CM_SHA1_32,
        };

        Self { inner: params }
    }
}

/// Helper struct.
struct InnerProfileParameters {
    id: SrtpProfileId,
    master_key_len: u32,
    master_salt_len: u32,
    rtp_auth_tag_len: u32,
}

impl InnerProfileParameters {
    /// Construct profile parameters for a given SRTP profile ID.
    const fn new(id: SrtpProfileId) -> Self {
        let mut res = Self {
            id,
            master_key_len: 128,
            master_salt_len: 112,
            rtp_auth_tag_len: 80,
        };

        if let SrtpProfileId::SRTP_AES128_CM_SHA1_32 = id {
            res.rtp_auth_tag_len = 32;
        }

        res
    }
}

static PARAMS_SRTP_AES128_CM_SHA1_80: InnerProfileParameters =
    InnerProfileParameters::new(SrtpProfileId::SRTP_AES128_CM_SHA1_80);
static PARAMS_SRTP_AES128_CM_SHA1_32: InnerProfileParameters =
    InnerProfileParameters::new(SrtpProfileId::SRTP_AES128_CM_SHA1_32);
