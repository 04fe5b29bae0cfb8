use crate::{
    key_stream::{KeyStream, AES128CM},
    profile::SrtpProfile,
    utils::{slice_to_left_array, slice_to_right_array},
    Error,
};

/// Length of the master key (and the session key) in bytes.
pub const KEY_LEN: usize = 16;

/// Length of the master salt (and the session salt) in bytes.
pub const SALT_LEN: usize = 14;

/// Session encryption key label.
const LABEL_ENCRYPTION: u8 = 0x00;

/// Session salt label.
const LABEL_SALT: u8 = 0x02;

/// Master key.
pub struct MasterKey {
    key: [u8; KEY_LEN],
    salt: [u8; SALT_LEN],
}

impl MasterKey {
    /// Create a new master key.
    ///
    /// The lengths of the key and the salt are checked against a given
    /// profile.
    pub fn new(profile: SrtpProfile, key: &[u8], salt: &[u8]) -> Result<Self, Error> {
        let expected_key_len = (profile.master_key_len() >> 3) as usize;
        let expected_salt_len = (profile.master_salt_len() >> 3) as usize;

        if key.len() != expected_key_len || key.len() != KEY_LEN {
            return Err(Error::InvalidMasterKeyLength {
                expected: expected_key_len,
                actual: key.len(),
            });
        }

        if salt.len() != expected_salt_len || salt.len() != SALT_LEN {
            return Err(Error::InvalidMasterSaltLength {
                expected: expected_salt_len,
                actual: salt.len(),
            });
        }

        let res = Self {
            key: slice_to_right_array(key),
            salt: slice_to_right_array(salt),
        };

        Ok(res)
    }

    /// Derive the session encryption key.
    pub fn derive_session_key(&self) -> Result<[u8; KEY_LEN], Error> {
        self.derive(LABEL_ENCRYPTION)
    }

    /// Derive the session salt.
    ///
    /// The salt is the first 112 bits of the PRF output.
    pub fn derive_session_salt(&self) -> Result<[u8; SALT_LEN], Error> {
        let block = self.derive(LABEL_SALT)?;

        Ok(slice_to_left_array(&block))
    }

    /// Derive one block of key material for a given label as defined in
    /// RFC 3711, section 4.3.
    ///
    /// The key derivation rate is always zero, so the "index DIV kdr" part of
    /// the key ID is zero as well.
    fn derive(&self, label: u8) -> Result<[u8; 16], Error> {
        let x = u128::from_be_bytes(slice_to_right_array(&self.salt)) ^ ((label as u128) << 48);

        self.prf_aes_128_cm(x)
    }

    /// Generate one block using the AES 128 CM based pseudo-random function.
    fn prf_aes_128_cm(&self, x: u128) -> Result<[u8; 16], Error> {
        let iv = u128::to_be_bytes(x << 16);

        let mut output = [0u8; 16];

        let mut ks = AES128CM::new(&self.key, &iv)?;

        ks.take(&mut output)?;

        Ok(output)
    }
}
