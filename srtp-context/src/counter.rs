use crate::{key::SALT_LEN, utils::slice_to_right_array};

/// Generate the initial AES-CM counter block for a given packet as defined in
/// RFC 3711, section 4.1.1.
///
/// ```text
/// IV = (k_s * 2^16) XOR (SSRC * 2^64) XOR (i * 2^16)
/// i  = ROC * 2^16 + SEQ
/// ```
pub fn generate_counter(ssrc: u32, roc: u32, seq: u16, salt: &[u8; SALT_LEN]) -> [u8; 16] {
    let index = ((roc as u64) << 16) | (seq as u64);

    let iv = (u128::from_be_bytes(slice_to_right_array(salt)) << 16)
        ^ ((ssrc as u128) << 64)
        ^ ((index as u128) << 16);

    iv.to_be_bytes()
}
