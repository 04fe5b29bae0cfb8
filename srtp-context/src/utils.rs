//! Byte array helpers.

/// Create a right-aligned array from a given slice.
///
/// If the slice is shorter than the length of the target array, the data will
/// be right-aligned in the output. Otherwise, only the rightmost part of the
/// slice will be copied to fill the target array.
pub fn slice_to_right_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut res = [0u8; N];

    let src_len = slice.len();
    let copy = src_len.min(N);
    let src_start = src_len - copy;
    let dst_start = N - copy;

    res[dst_start..].copy_from_slice(&slice[src_start..]);

    res
}

/// Create a left-aligned array from a given slice.
///
/// Only the leftmost `N` bytes are copied. Missing bytes are zero.
pub fn slice_to_left_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut res = [0u8; N];

    let copy = slice.len().min(N);

    res[..copy].copy_from_slice(&slice[..copy]);

    res
}
