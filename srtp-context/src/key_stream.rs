use openssl::{cipher::Cipher, cipher_ctx::CipherCtx, error::ErrorStack};

/// Key stream.
pub trait KeyStream {
    /// Fill a given buffer with key-stream data.
    fn take(&mut self, output: &mut [u8]) -> Result<(), ErrorStack>;

    /// XOR key-stream data onto a given buffer in place.
    fn xor(&mut self, data: &mut [u8]) -> Result<(), ErrorStack> {
        let mut buf = [0u8; 128];

        for chunk in data.chunks_mut(buf.len()) {
            let ks = &mut buf[..chunk.len()];

            self.take(ks)?;

            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= *k;
            }
        }

        Ok(())
    }
}

/// AES 128 CM key-stream.
///
/// The cipher context is keyed once. Every call to `reset` restarts the
/// key-stream from a new initial counter block without re-keying.
pub struct AES128CM {
    ctx: CipherCtx,
    input: [u8; 128],
    buffer: [u8; 144],
    available: usize,
    offset: usize,
}

impl AES128CM {
    /// Create a new AES 128 CM key-stream using a given key and an initial
    /// counter block.
    pub fn new(key: &[u8; 16], iv: &[u8; 16]) -> Result<Self, ErrorStack> {
        let mut ctx = CipherCtx::new()?;

        ctx.encrypt_init(Some(Cipher::aes_128_ctr()), Some(&key[..]), Some(&iv[..]))?;

        let res = Self {
            ctx,
            input: [0u8; 128],
            buffer: [0u8; 144],
            available: 0,
            offset: 0,
        };

        Ok(res)
    }

    /// Restart the key-stream from a given initial counter block.
    pub fn reset(&mut self, iv: &[u8; 16]) -> Result<(), ErrorStack> {
        self.ctx.encrypt_init(None, None, Some(&iv[..]))?;

        self.available = 0;
        self.offset = 0;

        Ok(())
    }
}

impl KeyStream for AES128CM {
    fn take(&mut self, output: &mut [u8]) -> Result<(), ErrorStack> {
        let output_len = output.len();

        let mut output_offset = 0;

        while output_offset < output_len {
            let remaining = output_len - output_offset;

            if self.available == 0 {
                let max = self.input.len();

                // whole blocks only, a reset must not leave a partially used
                // counter block inside the cipher context
                let len = max.min((remaining + 15) & !15);

                let len = self
                    .ctx
                    .cipher_update(&self.input[..len], Some(&mut self.buffer[..]))?;

                self.offset = 0;
                self.available = len;
            }

            let take = self.available.min(remaining);

            let src = &self.buffer[self.offset..self.offset + take];
            let dst = &mut output[output_offset..output_offset + take];

            dst.copy_from_slice(src);

            output_offset += take;

            self.available -= take;
            self.offset += take;
        }

        Ok(())
    }
}
