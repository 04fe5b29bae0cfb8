use crate::{
    counter::generate_counter,
    key::{MasterKey, SALT_LEN},
    key_stream::{KeyStream, AES128CM},
    log::Logger,
    packet::RtpPacket,
    profile::{SrtpProfile, SrtpProfileId},
    rollover::{RolloverAdjustment, RolloverCounter, DEFAULT_MAX_DISORDER},
    DecryptionError, Error,
};

/// Crypto context builder.
pub struct CryptoContextBuilder {
    logger: Logger,
    profile: SrtpProfileId,
    max_disorder: u16,
}

impl CryptoContextBuilder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            #[cfg(feature = "slog")]
            logger: Logger::root(slog::Discard, slog::o!()),
            #[cfg(not(feature = "slog"))]
            logger: Logger,
            profile: SrtpProfileId::default(),
            max_disorder: DEFAULT_MAX_DISORDER,
        }
    }

    /// Use a given logger.
    #[cfg(feature = "slog")]
    #[inline]
    pub fn logger(&mut self, logger: Logger) -> &mut Self {
        self.logger = logger;
        self
    }

    /// Set the SRTP protection profile.
    ///
    /// The profile determines the length of the authentication tag. The
    /// default is `SRTP_AES128_CM_SHA1_80`.
    #[inline]
    pub fn profile(&mut self, profile: SrtpProfileId) -> &mut Self {
        self.profile = profile;
        self
    }

    /// Set the maximum number of packets by which the incoming packets can be
    /// reordered around the sequence number wrap. The default is 100.
    ///
    /// # Panics
    /// The method panics if the value is not less than 32768.
    #[inline]
    pub fn max_rollover_disorder(&mut self, max_disorder: u16) -> &mut Self {
        assert!(max_disorder < 0x8000);

        self.max_disorder = max_disorder;
        self
    }

    /// Create a new crypto context from a given master key and master salt.
    pub fn build(&self, master_key: &[u8], master_salt: &[u8]) -> Result<CryptoContext, Error> {
        let profile = SrtpProfile::from(self.profile);

        let master_key = MasterKey::new(profile, master_key, master_salt)?;

        let session_key = master_key.derive_session_key()?;
        let session_salt = master_key.derive_session_salt()?;

        let key_stream = AES128CM::new(&session_key, &[0u8; 16])?;

        debug!(self.logger, "SRTP crypto context created"; "profile" => %profile.id());

        let res = CryptoContext {
            logger: self.logger.clone(),
            profile,
            ssrc: None,
            rollover: RolloverCounter::new(self.max_disorder),
            session_salt,
            key_stream,
        };

        Ok(res)
    }
}

/// Receive-side SRTP crypto context for a single stream.
///
/// The context is bound to the SSRC of the first packet it decrypts and
/// rejects packets from other streams afterwards. Authentication tags are
/// removed from the decrypted packets but they are NOT verified.
pub struct CryptoContext {
    logger: Logger,
    profile: SrtpProfile,
    ssrc: Option<u32>,
    rollover: RolloverCounter,
    session_salt: [u8; SALT_LEN],
    key_stream: AES128CM,
}

impl CryptoContext {
    /// Get a crypto context builder.
    #[inline]
    pub fn builder() -> CryptoContextBuilder {
        CryptoContextBuilder::new()
    }

    /// Create a new crypto context from a given master key and master salt
    /// using the default parameters.
    #[inline]
    pub fn new(master_key: &[u8], master_salt: &[u8]) -> Result<Self, Error> {
        Self::builder().build(master_key, master_salt)
    }

    /// Get the SRTP profile.
    #[inline]
    pub fn profile(&self) -> SrtpProfileId {
        self.profile.id()
    }

    /// Get the SSRC this context is bound to (if any).
    #[inline]
    pub fn ssrc(&self) -> Option<u32> {
        self.ssrc
    }

    /// Get the current rollover counter.
    #[inline]
    pub fn rollover_counter(&self) -> u32 {
        self.rollover.value()
    }

    /// Get the last processed sequence number (if any).
    #[inline]
    pub fn last_sequence_number(&self) -> Option<u16> {
        self.rollover.last_sequence_number()
    }

    /// Decrypt a given packet in place.
    ///
    /// The authentication tag is removed from the payload and the raw frame
    /// is rebuilt from the original header and the decrypted payload. The
    /// context state is left untouched if the packet is rejected because of
    /// the SSRC or because it is shorter than the authentication tag.
    pub fn decrypt(&mut self, packet: &mut RtpPacket) -> Result<(), DecryptionError> {
        let ssrc = packet.ssrc();

        if let Some(expected) = self.ssrc {
            if expected != ssrc {
                warn!(self.logger, "packet from an unexpected stream"; "expected" => expected, "actual" => ssrc);

                return Err(DecryptionError::StreamMismatch {
                    expected,
                    actual: ssrc,
                });
            }
        }

        let auth_tag_len = (self.profile.rtp_auth_tag_len() >> 3) as usize;

        if packet.payload().len() < auth_tag_len {
            warn!(self.logger, "payload shorter than authentication tag"; "len" => packet.payload().len());

            return Err(DecryptionError::InvalidInput);
        }

        if self.ssrc.is_none() {
            debug!(self.logger, "crypto context bound to a stream"; "ssrc" => ssrc);

            self.ssrc = Some(ssrc);
        }

        let seq = packet.sequence_number();

        let adjustment = self.rollover.update(seq);

        if adjustment != RolloverAdjustment::None {
            trace!(self.logger, "rollover counter adjusted"; "roc" => self.rollover.value(), "seq" => seq);
        }

        let counter = generate_counter(ssrc, self.rollover.value(), seq, &self.session_salt);

        // TODO: verify the tag using the session authentication key (label
        // 0x01) before decrypting
        packet.truncate_payload(auth_tag_len);

        self.key_stream.reset(&counter)?;
        self.key_stream.xor(packet.payload_mut())?;

        packet.sync_raw();

        Ok(())
    }

    /// Decrypt a given packet in place and report success.
    ///
    /// This is a shortcut for [`CryptoContext::decrypt`] that drops the
    /// failure reason.
    #[inline]
    pub fn decrypt_packet(&mut self, packet: &mut RtpPacket) -> bool {
        self.decrypt(packet).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::CryptoContext;

    use crate::{
        counter::generate_counter,
        key::MasterKey,
        key_stream::{KeyStream, AES128CM},
        packet::RtpPacket,
        profile::{SrtpProfile, SrtpProfileId},
        DecryptionError, Error,
    };

    const MASTER_KEY: [u8; 16] = [
        0xe1, 0xf9, 0x7a, 0x0d, 0x3e, 0x01, 0x8b, 0xe0, 0xd6, 0x4f, 0xa3, 0x2c, 0x06, 0xde, 0x41,
        0x39,
    ];

    const MASTER_SALT: [u8; 14] = [
        0x0e, 0xc6, 0x75, 0xad, 0x49, 0x8a, 0xfe, 0xeb, 0xb6, 0x96, 0x0b, 0x3a, 0xab, 0xe6,
    ];

    /// Build an SRTP frame carrying a given plaintext encrypted for a given
    /// SSRC, ROC and sequence number, followed by a dummy authentication tag.
    fn make_frame(ssrc: u32, roc: u32, seq: u16, plaintext: &[u8], tag_len: usize) -> Vec<u8> {
        let master_key =
            MasterKey::new(SrtpProfile::default(), &MASTER_KEY, &MASTER_SALT).unwrap();

        let session_key = master_key.derive_session_key().unwrap();
        let session_salt = master_key.derive_session_salt().unwrap();

        let counter = generate_counter(ssrc, roc, seq, &session_salt);

        let mut payload = plaintext.to_vec();

        AES128CM::new(&session_key, &counter)
            .unwrap()
            .xor(&mut payload)
            .unwrap();

        let mut frame = vec![0x80, 0x60];

        frame.extend_from_slice(&seq.to_be_bytes());
        frame.extend_from_slice(&[0, 0, 0x12, 0x34]);
        frame.extend_from_slice(&ssrc.to_be_bytes());
        frame.extend_from_slice(&payload);
        frame.extend(std::iter::repeat(0xee).take(tag_len));

        frame
    }

    fn make_packet(ssrc: u32, seq: u16, plaintext: &[u8]) -> RtpPacket {
        RtpPacket::decode(&make_frame(ssrc, 0, seq, plaintext, 10)).unwrap()
    }

    #[test]
    fn test_context_construction() {
        assert!(CryptoContext::new(&MASTER_KEY, &MASTER_SALT).is_ok());

        for len in [15, 17] {
            let res = CryptoContext::new(&vec![0u8; len], &MASTER_SALT);

            assert!(matches!(res, Err(Error::InvalidMasterKeyLength { .. })));
        }

        for len in [13, 15] {
            let res = CryptoContext::new(&MASTER_KEY, &vec![0u8; len]);

            assert!(matches!(res, Err(Error::InvalidMasterSaltLength { .. })));
        }
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut a = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();
        let mut b = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        assert_eq!(a.session_salt, b.session_salt);

        let frame = make_frame(7, 0, 100, b"deterministic", 10);

        let mut pa = RtpPacket::decode(&frame).unwrap();
        let mut pb = RtpPacket::decode(&frame).unwrap();

        assert!(a.decrypt_packet(&mut pa));
        assert!(b.decrypt_packet(&mut pb));

        assert_eq!(pa.payload(), b"deterministic");
        assert_eq!(pa.raw(), pb.raw());
    }

    #[test]
    fn test_round_trip() {
        let mut context = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        let plaintext = (0..200u8).collect::<Vec<_>>();

        let frame = make_frame(0xcafe_babe, 0, 4242, &plaintext, 10);

        let mut packet = RtpPacket::decode(&frame).unwrap();

        assert!(context.decrypt_packet(&mut packet));

        assert_eq!(packet.payload(), &plaintext[..]);
        assert_eq!(packet.raw().len(), 12 + plaintext.len());
        assert_eq!(&packet.raw()[..12], &frame[..12]);
        assert_eq!(&packet.raw()[12..], &plaintext[..]);
    }

    #[test]
    fn test_round_trip_across_wrap() {
        let mut context = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        let packets = [(0, 65534), (0, 65535), (1, 0), (0, 65533), (1, 1)];

        for (roc, seq) in packets {
            let plaintext = format!("packet {}:{}", roc, seq);

            let frame = make_frame(1, roc, seq, plaintext.as_bytes(), 10);

            let mut packet = RtpPacket::decode(&frame).unwrap();

            assert!(context.decrypt_packet(&mut packet));
            assert_eq!(context.rollover_counter(), roc);
            assert_eq!(packet.payload(), plaintext.as_bytes());
        }
    }

    #[test]
    fn test_short_auth_tag_profile() {
        let mut context = CryptoContext::builder()
            .profile(SrtpProfileId::SRTP_AES128_CM_SHA1_32)
            .build(&MASTER_KEY, &MASTER_SALT)
            .unwrap();

        assert_eq!(context.profile(), SrtpProfileId::SRTP_AES128_CM_SHA1_32);

        let frame = make_frame(3, 0, 9, b"short tag", 4);

        let mut packet = RtpPacket::decode(&frame).unwrap();

        assert!(context.decrypt_packet(&mut packet));
        assert_eq!(packet.payload(), b"short tag");
    }

    #[test]
    fn test_payload_shorter_than_tag() {
        let mut context = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        let frame = [0x80, 0x60, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2, 3];

        let mut packet = RtpPacket::decode(&frame).unwrap();

        assert!(matches!(
            context.decrypt(&mut packet),
            Err(DecryptionError::InvalidInput)
        ));

        assert_eq!(context.ssrc(), None);
        assert_eq!(context.last_sequence_number(), None);
        assert_eq!(packet.raw(), &frame[..]);
    }

    #[test]
    fn test_stream_mismatch() {
        let mut context = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        let mut packet = make_packet(1, 65500, b"first");

        assert!(context.decrypt_packet(&mut packet));

        let mut packet = make_packet(2, 10, b"other");

        let raw = packet.raw().to_vec();

        assert!(matches!(
            context.decrypt(&mut packet),
            Err(DecryptionError::StreamMismatch {
                expected: 1,
                actual: 2
            })
        ));

        assert_eq!(context.ssrc(), Some(1));
        assert_eq!(context.last_sequence_number(), Some(65500));
        assert_eq!(context.rollover_counter(), 0);
        assert_eq!(packet.raw(), &raw[..]);
    }

    #[test]
    fn test_stream_scenario() {
        let mut context = CryptoContext::new(&MASTER_KEY, &MASTER_SALT).unwrap();

        let first = [0x11u8; 16];
        let second = [0x22u8; 16];

        let mut packet = make_packet(1000, 5, &first);

        assert_eq!(packet.payload().len(), 26);
        assert!(context.decrypt_packet(&mut packet));
        assert_eq!(packet.payload(), &first);
        assert_eq!(context.ssrc(), Some(1000));

        let mut packet = make_packet(1000, 6, &second);

        assert!(context.decrypt_packet(&mut packet));
        assert_eq!(packet.payload(), &second);

        let mut packet = make_packet(2000, 7, &second);

        assert!(!context.decrypt_packet(&mut packet));
        assert_eq!(packet.payload().len(), 26);

        assert_eq!(context.ssrc(), Some(1000));
        assert_eq!(context.last_sequence_number(), Some(6));
        assert_eq!(context.rollover_counter(), 0);
    }
}
