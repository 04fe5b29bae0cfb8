//! Rollover counter tracking.
//!
//! The 16-bit RTP sequence number wraps every 65536 packets. The rollover
//! counter (ROC) counts the wraps and together with the sequence number it
//! forms the 48-bit SRTP packet index. Packets near the wrap boundary are
//! ambiguous, so the tracker assumes that reordering never exceeds a given
//! number of packets (the maximum disorder).

/// Default maximum disorder.
pub const DEFAULT_MAX_DISORDER: u16 = 100;

/// Change of the rollover counter caused by a single sequence number.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RolloverAdjustment {
    None,
    Increment,
    Decrement,
}

/// Get the rollover counter adjustment for a given sequence number.
///
/// `last` is the previously accepted sequence number. The function never
/// fails. If the reordering exceeds the maximum disorder, the result is
/// simply wrong.
pub fn rollover_adjustment(last: u16, seq: u16, max_disorder: u16) -> RolloverAdjustment {
    let high = u16::MAX - max_disorder;

    if seq == 0 {
        // a low sequence number that came before zero has already been
        // counted
        if last > max_disorder {
            RolloverAdjustment::Increment
        } else {
            RolloverAdjustment::None
        }
    } else if last < max_disorder && seq > high {
        // a late packet from the previous cycle
        RolloverAdjustment::Decrement
    } else if seq < max_disorder && last > high {
        RolloverAdjustment::Increment
    } else {
        RolloverAdjustment::None
    }
}

/// Rollover counter tracker.
#[derive(Debug, Clone)]
pub struct RolloverCounter {
    roc: u32,
    last: Option<u16>,
    max_disorder: u16,
}

impl RolloverCounter {
    /// Create a new tracker with a given maximum disorder.
    ///
    /// # Panics
    /// The method panics if the maximum disorder is not less than 32768.
    #[inline]
    pub fn new(max_disorder: u16) -> Self {
        assert!(max_disorder < 0x8000);

        Self {
            roc: 0,
            last: None,
            max_disorder,
        }
    }

    /// Process a given sequence number and return the applied adjustment.
    ///
    /// The first sequence number is accepted as is.
    pub fn update(&mut self, seq: u16) -> RolloverAdjustment {
        let adjustment = self
            .last
            .map(|last| rollover_adjustment(last, seq, self.max_disorder))
            .unwrap_or(RolloverAdjustment::None);

        // the counter is a 32-bit value modulo 2^32 (RFC 3711, section 3.3.1)
        match adjustment {
            RolloverAdjustment::None => (),
            RolloverAdjustment::Increment => self.roc = self.roc.wrapping_add(1),
            RolloverAdjustment::Decrement => self.roc = self.roc.wrapping_sub(1),
        }

        self.last = Some(seq);

        adjustment
    }

    /// Get the current value of the rollover counter.
    #[inline]
    pub fn value(&self) -> u32 {
        self.roc
    }

    /// Get the last processed sequence number (if any).
    #[inline]
    pub fn last_sequence_number(&self) -> Option<u16> {
        self.last
    }

    /// Get the packet index of the last processed sequence number.
    #[inline]
    pub fn packet_index(&self) -> Option<u64> {
        self.last.map(|seq| ((self.roc as u64) << 16) | (seq as u64))
    }

    /// Get the maximum disorder.
    #[inline]
    pub fn max_disorder(&self) -> u16 {
        self.max_disorder
    }
}

impl Default for RolloverCounter {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::{rollover_adjustment, RolloverAdjustment, RolloverCounter};

    #[test]
    fn test_adjustment_table() {
        assert_eq!(rollover_adjustment(65535, 0, 100), RolloverAdjustment::Increment);
        assert_eq!(rollover_adjustment(101, 0, 100), RolloverAdjustment::Increment);
        assert_eq!(rollover_adjustment(100, 0, 100), RolloverAdjustment::None);
        assert_eq!(rollover_adjustment(5, 0, 100), RolloverAdjustment::None);

        assert_eq!(rollover_adjustment(99, 65436, 100), RolloverAdjustment::Decrement);
        assert_eq!(rollover_adjustment(100, 65436, 100), RolloverAdjustment::None);
        assert_eq!(rollover_adjustment(99, 65435, 100), RolloverAdjustment::None);

        assert_eq!(rollover_adjustment(65436, 99, 100), RolloverAdjustment::Increment);
        assert_eq!(rollover_adjustment(65435, 99, 100), RolloverAdjustment::None);
        assert_eq!(rollover_adjustment(65436, 100, 100), RolloverAdjustment::None);

        assert_eq!(rollover_adjustment(1000, 1001, 100), RolloverAdjustment::None);
        assert_eq!(rollover_adjustment(1001, 1000, 100), RolloverAdjustment::None);
    }

    #[test]
    fn test_first_sequence_number() {
        let mut roc = RolloverCounter::default();

        assert_eq!(roc.last_sequence_number(), None);
        assert_eq!(roc.packet_index(), None);

        assert_eq!(roc.update(0), RolloverAdjustment::None);
        assert_eq!(roc.value(), 0);

        let mut roc = RolloverCounter::default();

        assert_eq!(roc.update(65535), RolloverAdjustment::None);
        assert_eq!(roc.value(), 0);
        assert_eq!(roc.last_sequence_number(), Some(65535));
    }

    #[test]
    fn test_full_cycle() {
        let mut roc = RolloverCounter::default();

        let mut increments = 0;

        for seq in 0..=u16::MAX {
            match roc.update(seq) {
                RolloverAdjustment::None => (),
                RolloverAdjustment::Increment => increments += 1,
                RolloverAdjustment::Decrement => panic!("unexpected decrement at {}", seq),
            }
        }

        assert_eq!(increments, 0);
        assert_eq!(roc.value(), 0);

        assert_eq!(roc.update(0), RolloverAdjustment::Increment);
        assert_eq!(roc.update(1), RolloverAdjustment::None);

        assert_eq!(roc.value(), 1);
        assert_eq!(roc.packet_index(), Some(0x1_0001));
    }

    #[test]
    fn test_reordered_wrap() {
        let mut roc = RolloverCounter::default();

        roc.update(65500);
        roc.update(65530);

        assert_eq!(roc.update(50), RolloverAdjustment::Increment);
        assert_eq!(roc.value(), 1);

        assert_eq!(roc.update(0), RolloverAdjustment::None);
        assert_eq!(roc.update(51), RolloverAdjustment::None);
        assert_eq!(roc.value(), 1);
    }

    #[test]
    fn test_late_packet_after_wrap() {
        let mut roc = RolloverCounter::default();

        roc.update(65500);

        assert_eq!(roc.update(50), RolloverAdjustment::Increment);
        assert_eq!(roc.value(), 1);

        assert_eq!(roc.update(65530), RolloverAdjustment::Decrement);
        assert_eq!(roc.value(), 0);
        assert_eq!(roc.packet_index(), Some(65530));

        assert_eq!(roc.update(51), RolloverAdjustment::Increment);
        assert_eq!(roc.value(), 1);
        assert_eq!(roc.packet_index(), Some(0x1_0033));
    }

    #[test]
    fn test_late_packet_before_first_wrap() {
        let mut roc = RolloverCounter::default();

        roc.update(10);

        assert_eq!(roc.update(65535), RolloverAdjustment::Decrement);
        assert_eq!(roc.value(), u32::MAX);

        assert_eq!(roc.update(11), RolloverAdjustment::Increment);
        assert_eq!(roc.value(), 0);
    }

    #[test]
    fn test_custom_max_disorder() {
        let mut roc = RolloverCounter::new(1000);

        assert_eq!(roc.max_disorder(), 1000);

        roc.update(64600);

        assert_eq!(roc.update(900), RolloverAdjustment::Increment);
        assert_eq!(roc.update(64700), RolloverAdjustment::Decrement);
        assert_eq!(roc.value(), 0);
    }
}
