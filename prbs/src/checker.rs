use log::debug;

use crate::pattern::Pattern;
use crate::PrbsError;

/// Synchronization state of a [`Checker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BertState {
    Search,
    Locked,
}

/// Self-synchronizing bit-error-rate checker.
///
/// While searching, received bits are shifted straight into the
/// register, so the register becomes a window onto the stream; a run of
/// `4 * register_length` consecutive correct feedback predictions
/// declares lock. While locked the register free-runs on its own
/// feedback and every disagreement with the stream counts as a bit
/// error, charging a leaky penalty score that correct bits drain; if
/// the score climbs past the same `4 * register_length` bound, lock is
/// dropped and a sync slip recorded.
#[derive(Debug, Clone)]
pub struct Checker {
    reg: u64,
    reg_mask: u64,
    fb_mask: u64,
    reg_len_bits: u32,
    state: BertState,
    sync_score: u64,
    bits_rx: u64,
    bits_rx_locked: u64,
    bit_errors: u64,
    sync_slips: u64,
}

impl Checker {
    pub fn new(pattern: Pattern) -> Result<Self, PrbsError> {
        let info = pattern.info();
        if info.reg_len_bits == 0 {
            return Err(PrbsError::Unseeded(info.name));
        }
        Self::from_registers(info.reg, info.reg_mask, info.fb_mask, info.reg_len_bits)
    }

    pub fn from_registers(
        reg: u64,
        reg_mask: u64,
        fb_mask: u64,
        reg_len_bits: u32,
    ) -> Result<Self, PrbsError> {
        if reg_len_bits < 1 || reg_len_bits > 63 {
            return Err(PrbsError::InvalidRegisterLength(reg_len_bits));
        }
        Ok(Self {
            reg: reg & reg_mask,
            reg_mask,
            fb_mask,
            reg_len_bits,
            state: BertState::Search,
            sync_score: 0,
            bits_rx: 0,
            bits_rx_locked: 0,
            bit_errors: 0,
            sync_slips: 0,
        })
    }

    pub fn state(&self) -> BertState {
        self.state
    }

    pub fn bits_rx(&self) -> u64 {
        self.bits_rx
    }

    pub fn bits_rx_locked(&self) -> u64 {
        self.bits_rx_locked
    }

    pub fn bit_errors(&self) -> u64 {
        self.bit_errors
    }

    pub fn sync_slips(&self) -> u64 {
        self.sync_slips
    }

    /// Bit-error rate over the locked portion of the stream, or NaN if
    /// lock was never achieved.
    pub fn ber(&self) -> f64 {
        if self.bits_rx_locked == 0 {
            return f64::NAN;
        }
        self.bit_errors as f64 / self.bits_rx_locked as f64
    }

    /// Zero all statistics and drop back to searching.
    pub fn reset_stats(&mut self) {
        self.state = BertState::Search;
        self.sync_score = 0;
        self.bits_rx = 0;
        self.bits_rx_locked = 0;
        self.bit_errors = 0;
        self.sync_slips = 0;
    }

    /// Run one received bit through the checker.
    pub fn check_bit(&mut self, bit: u8) {
        let bit = bit & 1;
        self.bits_rx += 1;

        let predicted = ((self.reg & self.fb_mask).count_ones() & 1) as u8;
        self.reg <<= 1;
        let lock_bound = 4 * self.reg_len_bits as u64;

        match self.state {
            BertState::Locked => {
                self.bits_rx_locked += 1;
                // Free-run on our own feedback while locked.
                self.reg |= predicted as u64;
                if bit == predicted {
                    self.sync_score = self.sync_score.saturating_sub(1);
                } else {
                    self.sync_score += 1;
                    self.bit_errors += 1;
                }
                if self.sync_score > lock_bound {
                    self.sync_score = 0;
                    self.state = BertState::Search;
                    self.sync_slips += 1;
                    debug!("pattern lock lost after {} bits", self.bits_rx);
                }
            }
            BertState::Search => {
                // Track the stream itself until the predictions line up.
                self.reg |= bit as u64;
                if bit == predicted {
                    self.sync_score += 1;
                } else {
                    self.sync_score = 0;
                }
                if self.sync_score > lock_bound {
                    self.sync_score = 0;
                    self.state = BertState::Locked;
                    debug!("pattern lock acquired after {} bits", self.bits_rx);
                }
            }
        }

        self.reg &= self.reg_mask;
    }

    /// Check a buffer of MSB-first bytes.
    pub fn check(&mut self, buffer: &[u8]) {
        for &byte in buffer {
            for bit_idx in 0..8 {
                self.check_bit((byte >> (7 - bit_idx)) & 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    fn generated(pattern: Pattern, bytes: usize) -> Vec<u8> {
        let mut generator = Generator::new(pattern).unwrap();
        let mut buffer = vec![0u8; bytes];
        generator.fill(&mut buffer);
        buffer
    }

    #[test]
    fn locks_to_clean_stream() {
        let data = generated(Pattern::ItuPn9, 512);
        let mut checker = Checker::new(Pattern::ItuPn9).unwrap();
        checker.check(&data);
        assert_eq!(checker.state(), BertState::Locked);
        assert_eq!(checker.bit_errors(), 0);
        assert_eq!(checker.sync_slips(), 0);
        assert_eq!(checker.ber(), 0.0);
    }

    #[test]
    fn counts_isolated_bit_errors() {
        let mut data = generated(Pattern::ItuPn11, 1024);
        // Flip a few bits well after the lock run completes.
        data[600] ^= 0x10;
        data[700] ^= 0x01;
        data[800] ^= 0x80;
        let mut checker = Checker::new(Pattern::ItuPn11).unwrap();
        checker.check(&data);
        assert_eq!(checker.state(), BertState::Locked);
        assert_eq!(checker.bit_errors(), 3);
        assert_eq!(checker.sync_slips(), 0);
        let expected = 3.0 / checker.bits_rx_locked() as f64;
        assert!((checker.ber() - expected).abs() < 1e-15);
    }

    #[test]
    fn slips_and_relocks_on_stream_break() {
        // Invert a stretch of the stream so every locked prediction
        // misses, then let the clean pattern resume.
        let mut generator = Generator::new(Pattern::ItuPn9).unwrap();
        let mut stream = vec![0u8; 64];
        generator.fill(&mut stream);
        let mut inverted = vec![0u8; 64];
        generator.fill(&mut inverted);
        stream.extend(inverted.iter().map(|&b| !b));
        let mut tail = vec![0u8; 256];
        generator.fill(&mut tail);
        stream.extend(tail);

        let mut checker = Checker::new(Pattern::ItuPn9).unwrap();
        checker.check(&stream);
        assert_eq!(checker.sync_slips(), 1);
        assert_eq!(checker.state(), BertState::Locked);
    }

    #[test]
    fn ber_is_nan_before_lock() {
        let checker = Checker::new(Pattern::ItuPn15).unwrap();
        assert!(checker.ber().is_nan());
    }

    #[test]
    fn reset_clears_statistics() {
        let data = generated(Pattern::ItuPn9, 64);
        let mut checker = Checker::new(Pattern::ItuPn9).unwrap();
        checker.check(&data);
        assert!(checker.bits_rx() > 0);
        checker.reset_stats();
        assert_eq!(checker.bits_rx(), 0);
        assert_eq!(checker.state(), BertState::Search);
        assert!(checker.ber().is_nan());
    }
}
