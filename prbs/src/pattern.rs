/// Predefined test patterns, indexing [`PATTERN_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Placeholder for user-supplied registers; carries no seed.
    User,
    AllZeros,
    AllOnes,
    AltOneZero,
    ItuPn9,
    ItuPn11,
    ItuPn15,
    ItuPn23,
}

/// LFSR definition for one pattern.
#[derive(Debug, Clone, Copy)]
pub struct PatternInfo {
    /// Shift-register seed value.
    pub reg: u64,
    /// Mask of active register bits.
    pub reg_mask: u64,
    /// Mask of feedback taps.
    pub fb_mask: u64,
    /// Number of active register bits.
    pub reg_len_bits: u32,
    /// Display name.
    pub name: &'static str,
}

/// Register bit for an LFSR tap number (taps are 1-indexed).
const fn tap(bit_idx: u32) -> u64 {
    1 << (bit_idx - 1)
}

/// Process-wide pattern definitions, one row per [`Pattern`] variant.
pub static PATTERN_TABLE: [PatternInfo; 8] = [
    PatternInfo {
        reg: 0,
        reg_mask: 0,
        fb_mask: 0,
        reg_len_bits: 0,
        name: "user pattern",
    },
    PatternInfo {
        reg: 0,
        reg_mask: 0,
        fb_mask: 0,
        reg_len_bits: 1,
        name: "all zeros",
    },
    PatternInfo {
        reg: 1,
        reg_mask: 1,
        fb_mask: 1,
        reg_len_bits: 1,
        name: "all ones",
    },
    PatternInfo {
        reg: 0x2,
        reg_mask: 0x3,
        fb_mask: 0x2,
        reg_len_bits: 2,
        name: "alt one zero",
    },
    PatternInfo {
        reg: 0x1FF,
        reg_mask: 0x1FF,
        fb_mask: tap(9) | tap(5),
        reg_len_bits: 9,
        name: "ITU PN9",
    },
    PatternInfo {
        reg: 0x7FF,
        reg_mask: 0x7FF,
        fb_mask: tap(11) | tap(9),
        reg_len_bits: 11,
        name: "ITU PN11",
    },
    PatternInfo {
        reg: 0x7FFF,
        reg_mask: 0x7FFF,
        fb_mask: tap(15) | tap(14),
        reg_len_bits: 15,
        name: "ITU PN15",
    },
    PatternInfo {
        reg: 0x7FFFFF,
        reg_mask: 0x7FFFFF,
        fb_mask: tap(23) | tap(18),
        reg_len_bits: 23,
        name: "ITU PN23",
    },
];

impl Pattern {
    pub fn info(self) -> &'static PatternInfo {
        &PATTERN_TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    fn index(self) -> usize {
        match self {
            Pattern::User => 0,
            Pattern::AllZeros => 1,
            Pattern::AllOnes => 2,
            Pattern::AltOneZero => 3,
            Pattern::ItuPn9 => 4,
            Pattern::ItuPn11 => 5,
            Pattern::ItuPn15 => 6,
            Pattern::ItuPn23 => 7,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
