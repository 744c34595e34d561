//! The fixed chroma codebook: sixteen representative chroma values spanning
//! [-0.5, 0.5], monotonically increasing, indexed by a 4-bit code. Entries
//! cluster near zero where chroma usually lives.

pub const NUM_CHROMA_CODES: usize = 16;

const CHROMA_VALUES: [f32; NUM_CHROMA_CODES] = [
    -0.35, -0.2, -0.15, -0.1, -0.077, -0.055, -0.033, -0.011, 0.011, 0.033, 0.055, 0.077, 0.1,
    0.15, 0.2, 0.35,
];

/// The code whose representative value is nearest to `chroma`.
pub fn index_of_chroma(chroma: f32) -> u32 {
    let mut best = 0;
    for (index, value) in CHROMA_VALUES.iter().enumerate() {
        if (chroma - value).abs() < (chroma - CHROMA_VALUES[best]).abs() {
            best = index;
        }
    }

    best as u32
}

/// The representative chroma value for a code. Codes are 4 bits; anything
/// larger is a contract violation.
pub fn chroma_of_index(index: u32) -> f32 {
    assert!((index as usize) < NUM_CHROMA_CODES);

    CHROMA_VALUES[index as usize]
}
