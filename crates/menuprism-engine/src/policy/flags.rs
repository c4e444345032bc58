//! 16-bit capability mask helpers.

/// Bits set in `mask` that the caller does not hold.
pub fn missing(mask: u16, held: u16) -> u16 {
    mask & !held
}

/// Bits set in `mask` that the caller does hold.
pub fn shared(mask: u16, held: u16) -> u16 {
    mask & held
}

/// True iff every bit in `mask` is held.
pub fn holds_all(mask: u16, held: u16) -> bool {
    missing(mask, held) == 0
}

/// True iff any bit in `mask` is held.
pub fn holds_any(mask: u16, held: u16) -> bool {
    shared(mask, held) != 0
}

/// Render a mask as the conventional `A`..`P` letters (bit 0 = `A`).
pub fn letters(mask: u16) -> String {
    (0..16u8)
        .filter(|bit| mask & (1 << bit) != 0)
        .map(|bit| char::from(b'A' + bit))
        .collect()
}
