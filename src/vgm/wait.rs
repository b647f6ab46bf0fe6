//! Wait-run re-encoding as 16-bit VGM waits

/// Largest wait a single 0x61 command can carry
pub const MAX_WAIT16: u32 = 0xFFFF;

/// Split a wait into 16-bit wait values.
///
/// Yields `samples / 0xFFFF` full waits followed by one trailing wait of
/// `samples % 0xFFFF`. The trailing wait is always present, even when it is
/// zero.
pub fn wait_run_chunks(samples: u32) -> impl Iterator<Item = u16> {
    let full = (samples / MAX_WAIT16) as usize;
    let rest = (samples % MAX_WAIT16) as u16;
    std::iter::repeat(MAX_WAIT16 as u16)
        .take(full)
        .chain(std::iter::once(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk() {
        let chunks: Vec<u16> = wait_run_chunks(3528).collect();
        assert_eq!(chunks, vec![3528]);
    }

    #[test]
    fn test_zero_still_emits() {
        let chunks: Vec<u16> = wait_run_chunks(0).collect();
        assert_eq!(chunks, vec![0]);
    }

    #[test]
    fn test_exact_multiple_has_zero_tail() {
        let chunks: Vec<u16> = wait_run_chunks(2 * 0xFFFF).collect();
        assert_eq!(chunks, vec![0xFFFF, 0xFFFF, 0]);
    }

    #[test]
    fn test_largest_wait_run() {
        // 255 units of 4 frames
        let chunks: Vec<u16> = wait_run_chunks(255 * 4 * 882).collect();
        assert_eq!(chunks.len(), 14);
        assert_eq!(chunks[..13], [0xFFFF; 13]);
        assert_eq!(chunks[13] as u32, 899_640 - 13 * 0xFFFF);
        assert_eq!(chunks.iter().map(|&c| c as u32).sum::<u32>(), 899_640);
    }
}
