//! Word-parallel byte scanning.
//!
//! Both scanners read the haystack one machine word at a time and only fall
//! back to a bytewise loop around the first word that can contain a target.
//! A word is tested by XORing it against the target byte broadcast to every
//! lane, which turns matching lanes into zero bytes, and then applying the
//! classic zero-byte test from *Matters Computational*:
//!
//! ```text
//! (w - 0x0101..01) & !w & 0x8080..80 != 0
//! ```
//!
//! The test is exact about *whether* a word holds a zero byte, which is all
//! the scanner relies on; the position is recovered by the bytewise pass.

use std::mem;

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("searchtool's byte scanner supports only 32-bit and 64-bit words");

const WORD_BYTES: usize = mem::size_of::<usize>();

const _: () = assert!(WORD_BYTES == 4 || WORD_BYTES == 8);

/// `0x01` in every lane.
const LO_BITS: usize = usize::MAX / 0xFF;
/// `0x80` in every lane.
const HI_BITS: usize = LO_BITS << 7;

/// Broadcasts `byte` into every lane of a word.
#[inline]
const fn splat(byte: u8) -> usize {
    LO_BITS * byte as usize
}

#[inline]
const fn has_zero_byte(word: usize) -> bool {
    word.wrapping_sub(LO_BITS) & !word & HI_BITS != 0
}

/// True when some lane of `word` equals the byte broadcast in `mask`.
#[inline]
const fn has_byte(word: usize, mask: usize) -> bool {
    has_zero_byte(word ^ mask)
}

/// Returns the index of the first `needle` in `haystack`.
#[inline]
pub fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    let mask = splat(needle);
    scan(haystack, |word| has_byte(word, mask), |byte| byte == needle)
}

/// Returns the index of the first byte equal to either `a` or `b`.
///
/// `a` and `b` may be equal, in which case this behaves like [`find_byte`].
#[inline]
pub fn find_either(haystack: &[u8], a: u8, b: u8) -> Option<usize> {
    let (mask_a, mask_b) = (splat(a), splat(b));
    scan(
        haystack,
        |word| has_byte(word, mask_a) || has_byte(word, mask_b),
        |byte| byte == a || byte == b,
    )
}

#[inline(always)]
fn scan(
    haystack: &[u8],
    word_hit: impl Fn(usize) -> bool,
    byte_hit: impl Fn(u8) -> bool,
) -> Option<usize> {
    // SAFETY: every bit pattern is a valid `usize`, and `align_to` only hands
    // out words that lie entirely inside `haystack`.
    let (head, body, _tail) = unsafe { haystack.align_to::<usize>() };

    if let Some(pos) = head.iter().position(|&byte| byte_hit(byte)) {
        return Some(pos);
    }

    let skipped = body
        .iter()
        .position(|&word| word_hit(word))
        .unwrap_or(body.len());

    // Resume bytewise at the flagged word, or at the tail if none was flagged.
    let resume = head.len() + skipped * WORD_BYTES;
    haystack[resume..]
        .iter()
        .position(|&byte| byte_hit(byte))
        .map(|pos| resume + pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naive_either(haystack: &[u8], a: u8, b: u8) -> Option<usize> {
        haystack.iter().position(|&byte| byte == a || byte == b)
    }

    #[test]
    fn test_word_constants() {
        assert_eq!(LO_BITS.to_ne_bytes(), [0x01; WORD_BYTES]);
        assert_eq!(HI_BITS.to_ne_bytes(), [0x80; WORD_BYTES]);
        assert_eq!(splat(0xAB).to_ne_bytes(), [0xAB; WORD_BYTES]);
    }

    #[test]
    fn test_zero_byte_detection() {
        assert!(!has_zero_byte(usize::MAX));
        assert!(!has_zero_byte(LO_BITS));
        assert!(!has_zero_byte(HI_BITS));
        assert!(has_zero_byte(0));

        for lane in 0..WORD_BYTES {
            let word = usize::MAX & !(0xFF << (lane * 8));
            assert!(has_zero_byte(word), "lane {} cleared", lane);
        }
    }

    #[test]
    fn test_empty_and_tiny_haystacks() {
        assert_eq!(find_byte(b"", b'a'), None);
        assert_eq!(find_either(b"", b'a', b'b'), None);
        assert_eq!(find_byte(b"a", b'a'), Some(0));
        assert_eq!(find_either(b"b", b'a', b'b'), Some(0));
        assert_eq!(find_either(b"c", b'a', b'b'), None);
    }

    #[test]
    fn test_every_length_and_alignment() {
        let backing: Vec<u8> = (0..96u8).map(|i| b'a' + i % 20).collect();
        for start in 0..WORD_BYTES {
            for end in start..backing.len() {
                let haystack = &backing[start..end];
                for target in [b'a', b'j', b't', b'z'] {
                    assert_eq!(
                        find_byte(haystack, target),
                        naive_either(haystack, target, target),
                        "start={} end={} target={}",
                        start,
                        end,
                        target as char
                    );
                    assert_eq!(
                        find_either(haystack, target, b'q'),
                        naive_either(haystack, target, b'q')
                    );
                }
            }
        }
    }

    #[test]
    fn test_match_in_last_byte_after_several_words() {
        let mut haystack = vec![b'.'; WORD_BYTES * 5 + 3];
        let last = haystack.len() - 1;
        haystack[last] = b'X';
        assert_eq!(find_either(&haystack, b'x', b'X'), Some(last));
        assert_eq!(find_byte(&haystack, b'X'), Some(last));
        assert_eq!(find_byte(&haystack, b'x'), None);
    }

    #[test]
    fn test_high_bytes() {
        let mut haystack = vec![0x7Fu8; 40];
        haystack[17] = 0x80;
        haystack[29] = 0xFF;
        assert_eq!(find_byte(&haystack, 0xFF), Some(29));
        assert_eq!(find_either(&haystack, 0xFF, 0x80), Some(17));
        assert_eq!(find_byte(&haystack, 0x00), None);
    }

    #[test]
    fn test_equal_targets() {
        let haystack = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(find_either(haystack, b'z', b'z'), Some(37));
        assert_eq!(find_either(haystack, b'Z', b'Z'), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn find_either_matches_linear_scan(
            haystack in proptest::collection::vec(any::<u8>(), 0..200),
            offset in 0usize..8,
            a in any::<u8>(),
            b in any::<u8>(),
        ) {
            let haystack = &haystack[offset.min(haystack.len())..];
            prop_assert_eq!(find_either(haystack, a, b), naive_either(haystack, a, b));
            prop_assert_eq!(find_either(haystack, a, b), memchr::memchr2(a, b, haystack));
        }

        #[test]
        fn find_byte_matches_memchr(
            haystack in proptest::collection::vec(0u8..4, 0..200),
            needle in 0u8..5,
        ) {
            prop_assert_eq!(find_byte(&haystack, needle), memchr::memchr(needle, &haystack));
        }
    }
}
