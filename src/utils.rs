/// Number of trailing zero bits of `n`, `None` when `n` is zero.
///
/// See http://graphics.stanford.edu/~seander/bithacks.html#ZerosOnRightLinear
pub fn count_trailing_zeros(n: u64) -> Option<u32> {
    if n == 0 {
        return None;
    }

    // turn the trailing zeros into ones, and clear everything above them
    let mut binary = (n ^ (n - 1)) >> 1;

    let mut counter = 0;
    while binary != 0 {
        binary >>= 1;
        counter += 1;
    }
    Some(counter)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
