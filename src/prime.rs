//! Prime sizing for bucket arrays.

/// Trial-division primality test.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false
    }
    if n < 4 {
        return true
    }
    if n % 2 == 0 {
        return false
    }

    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`.
///
/// Panics if no such prime fits in `usize`.
pub fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2
    }

    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate = match candidate.checked_add(2) {
            Some(c) => c,
            None => crate::capacity_overflow(),
        };
    }
    candidate
}
