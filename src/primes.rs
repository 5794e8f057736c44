/// All primes in `[start, end]`, ascending. Empty when `start > end`.
pub fn generate(start: i64, end: i64) -> Vec<i64> {
    if start > end {
        return Vec::new();
    }
    (start.max(2)..=end).filter(|&n| is_prime(n)).collect()
}

pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    // Same bound as d * d <= n, without the overflow near i64::MAX.
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}
