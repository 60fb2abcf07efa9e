//! Seeded randomized cross-checks against native fixed-width arithmetic.

use cowint::BigInt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROUNDS: usize = 1000;

#[test]
fn arithmetic_matches_i128() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..ROUNDS {
        let a: i64 = rng.random();
        let b: i64 = rng.random();
        let (wa, wb) = (a as i128, b as i128);
        let (xa, xb) = (BigInt::from(a), BigInt::from(b));
        assert_eq!((&xa + &xb).to_string(), (wa + wb).to_string(), "a={} b={}", a, b);
        assert_eq!((&xa - &xb).to_string(), (wa - wb).to_string(), "a={} b={}", a, b);
        assert_eq!((&xa * &xb).to_string(), (wa * wb).to_string(), "a={} b={}", a, b);
        if b != 0 {
            assert_eq!((&xa / &xb).to_string(), (wa / wb).to_string(), "a={} b={}", a, b);
            assert_eq!((&xa % &xb).to_string(), (wa % wb).to_string(), "a={} b={}", a, b);
        }
    }
}

#[test]
fn bitwise_matches_i64() {
    let mut rng = StdRng::seed_from_u64(0xBEEF);
    for _ in 0..ROUNDS {
        let a: i64 = rng.random();
        let b: i64 = rng.random();
        let (xa, xb) = (BigInt::from(a), BigInt::from(b));
        assert_eq!(&xa & &xb, BigInt::from(a & b), "a={} b={}", a, b);
        assert_eq!(&xa | &xb, BigInt::from(a | b), "a={} b={}", a, b);
        assert_eq!(&xa ^ &xb, BigInt::from(a ^ b), "a={} b={}", a, b);
    }
}

#[test]
fn shifts_match_i128() {
    let mut rng = StdRng::seed_from_u64(0xCAFE);
    for _ in 0..ROUNDS {
        let a: i32 = rng.random();
        let k: u32 = rng.random_range(0..90);
        let wide = a as i128;
        assert_eq!(
            (BigInt::from(a) << k).to_string(),
            (wide << k).to_string(),
            "a={} k={}",
            a,
            k
        );
        assert_eq!(
            (BigInt::from(a) >> k).to_string(),
            (wide >> k.min(127)).to_string(),
            "a={} k={}",
            a,
            k
        );
    }
}

#[test]
fn string_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..ROUNDS {
        // Stitch a wide value out of native pieces so magnitudes span
        // several limbs.
        let high: i64 = rng.random();
        let low: u64 = rng.random();
        let value = (BigInt::from(high) << 64) + BigInt::from(low);
        let round: BigInt = value.to_string().parse().unwrap();
        assert_eq!(round, value);
    }
}

#[test]
fn ordering_is_total_and_consistent() {
    let mut rng = StdRng::seed_from_u64(0x0D3E2);
    let mut values: Vec<i64> = (0..64).map(|_| rng.random()).collect();
    values.push(0);
    for &a in &values {
        for &b in &values {
            let (xa, xb) = (BigInt::from(a), BigInt::from(b));
            assert_eq!(xa.cmp(&xb), a.cmp(&b), "a={} b={}", a, b);
            assert_eq!(xa < xb, (&xa - &xb).is_negative(), "a={} b={}", a, b);
        }
    }
}
