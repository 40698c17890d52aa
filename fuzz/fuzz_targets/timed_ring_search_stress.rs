#![no_main]

use libfuzzer_sys::fuzz_target;
use timering::ds::{OverwritePolicy, TimedRingBuffer};

// Fuzz stress test for the time searches
//
// Fills a ring with arbitrary signed timestamps (duplicates and reordering
// included) and compares every search against a brute-force scan.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let capacity = (data[0] as usize % 64).max(1);
    let epsilon = u64::from(data[1]);
    let query = i64::from(data[2] as i8) * 4;

    let Ok(mut ring) =
        TimedRingBuffer::<usize, i64>::with_policy(capacity, OverwritePolicy::FullCapacity)
    else {
        return;
    };
    for (i, &byte) in data[3..].iter().enumerate() {
        ring.push_at(i, i64::from(byte as i8) * 4);
    }

    let times: Vec<i64> = ring.iter().map(|(_, t)| *t.expect("timed")).collect();

    let brute = |accept: &dyn Fn(i64) -> bool| {
        let mut best: Option<(usize, u64)> = None;
        for (i, &t) in times.iter().enumerate() {
            if !accept(t) {
                continue;
            }
            let d = t.abs_diff(query);
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((i, d));
            }
        }
        best.filter(|&(_, d)| d < epsilon).map(|(i, _)| i)
    };

    assert_eq!(ring.find_closest(&query, epsilon), brute(&|_| true));
    assert_eq!(
        ring.find_closest_preceding(&query, epsilon),
        brute(&|t| t < query)
    );
    assert_eq!(ring.find_exact(&query), times.iter().position(|&t| t == query));
});
