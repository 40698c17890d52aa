//! Sliding window of sensor readings keyed by wall-clock offsets.
//!
//! Pairs a fast sensor with a slow one: each slow sample is matched to the
//! fast reading taken just before it.
//!
//! Run with: cargo run --example telemetry_window

use std::time::Duration;

use timering::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Reading {
    celsius: f32,
    seq: u32,
}

fn main() -> Result<(), RingError> {
    // 10 Hz sensor, two seconds of history
    let mut fast = TimedRingBuffer::<Reading, Duration>::new(21)?;
    for seq in 0..50u32 {
        let at = Duration::from_millis(u64::from(seq) * 100);
        let celsius = 20.0 + (seq as f32 * 0.3).sin();
        fast.push_at(Reading { celsius, seq }, at);
    }
    println!(
        "window: {} readings, oldest seq {}, newest seq {}",
        fast.len(),
        fast.get_head()?.seq,
        fast.get_newest()?.seq
    );

    // slow sensor stamps land between fast readings
    let tolerance = Duration::from_millis(150);
    for stamp_ms in [3_050u64, 4_020, 4_990, 6_000] {
        let stamp = Duration::from_millis(stamp_ms);
        match fast.find_closest_preceding(&stamp, tolerance) {
            Some(index) => {
                let (reading, at) = fast.sample(index)?;
                println!(
                    "slow@{stamp_ms}ms -> fast seq {} at {:?} ({:.2} C)",
                    reading.seq, at, reading.celsius
                );
            },
            None => println!("slow@{stamp_ms}ms -> no fast reading within {tolerance:?}"),
        }
    }

    // drop the oldest half
    for _ in 0..fast.len() / 2 {
        fast.pop_front();
    }
    println!(
        "after trimming: {} readings, approx {} bytes",
        fast.len(),
        fast.approx_bytes()
    );

    Ok(())
}
