//! DHAT heap profiler for timering.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use timering::ds::{OverwritePolicy, TimedRingBuffer};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Telemetry-shaped samples: a heap-owned label plus a reading.
#[derive(Clone)]
struct Reading {
    #[allow(dead_code)]
    label: String,
    #[allow(dead_code)]
    value: f64,
}

/// Steady sensor stream with jittered timestamps, querying as it goes.
fn sensor_stream(ring: &mut TimedRingBuffer<Reading, u64>, samples: usize, seed: u64) -> usize {
    let mut rng = XorShift64::new(seed);
    let mut now = 0_u64;
    let mut hits = 0;

    for i in 0..samples {
        now += 10 + rng.next_u64() % 5;
        ring.push_at(
            Reading {
                label: format!("sensor-{}", i % 8),
                value: (rng.next_u64() % 1000) as f64 / 10.0,
            },
            now,
        );

        let query = now.saturating_sub(rng.next_u64() % 2_000);
        if ring.find_closest(&query, 8).is_some() {
            hits += 1;
        }
        if ring.find_closest_preceding(&query, 8).is_some() {
            hits += 1;
        }
    }
    hits
}

/// Producer/consumer churn: bursts of pushes drained by pop_front.
fn drain_churn(ring: &mut TimedRingBuffer<Reading, u64>, rounds: usize) {
    let mut now = 0_u64;
    for round in 0..rounds {
        for _ in 0..32 {
            now += 1;
            ring.push_at(
                Reading {
                    label: format!("burst-{round}"),
                    value: now as f64,
                },
                now,
            );
        }
        for _ in 0..24 {
            ring.pop_front();
        }
        let _ = ring.to_vec();
    }
}

fn profile_policy(policy: OverwritePolicy) {
    println!("=== Profiling {:?} ===", policy);
    let capacity = 4096;

    let mut ring = match TimedRingBuffer::with_policy(capacity, policy) {
        Ok(ring) => ring,
        Err(err) => {
            eprintln!("  failed to build ring: {err}");
            return;
        },
    };

    let hits = sensor_stream(&mut ring, 100_000, 42);
    println!("  Search hits: {}", hits);

    drain_churn(&mut ring, 1_000);
    println!("  Final size: {}", ring.len());
    println!("  Approx bytes: {}", ring.approx_bytes());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("timering DHAT Heap Profiling");
    println!("============================\n");

    profile_policy(OverwritePolicy::ReserveSlot);
    profile_policy(OverwritePolicy::FullCapacity);

    println!("\n============================");
    println!("Profile written to dhat-heap.json");
}
