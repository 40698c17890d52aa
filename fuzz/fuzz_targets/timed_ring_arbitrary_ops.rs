#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use timering::ds::{OverwritePolicy, TimedRingBuffer};
use timering::error::RingError;

// Fuzz arbitrary operation sequences on TimedRingBuffer
//
// Drives push_at, push, pop_front, clear, get, and the three searches against
// a VecDeque reference model, checking invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte: capacity (1-32) and policy
    let capacity = (data[0] as usize % 32).max(1);
    let policy = if data[0] & 0x80 == 0 {
        OverwritePolicy::ReserveSlot
    } else {
        OverwritePolicy::FullCapacity
    };

    let Ok(mut ring) = TimedRingBuffer::<u8, u16>::with_policy(capacity, policy) else {
        return;
    };
    let limit = policy.live_limit(capacity);
    let mut model: VecDeque<(u8, Option<u16>)> = VecDeque::new();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let arg = data[idx + 1];
        let time = u16::from(arg);

        match op {
            0 | 1 => {
                ring.push_at(arg, time);
                if limit > 0 {
                    if model.len() == limit {
                        model.pop_front();
                    }
                    model.push_back((arg, Some(time)));
                }
            },
            2 => {
                ring.push(arg);
                if limit > 0 {
                    if model.len() == limit {
                        model.pop_front();
                    }
                    model.push_back((arg, None));
                }
            },
            3 => {
                ring.pop_front();
                model.pop_front();
            },
            4 => {
                let i = arg as usize;
                match model.get(i) {
                    Some((value, _)) => assert_eq!(ring.get(i), Ok(value)),
                    None if model.is_empty() => {
                        assert_eq!(ring.get(i), Err(RingError::EmptyBufferAccess))
                    },
                    None => assert!(matches!(ring.get(i), Err(RingError::OutOfRange { .. }))),
                }
            },
            5 => {
                let expected = model.iter().position(|(_, t)| *t == Some(time));
                assert_eq!(ring.find_exact(&time), expected);
            },
            6 => {
                let epsilon = u16::from(data[idx] >> 3);
                if let Some(i) = ring.find_closest(&time, epsilon) {
                    let stored = model[i].1.expect("search hit an untimed sample");
                    assert!(stored.abs_diff(time) < epsilon);
                }
                if let Some(i) = ring.find_closest_preceding(&time, epsilon) {
                    let stored = model[i].1.expect("search hit an untimed sample");
                    assert!(stored < time);
                    assert!(stored.abs_diff(time) < epsilon);
                }
            },
            7 => {
                ring.clear();
                model.clear();
            },
            _ => unreachable!(),
        }

        // Validate invariants after each operation
        ring.check_invariants().expect("ring invariants");
        assert_eq!(ring.len(), model.len());
        assert!(ring.len() <= limit);
        assert_eq!(ring.capacity(), capacity);

        idx += 2;
    }

    let expected: Vec<u8> = model.iter().map(|(v, _)| *v).collect();
    assert_eq!(ring.to_vec(), expected);
});
