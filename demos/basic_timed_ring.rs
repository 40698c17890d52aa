//! Example demonstrating the TimedRingBuffer API.
//!
//! Run with: cargo run --example basic_timed_ring

use timering::prelude::*;

fn main() -> Result<(), RingError> {
    println!("=== TimedRingBuffer Examples ===\n");

    // Example 1: default policy keeps capacity - 1 samples
    println!("1. ReserveSlot (default)");
    let mut ring = TimedRingBuffer::<char, u32>::new(3)?;
    for (value, time) in [('A', 1), ('B', 2), ('C', 3), ('D', 4)] {
        ring.push_at(value, time);
    }
    println!("   contents: {:?} (capacity 3, live limit 2)", ring.to_vec());
    println!("   oldest:   {}", ring.get_head()?);
    println!("   newest:   {}", ring.get_newest()?);
    println!();

    // Example 2: every slot live
    println!("2. FullCapacity");
    let mut full = TimedRingBuilder::new(3)
        .policy(OverwritePolicy::FullCapacity)
        .build::<char, u32>()?;
    for (value, time) in [('A', 1), ('B', 2), ('C', 3), ('D', 4)] {
        full.push_at(value, time);
    }
    println!("   contents: {:?}", full.to_vec());
    println!();

    // Example 3: time searches
    println!("3. Searches");
    let mut series = TimedRingBuffer::<&str, f64>::new(5)?;
    for (value, time) in [("one", 1.0), ("two", 2.0), ("three", 3.0), ("four", 4.0)] {
        series.push_at(value, time);
    }
    match series.find_closest(&3.1, 0.5) {
        Some(index) => println!("   closest to 3.1:    {}", series.get(index)?),
        None => println!("   closest to 3.1:    none"),
    }
    match series.find_closest_preceding(&3.0, 5.0) {
        Some(index) => println!("   preceding 3.0:     {}", series.get(index)?),
        None => println!("   preceding 3.0:     none"),
    }
    println!("   closest to 10.0:   {:?}", series.find_closest(&10.0, 0.5));
    println!("   exactly at 4.0:    {:?}", series.find_exact(&4.0));
    println!();

    // Example 4: errors
    println!("4. Errors");
    if let Err(err) = series.get(7) {
        println!("   get(7): {err}");
    }
    if let Err(err) = TimedRingBuffer::<u8, u8>::new(0) {
        println!("   new(0): {err}");
    }

    Ok(())
}
