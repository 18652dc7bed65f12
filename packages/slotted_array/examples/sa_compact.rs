//! Defragmentation and capacity control with the `slotted_array` crate:
//!
//! * Holes left behind by removals.
//! * Forced and heuristic compaction.
//! * Keeping a floor of slots alive with `set_min_slot_count()`.

use slotted_array::SlottedArray;

fn main() -> Result<(), slotted_array::Error> {
    let mut array = SlottedArray::new();

    let mut indexes = Vec::new();
    for value in 0..16_u32 {
        indexes.push(array.insert(value)?);
    }

    // Remove most of the values, leaving holes scattered through the buffer.
    for index in indexes.iter().skip(2) {
        _ = array.remove(*index)?;
    }

    println!(
        "After removals: {} values in {} slots",
        array.len(),
        array.slot_count()
    );

    // Compaction repacks the survivors to the front and releases the excess.
    // Indexes obtained before this call must not be used afterwards!
    array.compact(true);

    println!(
        "After compact(true): {} values in {} slots",
        array.len(),
        array.slot_count()
    );

    for index in 0..array.slot_count() {
        if let Some(value) = array.get(index) {
            println!("  slot {index}: {value}");
        }
    }

    // A floor keeps slots alive through any future compaction, so bursts of
    // insertions do not have to re-grow the buffer from scratch.
    array.set_min_slot_count(8)?;
    array.compact(true);

    println!(
        "With a floor of {}: {} values in {} slots",
        array.min_slot_count(),
        array.len(),
        array.slot_count()
    );

    Ok(())
}
