//! Basic usage of the `slotted_array` crate:
//!
//! * Creating an array.
//! * Inserting values.
//! * Retrieving values.
//! * Removing values.

use slotted_array::SlottedArray;

fn main() -> Result<(), slotted_array::Error> {
    let mut array = SlottedArray::new();

    // Inserting a value gives you an index that you can later use to look up
    // the value again.
    let alice_index = array.insert("Alice".to_string())?;
    let bob_index = array.insert("Bob".to_string())?;
    let charlie_index = array.insert("Charlie".to_string())?;

    println!(
        "Slotted array holds {} values in {} slots, with an auto-adjusting capacity of {}",
        array.len(),
        array.slot_count(),
        array.capacity()
    );

    // Retrieving values is fast, similar to `Vec[index]`.
    let alice = array.get(alice_index).expect("we just inserted this");
    println!("Retrieved value: {alice}");

    // Removing a value hands it back and vacates its slot. The other values
    // keep their indexes.
    let bob = array.remove(bob_index)?;
    println!("Removed value: {bob}");

    let charlie = array.get(charlie_index).expect("still present after removal");
    println!("Value at its original index after removal of another: {charlie}");

    // The vacated slot is the first one reused by a later insertion.
    let diana_index = array.insert("Diana".to_string())?;
    assert_eq!(diana_index, bob_index);
    println!("New value reused slot {diana_index}");

    Ok(())
}
