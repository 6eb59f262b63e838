//! Keypad Demo
//!
//! Drives the mock browser page through a few key sequences and prints what
//! the display shows after each one.
//!
//! Run with: cargo run --example keypad_demo

use keypad_calc::driver::{run_full_specification, CalculatorDriver};
use keypad_calc::wasm::WasmDriver;

fn main() {
    let mut driver = WasmDriver::new();

    println!("Keypad Calculator - mock DOM demo");
    println!("---------------------------------");

    for script in ["7+3=", "2+3*4=", "1234567890123", ".1+.2=", "1/3=", "5/0="] {
        driver.clear();
        driver.press_all(script);
        let marker = if driver.is_error() { "  (error)" } else { "" };
        println!("{script:>16}  ->  {}{marker}", driver.display());
    }

    if driver.fire_pending_reset() {
        println!("{:>16}  ->  {}", "<timeout>", driver.display());
    }

    println!();
    println!("Running unified scenarios...");
    run_full_specification(&mut driver);
    println!("All scenarios passed.");
}
