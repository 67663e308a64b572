//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `holla_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("holla_core version={}", holla_core::core_version());
    println!(
        "habit_catalog size={}",
        holla_core::default_catalog().len()
    );
}
