// Intentionally empty: this crate only hosts criterion benches.
