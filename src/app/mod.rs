// app/mod.rs - Application Configuration
//
// Platform-independent settings for one run. All capture code takes these
// as arguments instead of reading globals.

mod config;

pub use config::*;
