pub mod activity;
pub mod cliopt;
pub mod coerce;
pub mod error;
pub mod metrics;
pub mod primes;
pub mod runner;
pub mod template;
pub mod utils;
