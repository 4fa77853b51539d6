pub mod cadence;
pub mod dispatcher;
pub mod ports;
pub mod rate_correction;
pub mod registry;
pub mod system;

#[cfg(test)]
pub(crate) mod testing;
