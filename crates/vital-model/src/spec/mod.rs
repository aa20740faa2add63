mod probe;
pub use probe::ProbeSpec;
