pub mod ports;
pub mod protocol;
pub mod range;
