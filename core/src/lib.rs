pub mod network;
pub mod runner;
pub mod verifier;
