//! Status macros shared by every crate of the workspace.
//!
//! They only tag events with a dedicated target, the terminal formatter
//! decides how each target is rendered.

pub const SUCCESS_TARGET: &str = "reflector::success";
pub const STATUS_TARGET: &str = "reflector::status";
pub const PRINT_TARGET: &str = "reflector::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::STATUS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: $crate::log::STATUS_TARGET, $($arg)*)
    };
}
