//! Command implementations.

pub mod analyze;
pub mod extract;
pub mod profile;
pub mod scan;

pub use self::analyze::execute_analyze;
pub use self::extract::execute_extract;
pub use self::profile::execute_profile;
pub use self::scan::execute_scan;
