//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, clocks, password encoding and
//! helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;
pub mod clock;
pub mod password;

pub use errors::{EventHubError, EntityKind, Result};
pub use clock::{Clock, SystemClock, ManualClock};
pub use password::{PasswordEncoder, Pbkdf2PasswordEncoder};
