//! Request identity primitives: serial numbers, shared secrets, and signatures.

pub mod secret;
pub mod serial;
pub mod signature;

pub use secret::*;
pub use serial::*;
pub use signature::*;
