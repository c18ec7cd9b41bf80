//! Domain layer public interface.
//!
//! Holds the greeting vocabulary shared by the client and server layers,
//! independent of the generated wire types.

mod greeting;

pub use greeting::{Greeting, DEFAULT_NAME};
