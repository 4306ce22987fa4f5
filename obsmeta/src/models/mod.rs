//! Serializable value types of the observing-facility metadata standard.
//!
//! These types are schema declaration: identities, addresses, contacts,
//! manufacturers and facility descriptions. They carry no algorithms; the
//! hierarchy index consumes them only through their opaque [`SiteId`]s.

pub mod contact;
pub mod facility;
pub mod identity;
pub mod macros;
pub mod manufacturer;

pub use contact::*;
pub use facility::*;
pub use identity::*;
pub use manufacturer::*;
