//! Safe SQL builder: identifiers from static declarations only, values as parameters.

mod builder;
mod columns;
pub mod params;
pub use builder::*;
pub use columns::*;
pub use params::*;
