mod error;
mod geometry;
mod item;
mod ops;
mod resolve;
mod session;
mod topology;

pub use crate::error::*;
pub use crate::geometry::*;
pub use crate::item::*;
pub use crate::ops::*;
pub use crate::resolve::*;
pub use crate::session::*;
pub use crate::topology::*;
