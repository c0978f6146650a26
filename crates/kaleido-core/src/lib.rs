pub mod collision;
pub mod constants;
pub mod effect;
pub mod error;
pub mod payload;
pub mod placement;
pub mod regen;
pub mod settings;
pub mod slice;
pub mod symmetry;
pub mod transform;

pub use collision::*;
pub use constants::*;
pub use effect::*;
pub use error::*;
pub use payload::*;
pub use placement::*;
pub use regen::*;
pub use settings::*;
pub use slice::*;
pub use symmetry::*;
pub use transform::*;

pub use glam;
