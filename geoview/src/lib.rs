pub mod bounds;
pub use bounds::*;

pub mod conf;
pub use conf::*;

pub mod map;
pub use map::*;

pub mod render;
pub use render::*;

pub mod builder;
pub use builder::*;
