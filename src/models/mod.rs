pub mod icon;
pub mod timeline;
pub mod weather;

pub use icon::*;
pub use timeline::*;
pub use weather::*;
