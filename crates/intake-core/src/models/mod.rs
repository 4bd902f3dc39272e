pub mod asset;
pub mod file;
pub mod policy;

pub use asset::*;
pub use file::*;
pub use policy::*;
