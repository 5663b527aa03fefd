pub mod bbox;
pub mod crop;
pub mod inspect;
pub mod strip;

pub use bbox::*;
pub use crop::*;
pub use inspect::*;
pub use strip::*;
