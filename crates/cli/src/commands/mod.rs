pub mod emit;
pub mod inspect;
pub mod rules;
pub mod scan;
pub mod util;

pub use emit::*;
pub use inspect::*;
pub use rules::*;
pub use scan::*;
pub use util::*;
