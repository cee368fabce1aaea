pub mod decision;
pub mod events;
pub mod outcome;
pub mod play;
pub mod side;

pub use decision::*;
pub use events::*;
pub use outcome::*;
pub use play::*;
pub use side::*;
