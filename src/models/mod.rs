pub mod bell;
pub mod grid;
pub mod lesson;
pub mod macros;
pub mod recurrence;
pub mod time;

pub use bell::*;
pub use grid::*;
pub use lesson::*;
pub use recurrence::*;
pub use time::*;
