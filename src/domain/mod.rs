pub mod announcement;
pub mod bot_command;
pub mod content;
pub mod storage;

pub use announcement::*;
pub use bot_command::*;
pub use content::*;
pub use storage::*;
