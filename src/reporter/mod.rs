pub mod commands;
pub mod console;
pub mod handlers;
pub mod queries;
pub mod repl;
pub mod session;

pub use commands::Command;
pub use console::Console;
pub use repl::run;
pub use session::Session;
