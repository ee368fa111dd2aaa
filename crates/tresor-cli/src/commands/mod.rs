//! Command handlers, one function per subcommand.

mod init;
mod secrets;

pub use init::handle_init;
pub use secrets::{handle_add, handle_delete, handle_list, handle_show};
