pub mod facts;

pub use facts::handle_command;
