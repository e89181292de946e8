pub mod create;
pub mod push;
pub mod setup;
pub mod watch;
