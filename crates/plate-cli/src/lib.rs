pub mod commands;
pub mod io;
pub mod trace_init;
