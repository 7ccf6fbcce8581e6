//! CLI command implementations.

mod config;
mod doctor;
mod init;
mod list;
mod process;
mod transcribe;

pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use list::run_list;
pub use process::run_process;
pub use transcribe::run_transcribe;
