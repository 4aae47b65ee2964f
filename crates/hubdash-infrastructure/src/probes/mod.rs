//! Host probes

pub mod command_probe;
pub mod sysinfo_probe;

pub use command_probe::CommandProbe;
pub use sysinfo_probe::SysinfoProbe;
