//! Subcommand implementations

pub mod gods;
pub mod seed;
pub mod serve;

pub use gods::run_gods;
pub use seed::run_seed;
pub use serve::run_serve;
