// Application layer: one runner per subcommand, wiring config, adapters and core logic.

pub mod countdown;
pub mod dates;
pub mod file_info;
pub mod posts;
pub mod sunrise;
