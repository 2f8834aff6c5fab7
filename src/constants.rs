// src/constants.rs

/// The name of the CLI binary, as it appears in usage and error messages.
pub const CLI_NAME: &str = "mdb";

/// The name of the per-project configuration file (in the project root).
pub const PROJECT_CONFIG_FILENAME: &str = ".mdb";

/// The name of the global configuration file (in the per-user mdb directory).
pub const GLOBAL_CONFIG_FILENAME: &str = ".mdb";

/// The name of the per-user directory holding global mdb configuration.
pub const GLOBAL_CONFIG_DIRNAME: &str = "mdb";
