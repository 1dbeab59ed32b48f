use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Config {
    /// Root directory of the range store.
    ///
    /// Every provider lives in `<data_dir>/<provider>/ipranges.json`.
    pub data_dir: PathBuf,
    /// Each level strips more decoration from the output.
    pub quiet: u8,
    pub no_banner: bool,
    /// Shows debug diagnostics, such as feed entries skipped during matching.
    pub verbose: bool,
    /// Per-request timeout used when downloading provider feeds.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            quiet: 0,
            no_banner: false,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
