//! Shared setup for CLI handlers that talk to the control plane.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load and validate the config at `path`, then start logging.
///
/// Global flags win over the file: `--quiet` keeps only errors, `-v`/`-vv`
/// raise the level to debug/trace, and `--json` switches logs to JSON.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load(path)?;
    apply_output_flags(&mut config, output::is_quiet(), output::verbosity(), output::is_json());
    config.init_logging();
    Ok(config)
}

fn apply_output_flags(config: &mut Config, quiet: bool, verbose: u8, json: bool) {
    if quiet {
        config.logging.level = "error".into();
    } else if verbose >= 2 {
        config.logging.level = "trace".into();
    } else if verbose == 1 {
        config.logging.level = "debug".into();
    }
    if json {
        config.logging.format = "json".into();
    }
}
