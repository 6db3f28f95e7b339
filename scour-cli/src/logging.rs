use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};
use log::{LevelFilter, debug};

/// Where diagnostics go while the terminal interface owns the screen
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("scour").join("scour.log"))
}

/// Filter used when `RUST_LOG` is unset: `-v` info, `-vv` debug
fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the diagnostic logger.
///
/// `RUST_LOG` wins over the level chosen by `-v`. With `to_file` the
/// output is appended to [`log_file_path`]; if that cannot be opened,
/// logging is switched off rather than drawn over the interface.
pub fn init(verbose: u8, to_file: bool) {
    let default_level = level_for(verbose);
    let env = Env::default().default_filter_or(default_level);
    let mut builder = Builder::from_env(env);

    if to_file {
        let file = log_file_path().and_then(|path| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).ok()?;
            }
            OpenOptions::new().create(true).append(true).open(path).ok()
        });
        match file {
            Some(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            None => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
    debug!("logger initialized with level: {}", default_level);
}
