// textnorm-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use textnorm_grammars::{Normalizer, NormalizerOptions, engine};

/// Environment variable naming a directory of exported archives.
pub const FAR_DIR_ENV: &str = "TEXTNORM_FAR_DIR";

/// Set up `env_logger`. Warnings are shown unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Create a normalizer.
///
/// Archives are loaded from `far_dir`, or from `TEXTNORM_FAR_DIR` when no
/// directory is given. Without either, the grammars are built from the
/// locale tables in `options`.
pub fn load_normalizer(
    far_dir: Option<&str>,
    options: &NormalizerOptions,
) -> Result<Normalizer, String> {
    let far_dir = far_dir
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(FAR_DIR_ENV).map(PathBuf::from));
    if let Some(dir) = far_dir {
        return Normalizer::from_archive_dir(&dir)
            .map_err(|e| format!("failed to load grammars from {}: {e}", dir.display()));
    }
    log::info!("building {} grammars", options.language);
    let engine = engine().map_err(|e| e.to_string())?;
    Normalizer::new(&engine, options).map_err(|e| format!("failed to build grammars: {e}"))
}

/// Remove a `--name=VALUE`, `--name VALUE` or `-s VALUE` option from `args`.
///
/// Returns `(value, remaining_args)`; the last occurrence wins.
pub fn take_value(args: &[String], long: &str, short: Option<&str>) -> (Option<String>, Vec<String>) {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || short == Some(arg.as_str()) {
            if i + 1 < args.len() {
                value = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Remove every occurrence of `flag` from `args`; `true` if there was one.
pub fn take_flag(args: &[String], flag: &str) -> (bool, Vec<String>) {
    let remaining: Vec<String> = args.iter().filter(|a| *a != flag).cloned().collect();
    (remaining.len() != args.len(), remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
