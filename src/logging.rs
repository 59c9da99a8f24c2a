use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::LoggingConfig;

const ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const ROTATE_KEEP: usize = 5;

/// Starts the global logger. `RUST_LOG` wins over `config.level`.
///
/// Logs go to stderr unless `config.path` names a file. The returned handle
/// must be kept alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(&config.level)?;
    let Some(path) = config.path.as_ref().map(PathBuf::from) else {
        return logger.log_to_stderr().start();
    };
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let basename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bedrock-chat")
        .to_string();
    logger
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .rotate(
            Criterion::Size(ROTATE_SIZE),
            Naming::Numbers,
            Cleanup::KeepLogFiles(ROTATE_KEEP),
        )
        .start()
}
