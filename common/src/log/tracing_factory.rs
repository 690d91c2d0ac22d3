use std::sync::Once;

use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct TracingFactory {
    options: TracingFactoryOptions,
}

#[derive(Debug, Clone)]
pub struct TracingFactoryOptions {
    debug: bool,
    output_type: OutputType,
    level: Level,
    log_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub enum OutputType {
    Stdout,
    Log,
}

impl TracingFactory {
    pub fn init_log(debug: bool) -> Self {
        TracingFactory::init_log_with_options(TracingFactoryOptions::new_with_debug(debug))
    }

    /// Installs the global `tracing` subscriber exactly once per process;
    /// later calls return a handle to the same configuration without
    /// re-initializing (a second `set_global_default` would error).
    pub fn init_log_with_options(opt: TracingFactoryOptions) -> Self {
        let mut opts = opt.clone();
        if opts.log_dir.is_none() {
            opts.log_dir = Some(std::env::temp_dir().join("dbengine-logs").to_string_lossy().into_owned());
        }
        let dir = opts.log_dir.clone().unwrap();

        INIT.call_once(|| {
            let format = tracing_subscriber::fmt::format()
                .with_file(true)
                .with_line_number(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_thread_names(true)
                .compact();

            match opts.output_type {
                OutputType::Stdout => {
                    let _ = tracing_subscriber::fmt()
                        .with_max_level(opts.level)
                        .event_format(format)
                        .try_init();
                }
                OutputType::Log => {
                    let file_appender = rolling::daily(&dir, "dbengine.log");
                    let writer = file_appender.and(std::io::stdout);
                    let _ = tracing_subscriber::fmt()
                        .with_max_level(opts.level)
                        .event_format(format)
                        .with_writer(writer)
                        .try_init();
                }
            };
        });

        TracingFactory { options: opts }
    }

    pub fn log_dir(&self) -> &str {
        self.options.log_dir.as_deref().unwrap_or("")
    }
}

impl Default for TracingFactoryOptions {
    fn default() -> Self {
        TracingFactoryOptions::new_with_debug(false)
    }
}

impl TracingFactoryOptions {
    pub fn new_with_debug(debug: bool) -> Self {
        TracingFactoryOptions::new(debug, OutputType::Stdout, None)
    }

    pub fn new(debug: bool, output_type: OutputType, log_dir: Option<String>) -> Self {
        let level = if debug { Level::DEBUG } else { Level::INFO };
        TracingFactoryOptions {
            debug,
            output_type,
            level,
            log_dir,
        }
    }
}
