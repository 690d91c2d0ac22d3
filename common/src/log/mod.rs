pub mod tracing_factory;

pub use tracing_factory::TracingFactory;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs a bare TRACE-level subscriber for unit tests; ignores the error
/// raised when a previous test already installed the global subscriber.
pub fn init_test_log() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
