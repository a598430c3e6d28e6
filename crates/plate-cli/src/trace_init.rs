use std::sync::Once;

static INIT: Once = Once::new();

/// Install the stderr subscriber once. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default_filter = if verbose {
            "warn,plate_core=debug,plate_cli=debug"
        } else {
            "warn,plate_core=info"
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .with_span_events(if verbose {
                tracing_subscriber::fmt::format::FmtSpan::CLOSE
            } else {
                tracing_subscriber::fmt::format::FmtSpan::NONE
            })
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .init();
    });
}
