use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    init(default_directives(verbose), false);
}

/// JSON lines on stderr, for runs driven by CI or log collectors.
pub fn init_json_logger() {
    init(default_directives(false), true);
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "platform_storage=debug,info"
    } else {
        "platform_storage=info"
    }
}

fn init(directives: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
