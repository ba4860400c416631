use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. Verbose runs log pick-by-pick
/// draft moves and every research page; HTTP client internals stay at warn.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "nfl_fantasy=debug,reqwest=warn,info"
    } else {
        "nfl_fantasy=info,warn"
    }
}

/// Installs the global subscriber on stderr, leaving stdout to tables and
/// draft boards. `json` switches to one JSON object per event.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let compact = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
    });
    let json = json.then(|| {
        fmt::layer()
            .with_target(false)
            .json()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}
