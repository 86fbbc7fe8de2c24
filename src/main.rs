use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional settings file as the only argument.
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = locstr::Settings::load_or_default(settings_path.as_deref())?;
    locstr::run_gui(&settings)
}
