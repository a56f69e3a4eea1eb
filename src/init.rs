/// Initialise env_logger ; RUST_LOG reste prioritaire sur le niveau configuré
pub fn init_logging_and_env(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}
