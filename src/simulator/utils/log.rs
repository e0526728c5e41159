use env_logger::Env;

/// Initialize the env_logger backend. Safe to call more than once, so tests
/// and the binary can both use it.
pub fn init_log() {
  let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
    .format_timestamp(None)
    .try_init();
}
