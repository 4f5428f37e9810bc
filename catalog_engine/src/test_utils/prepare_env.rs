use log::*;

/// Loads `.env.test` (if present) and starts logging. Safe to call from every test.
pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}
