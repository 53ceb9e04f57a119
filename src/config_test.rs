use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("TRIPDESK_API_TOKEN");
        std::env::remove_var("TRIPDESK_STATIC_DIR");
        std::env::remove_var("TRIPDESK_SEED_FILE");
    }
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_server_env() };
    assert_eq!(
        ServerConfig::from_env(),
        ServerConfig { port: DEFAULT_PORT, api_token: None, static_dir: None, seed_file: None }
    );

    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("TRIPDESK_API_TOKEN", "secret");
        std::env::set_var("TRIPDESK_STATIC_DIR", "client/dist");
        std::env::set_var("TRIPDESK_SEED_FILE", " ");
    }
    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_token.as_deref(), Some("secret"));
    assert_eq!(cfg.static_dir, Some(PathBuf::from("client/dist")));
    assert_eq!(cfg.seed_file, None);

    unsafe {
        std::env::set_var("PORT", "not-a-port");
    }
    assert_eq!(ServerConfig::from_env().port, DEFAULT_PORT);

    unsafe { clear_server_env() };
}
