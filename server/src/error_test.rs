use super::*;

#[test]
fn not_found_maps_to_404() {
    assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn startup_error_wraps_config_error() {
    let err: StartupError = ConfigError::Missing("APP_ENV").into();
    assert_eq!(err.to_string(), "config: missing required env var APP_ENV");
}

#[test]
fn bind_error_names_address() {
    let err = StartupError::Bind {
        addr: "127.0.0.1:3000".parse().unwrap(),
        source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
    };
    assert!(err.to_string().starts_with("failed to bind 127.0.0.1:3000"));
}
