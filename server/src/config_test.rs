use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_only_app_env_is_set() {
    let cfg = Config::from_lookup(lookup(&[("APP_ENV", "development")])).unwrap();
    assert_eq!(cfg.app_env, AppEnv::Development);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(cfg.client_queue, DEFAULT_CLIENT_QUEUE);
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn overrides_are_parsed() {
    let cfg = Config::from_lookup(lookup(&[
        ("APP_ENV", "production"),
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
        ("RELAY_CLIENT_QUEUE", "16"),
    ]))
    .unwrap();
    assert_eq!(cfg.app_env, AppEnv::Production);
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.client_queue, 16);
}

#[test]
fn missing_app_env_is_an_error() {
    let err = Config::from_lookup(lookup(&[("PORT", "3000")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("APP_ENV"));
}

#[test]
fn unknown_app_env_is_invalid() {
    let err = Config::from_lookup(lookup(&[("APP_ENV", "staging")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "APP_ENV", value: "staging".into() });
}

#[test]
fn non_numeric_port_is_invalid() {
    let err = Config::from_lookup(lookup(&[("APP_ENV", "test"), ("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "http".into() });
}

#[test]
fn out_of_range_port_is_invalid() {
    let err = Config::from_lookup(lookup(&[("APP_ENV", "test"), ("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
}

#[test]
fn zero_queue_is_invalid() {
    let err = Config::from_lookup(lookup(&[("APP_ENV", "test"), ("RELAY_CLIENT_QUEUE", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "RELAY_CLIENT_QUEUE", .. }));
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let cfg = Config::from_lookup(lookup(&[("APP_ENV", "test"), ("PORT", " 4000 ")])).unwrap();
    assert_eq!(cfg.port, 4000);
}

#[test]
fn app_env_display_round_trips() {
    for env in [AppEnv::Development, AppEnv::Production, AppEnv::Test] {
        assert_eq!(env.to_string().parse::<AppEnv>(), Ok(env));
    }
}

#[test]
fn error_messages_name_the_key() {
    assert_eq!(ConfigError::Missing("APP_ENV").to_string(), "missing required env var APP_ENV");
    assert_eq!(
        ConfigError::Invalid { key: "PORT", value: "x".into() }.to_string(),
        "invalid value for PORT: \"x\""
    );
}
