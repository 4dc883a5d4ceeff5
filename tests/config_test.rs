use std::{collections::HashMap, path::PathBuf};

use spotbrainz::config::{self, Config};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

const REQUIRED: &[(&str, &str)] = &[
    ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
    ("SPOTIFY_USER_ID", "user"),
];

#[test]
fn test_defaults_fill_optional_keys() {
    let config = Config::from_lookup(lookup(REQUIRED));

    assert_eq!(config.client_id, "client");
    assert_eq!(config.user_id, "user");
    assert_eq!(config.api_url, config::DEFAULT_API_URL);
    assert_eq!(config.auth_url, config::DEFAULT_AUTH_URL);
    assert_eq!(config.token_url, config::DEFAULT_TOKEN_URL);
    assert_eq!(config.redirect_uri, config::DEFAULT_REDIRECT_URI);
    assert_eq!(config.server_address, config::DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.playlist_name, config::DEFAULT_PLAYLIST_NAME);
    assert_eq!(config.db_path, config::data_dir().join("spot.json"));

    // Space separated scope list
    assert!(config.scope.split(' ').any(|s| s == "user-top-read"));
    assert!(config.scope.split(' ').any(|s| s == "playlist-modify-private"));
}

#[test]
fn test_overrides_win() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
        ("SPOTBRAINZ_DB_PATH", "/tmp/spot.json"),
        ("SPOTBRAINZ_PLAYLIST_NAME", "brainz"),
        ("SPOTIFY_API_AUTH_SCOPE", "user-top-read"),
    ]);

    let config = Config::from_lookup(lookup(&vars));

    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.db_path, PathBuf::from("/tmp/spot.json"));
    assert_eq!(config.playlist_name, "brainz");
    assert_eq!(config.scope, "user-top-read");
}

#[test]
fn test_missing_required_key() {
    let config = Config::from_lookup(lookup(&[("SPOTIFY_USER_ID", "user")]));
    assert_eq!(
        config.require_api_credentials().unwrap_err(),
        "SPOTIFY_API_AUTH_CLIENT_ID must be set"
    );

    let config = Config::from_lookup(lookup(&[("SPOTIFY_API_AUTH_CLIENT_ID", "client")]));
    assert_eq!(
        config.require_api_credentials().unwrap_err(),
        "SPOTIFY_USER_ID must be set"
    );

    let config = Config::from_lookup(lookup(REQUIRED));
    assert!(config.require_api_credentials().is_ok());
}

#[test]
fn test_local_commands_need_no_credentials() {
    let config = Config::from_lookup(lookup(&[("SPOTBRAINZ_DB_PATH", "/tmp/spot.json")]));

    assert_eq!(config.db_path, PathBuf::from("/tmp/spot.json"));
    assert!(config.client_id.is_empty());
    assert!(config.require_api_credentials().is_err());
}

#[test]
fn test_empty_values_count_as_unset() {
    let config = Config::from_lookup(lookup(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "  "),
        ("SPOTIFY_USER_ID", "user"),
    ]));
    assert!(config.require_api_credentials().is_err());

    let mut vars = REQUIRED.to_vec();
    vars.push(("SPOTBRAINZ_PLAYLIST_NAME", ""));
    let config = Config::from_lookup(lookup(&vars));
    assert_eq!(config.playlist_name, config::DEFAULT_PLAYLIST_NAME);
}
