use super::*;

#[test]
fn http_base_maps_to_ws_endpoint() {
    let config = ClientConfig::new("http://127.0.0.1:8079", "ada").expect("config");
    assert_eq!(config.endpoint(), "ws://127.0.0.1:8079/ws/ada");
}

#[test]
fn https_base_maps_to_wss_and_keeps_path_prefix() {
    let config = ClientConfig::new("https://draw.example.com/app/", "ada").expect("config");
    assert_eq!(config.endpoint(), "wss://draw.example.com/app/ws/ada");
}

#[test]
fn socket_schemes_are_kept() {
    let config = ClientConfig::new("ws://localhost:9000", "bob").expect("config");
    assert_eq!(config.endpoint(), "ws://localhost:9000/ws/bob");
}

#[test]
fn username_is_percent_encoded() {
    let config = ClientConfig::new("http://localhost", "ada lovelace").expect("config");
    assert_eq!(config.endpoint(), "ws://localhost/ws/ada%20lovelace");
}

#[test]
fn rejects_bad_input() {
    assert!(matches!(
        ClientConfig::new("not a url", "ada"),
        Err(ConfigError::InvalidUrl { .. })
    ));
    assert!(matches!(
        ClientConfig::new("ftp://localhost", "ada"),
        Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));
    assert!(matches!(ClientConfig::new("http://localhost", "  "), Err(ConfigError::EmptyUsername)));
}

#[test]
fn default_policy_is_fixed_one_second() {
    let config = ClientConfig::new("http://localhost", "ada").expect("config");
    assert_eq!(config.reconnect, ReconnectPolicy::Fixed(Duration::from_secs(1)));
    assert_eq!(config.reconnect.delay(0), Duration::from_secs(1));
    assert_eq!(config.reconnect.delay(9), Duration::from_secs(1));
}

#[test]
fn exponential_policy_doubles_up_to_cap() {
    let policy = ReconnectPolicy::Exponential {
        initial: Duration::from_millis(250),
        max: Duration::from_secs(2),
    };
    let delays: Vec<u128> = (0..6).map(|attempt| policy.delay(attempt).as_millis()).collect();
    assert_eq!(delays, [250, 500, 1000, 2000, 2000, 2000]);
    assert_eq!(policy.delay(u32::MAX), Duration::from_secs(2));
}
