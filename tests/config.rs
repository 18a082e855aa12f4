use fondo::{TrackerConfig, TrackerError};

const GENESIS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

#[test]
fn valid_mainnet_address_with_default_currency() {
    let cfg = TrackerConfig::new(GENESIS).expect("genesis address parses");
    assert_eq!(cfg.address, GENESIS);
    assert_eq!(cfg.currency, "CAD");

    let cfg = cfg.with_currency("USD");
    assert_eq!(cfg.currency, "USD");
}

#[test]
fn garbage_address_is_a_configuration_error() {
    let err = TrackerConfig::new("not-an-address").unwrap_err();
    assert!(matches!(err, TrackerError::Configuration { .. }));
}

#[test]
fn testnet_address_is_rejected() {
    // tb1 addresses are not mainnet
    let err = TrackerConfig::new("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx").unwrap_err();
    assert!(matches!(err, TrackerError::Configuration { .. }));
}

#[test]
fn from_env_requires_the_address_variable() {
    std::env::remove_var(fondo::config::ADDRESS_ENV);
    let err = TrackerConfig::from_env().unwrap_err();
    assert!(matches!(err, TrackerError::Configuration { .. }));
}
