//! Authentication method detection tests

use bedrock_gateway::auth::{detect_auth_method, AuthMethod, AuthSignals};

fn signals(
    bearer: bool,
    profile: bool,
    access_key: bool,
    secret_key: bool,
) -> AuthSignals {
    AuthSignals {
        bearer_token: bearer.then(|| "bedrock-key".to_string()),
        profile: profile.then(|| "dev-profile".to_string()),
        access_key: access_key.then(|| "AKIAEXAMPLE".to_string()),
        secret_key: secret_key.then(|| "secret".to_string()),
        region: None,
    }
}

#[test]
fn test_no_signals_defaults_to_cli() {
    assert_eq!(
        detect_auth_method(&signals(false, false, false, false)),
        AuthMethod::AwsCli
    );
}

#[test]
fn test_priority_order_over_all_combinations() {
    // Exhaustive sweep of the signal space: the highest-priority present
    // signal decides, lower signals never change the outcome
    for bearer in [false, true] {
        for profile in [false, true] {
            for access in [false, true] {
                for secret in [false, true] {
                    let detected = detect_auth_method(&signals(bearer, profile, access, secret));

                    let expected = if bearer {
                        AuthMethod::BedrockApiKey
                    } else if profile {
                        AuthMethod::SsoProfile
                    } else if access && secret {
                        AuthMethod::EnvVars
                    } else {
                        AuthMethod::AwsCli
                    };

                    assert_eq!(
                        detected, expected,
                        "bearer={} profile={} access={} secret={}",
                        bearer, profile, access, secret
                    );
                }
            }
        }
    }
}

#[test]
fn test_changing_lower_priority_signals_is_irrelevant() {
    // With the bearer key present, every lower-signal combination detects the same method
    for profile in [false, true] {
        for access in [false, true] {
            for secret in [false, true] {
                assert_eq!(
                    detect_auth_method(&signals(true, profile, access, secret)),
                    AuthMethod::BedrockApiKey
                );
            }
        }
    }

    // Same for the profile once the bearer key is absent
    for access in [false, true] {
        for secret in [false, true] {
            assert_eq!(
                detect_auth_method(&signals(false, true, access, secret)),
                AuthMethod::SsoProfile
            );
        }
    }
}

#[test]
fn test_partial_key_pair_is_not_enough() {
    assert_eq!(
        detect_auth_method(&signals(false, false, true, false)),
        AuthMethod::AwsCli
    );
    assert_eq!(
        detect_auth_method(&signals(false, false, false, true)),
        AuthMethod::AwsCli
    );
}
