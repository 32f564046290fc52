//! Connection-manager retry behavior.
//!
//! Needs no database - the point is the target being unreachable - but it
//! takes ~20 s by design, so it stays `#[ignore]`d with the rest.

use std::time::{Duration, Instant};

use secrecy::SecretString;

use mercado_simulator::{ConnectError, SourceDbConfig, connect};

#[tokio::test]
#[ignore = "takes ~20s of fixed retry delays by design"]
async fn unreachable_target_fails_after_five_spaced_attempts() {
    let config = SourceDbConfig {
        host: "127.0.0.1".to_string(),
        // Reserved port nothing listens on; connects are refused immediately
        port: 1,
        database: "db_source".to_string(),
        user: "admin".to_string(),
        password: SecretString::from("admin"),
    };

    let started = Instant::now();
    let result = connect(&config).await;
    let elapsed = started.elapsed();

    let err = result.expect_err("target is unreachable");
    let ConnectError::Exhausted { attempts, .. } = err;
    assert_eq!(attempts, 5);

    // 4 fixed 5 s delays between 5 attempts; refusals themselves are fast
    assert!(elapsed >= Duration::from_secs(20), "elapsed: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(40), "elapsed: {elapsed:?}");
}
