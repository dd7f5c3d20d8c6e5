//! Configuration builder defaults and validation.

use std::time::Duration;

use pagelift::config::ScrapeConfig;

#[test]
fn defaults_are_sensible() {
    let config = ScrapeConfig::builder()
        .output_dir("/tmp/pagelift-test")
        .build()
        .expect("default build");

    assert!(config.headless());
    assert_eq!(config.page_load_timeout(), Duration::from_secs(30));
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.retry_base_delay(), Duration::from_secs(2));
    assert!((config.backoff_factor() - 2.0).abs() < f64::EPSILON);
    assert!(config.scroll_enabled());
    assert_eq!(config.scroll_pause(), Duration::from_secs(2));
    assert_eq!(config.max_scroll_rounds(), 10);
    assert!(!config.disable_images());
    assert_eq!(config.proxy_address(), None);
    assert_eq!(config.max_images_to_download(), 50);
    assert_eq!(config.asset_concurrency(), 4);
    assert_eq!(config.asset_request_timeout(), Duration::from_secs(10));
    assert!(!config.user_agents().is_empty());
}

#[test]
fn setters_flow_into_the_config() {
    let config = ScrapeConfig::builder()
        .headless(false)
        .page_load_timeout_secs(5)
        .max_retries(7)
        .retry_base_delay_ms(100)
        .backoff_factor(1.5)
        .scroll_enabled(false)
        .max_scroll_rounds(2)
        .disable_images(true)
        .proxy_address(Some("127.0.0.1:9050".to_string()))
        .max_images_to_download(0)
        .asset_concurrency(8)
        .user_agents(vec!["TestAgent/1.0".to_string()])
        .output_dir("/tmp/pagelift-out")
        .build()
        .expect("custom build");

    assert!(!config.headless());
    assert_eq!(config.page_load_timeout(), Duration::from_secs(5));
    assert_eq!(config.max_retries(), 7);
    assert_eq!(config.retry_base_delay(), Duration::from_millis(100));
    assert!(!config.scroll_enabled());
    assert_eq!(config.max_scroll_rounds(), 2);
    assert!(config.disable_images());
    assert_eq!(config.proxy_address(), Some("127.0.0.1:9050"));
    assert_eq!(config.max_images_to_download(), 0);
    assert_eq!(config.asset_concurrency(), 8);
    assert_eq!(config.user_agents(), ["TestAgent/1.0".to_string()]);
}

#[test]
fn relative_output_dir_becomes_absolute() {
    let config = ScrapeConfig::builder()
        .output_dir("relative/out")
        .build()
        .expect("build");
    assert!(config.output_dir().is_absolute());
    assert!(config.output_dir().ends_with("relative/out"));
}

#[test]
fn empty_user_agent_pool_is_rejected() {
    let err = ScrapeConfig::builder()
        .user_agents(Vec::new())
        .output_dir("/tmp/x")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("user agent"));
}

#[test]
fn backoff_factor_below_one_is_rejected() {
    let err = ScrapeConfig::builder()
        .backoff_factor(0.5)
        .output_dir("/tmp/x")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("backoff"));
}

#[test]
fn zero_retries_is_rejected() {
    let err = ScrapeConfig::builder()
        .max_retries(0)
        .output_dir("/tmp/x")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("max_retries"));
}

#[test]
fn zero_asset_concurrency_is_clamped_to_one() {
    let config = ScrapeConfig::builder()
        .asset_concurrency(0)
        .output_dir("/tmp/x")
        .build()
        .expect("build");
    assert_eq!(config.asset_concurrency(), 1);
}
