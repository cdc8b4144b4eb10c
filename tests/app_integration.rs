use metaltrack::cli::holdings::{NewCoin, NewJewellery};
use metaltrack::cli::{PriceSource, resolve_quote};
use metaltrack::core::config::AppConfig;
use metaltrack::core::holdings::HoldingsStore;
use metaltrack::core::valuation::value_portfolio;
use metaltrack::core::zakah::{ZakahError, evaluate_zakah};
use metaltrack::core::{Metal, WeightUnit};
use metaltrack::store::disk::DiskHoldings;
use metaltrack::{AppCommand, PriceOverrides};
use std::fs;
use std::path::Path;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_prices_mock_server(current: &str, history: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(current))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string(history))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, providers: &str, extra: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
base_currency: "ZAR"
secondary_currency: "USD"
providers:
{providers}
data_path: "{}"
{extra}
"#,
            dir.join("data").display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

async fn run(command: AppCommand, config_path: &Path, overrides: PriceOverrides) -> anyhow::Result<()> {
    metaltrack::run_command(command, Some(config_path.to_str().unwrap()), overrides).await
}

async fn add_holdings(config_path: &Path) {
    run(
        AppCommand::AddCoin(NewCoin {
            name: "Krugerrand".to_string(),
            metal: Metal::Gold,
            quantity: 3,
            weight: 1.0,
            unit: WeightUnit::Ounces,
        }),
        config_path,
        PriceOverrides::default(),
    )
    .await
    .expect("Failed to add coin");

    run(
        AppCommand::AddJewellery(NewJewellery {
            name: "Necklace".to_string(),
            metal: Metal::Gold,
            weight: 20.0,
            unit: WeightUnit::Grams,
            description: Some("Wedding gift".to_string()),
            karat: Some(18),
        }),
        config_path,
        PriceOverrides::default(),
    )
    .await
    .expect("Failed to add jewellery");
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let current = r#"{"goldPerGramZAR": 2000.0, "silverPerGramZAR": 25.0, "zarToUsdRate": 0.055}"#;
    let history = r#"[{"date": "2024-03-01", "gold": 1990.0, "silver": 24.5},
                      {"date": "2024-03-02", "gold": 2000.0, "silver": 25.0}]"#;
    let mock_server = test_utils::create_prices_mock_server(current, history).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let providers = format!(
        "  metals:\n    base_url: \"{}\"\n  synthetic_fallback: false",
        mock_server.uri()
    );
    let config_path = test_utils::write_config(dir.path(), &providers, "");

    add_holdings(&config_path).await;

    for command in [
        AppCommand::Summary { currency: None },
        AppCommand::Summary {
            currency: Some("USD".to_string()),
        },
        AppCommand::Zakah,
        AppCommand::History,
    ] {
        let result = run(command, &config_path, PriceOverrides::default()).await;
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }

    let store = DiskHoldings::open(&dir.path().join("data")).expect("Failed to open store");
    let coins = store.list_coins().unwrap();
    let jewellery = store.list_jewellery().unwrap();
    info!(?coins, ?jewellery, "Stored holdings");
    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0].quantity, 3);
    assert_eq!(jewellery.len(), 1);
    assert_eq!(jewellery[0].karat, Some(18));
    drop(store);

    // Value the stored holdings against the quote served by the mock
    let config = AppConfig::load_from_path(&config_path).unwrap();
    let provider = metaltrack::providers::build_price_provider(&config.providers)
        .unwrap()
        .expect("A metals provider is configured");
    let (quote, source) = resolve_quote(Some(provider.as_ref()), &config.base_currency, None).await;
    assert_eq!(source, PriceSource::Fetched);

    // 3 x 1 oz 24K at 2000/g plus 20 g of 18K
    let expected_total = 3.0 * 62207.0 + 20.0 * 2000.0 * 0.75;
    let portfolio = value_portfolio(&coins, &jewellery, "ZAR", &quote);
    assert!((portfolio.total_value - expected_total).abs() < 1e-6);
    let portfolio = value_portfolio(&coins, &jewellery, "USD", &quote);
    assert!((portfolio.total_value - expected_total * 0.055).abs() < 1e-6);

    let zakah = evaluate_zakah(&coins, &jewellery, &quote).unwrap();
    assert!(zakah.nisab_met);
    assert!((zakah.amount_in_base - expected_total * 0.025).abs() < 1e-6);
}

#[test_log::test(tokio::test)]
async fn test_summary_currency_must_be_configured() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "  synthetic_fallback: true", "");

    let result = run(
        AppCommand::Summary {
            currency: Some("zar".to_string()),
        },
        &config_path,
        PriceOverrides::default(),
    )
    .await;
    assert!(result.is_ok(), "Summary failed with: {:?}", result.err());

    let result = run(
        AppCommand::Summary {
            currency: Some("EUR".to_string()),
        },
        &config_path,
        PriceOverrides::default(),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unsupported currency EUR, expected ZAR or USD"
    );
}

#[test_log::test(tokio::test)]
async fn test_negative_manual_price_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "  synthetic_fallback: true", "");

    let overrides = PriceOverrides {
        gold_per_gram: Some(-1000.0),
        silver_per_gram: None,
    };
    let result = run(AppCommand::Zakah, &config_path, overrides).await;
    assert_eq!(result.unwrap_err().to_string(), "Invalid manual prices");
}

#[test_log::test(tokio::test)]
async fn test_zakah_fails_without_prices() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path =
        test_utils::write_config(dir.path(), "  synthetic_fallback: false", "");

    add_holdings(&config_path).await;

    let result = run(AppCommand::Zakah, &config_path, PriceOverrides::default()).await;
    let err = result.expect_err("Zakah must fail without prices");
    assert_eq!(
        err.downcast_ref::<ZakahError>(),
        Some(&ZakahError::PricesUnavailable)
    );

    // Values degrade to zero instead of failing.
    let result = run(
        AppCommand::Summary { currency: None },
        &config_path,
        PriceOverrides::default(),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_zakah_with_manual_prices() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(
        dir.path(),
        "  synthetic_fallback: false",
        "manual_prices:\n  enabled: true\n  gold_per_gram: 1000.0\n  silver_per_gram: 10.0",
    );

    add_holdings(&config_path).await;

    let result = run(AppCommand::Zakah, &config_path, PriceOverrides::default()).await;
    assert!(result.is_ok(), "Zakah failed with: {:?}", result.err());

    let overrides = PriceOverrides {
        gold_per_gram: Some(1200.0),
        silver_per_gram: None,
    };
    let result = run(AppCommand::Zakah, &config_path, overrides).await;
    assert!(result.is_ok(), "Zakah failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_live_failure_falls_back_to_synthetic_prices() {
    let mock_server = wiremock::MockServer::start().await; // no mounts, every request 404s

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let providers = format!(
        "  metals:\n    base_url: \"{}\"\n  synthetic_fallback: true",
        mock_server.uri()
    );
    let config_path = test_utils::write_config(dir.path(), &providers, "");

    add_holdings(&config_path).await;

    let result = run(AppCommand::Zakah, &config_path, PriceOverrides::default()).await;
    assert!(result.is_ok(), "Zakah failed with: {:?}", result.err());
    let result = run(AppCommand::History, &config_path, PriceOverrides::default()).await;
    assert!(result.is_ok(), "History failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_remove_holding() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path =
        test_utils::write_config(dir.path(), "  synthetic_fallback: true", "");

    add_holdings(&config_path).await;

    let coin_id = {
        let store = DiskHoldings::open(&dir.path().join("data")).unwrap();
        store.list_coins().unwrap()[0].id
    };

    let result = run(
        AppCommand::Remove {
            id: coin_id.to_string(),
        },
        &config_path,
        PriceOverrides::default(),
    )
    .await;
    assert!(result.is_ok(), "Remove failed with: {:?}", result.err());

    let store = DiskHoldings::open(&dir.path().join("data")).unwrap();
    assert!(store.list_coins().unwrap().is_empty());
    assert_eq!(store.list_jewellery().unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, "base_currency: [not, a, string]").unwrap();

    let result = run(AppCommand::Zakah, &config_path, PriceOverrides::default()).await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file")
    );
}
