use crate::core::price::{HistoricalPrice, MetalPrices, PriceProvider};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Fetches metal prices from an HTTP endpoint.
///
/// `GET {base_url}` answers with the current [`MetalPrices`] and
/// `GET {base_url}/history` with a list of [`HistoricalPrice`].
pub struct HttpPriceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPriceProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("metaltrack/1.0")
            .build()?;
        Ok(HttpPriceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Requesting metal prices from {}", url);
        let response = with_retry(|| async { self.client.get(url).send().await }, 3, 500)
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for metal prices at {}",
                response.status(),
                url
            ));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))?;
        if text.trim().is_empty() {
            return Err(anyhow!("Received empty response from {}", url));
        }
        Ok(text)
    }
}

#[async_trait]
impl PriceProvider for HttpPriceProvider {
    #[instrument(name = "MetalPriceFetch", skip(self), fields(url = %self.base_url))]
    async fn get_current_prices(&self) -> Result<MetalPrices> {
        let text = self.fetch_text(&self.base_url).await?;
        let prices: MetalPrices = serde_json::from_str(&text).with_context(|| {
            format!("Failed to parse metal prices response. Response: '{text}'")
        })?;
        prices
            .validate()
            .with_context(|| format!("Invalid metal prices from {}", self.base_url))?;
        debug!(?prices, "Received metal prices");
        Ok(prices)
    }

    #[instrument(name = "MetalHistoryFetch", skip(self), fields(url = %self.base_url))]
    async fn get_historical_prices(&self) -> Result<Vec<HistoricalPrice>> {
        let url = format!("{}/history", self.base_url);
        let text = self.fetch_text(&url).await?;
        let mut history: Vec<HistoricalPrice> = serde_json::from_str(&text).with_context(|| {
            format!("Failed to parse historical prices response. Response: '{text}'")
        })?;
        history.sort_by_key(|p| p.date);
        debug!("Received {} historical prices", history.len());
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(
        request_path: &str,
        mock_response: &str,
        status_code: u16,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_response =
            r#"{"goldPerGramZAR": 2272.46, "silverPerGramZAR": 28.12, "zarToUsdRate": 0.055}"#;
        let mock_server = create_mock_server("/", mock_response, 200).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let prices = provider.get_current_prices().await.unwrap();

        assert_eq!(prices.gold_per_gram_base, 2272.46);
        assert_eq!(prices.silver_per_gram_base, 28.12);
        assert_eq!(prices.base_to_secondary_rate, 0.055);
    }

    #[tokio::test]
    async fn test_historical_prices_are_sorted() {
        let mock_response = r#"[
            {"date": "2024-03-03", "gold": 2300.0, "silver": 28.5},
            {"date": "2024-03-01", "gold": 2200.0, "silver": 27.0},
            {"date": "2024-03-02", "gold": 2250.0, "silver": 27.9}
        ]"#;
        let mock_server = create_mock_server("/history", mock_response, 200).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let history = provider.get_historical_prices().await.unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(history[0].gold, 2200.0);
        assert_eq!(history[2].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = create_mock_server("/", r#"{"error": "boom"}"#, 500).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.get_current_prices().await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("HTTP error: 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{ "gold": "abc" }"#;
        let mock_server = create_mock_server("/", mock_response, 200).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.get_current_prices().await;

        assert!(result.is_err());
        let error_message = result.unwrap_err().to_string();
        assert!(error_message.contains("Failed to parse metal prices response"));
        assert!(error_message.contains("Response: '{ \"gold\": \"abc\" }'"));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let mock_response =
            r#"{"goldPerGramZAR": -2272.46, "silverPerGramZAR": 28.12, "zarToUsdRate": 0.055}"#;
        let mock_server = create_mock_server("/", mock_response, 200).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.get_current_prices().await;

        let error_message = format!("{:#}", result.unwrap_err());
        assert!(error_message.starts_with("Invalid metal prices from"));
        assert!(error_message.contains("gold price must be a non-negative number"));
    }

    #[tokio::test]
    async fn test_empty_response() {
        let mock_server = create_mock_server("/history", "", 200).await;

        let provider = HttpPriceProvider::new(&mock_server.uri()).unwrap();
        let result = provider.get_historical_prices().await;

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("Received empty response from {}/history", mock_server.uri())
        );
    }
}
