use crate::domain::model::RawRecord;
use reqwest::Client;

/// Downloads the dataset and splits it into raw records.
///
/// Every failure (transport, HTTP status, body decoding, unexpected shape) is
/// logged and reported as an empty vector; callers treat "empty" as "fetch
/// failed".
pub async fn fetch(client: &Client, url: &str) -> Vec<RawRecord> {
    tracing::debug!("Making API request to: {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ Error fetching data: {}", e);
            return Vec::new();
        }
    };

    tracing::debug!("API response status: {}", response.status());

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ Error fetching data: {}", e);
            return Vec::new();
        }
    };

    let json_data: serde_json::Value = match response.json().await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("❌ Error decoding response body: {}", e);
            return Vec::new();
        }
    };

    let serde_json::Value::Array(items) = json_data else {
        tracing::error!("❌ Expected a JSON array of records from {}", url);
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(obj) => Some(RawRecord::from_json_object(obj)),
            _ => None,
        })
        .collect();

    if records.len() != total {
        tracing::debug!("Skipped {} non-object array elements", total - records.len());
    }
    tracing::info!("Fetched {} records", records.len());

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FieldValue;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/meteorites.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"name": "Aachen", "mass": "21", "year": "1880-01-01T00:00:00.000"},
                    {"name": "Aarhus", "mass": "720", "year": "1951-01-01T00:00:00.000"}
                ]));
        });

        let records = fetch(&Client::new(), &server.url("/meteorites.json")).await;

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("name"),
            Some(&FieldValue::Text("Aachen".to_string()))
        );
        assert_eq!(
            records[1].get("mass"),
            Some(&FieldValue::Text("720".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fetch_server_error_returns_empty() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/meteorites.json");
            then.status(500);
        });

        let records = fetch(&Client::new(), &server.url("/meteorites.json")).await;

        api_mock.assert();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_returns_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/meteorites.json");
            then.status(200).body("<html>maintenance</html>");
        });

        let records = fetch(&Client::new(), &server.url("/meteorites.json")).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_array_body_returns_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/meteorites.json");
            then.status(200)
                .json_body(serde_json::json!({"error": "rate limited"}));
        });

        let records = fetch(&Client::new(), &server.url("/meteorites.json")).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_skips_non_object_elements() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/meteorites.json");
            then.status(200)
                .json_body(serde_json::json!([{"name": "Abee"}, 42, "text", null]));
        });

        let records = fetch(&Client::new(), &server.url("/meteorites.json")).await;
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_returns_empty() {
        // Port 9 (discard) is closed on test hosts; the connect fails fast.
        let records = fetch(&Client::new(), "http://127.0.0.1:9/meteorites.json").await;
        assert!(records.is_empty());
    }
}
