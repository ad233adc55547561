use crate::core::emit::render_table;
use crate::core::extract::RowExtractor;
use crate::core::resolve::KeyRegistry;
use crate::core::{ColorRecord, ConfigProvider, Pipeline, RawRow, Storage, TransformResult};
use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;

pub struct ColorPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    extractor: RowExtractor,
}

impl<S: Storage, C: ConfigProvider> ColorPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent().to_string())
            .build()?;

        Ok(Self {
            storage,
            config,
            client,
            extractor: RowExtractor::new()?,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ColorPipeline<S, C> {
    /// Fetches every source page sequentially, in enumeration order, and
    /// concatenates the parsed rows. Order is load-bearing: it decides
    /// which duplicate name wins the bare key downstream. Any transport
    /// error or non-success status aborts the run.
    async fn extract(&self) -> Result<Vec<RawRow>> {
        let mut rows = Vec::new();

        for url in self.config.sources() {
            tracing::debug!("Fetching {}", url);
            let response =
                self.client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| ScrapeError::Fetch {
                        url: url.clone(),
                        source: e,
                    })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::Status {
                    url: url.clone(),
                    status,
                });
            }

            let body = response.text().await.map_err(|e| ScrapeError::Fetch {
                url: url.clone(),
                source: e,
            })?;

            let page_rows = self.extractor.rows(&body);
            tracing::debug!("{}: {} candidate rows", url, page_rows.len());
            rows.extend(page_rows);
        }

        Ok(rows)
    }

    /// Resolves a unique key per row and derives the RGB triple. The
    /// registry spans all sources, so suffix assignment depends only on
    /// overall row order and the canonicalization function.
    async fn transform(&self, rows: Vec<RawRow>) -> Result<TransformResult> {
        let mut registry = KeyRegistry::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let Some(rgb) = split_rgb(&row.hex) else {
                tracing::debug!("Dropping row {:?}: malformed hex {:?}", row.name, row.hex);
                continue;
            };
            let Some(key) = registry.claim(&row.name) else {
                tracing::debug!("Dropping row {:?}: no key material in name", row.name);
                continue;
            };

            records.push(ColorRecord {
                key,
                name: row.name,
                hex: row.hex,
                rgb,
            });
        }

        let table_source = render_table(&records);
        Ok(TransformResult {
            records,
            table_source,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!("{}/colors.rs", self.config.output_path());

        tracing::debug!(
            "Writing {} bytes ({} records) to {}",
            result.table_source.len(),
            result.records.len(),
            output_path
        );
        self.storage
            .write_file("colors.rs", result.table_source.as_bytes())
            .await?;

        Ok(output_path)
    }
}

/// `#RRGGBB` → byte triple. The extractor guarantees the shape, but a
/// malformed value is dropped rather than trusted.
fn split_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((byte(0)?, byte(2)?, byte(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        sources: Vec<String>,
        output_path: String,
    }

    impl MockConfig {
        fn new(sources: Vec<String>) -> Self {
            Self {
                sources,
                output_path: "test_output".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn sources(&self) -> &[String] {
            &self.sources
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn user_agent(&self) -> &str {
            "pigment-scrape-tests"
        }
    }

    fn wiki_page(rows: &str) -> String {
        format!(
            "<html><body><table class=\"wikitable\"><tbody>\
             <tr><th>Name</th><th>Hex</th></tr>{rows}</tbody></table></body></html>"
        )
    }

    fn html_mock<'a>(server: &'a MockServer, path: &'static str, body: String) -> httpmock::Mock<'a> {
        server.mock(move |when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body);
        })
    }

    #[tokio::test]
    async fn extract_concatenates_sources_in_enumeration_order() {
        let server = MockServer::start();
        let first = html_mock(
            &server,
            "/a-f",
            wiki_page("<tr><td>Absolute Zero</td><td>#0048BA</td></tr>"),
        );
        let second = html_mock(
            &server,
            "/g-m",
            wiki_page("<tr><td>Green</td><td>#00ff00</td></tr>"),
        );

        let config = MockConfig::new(vec![server.url("/a-f"), server.url("/g-m")]);
        let pipeline = ColorPipeline::new(MockStorage::new(), config).unwrap();

        let rows = pipeline.extract().await.unwrap();

        first.assert();
        second.assert();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Absolute Zero");
        assert_eq!(rows[1].name, "Green");
        assert_eq!(rows[1].hex, "#00FF00");
    }

    #[tokio::test]
    async fn extract_fails_fast_on_http_error_status() {
        let server = MockServer::start();
        let ok = html_mock(
            &server,
            "/ok",
            wiki_page("<tr><td>Red</td><td>#FF0000</td></tr>"),
        );
        let broken = server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(503);
        });

        let config = MockConfig::new(vec![server.url("/ok"), server.url("/broken")]);
        let pipeline = ColorPipeline::new(MockStorage::new(), config).unwrap();

        let err = pipeline.extract().await.unwrap_err();

        ok.assert();
        broken.assert();
        match err {
            ScrapeError::Status { url, status } => {
                assert!(url.ends_with("/broken"));
                assert_eq!(status.as_u16(), 503);
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn extract_fails_on_unreachable_source() {
        // Nothing listens on port 1.
        let config = MockConfig::new(vec!["http://127.0.0.1:1/colors".to_string()]);
        let pipeline = ColorPipeline::new(MockStorage::new(), config).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { .. }));
    }

    #[tokio::test]
    async fn extract_skips_malformed_rows_without_error() {
        let server = MockServer::start();
        let _page = html_mock(
            &server,
            "/page",
            wiki_page(
                "<tr><td>Absolute Zero</td><td>#0048BA</td></tr>\
                 <tr><td>Only one cell</td></tr>\
                 <tr><td>No token</td><td>a plain description</td></tr>",
            ),
        );

        let config = MockConfig::new(vec![server.url("/page")]);
        let pipeline = ColorPipeline::new(MockStorage::new(), config).unwrap();

        let rows = pipeline.extract().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Absolute Zero");
    }

    fn raw(name: &str, hex: &str) -> RawRow {
        RawRow {
            name: name.to_string(),
            hex: hex.to_string(),
        }
    }

    fn test_pipeline() -> ColorPipeline<MockStorage, MockConfig> {
        ColorPipeline::new(MockStorage::new(), MockConfig::new(vec![])).unwrap()
    }

    #[tokio::test]
    async fn transform_derives_rgb_from_hex() {
        let pipeline = test_pipeline();
        let result = pipeline
            .transform(vec![raw("Absolute Zero", "#0048BA")])
            .await
            .unwrap();

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.key, "absolutezero");
        assert_eq!(record.hex, "#0048BA");
        assert_eq!(record.rgb, (0, 72, 186));
    }

    #[tokio::test]
    async fn transform_suffixes_colliding_keys_in_encounter_order() {
        let pipeline = test_pipeline();
        let result = pipeline
            .transform(vec![raw("Red", "#FF0000"), raw("RED!!", "#EE0000")])
            .await
            .unwrap();

        let keys: Vec<_> = result.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["red", "red2"]);
        // First-seen name keeps the bare key and its own hex.
        assert_eq!(result.records[0].hex, "#FF0000");
        assert_eq!(result.records[1].name, "RED!!");
    }

    #[tokio::test]
    async fn transform_drops_rows_whose_name_has_no_key_material() {
        let pipeline = test_pipeline();
        let result = pipeline
            .transform(vec![raw("###", "#123456"), raw("Real", "#654321")])
            .await
            .unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].key, "real");
    }

    #[tokio::test]
    async fn transform_renders_the_table_source() {
        let pipeline = test_pipeline();
        let result = pipeline
            .transform(vec![raw("Acid Green", "#B0BF1A")])
            .await
            .unwrap();

        assert!(result
            .table_source
            .contains("\"acidgreen\" => crate::Color{ name:\"Acid Green\", hex:\"#B0BF1A\", rgb:(176,191,26) },"));
        assert!(result.table_source.starts_with("///  ***  AUTO-GENERATED"));
    }

    #[tokio::test]
    async fn transform_of_no_rows_yields_an_empty_table() {
        let pipeline = test_pipeline();
        let result = pipeline.transform(vec![]).await.unwrap();

        assert!(result.records.is_empty());
        assert!(result.table_source.contains("phf_map! {\n};\n"));
    }

    #[tokio::test]
    async fn load_writes_the_rendered_source_verbatim() {
        let storage = MockStorage::new();
        let pipeline =
            ColorPipeline::new(storage.clone(), MockConfig::new(vec![])).unwrap();

        let result = pipeline
            .transform(vec![raw("Absolute Zero", "#0048BA")])
            .await
            .unwrap();
        let expected = result.table_source.clone();

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "test_output/colors.rs");

        let written = storage.get_file("colors.rs").await.unwrap();
        assert_eq!(written, expected.as_bytes());
    }

    #[test]
    fn split_rgb_decomposes_byte_pairs() {
        assert_eq!(split_rgb("#0048BA"), Some((0, 72, 186)));
        assert_eq!(split_rgb("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(split_rgb("#000000"), Some((0, 0, 0)));
    }

    #[test]
    fn split_rgb_rejects_malformed_input() {
        assert_eq!(split_rgb("0048BA"), None);
        assert_eq!(split_rgb("#0048B"), None);
        assert_eq!(split_rgb("#GG48BA"), None);
        assert_eq!(split_rgb("#0048BA0"), None);
    }
}
