//! Blocking HTTP fetch of the GeoJSON summary feed. One round trip, no retries.

use super::{parse_feed, Event, FeedSource};
use crate::config::FeedConfig;
use crate::error::{QuakeError, Result};
use std::time::Duration;
use tracing::info;

pub struct HttpFeedSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        Self::with_builder(config, reqwest::blocking::Client::builder())
    }

    fn with_builder(config: &FeedConfig, builder: reqwest::blocking::ClientBuilder) -> Result<Self> {
        let client = builder
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> Result<Vec<Event>> {
        let res = self.client.get(&self.url).send()?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().unwrap_or_default();
            return Err(QuakeError::Status { status, body });
        }
        let body = res.text()?;
        let events = parse_feed(&body)?;
        info!(url = %self.url, count = events.len(), "fetched feed");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve exactly one canned HTTP response on an ephemeral local port.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        (format!("http://{addr}/summary/all_month.geojson"), handle)
    }

    fn source_for(url: String) -> HttpFeedSource {
        let config = FeedConfig {
            url,
            timeout_secs: 5,
            ..FeedConfig::default()
        };
        // loopback server; ignore any HTTP_PROXY in the environment
        HttpFeedSource::with_builder(&config, reqwest::blocking::Client::builder().no_proxy()).unwrap()
    }

    #[test]
    fn new_uses_configured_url() {
        let source = HttpFeedSource::new(&FeedConfig::default()).unwrap();
        assert_eq!(source.url(), crate::config::USGS_ALL_MONTH);
    }

    #[test]
    fn success_parses_feature_collection() {
        let body = r#"{"type": "FeatureCollection", "features": [
            {"id": "hv1", "properties": {"mag": 2.8, "place": "Pahala", "time": 1704067200000},
             "geometry": {"coordinates": [-155.4, 19.2, 31.0]}},
            {"id": "nc2", "properties": {"mag": -0.3, "place": "The Geysers", "time": 1704067200000},
             "geometry": {"coordinates": [-122.8, 38.8, 2.0]}},
            {"id": "ak3", "properties": {"mag": 3.1, "place": "Cantwell", "time": 1704067260000},
             "geometry": {"coordinates": [-148.9, 63.4, 90.0]}}
        ]}"#;
        let (url, server) = serve_once("200 OK", body);
        let source = source_for(url.clone());
        assert_eq!(source.url(), url);

        let events = source.fetch().unwrap();
        server.join().unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["hv1", "ak3"]);
    }

    #[test]
    fn non_success_status_is_error_with_body() {
        let (url, server) = serve_once("503 Service Unavailable", "try later");
        let err = source_for(url).fetch().unwrap_err();
        server.join().unwrap();
        match err {
            QuakeError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "try later");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let (url, server) = serve_once("200 OK", "<html>maintenance</html>");
        let err = source_for(url).fetch().unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, QuakeError::Parse(_)));
    }
}
