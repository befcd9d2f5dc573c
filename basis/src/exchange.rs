//! Client for the Basis Set Exchange REST API (gaussian94 format).

use crate::basis::{parse_gaussian94, Gaussian94Document};
use crate::error::{BasisError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_URL: &str = "https://www.basissetexchange.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct BasisSetExchange {
    client: Client,
    base_url: String,
    retries: usize,
}

impl BasisSetExchange {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_URL, DEFAULT_TIMEOUT, 1)
    }

    pub fn with_options(base_url: &str, timeout: Duration, retries: usize) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
        })
    }

    pub fn url(&self, basis_name: &str, atomic_numbers: &[usize]) -> String {
        let elements: BTreeSet<usize> = atomic_numbers.iter().copied().collect();
        let elements: Vec<String> = elements.iter().map(usize::to_string).collect();
        format!(
            "{}/api/basis/{}/format/gaussian94/?version=1&elements={}",
            self.base_url,
            basis_name,
            elements.join(",")
        )
    }

    /// Downloads the gaussian94 text of `basis_name` for the given elements.
    pub fn fetch_text(&self, basis_name: &str, atomic_numbers: &[usize]) -> Result<String> {
        let url = self.url(basis_name, atomic_numbers);
        debug!("GET {}", url);

        let response = self.get_with_retry(&url)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        body.trim().to_string()
                    }
                });
            return Err(BasisError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text()?)
    }

    /// Fetches and parses a basis set; any element failing to parse fails the call.
    pub fn get_basis_set(&self, basis_name: &str, atomic_numbers: &[usize]) -> Result<Gaussian94Document> {
        let text = self.fetch_text(basis_name, atomic_numbers)?;
        parse_gaussian94(basis_name, &text)
    }

    fn get_with_retry(&self, url: &str) -> Result<Response> {
        let mut attempt = 0;
        loop {
            match self.client.get(url).send() {
                Ok(response) if is_transient_status(response.status()) && attempt < self.retries => {
                    warn!("basis set exchange answered {}, retrying", response.status());
                }
                Ok(response) => return Ok(response),
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < self.retries => {
                    warn!("basis set request failed ({}), retrying", e);
                }
                Err(e) => return Err(e.into()),
            }
            attempt += 1;
        }
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves one canned `(status line, body)` per connection, then reports
    /// how many requests it answered.
    fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut served = 0;
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                    line.clear();
                }
                write!(
                    stream,
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .unwrap();
                stream.flush().unwrap();
                served += 1;
            }
            served
        });
        (base, handle)
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let (base, handle) = serve(vec![(
            "404 Not Found",
            r#"{"message": "Basis set nope does not exist"}"#,
        )]);
        let bse = BasisSetExchange::with_options(&base, DEFAULT_TIMEOUT, 1).unwrap();
        match bse.fetch_text("nope", &[1]) {
            Err(BasisError::Server { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Basis set nope does not exist");
            }
            other => panic!("expected server error, got {:?}", other),
        }
        assert_eq!(handle.join().unwrap(), 1);
    }

    #[test]
    fn test_plain_body_is_used_as_message() {
        let (base, handle) = serve(vec![("500 Internal Server Error", "database is down\n")]);
        let bse = BasisSetExchange::with_options(&base, DEFAULT_TIMEOUT, 1).unwrap();
        match bse.fetch_text("sto-3g", &[1]) {
            Err(BasisError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database is down");
            }
            other => panic!("expected server error, got {:?}", other),
        }
        assert_eq!(handle.join().unwrap(), 1);
    }

    #[test]
    fn test_transient_status_is_retried_once() {
        let (base, handle) = serve(vec![
            ("503 Service Unavailable", ""),
            ("200 OK", "H 0\nS 1 1.00\n1.0 1.0\n****\n"),
        ]);
        let bse = BasisSetExchange::with_options(&base, DEFAULT_TIMEOUT, 1).unwrap();
        let text = bse.fetch_text("sto-3g", &[1]).unwrap();
        assert!(text.starts_with("H 0"));
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[test]
    fn test_retries_are_bounded() {
        let (base, handle) = serve(vec![
            ("503 Service Unavailable", ""),
            ("503 Service Unavailable", ""),
        ]);
        let bse = BasisSetExchange::with_options(&base, DEFAULT_TIMEOUT, 1).unwrap();
        match bse.fetch_text("sto-3g", &[1]) {
            Err(BasisError::Server { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected server error, got {:?}", other),
        }
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[test]
    fn test_url_deduplicates_and_sorts_elements() {
        let bse = BasisSetExchange::with_options("https://example.org/", DEFAULT_TIMEOUT, 0).unwrap();
        assert_eq!(
            bse.url("6-31G*", &[8, 1, 1]),
            "https://example.org/api/basis/6-31G*/format/gaussian94/?version=1&elements=1,8"
        );
    }

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient_status(StatusCode::NOT_FOUND));
        assert!(!is_transient_status(StatusCode::OK));
    }
}
