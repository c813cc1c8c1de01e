//! Shared infrastructure for `samhita fetch` adapters.
//!
//! - `FetchClient` — HTTP client with retry / backoff / error classification
//! - `parse_base_url` — validate `--base-url` as a directory URL
//! - `write_text` — write to `--out` or stdout

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use url::Url;

use crate::exit_codes;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub(super) const MAX_RETRIES: u32 = 3;
pub(super) const USER_AGENT: &str = concat!("samhita/", env!("CARGO_PKG_VERSION"));

// ── FetchClient ─────────────────────────────────────────────────────

/// Shared HTTP client that handles retry, backoff, and error classification.
///
/// Pages are returned as text. 401/403 and other 4xx fail immediately;
/// 429, 5xx and network errors are retried with exponential backoff.
pub(super) struct FetchClient {
    http: reqwest::blocking::Client,
    source_name: String,
    initial_backoff: Duration,
}

impl FetchClient {
    pub(super) fn new(source_name: &str) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError {
                code: exit_codes::EXIT_ERROR,
                message: format!("failed to build HTTP client: {e}"),
                hint: None,
            })?;

        Ok(Self {
            http,
            source_name: source_name.to_string(),
            initial_backoff: Duration::from_secs(1),
        })
    }

    /// Override the first backoff interval (doubles per retry).
    pub(super) fn with_backoff(mut self, initial: Duration) -> Self {
        self.initial_backoff = initial;
        self
    }

    /// GET a page with retry + exponential backoff, decoding the body as UTF-8.
    pub(super) fn get_text(&self, url: &Url) -> Result<String, CliError> {
        let mut backoff = self.initial_backoff;

        for attempt in 0..=MAX_RETRIES {
            match self.http.get(url.as_str()).send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Auth errors: fail immediately
                    if status == 401 || status == 403 {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_AUTH,
                            message: format!(
                                "{} access denied ({}): {}",
                                self.source_name, status, url,
                            ),
                            hint: None,
                        });
                    }

                    // Other 4xx (not 429): fail immediately
                    if (400..500).contains(&status) && status != 429 {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_NOT_FOUND,
                            message: format!(
                                "{} page unavailable ({}): {}",
                                self.source_name, status, url,
                            ),
                            hint: None,
                        });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            let code = if status == 429 {
                                exit_codes::EXIT_FETCH_RATE_LIMIT
                            } else {
                                exit_codes::EXIT_FETCH_UPSTREAM
                            };
                            return Err(CliError {
                                code,
                                message: format!(
                                    "{} {} after {} attempts ({}): {}",
                                    self.source_name,
                                    if status == 429 { "rate limited" } else { "upstream error" },
                                    MAX_RETRIES + 1,
                                    status,
                                    url,
                                ),
                                hint: None,
                            });
                        }

                        // Respect Retry-After header for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .map(Duration::from_secs)
                                .unwrap_or(backoff)
                        } else {
                            backoff
                        };

                        eprintln!(
                            "warning: retry {}/{} in {:?} (HTTP {})",
                            attempt + 1,
                            MAX_RETRIES,
                            wait,
                            status,
                        );
                        thread::sleep(wait);
                        backoff *= 2;
                        continue;
                    }

                    // Pages are UTF-8 regardless of the declared charset.
                    let bytes = resp.bytes().map_err(|e| CliError {
                        code: exit_codes::EXIT_FETCH_UPSTREAM,
                        message: format!(
                            "failed to read {} response body: {}",
                            self.source_name, e,
                        ),
                        hint: None,
                    })?;

                    return Ok(String::from_utf8_lossy(&bytes).into_owned());
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_UPSTREAM,
                            message: format!(
                                "{} upstream error after {} attempts: {}",
                                self.source_name, MAX_RETRIES + 1, e,
                            ),
                            hint: None,
                        });
                    }

                    eprintln!(
                        "warning: retry {}/{} in {:?} ({})",
                        attempt + 1,
                        MAX_RETRIES,
                        backoff,
                        e,
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                }
            }
        }

        unreachable!()
    }
}

// ── Shared helpers ──────────────────────────────────────────────────

/// Parse `--base-url` as a directory, so page names join beneath it.
pub(super) fn parse_base_url(raw: &str) -> Result<Url, CliError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash)
        .map_err(|e| CliError::args(format!("invalid --base-url {:?}: {}", raw, e)))
}

/// Join a page name onto the base directory URL.
pub(super) fn page_url(base: &Url, page: &str) -> Result<Url, CliError> {
    base.join(page).map_err(|e| CliError {
        code: exit_codes::EXIT_FETCH_EXTRACT,
        message: format!("cannot resolve {:?} against {}: {}", page, base, e),
        hint: None,
    })
}

pub(super) fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Write text to a file or stdout. Returns the output label for progress messages.
pub(crate) fn write_text(text: &str, out: &Option<PathBuf>) -> Result<String, CliError> {
    let out_label = out
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let mut writer: Box<dyn Write> = match out {
        Some(path) => {
            let f = std::fs::File::create(path).map_err(|e| {
                CliError::io(format!("cannot create {}: {}", path.display(), e))
            })?;
            Box::new(std::io::BufWriter::new(f))
        }
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };

    writer
        .write_all(text.as_bytes())
        .map_err(|e| CliError::io(format!("write error: {}", e)))?;
    writer
        .flush()
        .map_err(|e| CliError::io(format!("flush error: {}", e)))?;

    Ok(out_label)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client() -> FetchClient {
        FetchClient::new("Test").unwrap().with_backoff(Duration::ZERO)
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let base = parse_base_url("https://example.org/doc_veda").unwrap();
        assert_eq!(page_url(&base, "r01.html").unwrap().as_str(), "https://example.org/doc_veda/r01.html");
    }

    #[test]
    fn test_base_url_invalid() {
        let err = parse_base_url("not a url").unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_USAGE);
        assert!(err.message.contains("invalid --base-url"));
    }

    #[test]
    fn test_get_text_success() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path("/r01.html");
            then.status(200)
                .header("content-type", "text/html")
                .body("<pre id=\"content\">अग्निमीळे</pre>");
        });

        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "r01.html").unwrap();
        let text = client().get_text(&url).unwrap();

        page.assert();
        assert!(text.contains("अग्निमीळे"));
    }

    #[test]
    fn test_get_text_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r11.html");
            then.status(404);
        });

        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "r11.html").unwrap();
        let err = client().get_text(&url).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_FETCH_NOT_FOUND);
        assert!(err.message.contains("Test page unavailable (404)"));
    }

    #[test]
    fn test_get_text_auth_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r01.html");
            then.status(403);
        });

        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "r01.html").unwrap();
        let err = client().get_text(&url).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_FETCH_AUTH);
    }

    #[test]
    fn test_get_text_retries_then_gives_up() {
        let server = MockServer::start();
        let failing = server.mock(|when, then| {
            when.method(GET).path("/r01.html");
            then.status(503);
        });

        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "r01.html").unwrap();
        let err = client().get_text(&url).unwrap_err();

        failing.assert_calls((MAX_RETRIES + 1) as usize);
        assert_eq!(err.code, exit_codes::EXIT_FETCH_UPSTREAM);
        assert!(err.message.contains("after 4 attempts (503)"));
    }

    #[test]
    fn test_get_text_rate_limited_exhausts_retries() {
        let server = MockServer::start();
        let limited = server.mock(|when, then| {
            when.method(GET).path("/rvi01.htm");
            then.status(429);
        });

        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "rvi01.htm").unwrap();
        let err = client().get_text(&url).unwrap_err();

        limited.assert_calls((MAX_RETRIES + 1) as usize);
        assert_eq!(err.code, exit_codes::EXIT_FETCH_RATE_LIMIT);
        assert!(err.message.contains("Test rate limited after 4 attempts (429)"));
    }

    #[test]
    fn test_get_text_rate_limit_waits_for_retry_after() {
        let server = MockServer::start();
        let limited = server.mock(|when, then| {
            when.method(GET).path("/rvi01.htm");
            then.status(429).header("Retry-After", "0");
        });

        // Retry-After replaces the backoff, so the long backoff is never slept.
        let slow = FetchClient::new("Test").unwrap().with_backoff(Duration::from_secs(60));
        let url = page_url(&parse_base_url(&server.base_url()).unwrap(), "rvi01.htm").unwrap();
        let started = std::time::Instant::now();
        let err = slow.get_text(&url).unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(10));
        limited.assert_calls((MAX_RETRIES + 1) as usize);
        assert_eq!(err.code, exit_codes::EXIT_FETCH_RATE_LIMIT);
    }

    #[test]
    fn test_write_text_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let label = write_text("HYMN I. Agni.\n", &Some(path.clone())).unwrap();
        assert_eq!(label, path.display().to_string());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "HYMN I. Agni.\n");
    }
}
