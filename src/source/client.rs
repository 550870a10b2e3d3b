use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use super::OccupancySource;
use crate::consts::{LANDING_PATH, OCCUPANCY_PATH, XSRF_COOKIE};
use crate::error::FetchError;

/// Browser-like session against the booking site
pub(crate) struct SessionClient {
    agent: Agent,
    base_url: String,
}

impl SessionClient {
    /// `timeout` of `None` means requests may block indefinitely
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();
        SessionClient {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn landing_url(&self) -> String {
        format!("{}{}", self.base_url, LANDING_PATH)
    }

    fn occupancy_url(&self) -> String {
        format!("{}{}", self.base_url, OCCUPANCY_PATH)
    }

    /// Read the anti-forgery cookie the landing page (or any redirect on the
    /// way to it) left in the agent's jar
    fn xsrf_cookie(&self) -> Option<String> {
        let jar = self.agent.cookie_jar_lock();
        jar.iter()
            .find(|c| c.name() == XSRF_COOKIE)
            .map(|c| c.value().to_string())
    }
}

fn http_error(url: &str, source: ureq::Error) -> FetchError {
    FetchError::Http {
        url: url.to_string(),
        source: Box::new(source),
    }
}

impl OccupancySource for SessionClient {
    fn fetch_occupancy(&self) -> Result<Value, FetchError> {
        // Every fetch starts a fresh session
        self.agent.cookie_jar_lock().clear();

        let landing = self.landing_url();
        log::debug!("GET {landing}");
        self.agent
            .get(&landing)
            .call()
            .map_err(|e| http_error(&landing, e))?;

        let raw_token = self
            .xsrf_cookie()
            .ok_or(FetchError::MissingCookie { name: XSRF_COOKIE })?;
        let token = urlencoding::decode(&raw_token)
            .map_err(|source| FetchError::BadToken {
                name: XSRF_COOKIE,
                source,
            })?
            .into_owned();

        let url = self.occupancy_url();
        log::debug!("POST {url}");
        let response = self
            .agent
            .post(&url)
            .header("x-xsrf-token", token.as_str())
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", landing.as_str())
            .send_empty()
            .map_err(|e| http_error(&url, e))?;

        let mut body = response.into_body();
        let data: Value = serde_json::from_reader(body.as_reader())?;
        Ok(data)
    }
}
