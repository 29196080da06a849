//! The client entry point and its builder.

use crate::api::Task;
use crate::audio::Audio;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::nlp::Nlp;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::vision::Vision;
use std::sync::Arc;

/// Client for a hosted inference service.
///
/// Obtain an instance via [`InferenceClient::builder()`] and the
/// [`InferenceClientBuilder`], then use [`nlp`](Self::nlp),
/// [`vision`](Self::vision), or [`audio`](Self::audio) for the task facades.
/// The client is cheap to clone; all clones share one transport.
#[derive(Clone)]
pub struct InferenceClient {
    executor: Arc<RequestExecutor>,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient").finish_non_exhaustive()
    }
}

impl InferenceClient {
    /// Create a new [`InferenceClientBuilder`] for configuring and
    /// constructing a client.
    pub fn builder() -> InferenceClientBuilder {
        InferenceClientBuilder::default()
    }

    /// Build a client with the default configuration.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::builder().api_token(api_token).build()
    }

    /// Text task facade.
    pub fn nlp(&self) -> Nlp {
        Nlp::new(self.executor.clone())
    }

    /// Image task facade.
    pub fn vision(&self) -> Vision {
        Vision::new(self.executor.clone())
    }

    /// Audio task facade.
    pub fn audio(&self) -> Audio {
        Audio::new(self.executor.clone())
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Tasks with a configured default model, sorted by wire name.
    pub fn supported_tasks(&self) -> Vec<Task> {
        self.executor.config().supported_tasks()
    }
}

/// Builder for constructing an [`InferenceClient`] with an API token, an
/// optional configuration, and an optional transport override.
///
/// ```rust,no_run
/// # use hugface::client::InferenceClient;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = InferenceClient::builder()
///     .api_token("hf_...")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct InferenceClientBuilder {
    api_token: Option<String>,
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl InferenceClientBuilder {
    /// Set the bearer token sent with every inference request. Required.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Use a pre-built configuration instead of the defaults.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a JSON string.
    pub fn config_from_str(mut self, s: &str) -> Result<Self> {
        self.config = Some(ClientConfig::from_json_str(s)?);
        Ok(self)
    }

    /// Load the configuration from a JSON file.
    pub fn config_from_file(mut self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        self.config = Some(ClientConfig::from_file(path)?);
        Ok(self)
    }

    /// Substitute the HTTP transport. Intended for tests.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and return the constructed
    /// [`InferenceClient`].
    ///
    /// Returns an error when the API token is missing or empty, or when the
    /// configuration fails validation.
    pub fn build(self) -> Result<InferenceClient> {
        let api_token = match self.api_token {
            Some(token) if !token.is_empty() => token,
            Some(_) => return Err(Error::Config("api_token cannot be empty".to_string())),
            None => return Err(Error::Config("api_token must be provided".to_string())),
        };

        let config = self.config.unwrap_or_default();
        config.validate()?;
        let config = Arc::new(config);

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.request_timeout())?),
        };

        Ok(InferenceClient {
            executor: Arc::new(RequestExecutor::new(transport, config, api_token)),
        })
    }
}
