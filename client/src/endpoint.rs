use std::future::Future;

use log::debug;
use reqwest::Client;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConfigError, SubmissionError};
use crate::form::FormInput;
use crate::models::PredictionResponse;

/// The external service that turns form fields into a prediction.
pub trait PredictionEndpoint: Send + Sync {
    fn predict(
        &self,
        form: &FormInput,
    ) -> impl Future<Output = Result<PredictionResponse, SubmissionError>> + Send;
}

/// `POST /predecir` over HTTP with a multipart body.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    url: Url,
}

impl HttpEndpoint {
    pub fn new(client: Client, url: Url) -> Self {
        HttpEndpoint { client, url }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpEndpoint::new(builder.build()?, config.endpoint_url()?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PredictionEndpoint for HttpEndpoint {
    async fn predict(&self, form: &FormInput) -> Result<PredictionResponse, SubmissionError> {
        debug!("POST {} ({} campos)", self.url, form.len());
        let response = self
            .client
            .post(self.url.clone())
            .multipart(form.to_multipart())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let prediction: PredictionResponse = serde_json::from_slice(&body)?;
        prediction.validate().map_err(SubmissionError::InvalidResponse)?;
        Ok(prediction)
    }
}
