//! Submit-to-render cycle of the prediction form.

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::endpoint::{HttpEndpoint, PredictionEndpoint};
use crate::error::{ConfigError, ErrorKind};
use crate::form::FormInput;
use crate::region::{OverlapPolicy, RegionState, RenderedResult, ResultRegion};
use crate::render::{prediction_markup, FAREWELL_TEXT};

/// The form's submit action. The page only navigates if nobody called
/// `prevent_default`.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The formatted prediction is in the region.
    Rendered,
    /// The error message is in the region.
    Failed(ErrorKind),
    /// A newer submission owns the region; this response was dropped.
    Superseded,
}

pub struct SubmissionHandler<E> {
    endpoint: E,
    region: ResultRegion,
    policy: OverlapPolicy,
}

impl SubmissionHandler<HttpEndpoint> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let endpoint = HttpEndpoint::from_config(config)?;
        info!("Endpoint de predicción: {}", endpoint.url());
        Ok(SubmissionHandler::new(endpoint, ResultRegion::new(), config.overlap))
    }
}

impl<E: PredictionEndpoint> SubmissionHandler<E> {
    pub fn new(endpoint: E, region: ResultRegion, policy: OverlapPolicy) -> Self {
        SubmissionHandler {
            endpoint,
            region,
            policy,
        }
    }

    pub fn region(&self) -> &ResultRegion {
        &self.region
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Handles one form submission. Never fails: every error ends up as the
    /// error message in the region.
    pub async fn submit(&self, event: &mut SubmitEvent, form: FormInput) -> SubmissionOutcome {
        event.prevent_default();

        let ticket = self.region.begin();
        info!("Solicitud #{} de predicción ({} campos)", ticket, form.len());

        let (state, outcome) = match self.endpoint.predict(&form).await {
            Ok(prediction) => match prediction_markup(&prediction) {
                Ok(markup) => {
                    info!(
                        "Predicción #{} recibida: probabilidad={:.3} riesgo={}",
                        ticket, prediction.probabilidad, prediction.riesgo
                    );
                    let rendered = RenderedResult {
                        markup,
                        probability: prediction.probabilidad,
                        rendered_at: Utc::now(),
                    };
                    (RegionState::Result(rendered), SubmissionOutcome::Rendered)
                }
                Err(e) => {
                    error!("Error al generar el resultado #{}: {}", ticket, e);
                    (RegionState::Error, SubmissionOutcome::Failed(ErrorKind::Render))
                }
            },
            Err(e) => {
                warn!("Solicitud #{} fallida ({}): {}", ticket, e.kind(), e);
                (RegionState::Error, SubmissionOutcome::Failed(e.kind()))
            }
        };

        if self.region.settle(ticket, state, self.policy) {
            outcome
        } else {
            debug!("Respuesta #{} descartada: hay una solicitud más reciente", ticket);
            SubmissionOutcome::Superseded
        }
    }

    /// "Nueva predicción": empties the region.
    pub fn new_prediction(&self) {
        debug!("Nueva predicción");
        self.region.reset(RegionState::Empty);
    }

    /// "Finalizar": replaces the region with the farewell message.
    pub fn finish(&self) {
        info!("{}", FAREWELL_TEXT);
        self.region.reset(RegionState::Farewell);
    }
}
