use cardio_client::{
    ClientConfig, FormInput, RegionState, SubmissionHandler, SubmissionOutcome, SubmitEvent,
    PATIENT_FIELDS,
};
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let config = ClientConfig::from_env()?;
    let form = FormInput::from_os_args(std::env::args_os().skip(1))?;

    let missing = form.missing_fields(PATIENT_FIELDS);
    if !missing.is_empty() {
        warn!("⚠️ Campos sin completar: {}", missing.join(", "));
    }

    let handler = SubmissionHandler::from_config(&config)?;
    let mut event = SubmitEvent::new();

    info!("🚀 Enviando formulario a {}", config.endpoint_url()?);
    match handler.submit(&mut event, form).await {
        SubmissionOutcome::Rendered => {
            if let RegionState::Result(result) = handler.region().state() {
                info!(
                    "✅ Resultado recibido a las {}: probabilidad={:.3}",
                    result.rendered_at.to_rfc3339(),
                    result.probability
                );
            }
        }
        SubmissionOutcome::Failed(kind) => warn!("❌ Solicitud fallida ({})", kind),
        SubmissionOutcome::Superseded => {}
    }

    let state = handler.region().state();
    if state.is_visible() {
        println!("{}", state.markup());
    }
    Ok(())
}
