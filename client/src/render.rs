//! Markup written into the result region.

use askama::Template;

use crate::models::PredictionResponse;

pub const PROCESSING_MARKUP: &str = "<p>Procesando...</p>";
pub const ERROR_MARKUP: &str = r#"<p style="color: red;">Error al procesar la solicitud.</p>"#;
pub const FAREWELL_TEXT: &str = "Muchas gracias por elegirnos, que tenga un excelente día";

#[derive(Template)]
#[template(path = "resultado.html")]
struct ResultadoTemplate<'a> {
    porcentaje: u32,
    riesgo: &'a str,
    mensaje: &'a str,
}

/// Heading plus probability, risk and message paragraphs. Text coming
/// from the endpoint is HTML-escaped.
pub fn prediction_markup(prediction: &PredictionResponse) -> askama::Result<String> {
    ResultadoTemplate {
        porcentaje: prediction.percentage(),
        riesgo: &prediction.riesgo,
        mensaje: &prediction.mensaje,
    }
    .render()
}

pub fn farewell_markup() -> String {
    format!("<p class=\"mensaje-final\">{}</p>", FAREWELL_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prediction() {
        let markup = prediction_markup(&PredictionResponse::new(0.23, "bajo", "todo bien")).unwrap();
        assert!(markup.contains("<h3>Resultado de la predicción</h3>"));
        assert!(markup.contains("<strong>Probabilidad:</strong> 23%"));
        assert!(markup.contains("<strong>Riesgo:</strong> bajo"));
        assert!(markup.contains("<strong>Mensaje:</strong> todo bien"));
    }

    #[test]
    fn half_percent_rounds_up() {
        let markup = prediction_markup(&PredictionResponse::new(0.005, "Bajo", "")).unwrap();
        assert!(markup.contains("<strong>Probabilidad:</strong> 1%<"));
    }

    #[test]
    fn escapes_endpoint_text() {
        let markup =
            prediction_markup(&PredictionResponse::new(0.9, "<b>Alto</b>", "a & b")).unwrap();
        assert!(markup.contains("&#60;b&#62;Alto&#60;/b&#62;"));
        assert!(markup.contains("a &#38; b"));
        assert!(!markup.contains("<b>"));
        assert!(!markup.contains(" & "));
    }

    #[test]
    fn error_markup_has_no_result_parts() {
        assert!(!ERROR_MARKUP.contains("Probabilidad"));
        assert!(ERROR_MARKUP.contains("Error al procesar la solicitud."));
    }
}
