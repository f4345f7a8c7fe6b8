use serde::{Deserialize, Serialize};

/// Body returned by `POST /predecir`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PredictionResponse {
    pub probabilidad: f64,
    pub riesgo: String,
    pub mensaje: String,
}

impl PredictionResponse {
    pub fn new(probabilidad: f64, riesgo: impl Into<String>, mensaje: impl Into<String>) -> Self {
        PredictionResponse {
            probabilidad,
            riesgo: riesgo.into(),
            mensaje: mensaje.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.probabilidad.is_finite() || !(0.0..=1.0).contains(&self.probabilidad) {
            return Err(format!(
                "La probabilidad debe estar entre 0 y 1 (valor: {})",
                self.probabilidad
            ));
        }

        Ok(())
    }

    /// Probability as a whole-number percentage, rounding halves up.
    pub fn percentage(&self) -> u32 {
        percentage(self.probabilidad)
    }
}

/// `floor(p * 100 + 0.5)`, clamped to `0..=100`.
pub fn percentage(probability: f64) -> u32 {
    let scaled = (probability * 100.0 + 0.5).floor();
    scaled.clamp(0.0, 100.0) as u32
}
