use std::ffi::OsString;
use std::fmt;

use reqwest::multipart::Form;

use crate::error::FormError;

/// Fields of the patient form as served by the prediction page.
pub const PATIENT_FIELDS: &[&str] = &[
    "altura",
    "peso",
    "imc",
    "consumo_alcohol",
    "consumo_fruta",
    "consumo_vegetales",
    "consumo_papas",
    "salud_general",
    "chequeo_medico",
    "ejercicio",
    "cancer_piel",
    "otro_cancer",
    "depresion",
    "diabetes",
    "artritis",
    "sexo",
    "historial_tabaquismo",
    "edad",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

/// Current values of the form, in the order the page lists them.
///
/// Names may repeat, like a browser `FormData`; each pair becomes one
/// multipart part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    fields: Vec<(String, FieldValue)>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Parses `campo=valor` pairs. Values are kept as typed (`01` stays
    /// `01`), like the page sends its inputs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = FormInput::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, raw) = pair
                .split_once('=')
                .ok_or_else(|| FormError::MalformedPair(pair.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(FormError::EmptyName(pair.to_string()));
            }
            form.insert(name, FieldValue::Text(raw.to_string()));
        }
        Ok(form)
    }

    /// Like `from_pairs`, for process arguments that may not be UTF-8.
    pub fn from_os_args<I>(args: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let pairs = args
            .into_iter()
            .map(|arg| {
                arg.into_string()
                    .map_err(|raw| FormError::NotUtf8(raw.to_string_lossy().into_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }

    /// Names from `expected` with no value in this form.
    pub fn missing_fields<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none())
            .collect()
    }

    /// Multipart body with one text part per field. The boundary and
    /// content type are left to the http client.
    pub fn to_multipart(&self) -> Form {
        self.fields.iter().fold(Form::new(), |form, (name, value)| {
            form.text(name.clone(), value.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_values_as_typed() {
        let form =
            FormInput::from_pairs(["altura=170.0", "sexo=01", "peso=1e2", "edad=18-24"]).unwrap();
        let sent: Vec<String> = form.iter().map(|(_, value)| value.to_string()).collect();
        assert_eq!(sent, ["170.0", "01", "1e2", "18-24"]);
        assert_eq!(form.get("sexo"), Some(&FieldValue::Text("01".into())));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_utf8_args() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("altura=170"),
            OsString::from_vec(b"peso=\xff".to_vec()),
        ];
        assert!(matches!(
            FormInput::from_os_args(args),
            Err(FormError::NotUtf8(_))
        ));
        let form = FormInput::from_os_args(vec![OsString::from("altura=170")]).unwrap();
        assert_eq!(form.get("altura"), Some(&FieldValue::Text("170".into())));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert_eq!(
            FormInput::from_pairs(["altura"]),
            Err(FormError::MalformedPair("altura".into()))
        );
        assert_eq!(
            FormInput::from_pairs([" =3"]),
            Err(FormError::EmptyName(" =3".into()))
        );
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let form = FormInput::new()
            .with("sexo", 1_i64)
            .with("peso", 80.5)
            .with("sexo", 0_i64);
        let names: Vec<&str> = form.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["sexo", "peso", "sexo"]);
        assert_eq!(form.get("sexo"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn reports_missing_patient_fields() {
        let form = FormInput::new().with("altura", 170_i64).with("peso", 70_i64);
        let missing = form.missing_fields(PATIENT_FIELDS);
        assert_eq!(missing.len(), PATIENT_FIELDS.len() - 2);
        assert!(!missing.contains(&"altura"));
        assert!(missing.contains(&"edad"));
    }

    #[test]
    fn numbers_format_without_trailing_zeroes() {
        assert_eq!(FieldValue::Number(170.0).to_string(), "170");
        assert_eq!(FieldValue::Number(24.5).to_string(), "24.5");
    }
}
