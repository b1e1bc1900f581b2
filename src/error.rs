use thiserror::Error;

/// Startup failures of the host plumbing. The frame loop itself cannot fail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required environment: {0}")]
    MissingEnvironment(&'static str),
    #[error("GPU initialization failed: {0}")]
    GpuInit(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        AppError::Js(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_environment_message() {
        let err = AppError::MissingEnvironment("#world container");
        assert_eq!(err.to_string(), "missing required environment: #world container");
    }
}
