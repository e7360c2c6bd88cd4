//! Inbound format request types.

use crate::{FormatOptions, ScriptContext, build_prompt};
use derive_getters::Getters;
use luafmt_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format request as it arrives on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequestBody {
    /// Lua source to format
    #[serde(default)]
    pub code: Option<String>,
    /// Script kind label
    #[serde(default)]
    pub context: Option<String>,
    /// Style switches
    #[serde(default)]
    pub options: Option<FormatOptions>,
}

impl FormatRequestBody {
    /// Check required fields and resolve the context label.
    ///
    /// `code` is checked before `context`, so a body missing both reports the
    /// missing code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::MissingCode`] when `code` is absent or empty,
    /// [`ValidationErrorKind::MissingContext`] when `context` is absent or empty,
    /// and [`ValidationErrorKind::InvalidContext`] for an unknown label.
    pub fn validate(self) -> Result<FormatRequest, ValidationError> {
        let code = self
            .code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingCode))?;

        let label = self
            .context
            .filter(|label| !label.is_empty())
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingContext))?;

        let context = ScriptContext::from_str(&label).map_err(|_| {
            ValidationError::new(ValidationErrorKind::InvalidContext(format!(
                "expected one of {}, got {:?}",
                ScriptContext::labels(),
                label
            )))
        })?;

        Ok(FormatRequest {
            code,
            context,
            options: self.options.unwrap_or_default(),
        })
    }
}

/// A validated format request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct FormatRequest {
    /// Lua source to format, never empty
    code: String,
    /// Script kind
    context: ScriptContext,
    /// Style switches
    #[builder(default)]
    options: FormatOptions,
}

impl FormatRequest {
    /// Creates a new builder for FormatRequest.
    pub fn builder() -> FormatRequestBuilder {
        FormatRequestBuilder::default()
    }

    /// Render the instruction prompt for this request.
    pub fn prompt(&self) -> String {
        build_prompt(&self.code, Some(self.context), &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: Option<&str>, context: Option<&str>) -> FormatRequestBody {
        FormatRequestBody {
            code: code.map(String::from),
            context: context.map(String::from),
            options: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_body() {
        let request = body(Some("print(1)"), Some("LocalScript")).validate().unwrap();
        assert_eq!(request.code(), "print(1)");
        assert_eq!(*request.context(), ScriptContext::LocalScript);
        assert_eq!(*request.options(), FormatOptions::default());
    }

    #[test]
    fn test_validate_rejects_missing_or_empty_code() {
        for candidate in [body(None, Some("Script")), body(Some(""), Some("Script"))] {
            let err = candidate.validate().unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::MissingCode);
        }
    }

    #[test]
    fn test_missing_code_reported_before_missing_context() {
        let err = body(None, None).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingCode);
    }

    #[test]
    fn test_validate_rejects_missing_context() {
        let err = body(Some("print(1)"), None).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingContext);

        let err = body(Some("print(1)"), Some("")).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingContext);
    }

    #[test]
    fn test_validate_rejects_unknown_context() {
        let err = body(Some("print(1)"), Some("ServerScript"))
            .validate()
            .unwrap_err();
        match err.kind {
            ValidationErrorKind::InvalidContext(detail) => {
                assert!(detail.contains("ServerScript"));
                assert!(detail.contains("ModuleScript"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_body_deserializes_camel_case_options() {
        let parsed: FormatRequestBody = serde_json::from_str(
            r#"{"code":"x = 1","context":"Script","options":{"useAlwaysParentheses":false}}"#,
        )
        .unwrap();
        let request = parsed.validate().unwrap();
        assert!(!request.options().use_always_parentheses);
        assert!(!request.options().prefer_and_or_idiom);
    }

    #[test]
    fn test_builder_defaults_options() {
        let request = FormatRequest::builder()
            .code("return {}")
            .context(ScriptContext::ModuleScript)
            .build()
            .unwrap();
        assert_eq!(*request.options(), FormatOptions::default());
        assert!(request.prompt().ends_with("return {}"));
    }
}
