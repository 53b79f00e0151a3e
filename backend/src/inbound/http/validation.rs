//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers collect every field problem in a [`FieldErrors`] accumulator and
//! reject the request once, so clients see all failures together under
//! `details.errors`. Bodies that cannot be decoded at all are reported in the
//! same shape through [`json_config`].

use actix_web::error::JsonPayloadError;
use actix_web::web;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

const BODY: FieldName = FieldName::new("body");

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidDate,
    MalformedBody,
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    field: &'static str,
    code: ValidationCode,
    message: String,
}

/// Accumulates field errors for a single request body.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: FieldName, code: ValidationCode, message: String) {
        self.0.push(FieldError {
            field: field.as_str(),
            code,
            message,
        });
    }

    /// Return the trimmed-non-blank value, or record a missing field.
    pub(crate) fn require(&mut self, field: FieldName, value: Option<String>) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ => {
                let name = field.as_str();
                self.push(
                    field,
                    ValidationCode::MissingField,
                    format!("{name} is required"),
                );
                None
            }
        }
    }

    /// Parse a date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
    ///
    /// Blank values are treated as absent. Timestamps keep the calendar date
    /// written in their own offset.
    pub(crate) fn optional_date(
        &mut self,
        field: FieldName,
        value: Option<String>,
    ) -> Option<NaiveDate> {
        let raw = value.filter(|text| !text.trim().is_empty())?;
        match parse_date(raw.trim()) {
            Some(date) => Some(date),
            None => {
                let name = field.as_str();
                self.push(
                    field,
                    ValidationCode::InvalidDate,
                    format!("{name} must be a YYYY-MM-DD date or RFC 3339 timestamp"),
                );
                None
            }
        }
    }

    /// Like [`FieldErrors::optional_date`] but records a missing field.
    pub(crate) fn required_date(
        &mut self,
        field: FieldName,
        value: Option<String>,
    ) -> Option<NaiveDate> {
        let raw = self.require(field, value)?;
        self.optional_date(field, Some(raw))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise an `invalid_request`
    /// error listing every field.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        Err(Error::invalid_request("request validation failed")
            .with_details(json!({ "errors": self.0 })))
    }
}

/// Describe a body the JSON extractor rejected.
///
/// The decoder's message names the offending type and position; it carries
/// no server state.
pub(crate) fn malformed_body(error: &JsonPayloadError) -> Error {
    let entry = FieldError {
        field: BODY.as_str(),
        code: ValidationCode::MalformedBody,
        message: error.to_string(),
    };
    Error::invalid_request("request body could not be decoded")
        .with_details(json!({ "errors": [entry] }))
}

/// JSON extractor settings for the API scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use devconnector::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| {
        debug!(%error, "request body rejected");
        malformed_body(&error).into()
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const FROM: FieldName = FieldName::new("from");
    const STATUS: FieldName = FieldName::new("status");

    #[rstest]
    #[case("2021-03-04", NaiveDate::from_ymd_opt(2021, 3, 4))]
    #[case("2021-03-04T23:30:00-05:00", NaiveDate::from_ymd_opt(2021, 3, 4))]
    #[case("2021-03-04T00:00:00Z", NaiveDate::from_ymd_opt(2021, 3, 4))]
    #[case("04/03/2021", None)]
    fn dates_accept_two_formats(#[case] raw: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(raw), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_required_values_are_missing(#[case] value: Option<String>) {
        let mut errors = FieldErrors::default();
        assert!(errors.require(STATUS, value).is_none());
        assert!(!errors.is_empty());
    }

    #[rstest]
    fn finish_lists_every_field() {
        let mut errors = FieldErrors::default();
        errors.require(STATUS, None);
        errors.required_date(FROM, Some("yesterday".to_owned()));

        let err = errors.finish().expect_err("two failures");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["errors"][0]["field"], "status");
        assert_eq!(details["errors"][0]["code"], "missing_field");
        assert_eq!(details["errors"][1]["field"], "from");
        assert_eq!(details["errors"][1]["code"], "invalid_date");
    }

    #[rstest]
    fn undecodable_bodies_use_the_validation_shape() {
        let err = malformed_body(&JsonPayloadError::ContentType);

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["errors"][0]["field"], "body");
        assert_eq!(details["errors"][0]["code"], "malformed_body");
    }

    #[rstest]
    fn finish_without_errors_is_ok() {
        assert!(FieldErrors::default().finish().is_ok());
    }
}
