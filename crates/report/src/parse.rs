use crate::error::{ReportError, Result};
use crate::schema::{ExecReport, ProfileReport};

/// The two document shapes this library recognizes
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A scan run with per-control results
    Evaluation(ExecReport),
    /// A control-set definition that has not been run
    Profile(ProfileReport),
}

/// Recognize `text` as one of the two supported document shapes.
///
/// A top-level `profiles` array marks an evaluation; a top-level
/// `controls` array marks a profile definition. Anything else, including
/// text that is not JSON at all, is an [`ReportError::UnrecognizedFormat`].
pub fn recognize(text: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|err| ReportError::unrecognized(format!("not a JSON document: {err}")))?;

    let Some(object) = value.as_object() else {
        return Err(ReportError::unrecognized("top level is not an object"));
    };

    if object.contains_key("profiles") {
        let report: ExecReport = serde_json::from_value(value)?;
        log::debug!(
            "Recognized evaluation document with {} profile(s)",
            report.profiles.len()
        );
        return Ok(Document::Evaluation(report));
    }

    if object.contains_key("controls") && object.contains_key("name") {
        let report: ProfileReport = serde_json::from_value(value)?;
        log::debug!("Recognized profile document {}", report.profile.name);
        return Ok(Document::Profile(report));
    }

    Err(ReportError::unrecognized(
        "neither an evaluation nor a profile document",
    ))
}
