//! Request/response messages exchanged with a rendering front end.
//!
//! Every analysis produces exactly one message: either the full result or a
//! failure. A well-formed empty result (no functions) is a success, so a
//! consumer can tell "nothing to draw" apart from "analysis failed".

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::{AnalysisResult, Analyzer};
use crate::error::AnalyzeError;
use crate::parser::SourceLanguage;

/// Outbound message carrying the outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalysisMessage {
    #[serde(rename_all = "camelCase")]
    AnalysisSucceeded { payload: AnalysisResult },
    #[serde(rename_all = "camelCase")]
    AnalysisFailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
        error: String,
    },
}

impl AnalysisMessage {
    pub fn failed(file_name: Option<&str>, error: impl ToString) -> Self {
        AnalysisMessage::AnalysisFailed {
            file_name: file_name.map(str::to_string),
            error: error.to_string(),
        }
    }

    /// Wrap an analysis outcome. A failure carries no partial result.
    pub fn from_result(result: Result<AnalysisResult, AnalyzeError>, file_name: Option<&str>) -> Self {
        match result {
            Ok(payload) => AnalysisMessage::AnalysisSucceeded { payload },
            Err(e) => Self::failed(file_name, e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisMessage::AnalysisSucceeded { .. })
    }

    pub fn payload(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisMessage::AnalysisSucceeded { payload } => Some(payload),
            AnalysisMessage::AnalysisFailed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisMessage::AnalysisSucceeded { .. } => None,
            AnalysisMessage::AnalysisFailed { error, .. } => Some(error),
        }
    }
}

/// Inbound request: analyze this text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub file_name: Option<String>,
    /// Overrides detection from `file_name`.
    #[serde(default)]
    pub language: Option<String>,
}

impl AnalyzeRequest {
    /// Pick the language: explicit field, then file extension, then `fallback`.
    pub fn resolve_language(&self, fallback: SourceLanguage) -> Result<SourceLanguage, String> {
        if let Some(name) = &self.language {
            return name.parse();
        }
        Ok(self
            .file_name
            .as_deref()
            .and_then(SourceLanguage::from_path)
            .unwrap_or(fallback))
    }

    /// Run the request.
    pub fn handle(&self, fallback: SourceLanguage) -> AnalysisMessage {
        let file_name = self.file_name.as_deref();
        match self.resolve_language(fallback) {
            Ok(language) => {
                AnalysisMessage::from_result(Analyzer::new(language).analyze(&self.text, file_name), file_name)
            }
            Err(e) => AnalysisMessage::failed(file_name, e),
        }
    }
}

/// Handle one line of the line-delimited protocol.
pub fn handle_line(line: &str, fallback: SourceLanguage) -> AnalysisMessage {
    match serde_json::from_str::<AnalyzeRequest>(line) {
        Ok(request) => request.handle(fallback),
        Err(e) => {
            warn!(error = %e, "malformed request");
            AnalysisMessage::failed(None, format!("malformed request: {}", e))
        }
    }
}

/// Serve requests from `reader`, one JSON object per line, writing one
/// message per line to `writer`. Blank lines are skipped; a line that is
/// not UTF-8 gets a failure message like any other malformed request.
/// Returns the number of requests handled once the reader is exhausted.
pub fn serve<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    fallback: SourceLanguage,
) -> anyhow::Result<usize> {
    let mut handled = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let message = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(line.trim_end(), fallback),
            Err(e) => {
                warn!(error = %e, "request is not valid UTF-8");
                AnalysisMessage::failed(None, format!("malformed request: {}", e))
            }
        };
        serde_json::to_writer(&mut writer, &message)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        handled += 1;
        debug!(handled, success = message.is_success(), "request served");
    }
    Ok(handled)
}
