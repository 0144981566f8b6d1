// Insight pipeline: re-read the stored upload, sample it, ask the model for a summary.

use tracing::{info, warn};

use crate::models::{AppState, NewInsight};
use crate::tabular::{Table, TableFormat};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

/// Rows of the raw upload included in the prompt.
pub const SAMPLE_ROWS: usize = 10;

pub const SYSTEM_PROMPT: &str = "Anda adalah analis data profesional.";

pub struct InsightAgent;

impl InsightAgent {
    /// Generate a summary for a previously ingested file.
    ///
    /// The sample comes from the blob as it is now, decoded but not cleaned.
    pub async fn generate(state: &AppState, file_id: i64) -> AppResult<String> {
        let record = state
            .records
            .get_uploaded_file(file_id)
            .await?
            .ok_or(AppError::RecordNotFound(file_id))?;

        let content = state
            .blobs
            .read(&record.filename)
            .await
            .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;

        let format = TableFormat::from_filename(&record.filename).ok_or_else(|| {
            AppError::SourceUnavailable(format!("Unsupported file type: {}", record.filename))
        })?;
        let table = Table::parse(format, &content).map_err(|e| {
            warn!(file_id, error = %e, "Stored file could not be decoded");
            AppError::SourceUnavailable(e.to_string())
        })?;

        let sample = table
            .head(SAMPLE_ROWS)
            .to_csv()
            .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;

        let request = LLMRequest {
            model: state.config.llm.model.clone(),
            messages: vec![
                LLMMessage::system(SYSTEM_PROMPT),
                LLMMessage::user(Self::build_prompt(&sample)),
            ],
            max_tokens: None,
            temperature: None,
        };

        let response = state.llm.create_chat_completion(&request).await?;

        info!(
            file_id,
            provider = state.llm.provider_name(),
            model = %request.model,
            total_tokens = response.usage.total_tokens,
            "Insight generated"
        );

        if state.config.insight.persist_insights {
            state
                .records
                .create_insight(NewInsight {
                    file_id,
                    content: response.content.clone(),
                })
                .await?;
        }

        Ok(response.content)
    }

    pub fn build_prompt(sample: &str) -> String {
        format!(
            "Data ({} baris pertama):\n{}\n\
             Buat ringkasan insight penting, pola menarik, dan rekomendasi dalam bahasa Indonesia.",
            SAMPLE_ROWS, sample
        )
    }
}
