use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::ranking::RankingRow;
use crate::ranking::{rank_directory, save_report};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RankingRequest {
    /// Overrides `RANKING_MULTIPROC` for this run.
    pub multiproc: Option<bool>,
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub print: bool,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub rows: Vec<RankingRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

/// POST /api/v1/rankings
/// Ranks every file in the configured resume directory.
pub async fn handle_rank_resumes(
    State(state): State<AppState>,
    Json(req): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let multiproc = req.multiproc.unwrap_or(state.config.ranking_multiproc);
    let resume_dir = state.config.resume_dir.clone();
    let output_dir = state.config.ranking_output_dir.clone();
    let parser = state.parser.clone();

    let response = tokio::task::spawn_blocking(move || -> Result<RankingResponse, AppError> {
        let report = rank_directory(&resume_dir, &parser, multiproc)?;
        if req.print {
            info!("\n{report}");
        }
        let saved_to = if req.save {
            Some(save_report(&report, &output_dir)?.display().to_string())
        } else {
            None
        };
        Ok(RankingResponse {
            rows: report.rows,
            saved_to,
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Ranking task failed: {e}")))??;

    Ok(Json(response))
}
