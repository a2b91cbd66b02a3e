//! Request handlers.

use std::fmt::Write as _;

use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
    response::Html,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{AppError, Result};
use super::state::AppState;
use crate::translate::Language;
use crate::translate::port::source_or_auto;

pub async fn health() -> &'static str {
    "ok"
}

/// Landing page: an upload form whose language picker lists the catalog by name.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut options = String::new();
    for language in state.catalog().languages() {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            quick_xml::escape::escape(language.code.as_str()),
            quick_xml::escape::escape(language.name.as_str())
        );
    }
    Html(format!(
        concat!(
            r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Document translation</title></head><body>"#,
            r#"<h1>Document translation</h1>"#,
            r#"<form action="/translate-document" method="post" enctype="multipart/form-data">"#,
            r#"<input type="file" name="file" accept=".docx"> <select name="language">{}</select> "#,
            r#"<button type="submit">Translate</button></form></body></html>"#
        ),
        options
    ))
}

/// Supported languages, sorted by name.
pub async fn languages(State(state): State<AppState>) -> Json<Vec<Language>> {
    Json(state.catalog().languages().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub language_code: String,
    pub language_name: String,
}

pub async fn detect_language(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectResponse>> {
    let Json(request) = payload?;
    let port = state.port();
    let detected = tokio::task::spawn_blocking(move || port.detect_language(&request.text)).await??;
    Ok(Json(DetectResponse {
        language_code: detected.code,
        language_name: detected.name,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TranslateTextRequest {
    #[serde(rename = "source-language", default)]
    pub source_language: Option<String>,
    #[serde(rename = "target-language")]
    pub target_language: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateTextResponse {
    pub translated_text: String,
}

/// Translate one string. Backend failures are reported to the caller.
pub async fn translate_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TranslateTextRequest>, JsonRejection>,
) -> Result<Json<TranslateTextResponse>> {
    let Json(request) = payload?;
    if request.text.is_empty() {
        return Ok(Json(TranslateTextResponse {
            translated_text: String::new(),
        }));
    }

    debug!(
        source = request.source_language.as_deref().unwrap_or("auto"),
        target_language = %request.target_language,
        chars = request.text.len(),
        "translating text"
    );
    let port = state.port();
    let translated = tokio::task::spawn_blocking(move || {
        let source = source_or_auto(request.source_language.as_deref());
        port.translate(&request.text, source, &request.target_language)
    })
    .await??;

    Ok(Json(TranslateTextResponse {
        translated_text: translated,
    }))
}

#[derive(Debug, Serialize)]
pub struct TranslateDocumentResponse {
    pub message: &'static str,
    pub filename: String,
    pub path: String,
}

/// Translate an uploaded `.docx` and save the result under the output directory.
pub async fn translate_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranslateDocumentResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                debug!(filename = %filename, bytes = data.len(), "received upload");
                upload = Some((filename, data.to_vec()));
            },
            "language" => {
                language = Some(field.text().await?.trim().to_string());
            },
            _ => {},
        }
    }

    let (filename, data) = upload.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    if !filename.ends_with(".docx") {
        return Err(AppError::BadRequest("Only Word (.docx) files are allowed".into()));
    }
    let language = language
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::BadRequest("No target language selected".into()))?;

    let output_name = format!("TranslatedDocument_{}.docx", Uuid::new_v4());
    let output_path = state.output_dir().join(&output_name);

    let job_state = state.clone();
    let job_path = output_path.clone();
    let job_language = language.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let document = job_state.translator().translate_bytes(&data, &job_language)?;
        document.save(&job_path)?;
        Ok(())
    })
    .await??;

    info!(source = %filename, output = %output_path.display(), language = %language, "document translated");
    Ok(Json(TranslateDocumentResponse {
        message: "Document translated successfully",
        filename: output_name,
        path: output_path.display().to_string(),
    }))
}
