// src/export.rs

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;
//
use crate::{
    contract::Contract,
    orgao::Orgao,
    search::{SearchResult, SearchState},
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The downloadable artifact: `{ orgao, contratos, contratosSomados }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub orgao: Option<&'a Orgao>,
    pub contratos: &'a [Contract],
    pub contratos_somados: Option<f64>,
}

impl<'a> ExportDocument<'a> {
    pub fn from_result(result: &'a SearchResult) -> Self {
        Self {
            orgao: Some(&result.orgao),
            contratos: &result.contratos,
            contratos_somados: Some(result.contratos_somados),
        }
    }

    /// Anything but a committed success exports as the empty document.
    pub fn from_state(state: &'a SearchState) -> Self {
        match state.result() {
            Some(result) => Self::from_result(result),
            None => Self {
                orgao: None,
                contratos: &[],
                contratos_somados: None,
            },
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `contratos<raw input>.json`, with path separators neutralized.
pub fn file_name(raw_cnpj: &str) -> String {
    let safe: String = raw_cnpj
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    format!("contratos{}.json", safe)
}

pub async fn write(
    dir: &Path,
    raw_cnpj: &str,
    document: &ExportDocument<'_>,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name(raw_cnpj));
    let json = document.to_pretty_json()?;

    tokio::fs::write(&path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "exported contracts");

    Ok(path)
}
