// src/orgao.rs

use serde::{Deserialize, Serialize};

/// The procuring organization, as the registry reports it on the first record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Orgao {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf_nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio_nome: Option<String>,
}
