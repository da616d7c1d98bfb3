// src/contract.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period;

/// One procurement contract/commitment. `numero_contrato_empenho` is only a
/// display key; the registry does not guarantee it is unique.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_contrato_empenho: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_vigencia_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_vigencia_fim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_razao_social_fornecedor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objeto_contrato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_inicial: Option<f64>,
    // upstream: niFornecedor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj_fornecedor: Option<String>,
}

impl Contract {
    pub fn vigencia_inicio(&self) -> Option<NaiveDate> {
        self.data_vigencia_inicio
            .as_deref()
            .and_then(period::parse_upstream)
    }
}
