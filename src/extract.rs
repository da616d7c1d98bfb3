// src/extract.rs

use serde_json::Value;
//
use crate::{contract::Contract, error::SearchError, orgao::Orgao, registry::RegistryPage};

#[derive(Clone, Debug, PartialEq)]
pub struct Extracted {
    pub orgao: Orgao,
    pub contracts: Vec<Contract>,
}

/// Entity from the first record, one contract per record in response order.
/// Missing or mistyped fields come out as `None`; only an empty page fails.
pub fn extract(page: &RegistryPage) -> Result<Extracted, SearchError> {
    let first = page.records.first().ok_or(SearchError::EmptyResult)?;

    Ok(Extracted {
        orgao: orgao_from(first),
        contracts: page.records.iter().map(contract_from).collect(),
    })
}

pub fn orgao_from(record: &Value) -> Orgao {
    Orgao {
        razao_social: text(record, "/orgaoEntidade/razaoSocial"),
        cnpj: text(record, "/orgaoEntidade/cnpj"),
        uf_nome: text(record, "/unidadeOrgao/ufNome"),
        municipio_nome: text(record, "/unidadeOrgao/municipioNome"),
    }
}

pub fn contract_from(record: &Value) -> Contract {
    Contract {
        numero_contrato_empenho: text(record, "/numeroContratoEmpenho"),
        data_vigencia_inicio: text(record, "/dataVigenciaInicio"),
        data_vigencia_fim: text(record, "/dataVigenciaFim"),
        nome_razao_social_fornecedor: text(record, "/nomeRazaoSocialFornecedor"),
        objeto_contrato: text(record, "/objetoContrato"),
        valor_inicial: record.pointer("/valorInicial").and_then(Value::as_f64),
        cnpj_fornecedor: text(record, "/niFornecedor"),
    }
}

fn text(record: &Value, pointer: &str) -> Option<String> {
    record
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
