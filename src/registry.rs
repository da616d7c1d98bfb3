// src/registry.rs

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};
//
use crate::{config::Config, error::SearchError, period::Period};

pub const CONTRACTS_PATH: &str = "/v1/contratos";

const UNREADABLE_BODY: &str = "Erro na API ao buscar informações do órgão. (COD 500)";

/// A single registry page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryQuery {
    pub cnpj_orgao: String,
    pub data_inicial: String,
    pub data_final: String,
    pub pagina: u32,
}

impl RegistryQuery {
    pub fn new(cnpj: &str, period: &Period, pagina: u32) -> Self {
        let (data_inicial, data_final) = period.registry_bounds();

        Self {
            cnpj_orgao: cnpj.to_string(),
            data_inicial,
            data_final,
            pagina,
        }
    }

    pub fn params(&self) -> [(&'static str, String); 4] {
        [
            ("cnpjOrgao", self.cnpj_orgao.clone()),
            ("dataInicial", self.data_inicial.clone()),
            ("dataFinal", self.data_final.clone()),
            ("pagina", self.pagina.to_string()),
        ]
    }

    pub fn url(&self, endpoint: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(endpoint, self.params().iter())
            .map_err(|err| SearchError::UnknownFailure(format!("URL do registro inválida: {err}")))
    }
}

/// Raw records of one page, untouched, plus whatever paging metadata came along.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryPage {
    pub records: Vec<Value>,
    pub total_registros: Option<u64>,
    pub total_paginas: Option<u64>,
    pub numero_pagina: Option<u64>,
    pub paginas_restantes: Option<u64>,
}

/// Anything that can answer a registry query. The HTTP client is the real one.
pub trait ContractSource: Send + Sync {
    fn fetch<'a>(&'a self, query: &'a RegistryQuery)
        -> BoxFuture<'a, Result<RegistryPage, SearchError>>;
}

#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: Client,
    endpoint: String,
}

impl RegistryClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), CONTRACTS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self, query: &RegistryQuery) -> Result<RegistryPage, SearchError> {
        let url = query.url(&self.endpoint)?;

        debug!(%url, "querying registry");

        let response = self.http.get(url).send().await.map_err(transport_failure)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        let page = classify(status, &body)?;

        debug!(
            records = page.records.len(),
            total_registros = ?page.total_registros,
            total_paginas = ?page.total_paginas,
            "registry answered"
        );

        Ok(page)
    }
}

impl ContractSource for RegistryClient {
    fn fetch<'a>(
        &'a self,
        query: &'a RegistryQuery,
    ) -> BoxFuture<'a, Result<RegistryPage, SearchError>> {
        self.get(query).boxed()
    }
}

fn transport_failure(err: reqwest::Error) -> SearchError {
    warn!(error = %err, "registry request failed");

    SearchError::TransportFailure {
        status: err.status().map(|status| status.as_u16()),
        message: None,
    }
}

/// Turns a status and body into a page, or the failure they amount to.
pub fn classify(status: StatusCode, body: &str) -> Result<RegistryPage, SearchError> {
    if !status.is_success() {
        return Err(SearchError::TransportFailure {
            status: Some(status.as_u16()),
            message: upstream_message(body),
        });
    }

    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Err(SearchError::EmptyResult);
    }

    let payload: Value = serde_json::from_str(body).map_err(|err| {
        warn!(error = %err, "registry body is not json");
        SearchError::UnknownFailure(UNREADABLE_BODY.to_string())
    })?;

    let records = match payload.get("data").and_then(Value::as_array) {
        Some(records) if !records.is_empty() => records.clone(),
        _ => return Err(SearchError::EmptyResult),
    };

    let meta = |key: &str| payload.get(key).and_then(Value::as_u64);

    Ok(RegistryPage {
        records,
        total_registros: meta("totalRegistros"),
        total_paginas: meta("totalPaginas"),
        numero_pagina: meta("numeroPagina"),
        paginas_restantes: meta("paginasRestantes"),
    })
}

fn upstream_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;

    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
