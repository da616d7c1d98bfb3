// src/search.rs

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
//
use crate::{
    checks::{total, verify_identity, within_period},
    cnpj,
    contract::Contract,
    error::SearchError,
    extract::{extract, Extracted},
    orgao::Orgao,
    period::Period,
    registry::{ContractSource, RegistryPage, RegistryQuery},
};

/// What the user typed, unnormalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInput {
    pub cnpj: String,
    pub data_inicial: String,
    pub data_final: String,
    pub pagina: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub numero_pagina: Option<u64>,
    pub total_paginas: Option<u64>,
    pub total_registros: Option<u64>,
    pub paginas_restantes: Option<u64>,
}

impl From<&RegistryPage> for PageInfo {
    fn from(page: &RegistryPage) -> Self {
        Self {
            numero_pagina: page.numero_pagina,
            total_paginas: page.total_paginas,
            total_registros: page.total_registros,
            paginas_restantes: page.paginas_restantes,
        }
    }
}

/// A committed search: entity, filtered contracts and their total travel together.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub orgao: Orgao,
    pub contratos: Vec<Contract>,
    pub contratos_somados: f64,
    pub pagina: PageInfo,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        generation: u64,
    },
    Success {
        generation: u64,
        result: SearchResult,
    },
    Failed {
        generation: u64,
        error: SearchError,
    },
}

impl SearchState {
    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            Self::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Current {
    generation: u64,
    state: SearchState,
}

/// Owns the single current search state. Overlapping searches are allowed;
/// only the most recently started one may commit.
pub struct Searcher<S> {
    source: S,
    current: Mutex<Current>,
}

impl<S: ContractSource> Searcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: Mutex::new(Current::default()),
        }
    }

    pub async fn state(&self) -> SearchState {
        self.current.lock().await.state.clone()
    }

    pub async fn search(&self, input: &SearchInput) -> Result<SearchResult, SearchError> {
        // clear the previous result before anything else can fail
        let generation = {
            let mut current = self.current.lock().await;
            current.generation += 1;
            current.state = SearchState::Searching {
                generation: current.generation,
            };
            current.generation
        };

        let outcome = run(&self.source, input).await;

        let mut current = self.current.lock().await;

        if current.generation != generation {
            warn!(
                generation,
                current = current.generation,
                "discarding completion of a superseded search"
            );
            return outcome;
        }

        current.state = match &outcome {
            Ok(result) => {
                info!(
                    generation,
                    contratos = result.contratos.len(),
                    total = result.contratos_somados,
                    "search committed"
                );
                SearchState::Success {
                    generation,
                    result: result.clone(),
                }
            }
            Err(error) => {
                warn!(generation, code = error.code(), %error, "search failed");
                SearchState::Failed {
                    generation,
                    error: error.clone(),
                }
            }
        };

        outcome
    }
}

/// One pass through the pipeline: validate, query, extract, verify, filter, sum.
pub async fn run<S: ContractSource + ?Sized>(
    source: &S,
    input: &SearchInput,
) -> Result<SearchResult, SearchError> {
    let cnpj = cnpj::validate(&input.cnpj)?;
    let period = Period::parse(&input.data_inicial, &input.data_final)?;
    let query = RegistryQuery::new(&cnpj, &period, input.pagina);

    debug!(
        cnpj = %query.cnpj_orgao,
        data_inicial = %query.data_inicial,
        data_final = %query.data_final,
        pagina = query.pagina,
        "searching contracts"
    );

    let page = source.fetch(&query).await?;
    let Extracted { orgao, contracts } = extract(&page)?;

    verify_identity(&orgao, &cnpj)?;

    let received = contracts.len();
    let contratos = within_period(contracts, &period);
    let contratos_somados = total(&contratos);

    debug!(received, kept = contratos.len(), "filtered by validity start");

    Ok(SearchResult {
        orgao,
        contratos,
        contratos_somados,
        pagina: PageInfo::from(&page),
    })
}
