// src/error.rs

use thiserror::Error;

pub const SERVICE_UNAVAILABLE: &str = "Erro ao buscar informações do órgão.";

/// Everything a search can fail with. Each variant renders the single message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("CNPJ deve conter 14 dígitos.")]
    InvalidIdentifier,

    #[error("{0}")]
    InvalidDateRange(DateRangeProblem),

    #[error("Nenhum contrato encontrado para o CNPJ informado.")]
    EmptyResult,

    #[error("{}", .message.as_deref().unwrap_or(SERVICE_UNAVAILABLE))]
    TransportFailure {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("O CNPJ buscado não corresponde ao CNPJ retornado pela API.")]
    IdentityMismatch { requested: String, returned: String },

    #[error("{0}")]
    UnknownFailure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeProblem {
    #[error("Data {field} inválida: '{value}' (use AAAA-MM-DD).")]
    Unparseable { field: &'static str, value: String },

    #[error("A data inicial deve ser anterior à data final.")]
    Inverted,
}

impl SearchError {
    /// Short stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "invalid_identifier",
            Self::InvalidDateRange(_) => "invalid_date_range",
            Self::EmptyResult => "empty_result",
            Self::TransportFailure { .. } => "transport_failure",
            Self::IdentityMismatch { .. } => "identity_mismatch",
            Self::UnknownFailure(_) => "unknown_failure",
        }
    }
}

impl From<DateRangeProblem> for SearchError {
    fn from(problem: DateRangeProblem) -> Self {
        Self::InvalidDateRange(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_prefers_upstream_message() {
        let err = SearchError::TransportFailure {
            status: Some(400),
            message: Some("cnpjOrgao inválido".to_string()),
        };
        assert_eq!(err.to_string(), "cnpjOrgao inválido");
    }

    #[test]
    fn transport_failure_without_message_is_generic() {
        let err = SearchError::TransportFailure {
            status: None,
            message: None,
        };
        assert_eq!(err.to_string(), SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "transport_failure");
    }

    #[test]
    fn date_problem_converts_into_search_error() {
        let err: SearchError = DateRangeProblem::Inverted.into();
        assert_eq!(err.code(), "invalid_date_range");
        assert_eq!(
            err.to_string(),
            "A data inicial deve ser anterior à data final."
        );
    }
}
