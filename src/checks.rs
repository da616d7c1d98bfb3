// src/checks.rs

use crate::{cnpj, contract::Contract, error::SearchError, orgao::Orgao, period::Period};

/// The registry may answer for a neighbouring identifier; refuse to show it.
pub fn verify_identity(orgao: &Orgao, requested: &str) -> Result<(), SearchError> {
    let returned = cnpj::digits(orgao.cnpj.as_deref().unwrap_or_default());

    if returned != requested {
        return Err(SearchError::IdentityMismatch {
            requested: requested.to_string(),
            returned,
        });
    }

    Ok(())
}

/// Keeps contracts whose validity *start* falls inside the window. The end of
/// the validity period is deliberately not consulted. Contracts without a
/// readable start date never match.
pub fn within_period(contracts: Vec<Contract>, period: &Period) -> Vec<Contract> {
    contracts
        .into_iter()
        .filter(|contract| {
            contract
                .vigencia_inicio()
                .map_or(false, |inicio| period.contains(inicio))
        })
        .collect()
}

/// Sum of `valor_inicial`; absent values count as zero.
pub fn total(contracts: &[Contract]) -> f64 {
    contracts
        .iter()
        .map(|contract| contract.valor_inicial.unwrap_or(0.0))
        .fold(0.0, |sum, valor| sum + valor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(numero: &str, inicio: Option<&str>, fim: &str, valor: Option<f64>) -> Contract {
        Contract {
            numero_contrato_empenho: Some(numero.to_string()),
            data_vigencia_inicio: inicio.map(str::to_string),
            data_vigencia_fim: Some(fim.to_string()),
            valor_inicial: valor,
            ..Contract::default()
        }
    }

    fn first_half_2024() -> Period {
        Period::parse("2024-01-01", "2024-06-30").unwrap()
    }

    #[test]
    fn identity_matches_after_stripping_formatting() {
        let orgao = Orgao {
            cnpj: Some("11.222.333/0001-81".to_string()),
            ..Orgao::default()
        };
        assert_eq!(verify_identity(&orgao, "11222333000181"), Ok(()));
    }

    #[test]
    fn identity_mismatch_is_reported() {
        let orgao = Orgao {
            cnpj: Some("99999999999999".to_string()),
            ..Orgao::default()
        };
        assert_eq!(
            verify_identity(&orgao, "11222333000181"),
            Err(SearchError::IdentityMismatch {
                requested: "11222333000181".to_string(),
                returned: "99999999999999".to_string(),
            })
        );
    }

    #[test]
    fn missing_entity_cnpj_never_matches() {
        assert!(matches!(
            verify_identity(&Orgao::default(), "11222333000181"),
            Err(SearchError::IdentityMismatch { .. })
        ));
    }

    #[test]
    fn filter_checks_only_the_start_date() {
        let contracts = vec![
            // starts inside, ends years later: kept
            contract("A", Some("2024-03-01"), "2030-12-31", Some(10.0)),
            // started before, still active inside the window: dropped
            contract("B", Some("2023-12-01"), "2024-12-31", Some(20.0)),
            // both bounds are inclusive
            contract("C", Some("2024-01-01"), "2024-01-31", Some(30.0)),
            contract("D", Some("2024-06-30"), "2024-07-31", Some(40.0)),
            contract("E", Some("2024-07-01"), "2024-07-31", Some(50.0)),
        ];

        let kept: Vec<_> = within_period(contracts, &first_half_2024())
            .into_iter()
            .map(|c| c.numero_contrato_empenho.unwrap())
            .collect();

        assert_eq!(kept, ["A", "C", "D"]);
    }

    #[test]
    fn unreadable_start_dates_are_dropped() {
        let contracts = vec![
            contract("A", None, "2024-12-31", Some(1.0)),
            contract("B", Some("sem data"), "2024-12-31", Some(1.0)),
            contract("C", Some("2024-02-10T00:00:00"), "2024-12-31", Some(1.0)),
        ];

        let kept = within_period(contracts, &first_half_2024());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].numero_contrato_empenho.as_deref(), Some("C"));
    }

    #[test]
    fn total_of_nothing_is_zero() {
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn total_sums_initial_values() {
        let contracts = vec![
            contract("A", Some("2024-03-01"), "2024-12-31", Some(1500.25)),
            contract("B", Some("2024-03-01"), "2024-12-31", None),
            contract("C", Some("2024-03-01"), "2024-12-31", Some(499.75)),
        ];
        assert_eq!(total(&contracts), 2000.0);

        let mut reversed = contracts.clone();
        reversed.reverse();
        assert_eq!(total(&reversed), total(&contracts));
    }
}
