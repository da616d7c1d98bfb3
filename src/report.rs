// src/report.rs

use std::fmt;

use crate::{contract::Contract, period, search::SearchResult};

const MISSING: &str = "-";

/// Terminal rendering of a committed search.
pub struct Report<'a> {
    pub result: &'a SearchResult,
    pub details: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orgao = &self.result.orgao;

        writeln!(f, "Informações do Órgão")?;
        writeln!(f, "  Razão Social: {}", or_missing(&orgao.razao_social))?;
        writeln!(f, "  CNPJ: {}", or_missing(&orgao.cnpj))?;
        writeln!(f, "  UF: {}", or_missing(&orgao.uf_nome))?;
        writeln!(f, "  Município: {}", or_missing(&orgao.municipio_nome))?;
        writeln!(
            f,
            "  Valor Total dos Contratos: {}",
            format_brl(self.result.contratos_somados)
        )?;

        let pagina = &self.result.pagina;
        if let (Some(numero), Some(total)) = (pagina.numero_pagina, pagina.total_paginas) {
            write!(f, "  Página {} de {}", numero, total)?;
            if let Some(registros) = pagina.total_registros {
                write!(f, " ({} registros)", registros)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;

        if self.result.contratos.is_empty() {
            return writeln!(f, "Nenhum contrato com vigência iniciada no período.");
        }

        writeln!(f, "Contratos ({})", self.result.contratos.len())?;

        for contract in &self.result.contratos {
            writeln!(f, "  {}", or_missing(&contract.numero_contrato_empenho))?;

            if self.details {
                write_details(f, contract)?;
            }
        }

        Ok(())
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, contract: &Contract) -> fmt::Result {
    let date = |value: &Option<String>| {
        value
            .as_deref()
            .map(period::display)
            .unwrap_or_else(|| MISSING.to_string())
    };

    writeln!(
        f,
        "    Data Vigência Inicial: {}",
        date(&contract.data_vigencia_inicio)
    )?;
    writeln!(f, "    Data Vigência Final: {}", date(&contract.data_vigencia_fim))?;
    writeln!(
        f,
        "    Fornecedor: {}",
        or_missing(&contract.nome_razao_social_fornecedor)
    )?;
    writeln!(
        f,
        "    CNPJ do Fornecedor: {}",
        or_missing(&contract.cnpj_fornecedor)
    )?;
    writeln!(f, "    Objeto: {}", or_missing(&contract.objeto_contrato))?;
    writeln!(
        f,
        "    Valor Inicial: {}",
        contract
            .valor_inicial
            .map(format_brl)
            .unwrap_or_else(|| MISSING.to_string())
    )
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

/// pt-BR currency: `R$ 1.234.567,89`.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{orgao::Orgao, search::PageInfo};

    fn result(contratos: Vec<Contract>) -> SearchResult {
        let contratos_somados = crate::checks::total(&contratos);
        SearchResult {
            orgao: Orgao {
                razao_social: Some("MUNICIPIO DE EXEMPLO".to_string()),
                cnpj: Some("11222333000181".to_string()),
                uf_nome: Some("Ceará".to_string()),
                municipio_nome: None,
            },
            contratos,
            contratos_somados,
            pagina: PageInfo {
                numero_pagina: Some(1),
                total_paginas: Some(3),
                total_registros: Some(1250),
                paginas_restantes: Some(2),
            },
        }
    }

    fn contract() -> Contract {
        Contract {
            numero_contrato_empenho: Some("10/2024".to_string()),
            data_vigencia_inicio: Some("2024-03-01".to_string()),
            data_vigencia_fim: Some("2025-02-28".to_string()),
            nome_razao_social_fornecedor: Some("FORNECEDOR SA".to_string()),
            objeto_contrato: Some("Serviços de limpeza".to_string()),
            valor_inicial: Some(1234567.891),
            cnpj_fornecedor: None,
        }
    }

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.5), "R$ 5,50");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
        assert_eq!(format_brl(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
    }

    #[test]
    fn summary_lists_contract_numbers_only() {
        let rendered = Report {
            result: &result(vec![contract()]),
            details: false,
        }
        .to_string();

        assert!(rendered.contains("  Razão Social: MUNICIPIO DE EXEMPLO\n"));
        assert!(rendered.contains("  Município: -\n"));
        assert!(rendered.contains("  Valor Total dos Contratos: R$ 1.234.567,89\n"));
        assert!(rendered.contains("  Página 1 de 3 (1250 registros)\n"));
        assert!(rendered.contains("Contratos (1)\n  10/2024\n"));
        assert!(!rendered.contains("Fornecedor"));
    }

    #[test]
    fn details_show_every_contract_field() {
        let rendered = Report {
            result: &result(vec![contract()]),
            details: true,
        }
        .to_string();

        assert!(rendered.contains("    Data Vigência Inicial: 01/03/2024\n"));
        assert!(rendered.contains("    Data Vigência Final: 28/02/2025\n"));
        assert!(rendered.contains("    Fornecedor: FORNECEDOR SA\n"));
        assert!(rendered.contains("    CNPJ do Fornecedor: -\n"));
        assert!(rendered.contains("    Valor Inicial: R$ 1.234.567,89\n"));
    }

    #[test]
    fn empty_filtered_list_says_so() {
        let rendered = Report {
            result: &result(vec![]),
            details: false,
        }
        .to_string();

        assert!(rendered.contains("  Valor Total dos Contratos: R$ 0,00\n"));
        assert!(rendered.ends_with("Nenhum contrato com vigência iniciada no período.\n"));
    }
}
