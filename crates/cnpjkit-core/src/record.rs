//! Registry wire types and the flattened company record.

use serde::{Deserialize, Serialize};

/// Placeholder for the partner column when the registry lists no partners.
pub const UNAVAILABLE: &str = "Não disponível";

/// Column headers of the results sheet, in record order.
pub const COLUMNS: [&str; 11] = [
    "CNPJ",
    "Nome",
    "Nome Fantasia",
    "Natureza Jurídica",
    "Endereço",
    "Telefone",
    "Email",
    "Atividade Principal",
    "Situação Cadastral",
    "Data de Abertura",
    "Quadro Societário",
];

/// An entry of `atividade_principal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// An entry of `qsa` (quadro de sócios e administradores).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Partner {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub qual: Option<String>,
}

/// Body of a 200 response from the registry.
///
/// Every field is optional: the registry omits or nulls fields freely. Bodies
/// carrying an `erro` key are rejected before they get here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryResponse {
    pub cnpj: Option<String>,
    pub nome: Option<String>,
    pub fantasia: Option<String>,
    pub natureza_juridica: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub atividade_principal: Option<Vec<Activity>>,
    pub situacao: Option<String>,
    pub abertura: Option<String>,
    pub qsa: Option<Vec<Partner>>,
}

/// One row of the results sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "CNPJ")]
    pub cnpj: String,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Nome Fantasia")]
    pub trade_name: String,
    #[serde(rename = "Natureza Jurídica")]
    pub legal_nature: String,
    #[serde(rename = "Endereço")]
    pub address: String,
    #[serde(rename = "Telefone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Atividade Principal")]
    pub primary_activity: String,
    #[serde(rename = "Situação Cadastral")]
    pub status: String,
    #[serde(rename = "Data de Abertura")]
    pub opened_on: String,
    #[serde(rename = "Quadro Societário")]
    pub first_partner: String,
}

impl CompanyRecord {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 11] {
        [
            self.cnpj.as_str(),
            self.name.as_str(),
            self.trade_name.as_str(),
            self.legal_nature.as_str(),
            self.address.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.primary_activity.as_str(),
            self.status.as_str(),
            self.opened_on.as_str(),
            self.first_partner.as_str(),
        ]
    }
}

impl From<RegistryResponse> for CompanyRecord {
    fn from(resp: RegistryResponse) -> Self {
        let address = format!(
            "{}, {} - {}, {} - {}",
            resp.logradouro.unwrap_or_default(),
            resp.numero.unwrap_or_default(),
            resp.bairro.unwrap_or_default(),
            resp.municipio.unwrap_or_default(),
            resp.uf.unwrap_or_default(),
        );
        let primary_activity = resp
            .atividade_principal
            .and_then(|a| a.into_iter().next())
            .and_then(|a| a.text)
            .unwrap_or_default();
        let first_partner = match resp.qsa {
            Some(partners) if !partners.is_empty() => partners
                .into_iter()
                .next()
                .and_then(|p| p.nome)
                .unwrap_or_default(),
            _ => UNAVAILABLE.to_string(),
        };

        Self {
            cnpj: resp.cnpj.unwrap_or_default(),
            name: resp.nome.unwrap_or_default(),
            trade_name: resp.fantasia.unwrap_or_default(),
            legal_nature: resp.natureza_juridica.unwrap_or_default(),
            address,
            phone: resp.telefone.unwrap_or_default(),
            email: resp.email.unwrap_or_default(),
            primary_activity,
            status: resp.situacao.unwrap_or_default(),
            opened_on: resp.abertura.unwrap_or_default(),
            first_partner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> CompanyRecord {
        serde_json::from_value::<RegistryResponse>(body).unwrap().into()
    }

    #[test]
    fn full_body() {
        let rec = parse(json!({
            "cnpj": "12.345.678/0001-95",
            "nome": "ACME LTDA",
            "fantasia": "ACME",
            "natureza_juridica": "206-2 - Sociedade Empresária Limitada",
            "logradouro": "RUA A",
            "numero": "10",
            "bairro": "CENTRO",
            "municipio": "SAO PAULO",
            "uf": "SP",
            "telefone": "(11) 1234-5678",
            "email": "contato@acme.com.br",
            "atividade_principal": [{"code": "62.01-5-01", "text": "Desenvolvimento de software"}],
            "situacao": "ATIVA",
            "abertura": "01/02/2003",
            "qsa": [{"nome": "FULANO DE TAL", "qual": "49-Sócio-Administrador"}, {"nome": "BELTRANO"}]
        }));
        assert_eq!(rec.name, "ACME LTDA");
        assert_eq!(rec.address, "RUA A, 10 - CENTRO, SAO PAULO - SP");
        assert_eq!(rec.primary_activity, "Desenvolvimento de software");
        assert_eq!(rec.first_partner, "FULANO DE TAL");
        assert_eq!(rec.cells()[0], "12.345.678/0001-95");
        assert_eq!(rec.cells()[10], "FULANO DE TAL");
    }

    #[test]
    fn missing_partners_are_unavailable() {
        assert_eq!(parse(json!({"nome": "X"})).first_partner, UNAVAILABLE);
        assert_eq!(parse(json!({"nome": "X", "qsa": []})).first_partner, UNAVAILABLE);
        assert_eq!(parse(json!({"nome": "X", "qsa": null})).first_partner, UNAVAILABLE);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let rec = parse(json!({"atividade_principal": [], "telefone": null}));
        assert_eq!(rec.name, "");
        assert_eq!(rec.phone, "");
        assert_eq!(rec.primary_activity, "");
        assert_eq!(rec.address, ",  - ,  - ");
    }

    #[test]
    fn serializes_with_sheet_headers() {
        let value = serde_json::to_value(parse(json!({"nome": "ACME"}))).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for column in COLUMNS {
            assert!(keys.contains(&column), "missing {column}");
        }
        assert_eq!(value["Nome"], "ACME");
    }
}
