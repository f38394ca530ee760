use messesinfo_domain::constants::{HORAIRES_PATH, RPC_QUERY_SUFFIX};
use messesinfo_domain::{ChurchConfig, DayKey};

/// Search terms identifying one church on messes.info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchQuery {
    pub name: String,
    pub city: String,
    pub postal_code: String,
    pub short_postal_code: String,
}

impl ChurchQuery {
    /// Natural-language search string understood by the JSON-RPC endpoint.
    pub fn rpc_query(&self, day: DayKey) -> String {
        format!(
            "eglise {} ville {} .fr {} {} {} {}",
            self.name, self.city, self.short_postal_code, self.postal_code, day, RPC_QUERY_SUFFIX
        )
    }

    /// Path of the public schedule page, relative to the base URL.
    pub fn horaires_path(&self) -> String {
        let slug = format!("{} {}", self.name, self.postal_code);
        format!("{}/{}", HORAIRES_PATH, urlencoding::encode(&slug))
    }
}

impl From<&ChurchConfig> for ChurchQuery {
    fn from(church: &ChurchConfig) -> Self {
        Self {
            name: church.name.trim().to_string(),
            city: church.city.trim().to_string(),
            postal_code: church.postal_code.trim().to_string(),
            short_postal_code: church.short_postal_code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ChurchQuery {
        ChurchQuery::from(&ChurchConfig {
            name: "Saint-Germain l'Auxerrois".into(),
            postal_code: "75001".into(),
            city: "Paris".into(),
        })
    }

    #[test]
    fn rpc_query_lists_terms_in_order() {
        let day = DayKey::parse("10-03-2024").unwrap();
        assert_eq!(
            query().rpc_query(day),
            "eglise Saint-Germain l'Auxerrois ville Paris .fr 75 75001 10-03-2024 all-celebration"
        );
    }

    #[test]
    fn horaires_path_is_percent_encoded() {
        assert_eq!(query().horaires_path(), "/horaires/Saint-Germain%20l%27Auxerrois%2075001");
    }
}
