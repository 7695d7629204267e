use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::id_string;

/// Location as returned nested under its company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "id_string")]
    pub location_id: String,
    pub location_name: String,
}

/// Company with its locations (`GET /company-locations/all`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(deserialize_with = "id_string")]
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Read-only company → locations catalog, fetched once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyCatalog {
    companies: Vec<Company>,
}

impl CompanyCatalog {
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn company(&self, company_id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.company_id == company_id)
    }

    /// First company and its first location, used for the initial scope.
    pub fn first_scope(&self) -> Option<(&Company, Option<&Location>)> {
        let company = self.companies.first()?;
        Some((company, company.locations.first()))
    }

    /// Locations of the given companies, in catalog order.
    pub fn locations_of(&self, company_ids: &[String]) -> Vec<(&Company, &Location)> {
        self.companies
            .iter()
            .filter(|c| company_ids.contains(&c.company_id))
            .flat_map(|c| c.locations.iter().map(move |l| (c, l)))
            .collect()
    }

    /// Company owning the location, if any.
    pub fn company_of_location(&self, location_id: &str) -> Option<&Company> {
        self.companies
            .iter()
            .find(|c| c.locations.iter().any(|l| l.location_id == location_id))
    }

    pub fn company_name(&self, company_id: &str) -> Option<&str> {
        self.company(company_id).map(|c| c.company_name.as_str())
    }

    pub fn location_name(&self, location_id: &str) -> Option<&str> {
        self.companies
            .iter()
            .flat_map(|c| c.locations.iter())
            .find(|l| l.location_id == location_id)
            .map(|l| l.location_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CompanyCatalog {
        let json = r#"[
            {"company_id": 1, "company_name": "Company A", "locations": [
                {"location_id": 10, "location_name": "L1"},
                {"location_id": 11, "location_name": "L2"}
            ]},
            {"company_id": "2", "company_name": "Company B", "locations": [
                {"location_id": "30", "location_name": "L3"}
            ]},
            {"company_id": 3, "company_name": "Company C"}
        ]"#;
        CompanyCatalog::new(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_first_scope() {
        let catalog = catalog();
        let (company, location) = catalog.first_scope().unwrap();
        assert_eq!(company.company_id, "1");
        assert_eq!(location.unwrap().location_name, "L1");
        assert!(CompanyCatalog::default().first_scope().is_none());
    }

    #[test]
    fn test_locations_of_selected_companies() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .locations_of(&["2".to_string(), "1".to_string()])
            .into_iter()
            .map(|(_, l)| l.location_name.as_str())
            .collect();
        assert_eq!(names, vec!["L1", "L2", "L3"]);
        assert!(catalog.locations_of(&["3".to_string()]).is_empty());
    }

    #[test]
    fn test_lookups() {
        let catalog = catalog();
        assert_eq!(catalog.company_of_location("30").unwrap().company_name, "Company B");
        assert_eq!(catalog.location_name("11"), Some("L2"));
        assert_eq!(catalog.company_name("3"), Some("Company C"));
        assert_eq!(catalog.company_name("99"), None);
    }
}
