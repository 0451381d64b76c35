//! `CalculationRequest` — the core-facing submission shape (spec.md §6).

use crate::models::configuration::Configuration;
use crate::models::panel::{ClientInfo, Panel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub panels: Vec<Panel>,
    pub stock_panels: Vec<Panel>,
    #[serde(default)]
    pub configuration: Configuration,
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

impl CalculationRequest {
    /// Sum of `count` across enabled, valid demand panels.
    pub fn enabled_panel_count(&self) -> i64 {
        self.panels
            .iter()
            .filter(|p| p.is_valid())
            .map(|p| p.count as i64)
            .sum()
    }

    pub fn enabled_stock_count(&self) -> i64 {
        self.stock_panels
            .iter()
            .filter(|p| p.is_valid())
            .map(|p| p.count as i64)
            .sum()
    }

    /// Distinct materials present across demand and stock (valid panels).
    pub fn materials(&self) -> Vec<String> {
        let mut materials: Vec<String> = self
            .panels
            .iter()
            .chain(self.stock_panels.iter())
            .filter(|p| p.is_valid())
            .map(|p| p.material().to_string())
            .collect();
        materials.sort();
        materials.dedup();
        materials
    }

    /// `factor = 10^d` per spec.md §3, derived from every decimal numeric
    /// field present in the request.
    pub fn scale_factor(&self) -> i64 {
        let mut fields: Vec<&str> = Vec::new();
        for p in self.panels.iter().chain(self.stock_panels.iter()) {
            fields.push(p.width.as_str());
            fields.push(p.height.as_str());
        }
        crate::utils::scale::scale_factor(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_valid_panels() {
        let mut request = CalculationRequest {
            panels: vec![Panel::new(1, "100", "50", 2), Panel::new(2, "0", "50", 1)],
            stock_panels: vec![Panel::new(10, "200", "100", 1)],
            configuration: Configuration::default(),
            client_info: None,
        };
        request.panels[1].enabled = false;
        assert_eq!(request.enabled_panel_count(), 2);
        assert_eq!(request.enabled_stock_count(), 1);
    }
}
