use crate::domain::model::{Grouping, LabRecord};
use std::collections::BTreeSet;

/// Trims the laboratory and every product. Products that only differed by surrounding
/// whitespace come out as equal strings and are both kept.
pub fn normalize_group(lab: &str, products: &BTreeSet<String>) -> LabRecord {
    LabRecord {
        lab: lab.trim().to_string(),
        products: products.iter().map(|p| p.trim().to_string()).collect(),
    }
}

pub fn normalize_all(grouping: &Grouping) -> Vec<LabRecord> {
    grouping
        .groups
        .iter()
        .map(|(lab, products)| normalize_group(lab, products))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_variant_duplicates_survive() {
        let products: BTreeSet<String> = ["Aspirin", " Aspirin", "Ibuprofen"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let record = normalize_group("LabA ", &products);

        assert_eq!(record.lab, "LabA");
        let mut sorted = record.products.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Aspirin", "Aspirin", "Ibuprofen"]);
    }

    #[test]
    fn test_internal_whitespace_and_case_preserved() {
        let products: BTreeSet<String> = ["\tDoliprane  500 mg \n".to_string()].into();

        let record = normalize_group("  Sanofi Aventis\t", &products);

        assert_eq!(record.lab, "Sanofi Aventis");
        assert_eq!(record.products, vec!["Doliprane  500 mg"]);
    }

    #[test]
    fn test_normalize_all_one_record_per_group() {
        let mut grouping = Grouping::default();
        grouping
            .groups
            .entry("LabA".to_string())
            .or_default()
            .insert("Aspirin".to_string());
        grouping
            .groups
            .entry(" LabB".to_string())
            .or_default()
            .insert("Ibuprofen".to_string());

        let records = normalize_all(&grouping);

        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.lab == "LabB"));
    }
}
