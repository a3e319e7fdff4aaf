// src/domains.rs
use crate::models::Result;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Parse the domain list out of CSV content. Only the `domain` column is
/// read; other columns are ignored, empty cells skipped.
pub fn read_domains<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let domain_index = match headers.iter().position(|h| h.trim() == "domain") {
        Some(index) => index,
        None => return Err("CSV has no 'domain' column".into()),
    };

    let mut domains = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(value) = record.get(domain_index) {
            let domain = value.trim();
            if !domain.is_empty() {
                domains.push(domain.to_string());
            }
        }
    }
    Ok(domains)
}

pub async fn load_domain_list(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read domain CSV {}: {}", path.display(), e))?;
    let domains = read_domains(content.as_bytes())?;
    info!("Loaded {} domains from {}", domains.len(), path.display());
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_domain_column() {
        let csv = "domain\nacme.com\nexample.org\n";
        let domains = read_domains(csv.as_bytes()).unwrap();
        assert_eq!(domains, vec!["acme.com".to_string(), "example.org".to_string()]);
    }

    #[test]
    fn ignores_other_columns_and_blank_cells() {
        let csv = "company,domain,country\nAcme,acme.com,US\nGhost,,FR\nInit, example.org ,DE\n";
        let domains = read_domains(csv.as_bytes()).unwrap();
        assert_eq!(domains, vec!["acme.com".to_string(), "example.org".to_string()]);
    }

    #[test]
    fn errors_without_a_domain_column() {
        let csv = "company,website\nAcme,acme.com\n";
        let result = read_domains(csv.as_bytes());
        assert!(result.is_err());
    }
}
