use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// File formats offered for the match data download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchExportType {
    Csv,
    Json,
    /// HTML table served with the Excel content type, which spreadsheet
    /// applications open directly
    Xls,
}

impl MatchExportType {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xls => "xls",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
            Self::Xls => "application/vnd.ms-excel",
        }
    }

    pub fn file_name(&self, event_key: &str) -> String {
        format!("{}_match_data.{}", event_key, self.extension())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchExportRequest {
    pub file_type: MatchExportType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_event_key() {
        assert_eq!(MatchExportType::Csv.file_name("2025test"), "2025test_match_data.csv");
        assert_eq!(MatchExportType::Xls.file_name("2025test"), "2025test_match_data.xls");
    }

    #[test]
    fn test_unknown_type_does_not_deserialize() {
        let parsed: Result<MatchExportRequest, _> = serde_json::from_str(r#"{"file_type":"txt"}"#);
        assert!(parsed.is_err());
        let parsed: MatchExportRequest = serde_json::from_str(r#"{"file_type":"json"}"#).unwrap();
        assert_eq!(parsed.file_type, MatchExportType::Json);
    }
}
