//! Rendering of an event's scouting submissions as a downloadable file.

use storage::{dto::export::MatchExportType, models::MatchData2025};

use crate::error::{WebError, WebResult};

const COLUMNS: [&str; 22] = [
    "event_key",
    "match_level",
    "match_number",
    "team_number",
    "user_id",
    "organization_id",
    "season",
    "timestamp",
    "notes",
    "al4c",
    "al3c",
    "al2c",
    "al1c",
    "tl4c",
    "tl3c",
    "tl2c",
    "tl1c",
    "a_net",
    "t_net",
    "a_processor",
    "t_processor",
    "endgame",
];

pub fn render(file_type: MatchExportType, rows: &[MatchData2025]) -> WebResult<Vec<u8>> {
    match file_type {
        MatchExportType::Csv => render_csv(rows),
        MatchExportType::Json => serde_json::to_vec_pretty(rows)
            .map_err(|e| WebError::InternalServerError(format!("JSON export failed: {}", e))),
        MatchExportType::Xls => Ok(render_xls(rows).into_bytes()),
    }
}

fn render_csv(rows: &[MatchData2025]) -> WebResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer
            .write_record(COLUMNS)
            .map_err(|e| WebError::InternalServerError(format!("CSV export failed: {}", e)))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| WebError::InternalServerError(format!("CSV export failed: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| WebError::InternalServerError(format!("CSV export failed: {}", e)))
}

fn cells(row: &MatchData2025) -> [String; 22] {
    [
        row.event_key.clone(),
        row.match_level.clone(),
        row.match_number.to_string(),
        row.team_number.to_string(),
        row.user_id.to_string(),
        row.organization_id.to_string(),
        row.season.to_string(),
        row.timestamp.to_string(),
        row.notes.clone(),
        row.al4c.to_string(),
        row.al3c.to_string(),
        row.al2c.to_string(),
        row.al1c.to_string(),
        row.tl4c.to_string(),
        row.tl3c.to_string(),
        row.tl2c.to_string(),
        row.tl1c.to_string(),
        row.a_net.to_string(),
        row.t_net.to_string(),
        row.a_processor.to_string(),
        row.t_processor.to_string(),
        row.endgame.as_str().to_string(),
    ]
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Spreadsheet applications open an HTML table served as `.xls`
fn render_xls(rows: &[MatchData2025]) -> String {
    let mut html = String::from("<html><head><meta charset=\"utf-8\"></head><body><table>\n<tr>");
    for column in COLUMNS {
        html.push_str("<th>");
        html.push_str(column);
        html.push_str("</th>");
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in cells(row) {
            html.push_str("<td>");
            html.push_str(&escape_html(&cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table></body></html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storage::models::Endgame2025;
    use uuid::Uuid;

    fn row(notes: &str) -> MatchData2025 {
        MatchData2025 {
            event_key: "2025test".to_string(),
            match_level: "qm".to_string(),
            match_number: 3,
            team_number: 254,
            user_id: Uuid::nil(),
            organization_id: 7,
            season: 1,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            notes: notes.to_string(),
            al4c: 2,
            al3c: 0,
            al2c: 1,
            al1c: 0,
            tl4c: 5,
            tl3c: 0,
            tl2c: 0,
            tl1c: 3,
            a_net: 0,
            t_net: 2,
            a_processor: 1,
            t_processor: 0,
            endgame: Endgame2025::Deep,
        }
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_row() {
        let bytes = render(MatchExportType::Csv, &[row("fast"), row("slow")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], COLUMNS.join(","));
        assert!(lines[1].starts_with("2025test,qm,3,254,"));
        assert!(lines[1].ends_with(",0,2,1,0,DEEP"));
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let bytes = render(MatchExportType::Csv, &[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_json_export_is_an_array() {
        let bytes = render(MatchExportType::Json, &[row("")]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["team_number"], 254);
        assert_eq!(value[0]["endgame"], "DEEP");
    }

    #[test]
    fn test_xls_escapes_notes() {
        let bytes = render(MatchExportType::Xls, &[row("<b>tipped</b> & stuck")]).unwrap();
        let html = String::from_utf8(bytes).unwrap();

        assert!(html.contains("<th>endgame</th>"));
        assert!(html.contains("<td>&lt;b&gt;tipped&lt;/b&gt; &amp; stuck</td>"));
        assert!(!html.contains("<b>tipped"));
        assert_eq!(html.matches("<tr>").count(), 2);
    }
}
