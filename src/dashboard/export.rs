//! Lead CSV Export
//!
//! The downloaded file matches what the dashboard has always produced:
//! a bare header row, then every field wrapped in double quotes with no
//! escaping. Spreadsheet tools cope; strict CSV parsers may not when a
//! message contains a quote.

use chrono::{Local, NaiveDate, TimeZone};

use super::analytics::format_lead_date_in;
use crate::types::Lead;

pub const CSV_HEADER: [&str; 5] = ["Name", "Email", "Phone", "Message", "Date"];

fn quoted(cell: &str) -> String {
    format!("\"{}\"", cell)
}

/// Header plus one line per lead, joined by `\n` with no trailing newline.
/// Dates are in the local time zone.
pub fn leads_to_csv(leads: &[Lead]) -> String {
    leads_to_csv_in(leads, &Local)
}

/// [`leads_to_csv`] with dates rendered in `tz`
pub fn leads_to_csv_in<Tz: TimeZone>(leads: &[Lead], tz: &Tz) -> String {
    let mut lines = Vec::with_capacity(leads.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for lead in leads {
        let date = format_lead_date_in(&lead.created_at, tz);
        let cells = [
            lead.name.as_str(),
            lead.email.as_str(),
            lead.phone.as_deref().unwrap_or(""),
            lead.message.as_deref().unwrap_or(""),
            date.as_str(),
        ];
        lines.push(cells.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

/// `leads_YYYY-MM-DD.csv`; callers pass the current UTC date
pub fn export_filename(date: NaiveDate) -> String {
    format!("leads_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn lead(name: &str, phone: Option<&str>, message: Option<&str>) -> Lead {
        Lead {
            id: name.to_lowercase(),
            client_id: None,
            session_id: "session_1".to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: phone.map(str::to_string),
            message: message.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_layout() {
        let leads = vec![
            lead("Ann", Some("555-0100"), Some("Call me")),
            lead("Bob", None, None),
        ];

        let csv = leads_to_csv_in(&leads, &Utc);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Email,Phone,Message,Date");
        assert_eq!(
            lines[1],
            r#""Ann","ann@example.com","555-0100","Call me","3/7/2024""#
        );
        assert_eq!(lines[2], r#""Bob","bob@example.com","","","3/7/2024""#);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes_not_escaped() {
        let csv = leads_to_csv(&[lead("Ann", None, Some(r#"say "hi""#))]);
        assert!(csv.contains(r#""say "hi"""#));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(leads_to_csv(&[]), "Name,Email,Phone,Message,Date");
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        assert_eq!(export_filename(date), "leads_2024-11-02.csv");
    }
}
