//! Profile list rendering

use badge_core::dates::{format_display_date, is_date_expired};
use badge_core::ProfileRecord;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

pub const EMPTY_CELL: &str = "-";
pub const PERMANENT: &str = "permanent";
pub const NO_PROFILES: &str = "No profiles found";

const HEADERS: [&str; 6] = ["ID", "Name", "Organization", "Department", "Created", "Expires"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiration {
    Permanent,
    Until { date: String, expired: bool },
}

/// One display row of the profile table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub id: String,
    pub temporary: bool,
    pub full_name: String,
    pub organization: String,
    pub department: String,
    pub created: String,
    pub expiration: Expiration,
}

impl ProfileRow {
    pub fn from_record(record: &ProfileRecord, today: NaiveDate) -> Self {
        let expiration = match record.expiration_date.as_deref() {
            Some(date) if !date.is_empty() => Expiration::Until {
                date: format_display_date(date),
                expired: is_date_expired(date, today),
            },
            _ => Expiration::Permanent,
        };

        Self {
            id: record.id.clone(),
            temporary: record.is_temporary,
            full_name: record.full_name.clone(),
            organization: or_dash(&record.organization),
            department: or_dash(&record.department),
            created: format_display_date(&record.created_at),
            expiration,
        }
    }

    fn cells(&self) -> [String; 6] {
        let id = if self.temporary {
            format!("{} ⏱", self.id)
        } else {
            self.id.clone()
        };
        let expires = match &self.expiration {
            Expiration::Permanent => PERMANENT.to_string(),
            Expiration::Until { date, expired: true } => format!("{} (expired)", date),
            Expiration::Until { date, .. } => date.clone(),
        };
        [
            id,
            self.full_name.clone(),
            self.organization.clone(),
            self.department.clone(),
            self.created.clone(),
            expires,
        ]
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

pub fn rows(records: &[ProfileRecord], today: NaiveDate) -> Vec<ProfileRow> {
    records.iter().map(|r| ProfileRow::from_record(r, today)).collect()
}

/// Render rows as an aligned text table
pub fn render(rows: &[ProfileRow], color: bool) -> String {
    if rows.is_empty() {
        return NO_PROFILES.to_string();
    }

    let cells: Vec<[String; 6]> = rows.iter().map(ProfileRow::cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = join(&HEADERS.map(String::from), &widths);
    if color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    for (row, cells) in rows.iter().zip(cells.iter()) {
        let line = join(cells, &widths);
        if !color {
            out.push_str(&line);
        } else {
            match row.expiration {
                Expiration::Until { expired: true, .. } => out.push_str(&line.red().to_string()),
                _ => out.push_str(&line),
            }
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

fn join(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
