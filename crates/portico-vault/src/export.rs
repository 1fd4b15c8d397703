// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plaintext CSV export of the credential list.
//!
//! The password column is intentionally absent: the export is a reference
//! sheet, not a backup. Fields are always quoted with internal quotes
//! doubled; multiple emails are joined with `"; "`.

use portico_core::PorticoError;

use crate::model::Credential;

/// CSV header line. Written unquoted, ahead of the quoted data rows.
const HEADER: &str = "Website,Username,Emails,Note";

/// Render the record list as CSV. Refuses an empty vault.
pub fn to_csv(records: &[Credential]) -> Result<String, PorticoError> {
    if records.is_empty() {
        return Err(PorticoError::Vault("vault is empty, nothing to export".to_string()));
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .has_headers(false)
        .from_writer(Vec::new());

    for record in records {
        writer
            .write_record([
                record.website.as_str(),
                record.username.as_deref().unwrap_or_default(),
                &record.emails.join("; "),
                record.note.as_str(),
            ])
            .map_err(|e| PorticoError::Vault(format!("csv export failed: {e}")))?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| PorticoError::Vault(format!("csv export failed: {e}")))?;
    let rows = String::from_utf8(rows)
        .map_err(|e| PorticoError::Vault(format!("csv export produced invalid UTF-8: {e}")))?;

    Ok(format!("{HEADER}\n{rows}"))
}
