//! Rendering of computer accounts for stdout.

use laps_core::utils::datetime;
use laps_core::{ComputerAccount, JsonDocument};

use crate::cli::OutputFormat;

const NAME_LABEL: &str = "ComputerName";
const PASSWORD_LABEL: &str = "ComputerAdminPassword";
const EXPIRATION_LABEL: &str = "ComputerAdminPasswordExpirationDateTime";

/// Render one account.
pub fn render_account(account: &ComputerAccount, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => account.to_json_pretty()?,
        OutputFormat::Text => property_list(account),
    })
}

/// Render a list of accounts. An empty list renders as nothing in text mode.
pub fn render_accounts(accounts: &[ComputerAccount], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => accounts.to_json_pretty()?,
        OutputFormat::Text => table(accounts),
    })
}

fn expiration(account: &ComputerAccount) -> String {
    if account.has_expiration() {
        datetime::format(&account.computer_admin_password_expiration_date_time())
    } else {
        String::new()
    }
}

fn property_list(account: &ComputerAccount) -> String {
    let width = EXPIRATION_LABEL.len();
    [
        (NAME_LABEL, account.computer_name().to_string()),
        (
            PASSWORD_LABEL,
            account.computer_admin_password().unwrap_or_default().to_string(),
        ),
        (EXPIRATION_LABEL, expiration(account)),
    ]
    .iter()
    .map(|(label, value)| format!("{label:<width$} : {value}").trim_end().to_string())
    .collect::<Vec<_>>()
    .join("\n")
}

fn table(accounts: &[ComputerAccount]) -> String {
    if accounts.is_empty() {
        return String::new();
    }

    let rows: Vec<[String; 3]> = accounts
        .iter()
        .map(|a| {
            [
                a.computer_name().to_string(),
                a.computer_admin_password().unwrap_or_default().to_string(),
                expiration(a),
            ]
        })
        .collect();

    let header = [NAME_LABEL, PASSWORD_LABEL, EXPIRATION_LABEL];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:<w1$}  {}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
        .trim_end()
        .to_string()
    };

    let dashes = widths.map(|w| "-".repeat(w));
    let mut out = vec![
        line(header),
        line([dashes[0].as_str(), dashes[1].as_str(), dashes[2].as_str()]),
    ];
    out.extend(
        rows.iter()
            .map(|r| line([r[0].as_str(), r[1].as_str(), r[2].as_str()])),
    );
    out.join("\n")
}
