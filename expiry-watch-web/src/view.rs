//! HTML rendering of the domain list.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use expiry_watch_core::types::DomainRecord;
use expiry_watch_core::utils::datetime::days_left;

/// Days left below which a row is highlighted.
const WARNING_DAYS: i64 = 30;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>expiry-watch</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-top: 1rem; }
th, td { padding: 0.3rem 0.8rem; border-bottom: 1px solid #ddd; text-align: left; }
td.warning { color: #b26a00; }
td.expired { color: #c62828; font-weight: bold; }
form.inline { display: inline; }
</style>
</head>
<body>
<h1>Domain expiry</h1>
<form method="post" action="/domains">
<textarea name="names" rows="4" cols="40" placeholder="one domain per line"></textarea><br>
<button type="submit">Add</button>
</form>
<form method="post" action="/refresh">
<button type="submit">Refresh all</button>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// `(text, css class)` of the days-left cell.
fn days_left_cell(expiry: Option<&DateTime<Utc>>, now: &DateTime<Utc>) -> (String, &'static str) {
    match expiry {
        Some(expiry) => {
            let days = days_left(expiry, now);
            let class = if *expiry <= *now {
                "expired"
            } else if days < WARNING_DAYS {
                "warning"
            } else {
                ""
            };
            (days.to_string(), class)
        }
        None => ("-".to_string(), ""),
    }
}

/// Render the index page for `records` as seen at `now`.
pub fn render_index(records: &[DomainRecord], now: &DateTime<Utc>) -> String {
    let mut html = String::from(PAGE_HEAD);

    if records.is_empty() {
        html.push_str("<p>No domains tracked yet.</p>\n");
        html.push_str(PAGE_TAIL);
        return html;
    }

    html.push_str(
        "<table>\n<thead><tr><th>Domain</th><th>Certificate expiry</th><th>Days left</th>\
         <th>Domain expiry</th><th>Days left</th><th>Last check</th><th></th></tr></thead>\n<tbody>\n",
    );

    for record in records {
        let (cert_days, cert_class) = days_left_cell(record.cert_expiry.as_ref(), now);
        let (domain_days, domain_class) = days_left_cell(record.domain_expiry.as_ref(), now);
        let _ = write!(
            html,
            "<tr><td>{name}</td><td>{cert}</td><td class=\"{cert_class}\">{cert_days}</td>\
             <td>{domain}</td><td class=\"{domain_class}\">{domain_days}</td><td>{checked}</td>\
             <td><form class=\"inline\" method=\"post\" action=\"/domains/{id}/delete\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            name = escape_html(&record.name),
            cert = escape_html(&format_timestamp(record.cert_expiry.as_ref())),
            domain = escape_html(&format_timestamp(record.domain_expiry.as_ref())),
            checked = escape_html(&format_timestamp(record.last_check.as_ref())),
            id = record.id,
        );
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str(PAGE_TAIL);
    html
}
