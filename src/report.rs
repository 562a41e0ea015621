//! Plain-text rendering of a catalog check.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::catalog::{CatalogReport, ObjectReport, Resolved};

/// Render one line per object, followed by a summary.
///
/// Kind and name columns are padded to their widest entry, measured in
/// terminal columns so wide characters line up.
pub fn render(report: &CatalogReport) -> String {
    let kind_width = column_width(report.objects.iter().map(|o| o.kind.name()));
    let name_width = column_width(report.objects.iter().map(|o| o.name.as_str()));
    let indent = kind_width + name_width + 2;

    let mut output = String::new();
    for object in &report.objects {
        output.push_str(&pad(object.kind.name(), kind_width));
        output.push(' ');
        output.push_str(&pad(&object.name, name_width));
        output.push(' ');
        render_outcome(&mut output, object, indent);
    }

    let rejected = report.failures().count();
    let _ = writeln!(
        output,
        "{} object{} checked, {} rejected",
        report.objects.len(),
        if report.objects.len() == 1 { "" } else { "s" },
        rejected
    );
    output
}

fn render_outcome(output: &mut String, object: &ObjectReport, indent: usize) {
    match &object.outcome {
        Ok(Resolved::Accepted) => output.push_str("ok\n"),
        Ok(Resolved::Server(server)) => {
            let _ = writeln!(output, "ok  node_id_len={}", server.node_id_len());
        }
        Ok(Resolved::Table(table)) => {
            let relation = table.relation();
            let _ = writeln!(
                output,
                "ok  relation={} ({} columns)",
                relation.name,
                relation.columns.len()
            );
        }
        Err(err) => {
            let _ = writeln!(output, "ERROR {}: {}", err.code(), err);
            if let Some(hint) = err.hint() {
                let _ = writeln!(output, "{:indent$}HINT: {}", "", hint);
            }
        }
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}
