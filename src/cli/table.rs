use serde_json::Value;

use terminal_size::{terminal_size, Width};

/// Print a response for a terminal: lists (bare arrays or the `data` of a paginated
/// envelope) as an ASCII table, anything else as pretty JSON.
pub fn print_value(val: &Value) {
    let termw = terminal_width();
    crate::tprintln!("[cli.table] terminal width={} columns", termw);
    match render_table(val, termw) {
        Some(table) => println!("{}", table),
        None => println!("{}", serde_json::to_string_pretty(val).unwrap_or_else(|_| val.to_string())),
    }
}

/// Table text for `val`, or `None` when it is not a non-empty list.
pub fn render_table(val: &Value, termw: usize) -> Option<String> {
    let (rows_v, envelope) = match val {
        Value::Array(arr) => (arr, None),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(arr)) => (arr, Some(val)),
            _ => return None,
        },
        _ => return None,
    };
    if rows_v.is_empty() { return None; }

    let (cols, rows) = tabulate(rows_v);
    let mut widths: Vec<usize> = cols.iter().map(|s| s.chars().count().min(termw)).collect();
    for r in &rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = cell.chars().count();
            if w > widths[i] { widths[i] = w.min(MAX_CELL); }
        }
    }

    let sep = build_separator(&widths);
    let mut out = Vec::with_capacity(rows.len() + 5);
    out.push(fit_line_to_width(&sep, termw));
    out.push(fit_line_to_width(&build_row(&cols, &widths, false), termw));
    out.push(fit_line_to_width(&sep, termw));
    for r in &rows {
        out.push(fit_line_to_width(&build_row(r, &widths, true), termw));
    }
    out.push(fit_line_to_width(&sep, termw));
    out.push(footer(rows.len(), envelope));
    Some(out.join("\n"))
}

const MAX_CELL: usize = 40;

fn footer(count: usize, envelope: Option<&Value>) -> String {
    let Some(env) = envelope else { return format!("rows: {}", count) };
    let num = |k: &str| env.get(k).and_then(Value::as_u64);
    let small = |k: &str| num(k).and_then(|n| u32::try_from(n).ok());
    match (small("page"), small("limit"), num("total")) {
        (Some(page), Some(limit), Some(total)) => {
            let range = crate::pagination::DisplayRange::compute(page, limit, total);
            format!("Showing {} (page {} of {})", range, page, num("total_pages").unwrap_or(1))
        }
        _ => format!("rows: {}", count),
    }
}

// Union of keys in first-seen order; scalar rows collapse to a single `value` column.
fn tabulate(arr: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut cols: Vec<String> = Vec::new();
    let all_objects = arr.iter().all(Value::is_object);
    if !all_objects {
        let rows = arr.iter().map(|el| vec![to_cell_string(el)]).collect();
        return (vec!["value".to_string()], rows);
    }
    for el in arr {
        if let Value::Object(map) = el {
            for k in map.keys() { if !cols.contains(k) { cols.push(k.clone()); } }
        }
    }
    let rows = arr
        .iter()
        .map(|el| cols.iter().map(|k| el.get(k).map(to_cell_string).unwrap_or_default()).collect())
        .collect();
    (cols, rows)
}

fn to_cell_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.replace(['\n', '\r'], " "),
        // nested records show their most readable field
        Value::Object(map) => ["name", "username", "title"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| v.to_string()),
        Value::Array(_) => v.to_string(),
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize], align_numbers: bool) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let text = truncate(cell, *w);
        let pad = " ".repeat(w.saturating_sub(text.chars().count()));
        s.push(' ');
        if align_numbers && is_numeric_like(cell) {
            s.push_str(&pad);
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&pad);
        }
        s.push_str(" |");
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    let st = s.trim();
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() { has_digit = true; continue; }
        if ".-+".contains(ch) { continue; }
        return false;
    }
    has_digit
}

fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if w > 8 => (w - 4) as usize,
        _ => 120,
    }
}

fn fit_line_to_width(s: &str, maxw: usize) -> String {
    let len = s.chars().count();
    if len <= maxw || maxw <= 3 { return s.to_string(); }
    let budget = maxw - 3;
    let front = budget / 2;
    let back = budget - front;
    let head: String = s.chars().take(front).collect();
    let tail: String = s.chars().skip(len - back).collect();
    format!("{}...{}", head, tail)
}
