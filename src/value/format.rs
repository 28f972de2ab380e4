use super::Value;

/// Renders a value for printing. Nested collections start on a new line,
/// indented two spaces per level.
pub fn format(value: &Value) -> String {
    format_at(value, 0)
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_owned()
    } else if n.abs() >= 1e21 {
        format!("{:e}", n).replacen('e', "e+", 1)
    } else if n.abs() < 1e-6 {
        format!("{:e}", n)
    } else {
        n.to_string()
    }
}

fn format_at(value: &Value, level: usize) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Boolean(true) => "ok".to_owned(),
        Value::Boolean(false) => "no".to_owned(),
        Value::Collection(items) => {
            if let Some(text) = value.as_text() {
                return text;
            }
            let items: Vec<String> = items.iter().map(|e| format_at(e, level + 1)).collect();
            let prefix = if level > 0 { "\n" } else { "" };
            format!("{}{}[ {} ]", prefix, "  ".repeat(level), items.join(" "))
        }
        Value::Mapping(map) => {
            let mut s = String::from("{\n");
            for (key, value) in map.iter() {
                s.push_str(&format!("{} → {}\n", key, format_at(value, 0)));
            }
            s.push('}');
            s
        }
        Value::Operator(_) => "(~ ...)".to_owned(),
        Value::Nothing => "∅".to_owned(),
    }
}
