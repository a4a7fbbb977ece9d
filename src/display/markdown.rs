use crate::api::models::Entry;

/// Render an entry as a markdown document.
pub fn render_entry(entry: &Entry) -> String {
    let mut lines = vec![
        format!(
            "# {} ({})",
            entry.word.as_deref().unwrap_or(""),
            entry.pos
        ),
        format!("*target_code*: {}", entry.target_code),
        String::new(),
    ];

    for (i, sense) in entry.senses.iter().enumerate() {
        lines.push(format!(
            "## 뜻 {}. {}",
            i + 1,
            sense.sense_type.as_deref().unwrap_or("")
        ));
        lines.push(sense.definition.clone().unwrap_or_default());
        if !sense.examples.is_empty() {
            lines.push(String::new());
            lines.push("**용례**".to_string());
            lines.extend(sense.examples.iter().map(|e| format!("- {}", e)));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
