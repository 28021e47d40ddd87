//! HTML document for the log panel

use podlog_core::FilterMode;

/// Panel title for a resource
pub fn panel_title(resource: &str) -> String {
    format!("Logs - {}", resource)
}

/// Build the panel document: filter controls plus the log buffer.
///
/// `content` is HTML-escaped before it is embedded, so log text can never
/// inject markup into the document.
pub fn render_document(resource: &str, content: &str) -> String {
    let options: String = FilterMode::ALL
        .iter()
        .map(|mode| {
            format!(
                "                    <option value='{}'>{}</option>\n",
                mode.as_str(),
                escape_html(mode.label())
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Logs {resource}</title>
</head>
<body>
    <div style='position: fixed; top: 15px; left: 2%; width: 100%'>
        <span style='position: absolute; left: 0%'>Show log entries</span>
        <select id='mode' style='margin-bottom: 5px; position: absolute; left: 110px'>
{options}        </select>
        <span style='position: absolute; left: 240px'>Match expression</span>
        <input style='left:350px; position: absolute' type='text' id='regexp' placeholder='Filter' size='25'/>
    </div>
    <div style='position: absolute; top: 55px; bottom: 10px; width: 97%'>
        <div style="overflow-y: scroll; height: 100%">
            <code><pre id='content'>{content}</pre></code>
        </div>
    </div>
</body>
</html>
"#,
        resource = escape_html(resource),
        options = options,
        content = escape_html(content),
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
