use crate::render::ResultsArea;

/// Render a self-contained HTML page holding the results area.
///
/// The template is substituted with `replace` rather than `format!()` so the
/// CSS braces can stay as written.
pub fn render_page(area: &ResultsArea) -> String {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Postcode Explorer</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .muted { color: #777; font-size: 12px; }
  #results { padding: 12px 16px; display: flex; flex-direction: column; gap: 12px; }

  .card { border: 1px solid #ddd; border-radius: 8px; padding: 8px 12px; background: #fafafa; }
  .card h3 { margin: 4px 0 8px; font-size: 16px; }
  .card ul { margin: 0; padding-left: 18px; }
  .card li { font-size: 14px; line-height: 1.5; }
  .value { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
  .null { color: #999; font-style: italic; }
</style>
</head>
<body>
<header>
  <b>Postcode Explorer</b> <span class="muted">__COUNT__ result(s)</span>
</header>
<div id="results">
__CARDS__
</div>
</body>
</html>
"#;

    TEMPLATE
        .replace("__COUNT__", &area.cards().len().to_string())
        .replace("__CARDS__", &area.to_markup())
}
