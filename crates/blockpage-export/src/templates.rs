//! Template engine for the exported document shell.

use minijinja::{context, Environment};

/// Context for rendering the page document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Document title
    pub title: String,
    /// Rendered component fragments
    pub body: String,
    /// Relative path of the stylesheet
    pub stylesheet: String,
    /// Relative path of the behavior script
    pub script: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the document template loaded.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", DOCUMENT_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render `index.html`.
    pub fn render_document(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &context.title,
            body => &context.body,
            stylesheet => &context.stylesheet,
            script => &context.script,
        })
    }
}

const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="{{ stylesheet }}">
</head>
<body>
    <div class="container">
        {{ body | safe }}
    </div>
    <script src="{{ script }}"></script>
</body>
</html>
"##;
