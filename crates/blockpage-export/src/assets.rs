//! Fixed stylesheet and script boilerplate shipped with every export.

use blockpage_model::PLACEHOLDER_IMAGE_URL;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Shared layout rules for the container and the four block classes.
    pub fn baseline_css() -> &'static str {
        BASELINE_CSS
    }

    /// Behavior script: logs button clicks and swaps broken images for the placeholder.
    ///
    /// Identical for every export.
    pub fn generate_js() -> String {
        BEHAVIOR_JS.replace("{placeholder}", PLACEHOLDER_IMAGE_URL)
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const BASELINE_CSS: &str = r#".container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 2rem;
}

.heading {
    margin-bottom: 1rem;
    font-weight: bold;
}

.paragraph {
    line-height: 1.6;
    margin-bottom: 1rem;
}

.button {
    cursor: pointer;
    transition: opacity 0.2s;
    display: inline-block;
}

.button:hover {
    opacity: 0.9;
}

.image {
    max-width: 100%;
    height: auto;
    margin-bottom: 1rem;
    display: block;
}
"#;

const BEHAVIOR_JS: &str = r#"// Page interactivity
document.addEventListener('DOMContentLoaded', function() {
    // Button click handlers
    document.querySelectorAll('.button').forEach(function(button) {
        button.addEventListener('click', function(e) {
            console.log('Button clicked:', e.target.textContent);
        });
    });

    // Fall back to the placeholder when an image fails to load
    document.querySelectorAll('.image').forEach(function(img) {
        img.addEventListener('error', function() {
            this.src = '{placeholder}';
        }, { once: true });
    });
});
"#;
