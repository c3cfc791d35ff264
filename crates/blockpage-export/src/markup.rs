//! Per-component markup fragments.

use blockpage_model::{Component, ComponentKind};

/// Separator between fragments inside the page container.
const FRAGMENT_SEPARATOR: &str = "\n        ";

/// Render one component. Components of unknown kind render as an empty string.
pub fn render_fragment(component: &Component, index: usize) -> String {
    let kind = component.kind();
    let classes = format!("{} {}", kind, component.instance_class(index));
    let style = escape_html(&component.style().to_inline());
    let content = escape_html(component.content());

    match kind {
        ComponentKind::Heading => {
            format!(r#"<h2 class="{}" style="{}">{}</h2>"#, classes, style, content)
        }
        ComponentKind::Paragraph => {
            format!(r#"<p class="{}" style="{}">{}</p>"#, classes, style, content)
        }
        ComponentKind::Button => format!(
            r#"<button class="{}" style="{}">{}</button>"#,
            classes, style, content
        ),
        ComponentKind::Image => format!(
            r#"<img src="{}" alt="Image {}" class="{}" style="{}">"#,
            content,
            index + 1,
            classes,
            style
        ),
        ComponentKind::Unknown => String::new(),
    }
}

/// Render all components in list order, ready to drop into the page container.
pub fn render_body(components: &[Component]) -> String {
    components
        .iter()
        .enumerate()
        .map(|(index, component)| render_fragment(component, index))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpage_model::Style;
    use pretty_assertions::assert_eq;

    fn component(kind: ComponentKind, content: &str, style: Style) -> Component {
        Component::from_parts("id", kind, content, style)
    }

    #[test]
    fn renders_heading() {
        let style: Style = [("fontSize", "2rem"), ("color", "#000000")]
            .into_iter()
            .collect();

        let html = render_fragment(&component(ComponentKind::Heading, "Hi", style), 0);

        assert_eq!(
            html,
            r##"<h2 class="heading heading-0" style="color: #000000; font-size: 2rem">Hi</h2>"##
        );
    }

    #[test]
    fn renders_paragraph_and_button() {
        let p = render_fragment(&component(ComponentKind::Paragraph, "Text", Style::new()), 1);
        let b = render_fragment(&component(ComponentKind::Button, "Go", Style::new()), 2);

        assert_eq!(p, r#"<p class="paragraph paragraph-1" style="">Text</p>"#);
        assert_eq!(b, r#"<button class="button button-2" style="">Go</button>"#);
    }

    #[test]
    fn renders_image_with_one_based_alt() {
        let html = render_fragment(
            &component(ComponentKind::Image, "images/image-1.png", Style::new()),
            1,
        );

        assert_eq!(
            html,
            r#"<img src="images/image-1.png" alt="Image 2" class="image image-1" style="">"#
        );
    }

    #[test]
    fn unknown_kind_renders_nothing() {
        let html = render_fragment(&component(ComponentKind::Unknown, "?", Style::new()), 0);

        assert_eq!(html, "");
    }

    #[test]
    fn escapes_content_and_attributes() {
        let style: Style = [("fontFamily", r#""Fira Sans""#)].into_iter().collect();

        let html = render_fragment(
            &component(ComponentKind::Paragraph, "a < b & c", style),
            0,
        );

        assert!(html.contains("a &lt; b &amp; c"));
        assert!(html.contains("font-family: &quot;Fira Sans&quot;"));
    }

    #[test]
    fn body_keeps_list_order() {
        let components = vec![
            component(ComponentKind::Button, "First", Style::new()),
            component(ComponentKind::Heading, "Second", Style::new()),
        ];

        let body = render_body(&components);

        assert!(body.find("First").unwrap() < body.find("Second").unwrap());
        assert!(body.contains("button-0"));
        assert!(body.contains("heading-1"));
    }
}
