//! Stylesheet generation.

use blockpage_model::{Component, ComponentKind};

use crate::assets::AssetPipeline;

/// Build `styles.css`: the baseline block, a blank line, then one rule per component.
///
/// Component rules are separated by blank lines. Components of unknown kind get no rule.
pub fn generate_stylesheet(components: &[Component]) -> String {
    let rules: Vec<String> = components
        .iter()
        .enumerate()
        .filter_map(|(index, component)| component_rule(component, index))
        .collect();

    let mut css = AssetPipeline::baseline_css().to_string();
    css.push('\n');
    css.push_str(&rules.join("\n\n"));
    if !rules.is_empty() {
        css.push('\n');
    }
    css
}

/// The `.<type>-<index>` rule for one component.
///
/// The kind's default declarations come first, then the component's own style. A default
/// is left out when the component sets the same property, so each property appears once
/// and the custom value is the one that applies.
pub fn component_rule(component: &Component, index: usize) -> Option<String> {
    match component.kind() {
        ComponentKind::Heading
        | ComponentKind::Paragraph
        | ComponentKind::Button
        | ComponentKind::Image => {}
        ComponentKind::Unknown => return None,
    }

    let custom = component.style();
    let defaults = component.kind().default_style();

    let mut lines: Vec<String> = defaults
        .declarations()
        .filter(|(property, _)| !custom.sets_css_property(property))
        .map(|(property, value)| format!("    {}: {};", property, value))
        .collect();
    lines.extend(
        custom
            .declarations()
            .map(|(property, value)| format!("    {}: {};", property, value)),
    );

    let selector = component.instance_class(index);
    if lines.is_empty() {
        Some(format!(".{} {{\n}}", selector))
    } else {
        Some(format!(".{} {{\n{}\n}}", selector, lines.join("\n")))
    }
}
