//! Instruction text sent to the model, one builder per panel.

use crate::models::CUSTOM_STYLE;

pub const DEFAULT_ENHANCE: &str = include_str!("../data/prompts/enhance_default.txt");
pub const BLUEPRINT: &str = include_str!("../data/prompts/blueprint.txt");
pub const TEXTURE: &str = include_str!("../data/prompts/texture.txt");
pub const NORMAL_MAP: &str = include_str!("../data/prompts/normal_map.txt");
pub const OPTIMIZATION: &str = include_str!("../data/prompts/optimization.txt");
pub const ASSET_SEARCH: &str = include_str!("../data/prompts/asset_search.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// The enhancer sends the user's style instruction as-is; a blank one
/// falls back to the default enhancement pass.
pub fn enhance(style_instruction: &str) -> String {
    let trimmed = style_instruction.trim();
    if trimmed.is_empty() {
        DEFAULT_ENHANCE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `theme_style` is a catalog entry; when it is [`CUSTOM_STYLE`] the
/// caller's free text is embedded instead.
pub fn blueprint(level_type: &str, theme_style: &str, custom_style: Option<&str>) -> String {
    let theme = resolve_theme(theme_style, custom_style);
    render(BLUEPRINT, &[("level_type", level_type), ("theme", theme)])
}

pub(crate) fn resolve_theme<'a>(theme_style: &'a str, custom_style: Option<&'a str>) -> &'a str {
    if theme_style == CUSTOM_STYLE {
        custom_style.map(str::trim).unwrap_or_default()
    } else {
        theme_style
    }
}

pub fn texture(material_type: &str) -> String {
    render(TEXTURE, &[("material", material_type)])
}

pub fn normal_map() -> String {
    NORMAL_MAP.to_string()
}

pub fn optimization(target_context: &str) -> String {
    render(OPTIMIZATION, &[("context", target_context)])
}

pub fn asset_search(query: &str) -> String {
    render(ASSET_SEARCH, &[("query", query)])
}
