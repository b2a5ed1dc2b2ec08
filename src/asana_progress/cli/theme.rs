//! Styled template rendering.
//!
//! Templates are minijinja sources that apply named styles through a `style` filter:
//!
//! ```jinja
//! {{ project.name | style("project-name") }} {{ status | style(status_style) }}
//! ```
//!
//! The filter looks the name up in a [`Theme`] of `console::Style`s. With colors off
//! it passes the text through unchanged. An unknown style name prefixes the text with
//! [`MISSING_STYLE_INDICATOR`] either way, so typos in templates show up in tests.

use console::Style;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named collection of styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    #[cfg(test)]
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Renders `template` against `data`, styling through `theme`.
pub fn render_with_color<T: Serialize>(
    template: &str,
    data: &T,
    theme: &Theme,
    use_color: bool,
) -> Result<String, Error> {
    let mut env = Environment::new();
    let theme = theme.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });

    env.add_template_owned("_inline".to_string(), template.to_string())?;
    env.get_template("_inline")?.render(data)
}

/// Whether stdout should carry ANSI styling.
pub fn colors_enabled() -> bool {
    console::colors_enabled()
}
