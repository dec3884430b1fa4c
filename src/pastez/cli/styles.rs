use console::Style;
use once_cell::sync::Lazy;

pub static GUTTER: Lazy<Style> = Lazy::new(|| Style::new().color256(244));
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static URL: Lazy<Style> = Lazy::new(|| Style::new().cyan().underlined());
