use super::styles::{GUTTER, TITLE, URL};
use colored::Colorize;
use pastez::view::{MessageLevel, Notice, ViewState};

/// Renders the viewer surface: a right-aligned line gutter beside the
/// highlighted text.
pub fn render_document(view: &ViewState, markup: &str) -> String {
    let width = view.gutter().last().map_or(1, |n| n.len());
    let mut output = String::new();
    output.push_str(&format!("{}\n", TITLE.apply_to(view.title())));

    for (number, line) in view.gutter().iter().zip(markup.split('\n')) {
        output.push_str(&format!(
            "{} {}\n",
            GUTTER.apply_to(format!("{:>width$}", number, width = width)),
            line
        ));
    }
    output
}

pub fn render_url(url: &str) -> String {
    format!("{}", URL.apply_to(url))
}

pub fn print_message(level: MessageLevel, content: &str) {
    match level {
        MessageLevel::Info => println!("{}", content.dimmed()),
        MessageLevel::Success => println!("{}", content.green()),
        MessageLevel::Warning => println!("{}", content.yellow()),
        MessageLevel::Error => println!("{}", content.red()),
    }
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        print_message(notice.level, &notice.content);
    }
}

pub fn print_config(entries: &[(String, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key.bold(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastez::session::Session;
    use pastez::sync::SyncedDocument;
    use pastez::view::Transition;

    #[test]
    fn gutter_is_right_aligned() {
        console::set_colors_enabled(false);
        let text = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj";
        let session = Session::locked(SyncedDocument {
            key: "k".into(),
            text: text.into(),
            markup: text.into(),
            language: None,
            line_count: 10,
        });
        let mut view = ViewState::new("pastez");
        view.sync(&session, Transition::Loaded);

        let out = render_document(&view, text);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "pastez");
        assert_eq!(lines[1], " 1 a");
        assert_eq!(lines[10], "10 j");
    }
}
