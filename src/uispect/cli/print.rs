use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use uispect::api::{CmdMessage, MessageLevel};
use uispect::model::{Element, Entry};
use uispect::session::Row;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const TYPE_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 13;
const EXPANDED_MARKER: &str = "▾";
const COLLAPSED_MARKER: &str = "▸";
const EMPTY: &str = "—";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Header line: element count, package and the copy indicator.
pub(crate) fn print_header(total: usize, shown: usize, package: Option<&str>, copied: bool) {
    let mut header = if shown == total {
        format!("{} element(s)", total)
    } else {
        format!("{} of {} element(s)", shown, total)
    };
    if let Some(package) = package {
        header.push_str(&format!("  ·  {}", package));
    }
    if copied {
        println!("{}  {}", header.dimmed(), "✓ copied".green());
    } else {
        println!("{}", header.dimmed());
    }
}

pub(crate) fn print_rows(rows: &[Row<'_>]) {
    if rows.is_empty() {
        println!("No elements found.");
        return;
    }

    let line_width = terminal_width();
    for row in rows {
        print_row(row, line_width);
        if row.expanded {
            print_details(&row.entry.element);
        }
    }
}

fn print_row(row: &Row<'_>, line_width: usize) {
    let element = &row.entry.element;
    let marker = if row.expanded {
        EXPANDED_MARKER
    } else {
        COLLAPSED_MARKER
    };
    let idx_str = format!("{}. ", row.position);
    let left_prefix = format!("  {} ", marker);

    let widget_type = truncate_to_width(element.widget_type(), TYPE_WIDTH);
    let type_col = format!("{:<width$}", widget_type, width = TYPE_WIDTH);

    let fixed_width = left_prefix.width() + idx_str.width() + TYPE_WIDTH + 2 + TIME_WIDTH;
    let available = line_width.saturating_sub(fixed_width);

    let (title, is_placeholder) = if element.text.is_empty() {
        ("(no text)".to_string(), true)
    } else {
        (element.text.replace('\n', " "), false)
    };
    let title_display = truncate_to_width(&title, available);
    let padding = available.saturating_sub(title_display.width());

    let title_colored = if is_placeholder {
        title_display.italic().dimmed()
    } else {
        title_display.bold()
    };

    println!(
        "{}{}{}{}  {}{}",
        left_prefix,
        idx_str.yellow(),
        title_colored,
        " ".repeat(padding),
        type_col.cyan(),
        format_time_ago(row.entry.added_at).dimmed()
    );
}

fn print_details(element: &Element) {
    let flags: Vec<&str> = [
        (element.clickable, "clickable"),
        (element.editable, "editable"),
        (element.checkable, "checkable"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect();
    let flags = flags.join(", ");

    let details = [
        ("Class", element.class.as_str()),
        ("ID", element.id.as_str()),
        ("Text", element.text.as_str()),
        ("Description", element.description.as_str()),
        (element.locator.kind().label(), element.locator.as_str()),
        ("Flags", flags.as_str()),
    ];

    for (label, value) in details {
        let value = if value.is_empty() { EMPTY } else { value };
        println!(
            "        {}{}",
            format!("{:<width$}", label, width = LABEL_WIDTH).dimmed(),
            value
        );
    }
}

/// Rows for the one-shot `list` command, expanding the given positions.
pub(crate) fn rows_for<'a>(entries: &[&'a Entry], expand: &[usize]) -> Vec<Row<'a>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, &entry)| Row {
            position: i + 1,
            entry,
            expanded: expand.contains(&(i + 1)),
        })
        .collect()
}

pub(crate) fn print_session_help() {
    println!("{}", "Commands:".bold());
    println!("  search <text>     filter by text, id, description or type (empty clears)");
    println!("  toggle <n>        expand or collapse row n");
    println!("  copy <n> [field]  copy all|class|id|text|description|locator of row n");
    println!("  list              show the list again");
    println!("  quit");
    println!("{}", "External commands (one JSON object per line):".bold());
    println!(r#"  {{"type":"addElements","data":[{{"class":"...","bounds":"[0,0][1,1]"}}]}}"#);
    println!(r#"  {{"type":"clearElements"}}"#);
    println!(r#"  {{"type":"setPackage","name":"com.app"}}"#);
}

fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| (cols as usize).min(LINE_WIDTH))
        .unwrap_or(LINE_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_wide_text_with_ellipsis() {
        assert_eq!(truncate_to_width("Brasil é nosso", 8), "Brasil …");
        assert_eq!(truncate_to_width("OK", 8), "OK");
    }

    #[test]
    fn rows_for_marks_expanded_positions() {
        use uispect::model::Locator;

        let a = Entry::new(Element::new("a.B", Locator::Bounds("x".into())));
        let b = Entry::new(Element::new("a.C", Locator::Bounds("y".into())));
        let rows = rows_for(&[&a, &b], &[2]);
        assert!(!rows[0].expanded);
        assert!(rows[1].expanded);
        assert_eq!(rows[1].position, 2);
    }
}
