//! Plain-text rendering of view events as an indented list.

use outline::{ViewEvent, domain::Entry};

use super::terminal::Colorize;

/// Render events as one line per page, indented by depth.
///
/// The current page is marked, pages that should not be linked are dimmed,
/// and pages with hidden children get a trailing ellipsis.
pub fn render(events: &[ViewEvent]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;

    for event in events {
        match event {
            ViewEvent::Open { entry } => {
                lines.push(line(depth, entry));
                depth += 1;
            }
            ViewEvent::Leaf { entry } => lines.push(line(depth, entry)),
            ViewEvent::Close => depth = depth.saturating_sub(1),
            ViewEvent::Elided => {
                if let Some(last) = lines.last_mut() {
                    last.push_str(&" …".dim());
                }
            }
        }
    }

    lines
}

fn line(depth: usize, entry: &Entry) -> String {
    let indent = "  ".repeat(depth);
    let name = entry.page.as_str();
    let label = match (entry.current, entry.linked) {
        (true, _) => format!("{} {}", name.bold(), "◀".success()),
        (false, false) => name.dim(),
        (false, true) => name.to_owned(),
    };
    format!("{indent}- {label}")
}

#[cfg(test)]
mod tests {
    use outline::{PageName, domain::Entry};

    use super::*;

    fn entry(name: &str) -> Entry {
        Entry {
            page: PageName::new(name).unwrap(),
            current: false,
            linked: true,
        }
    }

    #[test]
    fn indents_by_depth() {
        let events = [
            ViewEvent::Open {
                entry: entry("Home"),
            },
            ViewEvent::Open {
                entry: entry("Projects"),
            },
            ViewEvent::Leaf {
                entry: entry("Alpha"),
            },
            ViewEvent::Close,
            ViewEvent::Leaf {
                entry: entry("About"),
            },
            ViewEvent::Close,
            ViewEvent::Leaf {
                entry: entry("Orphan"),
            },
        ];

        assert_eq!(
            render(&events),
            ["- Home", "  - Projects", "    - Alpha", "  - About", "- Orphan"]
        );
    }

    #[test]
    fn elided_marker_extends_previous_line() {
        let events = [
            ViewEvent::Leaf {
                entry: entry("Home"),
            },
            ViewEvent::Elided,
        ];

        let lines = render(&events);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("- Home"));
        assert!(lines[0].contains('…'));
    }

    #[test]
    fn unbalanced_close_does_not_underflow() {
        assert!(render(&[ViewEvent::Close]).is_empty());
    }
}
