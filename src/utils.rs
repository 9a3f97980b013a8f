// Copyright (C) 2024 Mathew Robinson <chasinglogic@gmail.com>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::sync::OnceLock;

use chrono::prelude::*;
use regex::Regex;

const COMMENT_CHARS: &[char] = &['/', '*', '#', '!', '<', '>', '-', ';'];

/// Matches a single `{{NAME}}` placeholder.
pub fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{[A-Z_]+\}\}").expect("placeholder pattern is valid"))
}

pub fn current_year() -> String {
    format!("{}", Local::now().year())
}

/// Strip leading whitespace and comment characters from a header line.
pub fn strip_comment_leader(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || COMMENT_CHARS.contains(&c))
}

/// The indentation continuation lines need to line up under the text that
/// follows `prefix`, keeping its comment characters.
pub fn hanging_indent(prefix: &str) -> String {
    let leader_len = prefix.len() - strip_comment_leader(prefix).len();
    let leader = &prefix[..leader_len];
    let rest = prefix[leader_len..].chars().count();
    format!("{}{}", leader, " ".repeat(rest))
}

/// Re-flow a rendered header line that grew past `columns` because of a
/// substituted value. `template_line` is the line before substitution and
/// decides where the hanging indent starts.
pub fn wrap_rendered_line(template_line: &str, rendered: &str, columns: usize) -> String {
    if rendered.chars().count() <= columns {
        return rendered.to_string();
    }

    let at = match placeholder_re().find(template_line) {
        Some(m) => m.start(),
        None => return rendered.to_string(),
    };

    let prefix = &template_line[..at];
    let indent = hanging_indent(prefix);
    if indent.chars().count() >= columns || !rendered.starts_with(prefix) {
        return rendered.to_string();
    }

    let options = textwrap::Options::new(columns)
        .initial_indent(prefix)
        .subsequent_indent(&indent);
    textwrap::fill(&rendered[at..], options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_leader() {
        assert_eq!("File Name: x", strip_comment_leader(" * File Name: x"));
        assert_eq!("File Name:", strip_comment_leader("# File Name:"));
        assert_eq!("", strip_comment_leader("<!--"));
    }

    #[test]
    fn test_hanging_indent() {
        assert_eq!(format!("# {}", " ".repeat(13)), hanging_indent("# Description: "));
        assert_eq!(format!(" * {}", " ".repeat(4)), hanging_indent(" * By: "));
        assert_eq!("    ", hanging_indent("Foo "));
    }

    #[test]
    fn test_wrap_rendered_line() {
        let template = "# Description: {{DESCRIPTION}}";
        let rendered = "# Description: Header generator that reads configuration and writes headers.";
        let wrapped = wrap_rendered_line(template, rendered, 42);
        let lines: Vec<&str> = wrapped.lines().collect();

        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("# Description: Header"));
        for line in &lines {
            assert!(line.chars().count() <= 42, "{:?} is too long", line);
        }
        for line in &lines[1..] {
            assert!(line.starts_with(&format!("#{}", " ".repeat(14))));
        }

        let words: Vec<&str> = wrapped
            .lines()
            .flat_map(|l| strip_comment_leader(l).split_whitespace())
            .collect();
        assert_eq!(
            "Description: Header generator that reads configuration and writes headers.",
            words.join(" ")
        );
    }

    #[test]
    fn test_short_lines_are_untouched() {
        let rendered = "Description: Short.";
        assert_eq!(rendered, wrap_rendered_line("Description: {{DESCRIPTION}}", rendered, 80));
        assert_eq!("no placeholder at all", wrap_rendered_line("no placeholder at all", "no placeholder at all", 5));
    }

    #[test]
    fn test_current_year_is_four_digits() {
        let year = current_year();
        assert_eq!(4, year.len());
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }
}
