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

/// Turn a bare file stem into a human readable phrase.
///
/// Word boundaries are placed on lower to upper case transitions and on
/// `-`, `_` and whitespace. Each word gets its first letter upper cased and
/// keeps the rest untouched so acronyms survive: `API_client` becomes
/// `API Client`.
pub fn tokenize(stem: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in stem.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            flush(&mut current, &mut words);
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            if p.is_lowercase() && ch.is_uppercase() {
                flush(&mut current, &mut words);
            }
        }

        current.push(ch);
        prev = Some(ch);
    }

    flush(&mut current, &mut words);
    words.join(" ")
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }

    words.push(capitalize(current));
    current.clear();
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
