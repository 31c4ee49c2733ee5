//! `netvcr show` command.

use std::fmt::Write as _;
use std::path::Path;

use crate::cassette::format::RecordedInteraction;
use crate::cassette::storage;

/// Execute the `show` command.
///
/// # Errors
///
/// Returns an error string if the cassette cannot be read or parsed.
pub fn run(file: &Path, json: bool) -> Result<(), String> {
    let interactions = storage::load(file).map_err(|e| e.to_string())?;
    if json {
        let out = serde_json::to_string_pretty(&interactions)
            .map_err(|e| format!("Failed to render cassette as JSON: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render_table(&interactions));
    }
    Ok(())
}

/// One line per interaction: index, method, status, URI.
fn render_table(interactions: &[RecordedInteraction]) -> String {
    if interactions.is_empty() {
        return "No interactions recorded.\n".to_string();
    }
    let mut out = String::new();
    for (i, interaction) in interactions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<7} {}  {}",
            i + 1,
            interaction.method().as_str().to_ascii_uppercase(),
            interaction.response().status,
            interaction.uri()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::http::{HttpResponse, Method};

    fn interaction(method: &str, uri: &str, status: u16) -> RecordedInteraction {
        RecordedInteraction::new(Method::new(method), uri, HttpResponse::new(status, ""))
    }

    #[test]
    fn table_lists_interactions_in_order() {
        let table = render_table(&[
            interaction("get", "http://h:80/a", 200),
            interaction("post", "http://h:80/b", 201),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines, ["  1  GET     200  http://h:80/a", "  2  POST    201  http://h:80/b"]);
    }

    #[test]
    fn empty_cassette_says_so() {
        assert_eq!(render_table(&[]), "No interactions recorded.\n");
    }
}
