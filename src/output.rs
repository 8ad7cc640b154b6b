// Output sink handed to every command. `Console` is the real terminal;
// `Buffer` records lines so command behaviour can be checked in tests.

use crossterm::style::Stylize;

/// How a line should stand out on a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Bold,
    Dim,
    Success,
    Warning,
    Error,
    Info,
}

pub trait Output {
    fn styled(&mut self, text: &str, tone: Tone);

    fn line(&mut self, text: &str) {
        self.styled(text, Tone::Plain);
    }

    fn success(&mut self, text: &str) {
        self.styled(text, Tone::Success);
    }

    fn warn(&mut self, text: &str) {
        self.styled(text, Tone::Warning);
    }

    fn error(&mut self, text: &str) {
        self.styled(text, Tone::Error);
    }

    /// One line assembled from pieces that each carry their own tone.
    fn spans(&mut self, parts: &[(String, Tone)]) {
        let text: String = parts.iter().map(|(piece, _)| piece.as_str()).collect();
        self.line(&text);
    }
}

fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Bold => text.bold().to_string(),
        Tone::Dim => text.dim().to_string(),
        Tone::Success => text.green().to_string(),
        Tone::Warning => text.yellow().to_string(),
        Tone::Error => text.red().to_string(),
        Tone::Info => text.blue().to_string(),
    }
}

/// Writes to stdout, errors to stderr, colored with crossterm.
#[derive(Debug, Default)]
pub struct Console;

impl Output for Console {
    fn styled(&mut self, text: &str, tone: Tone) {
        match tone {
            Tone::Error => eprintln!("{}", paint(text, tone)),
            _ => println!("{}", paint(text, tone)),
        }
    }

    fn spans(&mut self, parts: &[(String, Tone)]) {
        let line: String = parts.iter().map(|(piece, tone)| paint(piece, *tone)).collect();
        println!("{line}");
    }
}

/// Collects every line with its tone, without any escape codes. Toned
/// pieces of mixed lines land in `highlights`.
#[derive(Debug, Default)]
pub struct Buffer {
    pub lines: Vec<(Tone, String)>,
    pub highlights: Vec<(Tone, String)>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|(_, l)| l.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Output for Buffer {
    fn styled(&mut self, text: &str, tone: Tone) {
        for line in text.split('\n') {
            self.lines.push((tone, line.to_string()));
        }
    }

    fn spans(&mut self, parts: &[(String, Tone)]) {
        let text: String = parts.iter().map(|(piece, _)| piece.as_str()).collect();
        self.lines.push((Tone::Plain, text));
        self.highlights.extend(
            parts
                .iter()
                .filter(|(_, tone)| *tone != Tone::Plain)
                .map(|(piece, tone)| (*tone, piece.clone())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_tone_per_line() {
        let mut out = Buffer::new();
        out.success("done");
        out.line("a\nb");
        assert_eq!(out.lines.len(), 3);
        assert_eq!(out.lines[0], (Tone::Success, "done".to_string()));
        assert_eq!(out.text(), "done\na\nb");
    }

    #[test]
    fn buffer_spans_join_into_one_line() {
        let mut out = Buffer::new();
        out.spans(&[
            ("86a  ".to_string(), Tone::Plain),
            ("urgent".to_string(), Tone::Error),
        ]);
        assert_eq!(out.lines, vec![(Tone::Plain, "86a  urgent".to_string())]);
        assert_eq!(out.highlights, vec![(Tone::Error, "urgent".to_string())]);
    }
}
