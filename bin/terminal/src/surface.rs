//! Line-oriented rendering of widget views.
//!
//! A terminal cannot redraw bubbles in place, so the surface prints each
//! bubble once, the first time it appears in a view. Bubbles that leave the
//! view (a waiting notice replaced by a re-check) are simply not printed
//! again.

use deskchat_core::EntryId;
use deskchat_widget::{Author, Bubble, Tone, View};
use std::collections::HashSet;
use std::io::{self, Write};

/// Prints views as an append-only log.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    printed: HashSet<EntryId>,
    typing: bool,
}

impl TerminalSurface {
    /// Creates a surface that has printed nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints what changed since the previous view.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn draw(&mut self, view: &View, out: &mut impl Write) -> io::Result<()> {
        let replaced = !self.printed.is_empty()
            && !view.bubbles.iter().any(|b| self.printed.contains(&b.id));
        if replaced {
            writeln!(out, "\n──── nouvelle conversation ────\n")?;
            self.printed.clear();
        }

        for bubble in &view.bubbles {
            if self.printed.insert(bubble.id) {
                write_bubble(bubble, out)?;
            }
        }

        if view.typing && !self.typing {
            writeln!(out, "  … l'assistant écrit")?;
        }
        self.typing = view.typing;

        out.flush()
    }
}

fn write_bubble(bubble: &Bubble, out: &mut impl Write) -> io::Result<()> {
    let author = match bubble.author {
        Author::User => "Vous",
        Author::Assistant => "Assistant",
    };
    let marker = if bubble.tone == Tone::Error { "(!) " } else { "" };

    let mut lines = bubble.text.lines();
    let first = lines.next().unwrap_or_default();
    writeln!(out, "[{}] {}: {}{}", bubble.time, author, marker, first)?;
    for line in lines {
        writeln!(out, "        {}", line)?;
    }
    if let Some(action) = &bubble.action {
        writeln!(out, "        ↳ /retry pour « {} »", action.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskchat_core::PollId;
    use deskchat_widget::Action;

    fn bubble(author: Author, tone: Tone, text: &str) -> Bubble {
        Bubble {
            id: EntryId::new(),
            author,
            tone,
            text: text.to_string(),
            time: "10:42".to_string(),
            action: None,
        }
    }

    fn draw(surface: &mut TerminalSurface, view: &View) -> String {
        let mut out = Vec::new();
        surface.draw(view, &mut out).expect("write");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn bubbles_print_once() {
        let mut surface = TerminalSurface::new();
        let mut view = View {
            bubbles: vec![bubble(Author::Assistant, Tone::Message, "Bonjour")],
            typing: false,
            input_enabled: true,
        };

        assert_eq!(draw(&mut surface, &view), "[10:42] Assistant: Bonjour\n");

        view.bubbles.push(bubble(Author::User, Tone::Message, "hello"));
        assert_eq!(draw(&mut surface, &view), "[10:42] Vous: hello\n");
        assert_eq!(draw(&mut surface, &view), "");
    }

    #[test]
    fn typing_notice_prints_on_transition() {
        let mut surface = TerminalSurface::new();
        let view = View {
            bubbles: Vec::new(),
            typing: true,
            input_enabled: false,
        };
        assert!(draw(&mut surface, &view).contains("l'assistant écrit"));
        assert_eq!(draw(&mut surface, &view), "");
    }

    #[test]
    fn multiline_text_and_action_are_indented() {
        let mut surface = TerminalSurface::new();
        let mut waiting = bubble(
            Author::Assistant,
            Tone::Waiting,
            "⏳ Ticket encore en cours...\nRéessayez dans quelques secondes.",
        );
        waiting.action = Some(Action::RetryTicket {
            poll_id: PollId::new(),
            label: "Re-vérifier".to_string(),
        });
        let view = View {
            bubbles: vec![waiting],
            typing: false,
            input_enabled: true,
        };

        assert_eq!(
            draw(&mut surface, &view),
            "[10:42] Assistant: ⏳ Ticket encore en cours...\n        Réessayez dans quelques secondes.\n        ↳ /retry pour « Re-vérifier »\n"
        );
    }

    #[test]
    fn replaced_conversation_prints_separator() {
        let mut surface = TerminalSurface::new();
        let first = View {
            bubbles: vec![bubble(Author::Assistant, Tone::Message, "Bonjour")],
            typing: false,
            input_enabled: true,
        };
        draw(&mut surface, &first);

        let second = View {
            bubbles: vec![bubble(Author::Assistant, Tone::Message, "Bonjour")],
            typing: false,
            input_enabled: true,
        };
        let printed = draw(&mut surface, &second);
        assert!(printed.contains("nouvelle conversation"));
        assert!(printed.ends_with("[10:42] Assistant: Bonjour\n"));
    }

    #[test]
    fn errors_are_flagged() {
        let mut surface = TerminalSurface::new();
        let view = View {
            bubbles: vec![bubble(
                Author::Assistant,
                Tone::Error,
                "Désolé, une erreur est survenue : Erreur réseau",
            )],
            typing: false,
            input_enabled: true,
        };
        assert!(draw(&mut surface, &view).contains("(!) Désolé"));
    }
}
