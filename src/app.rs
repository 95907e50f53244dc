//! Application setup and the line-oriented front end.

use std::fs;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use shakmaty::Square;
use tracing::info;

use crate::config::Config;
use crate::domain::perspective::to_physical;
use crate::domain::protocol::response_schemas;
use crate::domain::session::GameSession;
use crate::models::{AuthorityLink, GameModel, HttpAuthority, ModelUpdate};
use crate::ui::display::{board_text, format_move_list, move_list, status_line};
use crate::ui::{BoardRenderer, PieceAssets, SvgRenderer};

const HELP: &str = "commands: <from> <to> | board | history | caption | payload | svg <path> | schema | quit";

/// Initialize and run the chess client on stdin/stdout
pub fn run(config: Config) -> Result<()> {
    let authority = HttpAuthority::new(config.authority.clone(), config.timeout())
        .context("failed to build HTTP client")?;
    info!("authority at {}", authority.base());

    let session = GameSession::resume_or_new(config.resume.as_deref());
    let model = GameModel::new(
        session,
        AuthorityLink::spawn(Box::new(authority)),
        config.gesture_policy(),
    );
    let renderer = SvgRenderer::new(PieceAssets::new(config.assets.clone()));

    // a move costs two round trips: the move itself and the status query
    let mut shell = Shell::new(model, renderer, config.timeout() * 2);
    shell.run(io::stdin().lock(), io::stdout().lock())
}

/// Reads commands and drives a [`GameModel`]
pub struct Shell<R> {
    model: GameModel,
    renderer: R,
    wait: Duration,
}

impl<R: BoardRenderer> Shell<R> {
    pub fn new(model: GameModel, renderer: R, wait: Duration) -> Self {
        Self {
            model,
            renderer,
            wait,
        }
    }

    pub fn model(&self) -> &GameModel {
        &self.model
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        writeln!(out, "{}", board_text(self.model.session()))?;
        writeln!(out, "{}", status_line(self.model.session()))?;
        writeln!(out, "{}", HELP)?;

        for line in input.lines() {
            if !self.execute(&line?, &mut out)? {
                break;
            }
        }
        Ok(())
    }

    /// Run one command. Returns false when the user asked to quit.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let session = self.model.session();

        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => return Ok(false),
            ["board"] => writeln!(out, "{}", board_text(session))?,
            ["history"] => writeln!(out, "{}", format_move_list(&move_list(&session.history)))?,
            ["caption"] => writeln!(out, "{}", status_line(session))?,
            ["payload"] => writeln!(out, "{}", session.handoff_query())?,
            ["schema"] => writeln!(out, "{}", serde_json::to_string_pretty(&response_schemas())?)?,
            ["svg", path] => match fs::write(path, self.renderer.render(session)) {
                Ok(()) => writeln!(out, "wrote {}", path)?,
                Err(e) => writeln!(out, "could not write {}: {}", path, e)?,
            },
            [from, to] => match (parse_square(from), parse_square(to)) {
                (Ok(from), Ok(to)) => self.play(from, to, out)?,
                (Err(e), _) | (_, Err(e)) => writeln!(out, "{}", e)?,
            },
            _ => writeln!(out, "{}", HELP)?,
        }
        Ok(true)
    }

    /// Submit a move named in board coordinates and wait for the outcome
    fn play(&mut self, from: Square, to: Square, out: &mut impl Write) -> Result<()> {
        let color = self.model.session().color;
        let gesture = (to_physical(from, color), to_physical(to, color));

        match self.model.submit_gesture(gesture.0, gesture.1) {
            Ok(notation) => writeln!(out, "sent {}", notation)?,
            Err(e) => {
                writeln!(out, "refused: {}", e)?;
                return Ok(());
            }
        }

        for update in self.model.wait(self.wait) {
            match update {
                ModelUpdate::Applied { notation } => writeln!(out, "applied {}", notation)?,
                ModelUpdate::Reverted { pending, reason } => {
                    writeln!(out, "reverted {}: {}", pending.notation, reason)?
                }
                ModelUpdate::StatusResolved(_) => {
                    writeln!(out, "{}", status_line(self.model.session()))?
                }
                ModelUpdate::StatusUnavailable => writeln!(out, "status unavailable")?,
            }
        }
        writeln!(out, "{}", board_text(self.model.session()))?;
        Ok(())
    }
}

fn parse_square(name: &str) -> Result<Square> {
    name.parse::<Square>()
        .map_err(|_| anyhow!("not a square: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::PieceColor;
    use crate::domain::notation::GesturePolicy;
    use crate::domain::protocol::{GameStatus, MoveConfirmation};
    use crate::error::TransportError;
    use crate::models::Authority;

    /// Accepts every move and reports a normal position
    struct AcceptAll;

    impl Authority for AcceptAll {
        fn start_new_game(&self) -> Result<(), TransportError> {
            Ok(())
        }

        fn submit_move(&self, _: &str) -> Result<Option<MoveConfirmation>, TransportError> {
            Ok(Some(MoveConfirmation {
                is_castle: false,
                is_en_passant: false,
                previous_square: String::new(),
            }))
        }

        fn query_status(&self) -> Result<GameStatus, TransportError> {
            Ok(GameStatus::Normal)
        }
    }

    fn shell(session: GameSession) -> Shell<SvgRenderer> {
        let link = AuthorityLink::spawn(Box::new(AcceptAll));
        let model = GameModel::new(session, link, GesturePolicy::default());
        Shell::new(model, SvgRenderer::default(), Duration::from_secs(5))
    }

    fn run_script(shell: &mut Shell<SvgRenderer>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_move_and_history() {
        let mut shell = shell(GameSession::new());
        let out = run_script(&mut shell, "e2 e4\nhistory\nquit\nboard\n");
        assert!(out.contains("sent e4"));
        assert!(out.contains("applied e4"));
        assert!(out.contains("New Game Started! Move: e4"));
        assert!(out.contains("1. e4"));
        assert_eq!(shell.model().session().history, vec!["e4"]);
    }

    #[test]
    fn test_black_names_squares_by_label() {
        let session = GameSession::resumed(
            crate::domain::board::Board::standard(),
            PieceColor::Black,
            false,
            vec!["e4".to_string()],
        );
        let mut shell = shell(session);
        let out = run_script(&mut shell, "e7 e5\n");
        assert!(out.contains("sent e5"));
        assert_eq!(shell.model().session().history, vec!["e4", "e5"]);
    }

    #[test]
    fn test_refusals_and_bad_input() {
        let mut shell = shell(GameSession::new());
        let out = run_script(&mut shell, "e3 e4\nz9 e4\nfoo bar baz\n");
        assert!(out.contains("refused: no piece on e3"));
        assert!(out.contains("not a square: z9"));
        assert!(out.contains(HELP));
        assert!(shell.model().session().history.is_empty());
    }

    #[test]
    fn test_payload_and_schema() {
        let mut shell = shell(GameSession::new());
        let out = run_script(&mut shell, "payload\nschema\n");
        assert!(out.contains("color=0"));
        assert!(out.contains("prevSquare"));
    }
}
