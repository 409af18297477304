//! Line-oriented terminal front end for a drill session.

use std::io::Write;

use services::{ARTICLE_RULES, DrillService, DrillView, RULES_CAVEAT, SessionError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::input::{Command, is_yes, parse_command};

const HELP: &str = "\
Toetsen: 1, d, de of pijl-links = de; 2, h, het of pijl-rechts = het
         r = opnieuw beginnen (alles), w = alleen de fouten oefenen (na afloop)
         g = regels tonen, ? = hulp, q = stoppen";

/// Run the drill until the user quits or input ends.
///
/// Every state change is saved by the service before the next prompt, so
/// quitting at any point resumes at the same word next time.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// saved session points at a word the dataset does not have.
pub async fn run_drill<R, W>(
    service: &DrillService,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut state = service.resume_or_start().await;

    loop {
        render(&service.view(&state), out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            return Ok(());
        };
        let Some(command) = parse_command(&line) else {
            writeln!(out, "Onbekende invoer. Typ ? voor hulp.")?;
            continue;
        };

        match command {
            Command::Answer(chosen) => match service.answer(&state, chosen).await {
                Ok(outcome) => {
                    let word = service
                        .dataset()
                        .get(outcome.answer.index())
                        .map_or("?", |e| e.word.as_str());
                    if outcome.answer.is_correct() {
                        writeln!(out, "Goed: {} {word}", outcome.answer.expected())?;
                    } else {
                        writeln!(
                            out,
                            "Fout: {} {word} (juist: {} {word})",
                            outcome.answer.chosen(),
                            outcome.answer.expected()
                        )?;
                    }
                    state = outcome.state;
                }
                Err(SessionError::Completed) => {
                    writeln!(out, "Deze ronde is klaar. Kies w of r.")?;
                }
                Err(err) => return Err(err.into()),
            },
            Command::RestartAll => {
                if !state.is_done() {
                    write!(out, "Alles resetten en opnieuw beginnen? [j/N] ")?;
                    out.flush()?;
                    let confirmed = lines.next_line().await?.is_some_and(|l| is_yes(&l));
                    if !confirmed {
                        continue;
                    }
                }
                state = service.restart_all().await;
            }
            Command::RetryWrong => match service.retry_wrong(&state).await {
                Ok(next) => state = next,
                Err(SessionError::NotCompleted) => {
                    writeln!(out, "Maak eerst deze ronde af.")?;
                }
                Err(SessionError::NothingToRetry) => {
                    writeln!(out, "Geen fouten om te herhalen.")?;
                }
                Err(err) => return Err(err.into()),
            },
            Command::Rules => render_rules(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(()),
        }
    }
}

/// Print the current question, or the end-of-session summary.
pub fn render<W: Write>(view: &DrillView, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    if let Some(summary) = &view.summary {
        writeln!(out, "Klaar! Je had {} van de {} goed.", summary.correct, summary.total)?;
        if summary.is_perfect() {
            writeln!(out, "Top! Alles goed.")?;
            writeln!(out, "[r] oefen opnieuw (alles)  [q] stoppen")?;
        } else {
            writeln!(out, "Herhalen, fout gemaakte woorden:")?;
            for wrong in &summary.wrong {
                writeln!(
                    out,
                    "  {} {}  (juist: {})",
                    wrong.chosen, wrong.word, wrong.expected
                )?;
            }
            writeln!(
                out,
                "[w] oefen opnieuw (alleen fouten)  [r] oefen opnieuw (alles)  [q] stoppen"
            )?;
        }
        return Ok(());
    }

    if let (Some(word), Some(number)) = (&view.current, view.question_number) {
        writeln!(
            out,
            "Vraag {number} van {}  ({}%)",
            view.progress.total,
            view.percent()
        )?;
        writeln!(out, "    {}", word.word)?;
        writeln!(out, "[1] de   [2] het")?;
    }

    if !view.recent.is_empty() {
        let recent: Vec<String> = view
            .recent
            .iter()
            .map(|r| {
                if r.correct {
                    format!("✓ {} {}", r.chosen, r.word)
                } else {
                    format!("✗ {} {} → {} {}", r.chosen, r.word, r.expected, r.word)
                }
            })
            .collect();
        writeln!(out, "Recent: {}", recent.join(" | "))?;
    }
    Ok(())
}

/// Print the de/het rules of thumb, one list per article.
pub fn render_rules<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Regels ({RULES_CAVEAT})")?;
    for list in &ARTICLE_RULES {
        writeln!(out, "{}-woorden:", list.article.as_str().to_uppercase())?;
        for rule in list.rules {
            writeln!(out, "  - {rule}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidwoord_core::model::{Article, Dataset, SessionState, WordEntry};
    use std::sync::Arc;
    use storage::Storage;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            WordEntry::new("huis", Article::Het),
            WordEntry::new("tafel", Article::De),
            WordEntry::new("kind", Article::Het),
        ])
        .unwrap()
    }

    async fn pinned_service(storage: &Storage) -> DrillService {
        let pinned = SessionState::from_persisted(vec![1, 0, 2], 0, Vec::new(), false).unwrap();
        storage.session_store().save(&pinned).await;
        DrillService::new(Arc::new(dataset()), storage.session_store())
    }

    #[tokio::test]
    async fn plays_a_session_to_the_summary() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "1\nh\nde\nq\n".as_bytes(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Vraag 1 van 3"));
        assert!(text.contains("    tafel"));
        assert!(text.contains("Goed: de tafel"));
        assert!(text.contains("Goed: het huis"));
        assert!(text.contains("Fout: de kind (juist: het kind)"));
        assert!(text.contains("Klaar! Je had 2 van de 3 goed."));
        assert!(text.contains("  de kind  (juist: het)"));

        let saved = storage.session_store().load().await.unwrap();
        assert!(saved.is_done());
        assert_eq!(saved.correct_count(), 2);
    }

    #[tokio::test]
    async fn quitting_mid_session_keeps_progress() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "d\n".as_bytes(), &mut out).await.unwrap();

        let saved = storage.session_store().load().await.unwrap();
        assert_eq!(saved.answers().len(), 1);
        assert_eq!(saved.pointer(), 1);
    }

    #[tokio::test]
    async fn restart_needs_confirmation_mid_session() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "d\nr\nn\nq\n".as_bytes(), &mut out)
            .await
            .unwrap();
        assert_eq!(
            storage.session_store().load().await.unwrap().answers().len(),
            1
        );

        run_drill(&service, "r\nj\nq\n".as_bytes(), &mut out)
            .await
            .unwrap();
        let fresh = storage.session_store().load().await.unwrap();
        assert!(fresh.answers().is_empty());
        assert_eq!(fresh.len(), 3);
    }

    #[tokio::test]
    async fn retry_drills_only_the_mistakes() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "w\nd\nd\nd\nd\nw\n".as_bytes(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Maak eerst deze ronde af."));
        assert!(text.contains("Deze ronde is klaar."));
        let retry = storage.session_store().load().await.unwrap();
        let mut order = retry.order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 2]);
    }

    #[tokio::test]
    async fn unknown_input_is_reported_not_fatal() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "xyz\n?\nq\n".as_bytes(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Onbekende invoer"));
        assert!(text.contains("pijl-links = de"));
    }

    #[tokio::test]
    async fn rules_are_shown_without_touching_the_session() {
        let storage = Storage::in_memory();
        let service = pinned_service(&storage).await;
        let mut out = Vec::new();

        run_drill(&service, "g
q
".as_bytes(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DE-woorden:"));
        assert!(text.contains("HET-woorden:"));
        assert!(text.contains("  - Verkleinwoorden"));
        assert!(text.contains("gelden niet altijd"));
        let saved = storage.session_store().load().await.unwrap();
        assert!(saved.answers().is_empty());
    }
}
