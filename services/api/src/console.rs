use crate::infra::{build_quiz_service, AppQuizService};
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vark_quiz::assessment::{
    compute_learning_style, presentation, CompletedQuiz, InferenceResult, LearningStyle, Question,
    QuestionBankOrigin, QuizServiceError, QuizSession, RecommendationRequest, SessionError,
};
use vark_quiz::config::AppConfig;
use vark_quiz::error::AppError;
use vark_quiz::telemetry;

const BAR_WIDTH: usize = 20;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answer tags in order, e.g. V,V,A,K
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) answers: Vec<LearningStyle>,
    /// Print the result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TakeArgs {
    /// Respondent name; prompted for when omitted
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Load questions from a CSV file instead of the configured source
    #[arg(long)]
    pub(crate) questions_csv: Option<PathBuf>,
    /// Ask the recommendation service for study tips after scoring
    #[arg(long)]
    pub(crate) recommend: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let result = compute_learning_style(&args.answers);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &result).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        render_result(&mut out, None, &result)?;
    }

    Ok(())
}

pub(crate) async fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let TakeArgs {
        name,
        questions_csv,
        recommend,
    } = args;

    let (config, service) = prepare_take(questions_csv)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Tes Gaya Belajar VARK")?;
    let bank = service.load_questions().await;
    if bank.origin == QuestionBankOrigin::Fallback {
        writeln!(out, "(Sumber soal tidak tersedia, memakai bank soal bawaan.)")?;
    }

    let Some(session) = start_session(&mut input, &mut out, name, bank.questions)? else {
        return Ok(());
    };
    let Some(completed) = ask_questions(&mut input, &mut out, session)? else {
        writeln!(out, "Tes dibatalkan.")?;
        return Ok(());
    };

    let saved = service.record(completed).await;
    render_result(&mut out, Some(&saved.user_name), &saved.result)?;
    match saved.share_path() {
        Some(path) => writeln!(out, "\nTautan berbagi: {}", config.server.share_url(&path))?,
        None => writeln!(out, "\nHasil tidak tersimpan; tautan berbagi tidak tersedia.")?,
    }

    if recommend {
        writeln!(out, "\nMeminta rekomendasi belajar...")?;
        let request = RecommendationRequest {
            dominant: saved.result.dominant,
            percentages: saved.result.percentages,
        };
        match service.recommend(&request).await {
            Ok(recommendation) => writeln!(out, "\n{}", recommendation.text)?,
            Err(QuizServiceError::Recommendation(err)) => writeln!(out, "\n{}", err.user_message())?,
            Err(other) => return Err(other.into()),
        }
    }

    Ok(())
}

/// Loads configuration and installs logging on stderr so store and question-source
/// warnings stay visible next to the prompts.
fn prepare_take(questions_csv: Option<PathBuf>) -> Result<(AppConfig, AppQuizService), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let service = build_quiz_service(&config, questions_csv);
    Ok((config, service))
}

/// Resolves the respondent name, re-prompting until it is non-blank. `None` on end of input.
fn start_session<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    preset: Option<String>,
    questions: Vec<Question>,
) -> Result<Option<QuizSession>, AppError> {
    let mut candidate = preset;
    loop {
        let name = match candidate.take() {
            Some(name) => name,
            None => {
                write!(out, "Nama: ")?;
                out.flush()?;
                match read_line(input)? {
                    Some(line) => line,
                    None => return Ok(None),
                }
            }
        };

        match QuizSession::start(&name, questions.clone()) {
            Ok(session) => return Ok(Some(session)),
            Err(SessionError::MissingRespondent) => {
                writeln!(out, "Nama tidak boleh kosong.")?;
            }
            Err(err) => return Err(QuizServiceError::from(err).into()),
        }
    }
}

/// Walks the session to completion. `q` aborts, `r` starts over.
fn ask_questions<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    mut session: QuizSession,
) -> Result<Option<CompletedQuiz>, AppError> {
    while let Some(question) = session.current_question().cloned() {
        let progress = session.progress();
        writeln!(
            out,
            "\n[{}/{} | {}%] {}",
            progress.position, progress.total, progress.percent, question.text
        )?;
        for (index, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {}", index + 1, option.label)?;
        }
        write!(out, "Pilihan (q keluar, r ulang): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.as_str() {
            "q" | "Q" => return Ok(None),
            "r" | "R" => {
                session.restart();
                continue;
            }
            _ => {}
        }

        let choice = line
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1));
        let accepted = match choice {
            Some(index) => session.answer(index).is_ok(),
            None => false,
        };
        if !accepted {
            writeln!(out, "Pilihan tidak valid.")?;
        }
    }

    let completed = session.finish().map_err(QuizServiceError::from)?;
    Ok(Some(completed))
}

fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn render_result<O: Write>(
    out: &mut O,
    respondent: Option<&str>,
    result: &InferenceResult,
) -> io::Result<()> {
    match respondent {
        Some(name) => writeln!(out, "\nHasil gaya belajar {name}")?,
        None => writeln!(out, "\nHasil gaya belajar")?,
    }
    writeln!(
        out,
        "Gaya dominan: {}",
        presentation::label(result.dominant)
    )?;
    writeln!(out, "{}\n", result.description)?;

    for entry in presentation::breakdown(&result.raw_scores, &result.percentages) {
        let filled = usize::from(entry.percentage) * BAR_WIDTH / 100;
        writeln!(
            out,
            "  {:<12} {}{} {:>3}% ({})",
            entry.label,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            entry.percentage,
            entry.score
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vark_quiz::assessment::{fallback_questions, Dominant};

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[tokio::test]
    async fn take_installs_logging_before_loading_questions() {
        let missing = std::env::temp_dir().join("vark-take-missing-bank.csv");

        let (_config, service) = prepare_take(Some(missing)).expect("take context");

        assert!(tracing::dispatcher::has_been_set());
        let bank = service.load_questions().await;
        assert_eq!(bank.origin, QuestionBankOrigin::Fallback);
    }

    #[test]
    fn render_result_lists_every_style() {
        let result = compute_learning_style(&[
            LearningStyle::Visual,
            LearningStyle::Visual,
            LearningStyle::Auditory,
            LearningStyle::Kinesthetic,
        ]);
        let mut buffer = Vec::new();

        render_result(&mut buffer, Some("Rina"), &result).expect("renders");

        let text = output(buffer);
        assert!(text.contains("Hasil gaya belajar Rina"));
        assert!(text.contains("Gaya dominan: Visual"));
        assert!(text.contains("##########.......... "));
        assert!(text.contains("Read/Write"));
        assert!(text.contains(" 25% (1)"));
    }

    #[test]
    fn blank_names_are_prompted_again() {
        let mut input = Cursor::new("   \nDewi\n");
        let mut buffer = Vec::new();

        let session = start_session(&mut input, &mut buffer, None, fallback_questions())
            .expect("io ok")
            .expect("session started");

        assert_eq!(session.respondent(), "Dewi");
        assert!(output(buffer).contains("Nama tidak boleh kosong."));
    }

    #[test]
    fn preset_name_skips_prompt() {
        let mut input = Cursor::new("");
        let mut buffer = Vec::new();

        let session = start_session(
            &mut input,
            &mut buffer,
            Some("Bima".to_string()),
            fallback_questions(),
        )
        .expect("io ok");

        assert!(session.is_some());
        assert!(!output(buffer).contains("Nama:"));
    }

    #[test]
    fn answers_are_read_until_complete() {
        let questions: Vec<_> = fallback_questions().into_iter().take(3).collect();
        let session = QuizSession::start("Dewi", questions).expect("session");
        let mut input = Cursor::new("4\n9\nabc\n4\n1\n");
        let mut buffer = Vec::new();

        let completed = ask_questions(&mut input, &mut buffer, session)
            .expect("io ok")
            .expect("completed");

        assert_eq!(
            completed.result.dominant,
            Dominant::Style(LearningStyle::Kinesthetic)
        );
        assert_eq!(completed.answers.len(), 3);
        let text = output(buffer);
        assert_eq!(text.matches("Pilihan tidak valid.").count(), 2);
        assert!(text.contains("[1/3 | 33%]"));
    }

    #[test]
    fn restart_and_quit_are_honoured() {
        let questions: Vec<_> = fallback_questions().into_iter().take(2).collect();
        let session = QuizSession::start("Dewi", questions).expect("session");
        let mut input = Cursor::new("1\nr\nq\n");
        let mut buffer = Vec::new();

        let completed = ask_questions(&mut input, &mut buffer, session).expect("io ok");

        assert!(completed.is_none());
        assert_eq!(output(buffer).matches("[1/2 | 50%]").count(), 2);
    }

    #[test]
    fn end_of_input_abandons_quiz() {
        let session = QuizSession::start("Dewi", fallback_questions()).expect("session");
        let mut input = Cursor::new("2\n");
        let mut buffer = Vec::new();

        let completed = ask_questions(&mut input, &mut buffer, session).expect("io ok");

        assert!(completed.is_none());
    }
}
