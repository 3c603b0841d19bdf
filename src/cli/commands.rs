// src/cli/commands.rs — One-shot subcommands
//
// Each command drives the same controller the TUI uses, then prints the
// resulting view. Error alerts make the process exit non-zero.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::api::{CvApi, HttpCvApi};
use crate::controller::view::HistoryView;
use crate::controller::{AlertLevel, Controller, ControllerOptions, Section, ViewModel};
use crate::infra::config::Config;
use crate::infra::session::{Session, User};

use super::Commands;

/// Build the HTTP-backed controller from config and the `--user-id` flag.
pub fn build_controller(
    config: &Config,
    options: ControllerOptions,
    user_id: Option<i64>,
) -> anyhow::Result<Controller<HttpCvApi>> {
    let api = HttpCvApi::new(config.api.base_url.clone(), config.api.timeout())?;
    tracing::debug!(base_url = api.base_url(), "Using API");

    let mut controller = Controller::new(api, options);
    if let Some(id) = user_id {
        controller.set_session(Session::new().with_user(User {
            id,
            email: String::new(),
        }));
    }
    Ok(controller)
}

/// Run a subcommand. `ui` hands the controller to the terminal front end.
pub async fn run_command(
    command: Commands,
    config: &Config,
    user_id: Option<i64>,
) -> anyhow::Result<()> {
    let mut options = ControllerOptions::from_config(&config.export)?;
    if let Commands::Export { format, output, .. } = &command {
        if let Some(format) = format {
            options.export_format = format.parse()?;
        }
        if let Some(dir) = output {
            options.download_dir = PathBuf::from(dir);
        }
    }

    let mut c = build_controller(config, options, user_id)?;

    match command {
        Commands::Ui => return crate::tui::run_ui(c).await,
        Commands::Health => {
            c.check_health().await;
            let status = c.view().server_status.clone().unwrap_or_default();
            println!("{} {}", config.api.base_url, status);
            if status == "unreachable" {
                anyhow::bail!("Server at {} is unreachable", config.api.base_url);
            }
        }
        Commands::Cvs => {
            c.load_user_cvs().await;
            print!("{}", format_cvs(c.view()));
        }
        Commands::Jobs => {
            c.load_job_descriptions().await;
            print!("{}", format_jobs(c.view()));
        }
        Commands::History => {
            c.load_history().await;
            print!("{}", format_history(&c.view().history));
        }
        Commands::Result { id } => {
            c.view_result(id).await;
            if c.is_visible(Section::Results) {
                print!("{}", format_results(c.view()));
            }
        }
        Commands::Upload { file } => {
            c.upload_cv(Some(Path::new(&file))).await;
            if let Some(cv_id) = c.session().selected_cv_id {
                println!("cv_id: {cv_id}");
            }
        }
        Commands::Analyze { cv, job } => {
            let text = read_job_description(&job)?;
            c.analyze_with(Some(cv), &text).await;
            if c.is_visible(Section::Results) {
                if let Some(id) = c.session().selected_result_id {
                    println!("result_id: {id}");
                }
                print!("{}", format_results(c.view()));
            }
        }
        Commands::Export { id, .. } => {
            let session = c.session().with_result(id);
            c.set_session(session);
            c.download_improved_cv().await;
        }
        Commands::Login { email } => {
            let password = prompt_password("Password:")?;
            c.login(&email, &password).await;
            if c.session().is_logged_in() {
                println!("user_id: {}", c.session().user_id());
            }
        }
        Commands::Register { email } => {
            let password = prompt_password("Password:")?;
            let confirm = prompt_password("Confirm password:")?;
            c.register(&email, &password, &confirm).await;
            if c.session().is_logged_in() {
                println!("user_id: {}", c.session().user_id());
            }
        }
    }

    finish(&mut c)
}

/// Print queued alerts. Any error alert becomes the command's error.
fn finish<A: CvApi>(c: &mut Controller<A>) -> anyhow::Result<()> {
    let mut errors = Vec::new();
    for alert in c.take_alerts() {
        match alert.level {
            AlertLevel::Info => println!("{}", alert.message),
            AlertLevel::Error => errors.push(alert.message),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{}", errors.join("; "))
    }
}

fn prompt_password(label: &str) -> anyhow::Result<String> {
    inquire::Password::new(label)
        .without_confirmation()
        .prompt()
        .map_err(|_| anyhow::anyhow!("Password input cancelled"))
}

/// `-` reads stdin, anything else is a file path.
fn read_job_description(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| anyhow::anyhow!("Cannot read job description '{}': {}", source, e))
    }
}

// ── Printing ─────────────────────────────────────────────────────

pub fn format_cvs(view: &ViewModel) -> String {
    let options = view.cv_select.options();
    if options.is_empty() {
        return "No CVs uploaded.\n".into();
    }
    options
        .iter()
        .map(|o| format!("{:>6}  {}\n", o.id, o.label))
        .collect()
}

pub fn format_jobs(view: &ViewModel) -> String {
    if view.job_descriptions.is_empty() {
        return "No job descriptions saved.\n".into();
    }
    view.job_descriptions
        .iter()
        .map(|j| {
            format!(
                "{:>6}  {}  {}\n",
                j.id,
                j.title,
                j.created_at.as_deref().unwrap_or("")
            )
        })
        .collect()
}

pub fn format_history(history: &HistoryView) -> String {
    if let Some(placeholder) = history.placeholder() {
        return format!("{placeholder}\n");
    }
    history
        .cards()
        .iter()
        .map(|card| {
            format!(
                "#{}  {}\n    CV: {}  Score: {}  Date: {}\n",
                card.result_id, card.job_title, card.cv_name, card.score_label, card.date_label
            )
        })
        .collect()
}

pub fn format_results(view: &ViewModel) -> String {
    let results = &view.results;
    let mut out = format!("Score: {}%\n", results.score_or_dash());
    if let Some(sub) = &results.subtitle {
        out.push_str(&format!("{sub}\n"));
    }

    out.push_str("\nFeedback\n");
    out.push_str(&results.feedback);
    out.push('\n');

    out.push_str("\nSuggestions\n");
    for (i, s) in results.suggestions.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, s));
    }

    out.push_str("\nImproved CV\n");
    out.push_str(&results.improved_cv);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Analysis, CvSummary, HistoryEntry};
    use crate::api::MockCvApi;
    use crate::controller::view::ResultsView;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_cvs() {
        let mut view = ViewModel::default();
        assert_eq!(format_cvs(&view), "No CVs uploaded.\n");

        view.cv_select.replace(
            &[CvSummary {
                id: 3,
                file_name: "me.pdf".into(),
                created_at: None,
            }],
            None,
        );
        assert_eq!(format_cvs(&view), "     3  me.pdf\n");
    }

    #[test]
    fn test_format_history_placeholder() {
        let empty = HistoryView::from_entries(&[]);
        assert_eq!(format_history(&empty), "No analysis history found.\n");
    }

    #[test]
    fn test_format_history_cards() {
        let history = HistoryView::from_entries(&[HistoryEntry {
            id: 5,
            job_title: "Backend".into(),
            cv_name: "cv.pdf".into(),
            score: 72.0,
            created_at: "2025-03-04 10:00:00".into(),
        }]);
        let out = format_history(&history);
        assert!(out.starts_with("#5  Backend\n"));
        assert!(out.contains("Score: 72%"));
    }

    #[test]
    fn test_format_results_numbers_suggestions() {
        let mut view = ViewModel::default();
        view.results = ResultsView::from_analysis(&Analysis {
            score: 64.5,
            feedback: "Good".into(),
            suggestions: vec!["First".into(), "Second".into()],
            improved_cv: "CV".into(),
        });
        let out = format_results(&view);
        assert!(out.starts_with("Score: 64.5%\n"));
        assert!(out.contains(" 1. First\n 2. Second\n"));
    }

    #[tokio::test]
    async fn test_finish_turns_error_alerts_into_error() {
        let mut api = MockCvApi::new();
        api.expect_analyze().never();
        let mut c = Controller::new(api, ControllerOptions::default());

        c.analyze_with(None, "text").await;

        let err = finish(&mut c).unwrap_err();
        assert_eq!(err.to_string(), "Please select a CV");
    }

    #[test]
    fn test_read_job_description_missing_file() {
        let err = read_job_description("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("Cannot read job description"));
    }
}
