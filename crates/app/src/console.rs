//! Line-oriented console front end
//!
//! Walks the user through entry and commitment, then accepts workspace
//! commands until `quit` or end of input.

use std::io;

use chrono::{DateTime, Duration, Utc};
use hackos_core::derived::{onboarding_gate, GateChoice, GateDecision, Urgency};
use hackos_core::validation::{CommitmentForm, CreateTeamForm, JoinTeamForm};
use hackos_core::{
    ActivityKind, HackathonEdit, NoteRepository, Phase, StoreEvent, WorkspaceStore,
    WorkspaceZone,
};
use hackos_net::MockTeamService;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::clipboard;
use crate::error::Result;
use crate::onboarding::{EntrySettings, OnboardingController, OnboardingError};
use crate::state::AppState;
use crate::viewmodel::{
    activity_rows, member_rows, nav_sections, note_rows, role_rows, spawn_countdown, MissionView,
    TopSummary,
};

const HELP: &str = "\
Commands:
  status              countdown, next action and checklist
  team                members and presence
  roles               claimed roles
  zones               navigation rail
  zone <name>         switch zone (id or short label)
  notes               list quick notes
  note <text>         add a quick note
  rm <n>              delete note number n
  feed                live activity feed
  copy                copy the invite code
  rename <name>       rename the hackathon (owner)
  extend <hours>      move the deadline (owner)
  phase <name>        set phase: planning, build, submission, presentation
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Team,
    Roles,
    Zones,
    Zone(WorkspaceZone),
    Notes,
    Note(String),
    DeleteNote(usize),
    Feed,
    Copy,
    Rename(String),
    Extend(i64),
    Phase(Phase),
    Quit,
}

fn parse_phase(s: &str) -> Option<Phase> {
    match s.to_lowercase().as_str() {
        "planning" => Some(Phase::Planning),
        "build" => Some(Phase::Build),
        "submission" => Some(Phase::Submission),
        "presentation" => Some(Phase::Presentation),
        _ => None,
    }
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "status" => Command::Status,
            "team" => Command::Team,
            "roles" => Command::Roles,
            "zones" => Command::Zones,
            "zone" => Command::Zone(rest.parse().map_err(|e| format!("{}", e))?),
            "notes" => Command::Notes,
            "note" => Command::Note(rest.to_string()),
            "rm" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Command::DeleteNote(n),
                _ => return Err("usage: rm <note number>".to_string()),
            },
            "feed" => Command::Feed,
            "copy" => Command::Copy,
            "rename" if rest.is_empty() => return Err("usage: rename <name>".to_string()),
            "rename" => Command::Rename(rest.to_string()),
            "extend" => match rest.parse::<i64>() {
                Ok(hours) => Command::Extend(hours),
                Err(_) => return Err("usage: extend <hours>".to_string()),
            },
            "phase" => match parse_phase(rest) {
                Some(phase) => Command::Phase(phase),
                None => return Err(format!("unknown phase '{}'", rest)),
            },
            "quit" | "exit" => Command::Quit,
            "" => return Err(String::new()),
            _ => return Err(format!("unknown command '{}', try 'help'", word)),
        };
        Ok(command)
    }
}

fn urgency_tag(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Nominal => "",
        Urgency::Warning => " (!)",
        Urgency::Critical => " (!!)",
    }
}

fn summary_line(summary: &TopSummary) -> String {
    format!(
        "{} / {} | {} | {} | {}{} left | {}/{} online",
        summary.hackathon_name,
        summary.team_name,
        summary.phase,
        summary.onboarding,
        summary.countdown,
        urgency_tag(summary.urgency),
        summary.online,
        summary.team_size
    )
}

/// Run one workspace command and return the lines to print
pub fn execute<R: NoteRepository>(
    store: &mut WorkspaceStore<R>,
    command: Command,
    now: DateTime<Utc>,
) -> Vec<String> {
    match command {
        Command::Help => HELP.lines().map(str::to_string).collect(),
        Command::Status => {
            let view = MissionView::build(store, now);
            let mut out = vec![
                summary_line(&view.summary),
                format!("Next: {}", view.next_action.label()),
                format!(
                    "Checklist {}/{}:",
                    view.checklist_progress.0, view.checklist_progress.1
                ),
            ];
            out.extend(view.checklist.iter().map(|item| {
                format!("  [{}] {}", if item.done { "x" } else { " " }, item.label)
            }));
            out.push(format!(
                "Team: {}/{} committed, {} without a role",
                view.stats.committed, view.stats.total, view.unclaimed_roles
            ));
            if let GateDecision::Confirm { uncommitted } = view.gate {
                out.push(format!("Waiting on: {}", uncommitted.join(", ")));
            }
            out
        }
        Command::Team => member_rows(store)
            .into_iter()
            .map(|m| {
                format!(
                    "{} {} {}{} - {} - {} ({})",
                    if m.committed { "+" } else { "-" },
                    m.initials,
                    m.name,
                    if m.is_you { " (you)" } else { "" },
                    m.role,
                    m.status,
                    m.timezone
                )
            })
            .collect(),
        Command::Roles => {
            let rows = role_rows(store);
            if rows.is_empty() {
                return vec!["No roles claimed yet".to_string()];
            }
            rows.into_iter()
                .map(|r| match (r.deliverables, r.share) {
                    (Some(deliverables), Some(share)) => {
                        format!("{}: {} ({}%) - {}", r.member, r.role, share, deliverables)
                    }
                    _ => format!("{}: {}", r.member, r.role),
                })
                .collect()
        }
        Command::Zones => nav_sections(store)
            .into_iter()
            .map(|section| {
                let items: Vec<String> = section
                    .items
                    .iter()
                    .map(|i| {
                        let mut label = i.short_label.to_string();
                        if i.active {
                            label = format!("[{}]", label);
                        } else if i.dimmed {
                            label = format!("({})", label);
                        }
                        label
                    })
                    .collect();
                format!("{}: {}", section.label, items.join(" "))
            })
            .collect(),
        Command::Zone(zone) => {
            store.set_active_zone(zone);
            vec![format!("Now in {}", zone.label())]
        }
        Command::Notes => {
            let rows = note_rows(store, now);
            if rows.is_empty() {
                return vec!["No notes".to_string()];
            }
            rows.into_iter()
                .enumerate()
                .map(|(i, n)| format!("{}. {} ({})", i + 1, n.text, n.age))
                .collect()
        }
        Command::Note(text) => match store.add_note(&text) {
            Some(_) => vec!["Noted".to_string()],
            None => vec!["Nothing to note".to_string()],
        },
        Command::DeleteNote(n) => match store.notes().get(n - 1).map(|note| note.id) {
            Some(id) => {
                store.delete_note(id);
                vec![format!("Deleted note {}", n)]
            }
            None => vec![format!("No note {}", n)],
        },
        Command::Feed => activity_rows(store, now)
            .into_iter()
            .map(|row| {
                let marker = match row.kind {
                    ActivityKind::MemberJoined => "+",
                    ActivityKind::CommitmentSaved => "*",
                    ActivityKind::HackathonEdited => "~",
                    ActivityKind::AiSuggestion => "?",
                };
                format!("{} {} ({})", marker, row.headline, row.age)
            })
            .collect(),
        Command::Copy => {
            let code = store.context().invite_code.clone();
            match clipboard::copy_text(&code) {
                Some(_) => vec![format!("Copied invite code {}", code)],
                None => vec![format!("Clipboard unavailable. Invite code: {}", code)],
            }
        }
        Command::Rename(name) => edit_result(store.edit_hackathon(HackathonEdit {
            hackathon_name: Some(name),
            ..HackathonEdit::default()
        })),
        Command::Extend(hours) => match shift_hours(store.context().end_time, hours) {
            Some(end) => edit_result(store.edit_hackathon(HackathonEdit {
                end_time: Some(end),
                ..HackathonEdit::default()
            })),
            None => vec![format!("Not updated: {} hours is out of range", hours)],
        },
        Command::Phase(phase) => {
            store.set_phase(phase);
            vec![format!("Phase: {}", phase.label())]
        }
        Command::Quit => Vec::new(),
    }
}

/// `None` when the shift leaves the representable date range
fn shift_hours(from: DateTime<Utc>, hours: i64) -> Option<DateTime<Utc>> {
    Duration::try_hours(hours).and_then(|delta| from.checked_add_signed(delta))
}

/// Deadline typed into the create form as hours from `start`
fn deadline_after(start: DateTime<Utc>, hours: &str) -> Option<DateTime<Utc>> {
    shift_hours(start, hours.trim().parse().ok()?)
}

fn edit_result(result: hackos_core::Result<()>) -> Vec<String> {
    match result {
        Ok(()) => vec!["Hackathon updated".to_string()],
        Err(e) => vec![format!("Not updated: {}", e)],
    }
}

/// Reads answers from stdin
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` at end of input
    async fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        println!("{}", question);
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }

    async fn ask_or(&mut self, question: &str, default: &str) -> io::Result<Option<String>> {
        Ok(self
            .ask(&format!("{} [{}]", question, default))
            .await?
            .map(|answer| if answer.is_empty() { default.to_string() } else { answer }))
    }
}

fn print_error(err: &OnboardingError) {
    match err {
        OnboardingError::InvalidCreate(errors) => {
            errors.messages().iter().for_each(|(f, m)| println!("  {}: {}", f, m))
        }
        OnboardingError::InvalidJoin(errors) => {
            errors.messages().iter().for_each(|(f, m)| println!("  {}: {}", f, m))
        }
        OnboardingError::InvalidCommitment(errors) => {
            errors.messages().iter().for_each(|(f, m)| println!("  {}: {}", f, m))
        }
        other => println!("  {}", other),
    }
}

type Controller<R> = OnboardingController<MockTeamService, R>;

/// Entry phase. `Ok(false)` means input ended.
async fn run_entry<R: NoteRepository>(
    prompt: &mut Prompt,
    controller: &mut Controller<R>,
    default_timezone: &str,
) -> io::Result<bool> {
    loop {
        let Some(choice) = prompt.ask("Create a team or join one? (create/join)").await? else {
            return Ok(false);
        };

        let result = match choice.to_lowercase().as_str() {
            "create" | "c" => {
                let mut answers = Vec::new();
                for question in ["Your name", "Team name", "Hackathon name"] {
                    match prompt.ask(question).await? {
                        Some(answer) => answers.push(answer),
                        None => return Ok(false),
                    }
                }
                let Some(hours) = prompt.ask_or("Hours until the deadline", "36").await? else {
                    return Ok(false);
                };
                let Some(timezone) = prompt.ask_or("Timezone", default_timezone).await? else {
                    return Ok(false);
                };
                let Some(size) = prompt.ask_or("Team size", "4").await? else {
                    return Ok(false);
                };

                let start = Utc::now();
                let form = CreateTeamForm {
                    user_name: answers[0].clone(),
                    team_name: answers[1].clone(),
                    hackathon_name: answers[2].clone(),
                    start_time: Some(start),
                    end_time: deadline_after(start, &hours),
                    timezone,
                    team_size: size.parse().ok(),
                };
                println!("Creating team...");
                controller.create_team(&form).await.map(|ctx| {
                    format!(
                        "Team {} created. Share invite code {}",
                        ctx.team_name, ctx.invite_code
                    )
                })
            }
            "join" | "j" => {
                let Some(user_name) = prompt.ask("Your name").await? else {
                    return Ok(false);
                };
                let Some(invite_code) = prompt.ask("Invite code").await? else {
                    return Ok(false);
                };
                println!("Joining...");
                controller
                    .join_team(&JoinTeamForm {
                        user_name,
                        invite_code,
                    })
                    .await
                    .map(|ctx| format!("Joined {} for {}", ctx.team_name, ctx.hackathon_name))
            }
            _ => continue,
        };

        match result {
            Ok(message) => {
                println!("{}", message);
                return Ok(true);
            }
            Err(e) => {
                println!("Could not continue:");
                print_error(&e);
            }
        }
    }
}

/// Commitment phase. `Ok(false)` means input ended.
async fn run_commitment<R: NoteRepository>(
    prompt: &mut Prompt,
    controller: &mut Controller<R>,
) -> io::Result<bool> {
    if let Some(context) = controller.pending_context() {
        println!(
            "Welcome to {}, {}",
            context.team_name,
            context.current_user().map(|m| m.name.as_str()).unwrap_or("teammate")
        );
    }

    loop {
        let Some(choice) = prompt
            .ask("Commit to a role now or skip? (commit/skip)")
            .await?
        else {
            return Ok(false);
        };

        let result = match choice.to_lowercase().as_str() {
            "skip" | "s" => controller.skip_commitment().map(|_| ()),
            "commit" | "c" => {
                let mut answers = Vec::new();
                for question in ["Role", "Deliverables"] {
                    match prompt.ask(question).await? {
                        Some(answer) => answers.push(answer),
                        None => return Ok(false),
                    }
                }
                let Some(share) = prompt.ask_or("Responsibility share %", "50").await? else {
                    return Ok(false);
                };
                let Some(accept) = prompt.ask("I accept responsibility for this (y/n)").await?
                else {
                    return Ok(false);
                };

                let form = CommitmentForm {
                    role: answers[0].clone(),
                    deliverables: answers[1].clone(),
                    responsibility_share: share.parse().unwrap_or(0),
                    accepted: matches!(accept.to_lowercase().as_str(), "y" | "yes"),
                };
                controller.submit_commitment(&form).map(|_| ())
            }
            _ => continue,
        };

        match result {
            Ok(()) => return Ok(true),
            Err(e) => {
                println!("Commitment not saved:");
                print_error(&e);
            }
        }
    }
}

async fn gate<R: NoteRepository>(
    prompt: &mut Prompt,
    store: &WorkspaceStore<R>,
) -> io::Result<GateChoice> {
    let GateDecision::Confirm { uncommitted } = onboarding_gate(store.context()) else {
        return Ok(GateChoice::ProceedAnyway);
    };

    println!("Still waiting on: {}", uncommitted.join(", "));
    let answer = prompt
        .ask_or("Proceed anyway or send a reminder? (proceed/remind)", "proceed")
        .await?;
    Ok(match answer.as_deref() {
        Some("remind") | Some("r") => GateChoice::Remind,
        _ => GateChoice::ProceedAnyway,
    })
}

/// Drive a whole session on stdin/stdout
pub async fn run(state: &AppState) -> Result<()> {
    let config = state.config();
    let service = MockTeamService::new(config.mock_latency());
    let mut controller = OnboardingController::new(
        service,
        state.open_database()?,
        EntrySettings::from_config(config),
    );
    let mut prompt = Prompt::new();

    println!("Hackathon OS");
    if !run_entry(&mut prompt, &mut controller, &config.workspace.default_timezone).await? {
        return Ok(());
    }
    if !run_commitment(&mut prompt, &mut controller).await? {
        return Ok(());
    }
    let Some(mut store) = controller.into_store() else {
        return Ok(());
    };

    if gate(&mut prompt, &store).await? == GateChoice::Remind {
        println!("Reminder sent to your team");
    }

    store.subscribe(|event| {
        if let StoreEvent::ActivityAppended(e) = event {
            println!("  * {} {}", e.actor, e.description);
        }
    });

    let context = store.context();
    let (mut countdown, ticker) = spawn_countdown(context.start_time, context.end_time, Utc::now);
    let alerts = tokio::spawn(async move {
        let mut last = countdown.borrow_and_update().urgency;
        while countdown.changed().await.is_ok() {
            let current = countdown.borrow_and_update().urgency;
            if current != last {
                match current {
                    Urgency::Warning => println!("Heads up: under half the time remains"),
                    Urgency::Critical => println!("Final stretch: under 20% of the time remains"),
                    Urgency::Nominal => {}
                }
                last = current;
            }
        }
    });

    println!("{}", summary_line(&TopSummary::build(&store, Utc::now())));
    println!("Type 'help' for commands");

    while let Some(line) = prompt.ask(">").await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                for out in execute(&mut store, command, Utc::now()) {
                    println!("{}", out);
                }
            }
            Err(message) if message.is_empty() => {}
            Err(message) => println!("{}", message),
        }
    }

    ticker.abort();
    alerts.abort();
    info!(notes = store.notes().len(), "Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_store as store;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("status"), Ok(Command::Status));
        assert_eq!(
            Command::parse("zone feed"),
            Ok(Command::Zone(WorkspaceZone::LiveFeed))
        );
        assert_eq!(
            Command::parse("zone submission-readiness"),
            Ok(Command::Zone(WorkspaceZone::SubmissionReadiness))
        );
        assert_eq!(
            Command::parse("note  order pizza "),
            Ok(Command::Note("order pizza".to_string()))
        );
        assert_eq!(Command::parse("rm 2"), Ok(Command::DeleteNote(2)));
        assert_eq!(Command::parse("phase Build"), Ok(Command::Phase(Phase::Build)));
        assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("zone nowhere").is_err());
        assert!(Command::parse("rm 0").is_err());
        assert!(Command::parse("rm x").is_err());
        assert_eq!(
            Command::parse("rename"),
            Err("usage: rename <name>".to_string())
        );
        assert_eq!(
            Command::parse("rename   "),
            Err("usage: rename <name>".to_string())
        );
        assert!(Command::parse("dance").is_err());
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn test_note_commands() {
        let mut store = store();
        let now = Utc::now();

        execute(&mut store, Command::Note("first".to_string()), now);
        execute(&mut store, Command::Note("second".to_string()), now);
        let listed = execute(&mut store, Command::Notes, now);
        assert_eq!(listed[0], "1. second (just now)");

        assert_eq!(
            execute(&mut store, Command::DeleteNote(1), now),
            vec!["Deleted note 1"]
        );
        assert_eq!(store.notes()[0].text, "first");
        assert_eq!(
            execute(&mut store, Command::DeleteNote(5), now),
            vec!["No note 5"]
        );
    }

    #[test]
    fn test_owner_commands_for_joiner() {
        let mut store = store();
        let out = execute(&mut store, Command::Rename("Mine".to_string()), Utc::now());
        assert!(out[0].starts_with("Not updated"));
    }

    #[test]
    fn test_extend_out_of_range_is_rejected() {
        let mut store = store();
        let end = store.context().end_time;
        let now = Utc::now();

        for hours in [i64::MAX, i64::MIN, 2_000_000_000_000] {
            let out = execute(&mut store, Command::Extend(hours), now);
            assert_eq!(
                out,
                vec![format!("Not updated: {} hours is out of range", hours)]
            );
        }
        assert_eq!(store.context().end_time, end);

        let parsed = Command::parse("extend 9223372036854775807").unwrap();
        assert_eq!(parsed, Command::Extend(i64::MAX));
    }

    #[test]
    fn test_deadline_after() {
        let start = Utc::now();
        assert_eq!(
            deadline_after(start, "36"),
            Some(start + Duration::hours(36))
        );
        assert_eq!(deadline_after(start, " 12 "), Some(start + Duration::hours(12)));
        assert_eq!(deadline_after(start, "9223372036854775807"), None);
        assert_eq!(deadline_after(start, "2000000000000"), None);
        assert_eq!(deadline_after(start, "soon"), None);
    }

    #[test]
    fn test_zone_and_phase_commands() {
        let mut store = store();
        let now = Utc::now();

        execute(&mut store, Command::Zone(WorkspaceZone::LiveFeed), now);
        assert_eq!(store.active_zone(), WorkspaceZone::LiveFeed);

        let zones = execute(&mut store, Command::Zones, now);
        assert_eq!(zones[2], "Build: (Files) [Feed]");

        execute(&mut store, Command::Phase(Phase::Build), now);
        let status = execute(&mut store, Command::Status, now);
        assert!(status[0].contains("Build"));
        assert_eq!(status[1], "Next: Set your role commitment");
    }
}
