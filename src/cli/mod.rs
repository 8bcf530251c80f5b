//!
//! complaint-desk command line
//! ---------------------------
//! Argument parsing and dispatch for the `complaint-desk` binary. Every command maps onto
//! one typed client operation; results are printed as tables (lists) or pretty JSON.

pub mod table;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::ClientConfig;
use crate::http::ApiClient;
use crate::models::{AnnouncementInput, AnnouncementStatus, ComplaintStatus, ComplaintUpdate, NewUser, Role};
use crate::params::QueryParams;
use crate::validation::{ComplaintForm, Evidence};

pub use table::print_value;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Profile,
    Complaints(ComplaintsCmd),
    Categories,
    Users(UsersCmd),
    Announcements(AnnouncementsCmd),
    Notifications(NotificationsCmd),
    Reports(ReportsCmd),
    Theme { toggle: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplaintsCmd {
    List(QueryParams),
    Show(u64),
    Stats,
    Create { category_id: u64, title: String, description: String, evidence: Option<PathBuf> },
    Update { id: u64, fields: ComplaintUpdate },
    Delete(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsersCmd {
    List(QueryParams),
    Stats,
    Create(NewUserArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserArgs {
    pub username: String,
    pub student_id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnouncementsCmd {
    List(QueryParams),
    Show(u64),
    Create(AnnouncementInput),
    Update { id: u64, input: AnnouncementInput },
    Delete(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationsCmd {
    List(QueryParams),
    Read(u64),
    ReadAll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportsCmd {
    Stats(QueryParams),
    Categories,
    Trends(QueryParams),
}

pub fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api-url <url>] [--session-file <path>] <command> [args] [--flags]\n\nCommands:\n  login <username> <password>\n  logout\n  profile\n  complaints list [--page N] [--limit N] [--search TEXT] [--status STATUS]\n  complaints show <id>\n  complaints stats\n  complaints create --category <id> --title <text> --description <text> [--evidence <file>]\n  complaints update <id> [--status STATUS] [--response <text>]\n  complaints delete <id>\n  categories\n  users list [--page N] [--limit N] [--search TEXT] [--role admin|student]\n  users stats\n  users create --username <u> --email <e> --name <n> --password <p> [--role admin|student] [--student-id <id>] [--phone <p>]\n  announcements list [--page N] [--limit N] [--search TEXT] [--status draft|published|archived]\n  announcements show <id>\n  announcements create --title <text> --content <text> [--status draft|published|archived]\n  announcements update <id> --title <text> --content <text> [--status ...]\n  announcements delete <id>\n  notifications list [--limit N]\n  notifications read <id>\n  notifications read-all\n  reports stats [--start-date YYYY-MM-DD] [--end-date YYYY-MM-DD]\n  reports categories\n  reports trends [--start-date YYYY-MM-DD] [--end-date YYYY-MM-DD]\n  theme [toggle]\n\nSTATUS: pending | in_process | completed | rejected\n\nEnvironment:\n  COMPLAINT_DESK_API_URL       API base (default http://localhost:8080/api)\n  COMPLAINT_DESK_SESSION_FILE  session file (default .complaint-desk/session.json)\n  COMPLAINT_DESK_MAX_UPLOAD    evidence size limit in bytes (default 5242880)\n  COMPLAINT_DESK_PAGE_LIMIT    rows per page for list commands (default 10)\n  COMPLAINT_DESK_DEBOUNCE_MS   search debounce in milliseconds (default 500)\n  RUST_LOG                     log filter (default info)"
    );
}

impl Command {
    /// Give list commands without `--limit` the configured page size.
    pub fn with_default_limits(self, config: &ClientConfig) -> Self {
        let fill = |p: QueryParams, limit: u32| if p.get("limit").is_some() { p } else { p.limit(limit) };
        match self {
            Command::Complaints(ComplaintsCmd::List(p)) => Command::Complaints(ComplaintsCmd::List(fill(p, config.page_limit))),
            Command::Users(UsersCmd::List(p)) => Command::Users(UsersCmd::List(fill(p, config.page_limit))),
            Command::Announcements(AnnouncementsCmd::List(p)) => {
                Command::Announcements(AnnouncementsCmd::List(fill(p, config.page_limit)))
            }
            Command::Notifications(NotificationsCmd::List(p)) => {
                Command::Notifications(NotificationsCmd::List(fill(p, config.notification_limit)))
            }
            other => other,
        }
    }
}

/// Positional words and `--flag value` pairs, in order of appearance.
struct Args {
    positional: Vec<String>,
    flags: HashMap<String, String>,
}

impl Args {
    fn split(args: &[String]) -> Result<Self> {
        let mut positional = Vec::new();
        let mut flags = HashMap::new();
        let mut i = 0;
        while i < args.len() {
            let a = &args[i];
            if let Some(name) = a.strip_prefix("--") {
                let Some(value) = args.get(i + 1) else { bail!("--{} requires a value", name) };
                flags.insert(name.to_string(), value.clone());
                i += 2;
                continue;
            }
            positional.push(a.clone());
            i += 1;
        }
        Ok(Self { positional, flags })
    }

    fn word(&self, idx: usize) -> Option<&str> { self.positional.get(idx).map(String::as_str) }

    fn id(&self, idx: usize) -> Result<u64> {
        let raw = self.word(idx).ok_or_else(|| anyhow!("missing <id>"))?;
        raw.parse().with_context(|| format!("invalid id '{}'", raw))
    }

    fn flag(&self, name: &str) -> Option<&str> { self.flags.get(name).map(String::as_str) }

    fn required(&self, name: &str) -> Result<String> {
        self.flag(name).map(str::to_string).ok_or_else(|| anyhow!("--{} is required", name))
    }

    fn number(&self, name: &str) -> Result<Option<u32>> {
        self.flag(name).map(|v| v.parse().with_context(|| format!("--{} expects a number", name))).transpose()
    }

    fn list_params(&self, filter: Option<&str>) -> Result<QueryParams> {
        let mut p = QueryParams::new();
        if let Some(page) = self.number("page")? { p.set("page", page); }
        if let Some(limit) = self.number("limit")? { p.set("limit", limit); }
        p.set_opt("search", self.flag("search").map(str::trim));
        if let Some(key) = filter { p.set_opt(key, self.flag(key)); }
        Ok(p)
    }

    fn date_range(&self) -> QueryParams {
        QueryParams::new().with_opt("start_date", self.flag("start-date")).with_opt("end_date", self.flag("end-date"))
    }

    fn announcement(&self) -> Result<AnnouncementInput> {
        let status = match self.flag("status") {
            Some(s) => AnnouncementStatus::parse(s).ok_or_else(|| anyhow!("unknown announcement status '{}'", s))?,
            None => AnnouncementStatus::Published,
        };
        Ok(AnnouncementInput { title: self.required("title")?, content: self.required("content")?, status })
    }
}

/// Parse everything after the program name.
pub fn parse(args: &[String]) -> Result<Command> {
    let a = Args::split(args)?;
    let cmd = a.word(0).ok_or_else(|| anyhow!("missing command"))?;
    let sub = a.word(1);
    let command = match (cmd, sub) {
        ("login", _) => {
            let username = a.word(1).ok_or_else(|| anyhow!("missing <username>"))?.to_string();
            let password = a.word(2).ok_or_else(|| anyhow!("missing <password>"))?.to_string();
            Command::Login { username, password }
        }
        ("logout", _) => Command::Logout,
        ("profile", _) => Command::Profile,
        ("categories", _) => Command::Categories,
        ("theme", None) => Command::Theme { toggle: false },
        ("theme", Some("toggle")) => Command::Theme { toggle: true },

        ("complaints", Some("list")) => {
            if let Some(s) = a.flag("status") {
                ComplaintStatus::parse(s).ok_or_else(|| anyhow!("unknown status '{}'", s))?;
            }
            Command::Complaints(ComplaintsCmd::List(a.list_params(Some("status"))?))
        }
        ("complaints", Some("show")) => Command::Complaints(ComplaintsCmd::Show(a.id(2)?)),
        ("complaints", Some("stats")) => Command::Complaints(ComplaintsCmd::Stats),
        ("complaints", Some("create")) => Command::Complaints(ComplaintsCmd::Create {
            category_id: a.required("category")?.parse().context("--category expects a numeric id")?,
            title: a.required("title")?,
            description: a.required("description")?,
            evidence: a.flag("evidence").map(PathBuf::from),
        }),
        ("complaints", Some("update")) => {
            let status = match a.flag("status") {
                Some(s) => Some(ComplaintStatus::parse(s).ok_or_else(|| anyhow!("unknown status '{}'", s))?),
                None => None,
            };
            let fields = ComplaintUpdate { status, admin_response: a.flag("response").map(str::to_string) };
            if fields == ComplaintUpdate::default() { bail!("nothing to update: pass --status and/or --response"); }
            Command::Complaints(ComplaintsCmd::Update { id: a.id(2)?, fields })
        }
        ("complaints", Some("delete")) => Command::Complaints(ComplaintsCmd::Delete(a.id(2)?)),

        ("users", Some("list")) => Command::Users(UsersCmd::List(a.list_params(Some("role"))?)),
        ("users", Some("stats")) => Command::Users(UsersCmd::Stats),
        ("users", Some("create")) => {
            let role = match a.flag("role") {
                Some(r) => Role::parse(r).ok_or_else(|| anyhow!("unknown role '{}'", r))?,
                None => Role::Student,
            };
            Command::Users(UsersCmd::Create(NewUserArgs {
                username: a.required("username")?,
                student_id: a.flag("student-id").unwrap_or_default().to_string(),
                email: a.required("email")?,
                name: a.required("name")?,
                password: a.required("password")?,
                phone: a.flag("phone").unwrap_or_default().to_string(),
                role,
            }))
        }

        ("announcements", Some("list")) => Command::Announcements(AnnouncementsCmd::List(a.list_params(Some("status"))?)),
        ("announcements", Some("show")) => Command::Announcements(AnnouncementsCmd::Show(a.id(2)?)),
        ("announcements", Some("create")) => Command::Announcements(AnnouncementsCmd::Create(a.announcement()?)),
        ("announcements", Some("update")) => {
            Command::Announcements(AnnouncementsCmd::Update { id: a.id(2)?, input: a.announcement()? })
        }
        ("announcements", Some("delete")) => Command::Announcements(AnnouncementsCmd::Delete(a.id(2)?)),

        ("notifications", Some("list")) | ("notifications", None) => {
            let mut p = QueryParams::new();
            if let Some(limit) = a.number("limit")? { p.set("limit", limit); }
            Command::Notifications(NotificationsCmd::List(p))
        }
        ("notifications", Some("read")) => Command::Notifications(NotificationsCmd::Read(a.id(2)?)),
        ("notifications", Some("read-all")) => Command::Notifications(NotificationsCmd::ReadAll),

        ("reports", Some("stats")) => Command::Reports(ReportsCmd::Stats(a.date_range())),
        ("reports", Some("categories")) => Command::Reports(ReportsCmd::Categories),
        ("reports", Some("trends")) => Command::Reports(ReportsCmd::Trends(a.date_range())),

        (c, Some(s)) => bail!("unknown command '{} {}'", c, s),
        (c, None) => bail!("unknown command '{}'", c),
    };
    Ok(command)
}

fn show<T: Serialize>(value: Option<T>) -> Result<()> {
    match value {
        Some(v) => print_value(&serde_json::to_value(v)?),
        None => eprintln!("session expired; run `login` again"),
    }
    Ok(())
}

/// Execute one parsed command against the API.
pub async fn run(client: &ApiClient, command: Command) -> Result<()> {
    match command.with_default_limits(client.config()) {
        Command::Login { username, password } => match client.auth().login(&username, &password).await? {
            Some(resp) => {
                let role = resp.effective_role().map(|r| r.as_str()).unwrap_or("unknown");
                println!("Logged in as {} ({})", resp.user.username, role);
            }
            None => bail!("invalid credentials"),
        },
        Command::Logout => {
            client.auth().logout()?;
            println!("Logged out");
        }
        Command::Profile => show(client.auth().get_profile().await?)?,
        Command::Categories => show(client.categories().get_all().await?)?,
        Command::Theme { toggle } => {
            let theme = if toggle { client.session().toggle_theme()? } else { client.session().theme() };
            println!("{}", theme);
        }
        Command::Complaints(c) => run_complaints(client, c).await?,
        Command::Users(c) => match c {
            UsersCmd::List(p) => show(client.users().get_all(&p).await?)?,
            UsersCmd::Stats => show(client.users().get_stats().await?)?,
            UsersCmd::Create(u) => {
                let new_user = NewUser {
                    username: u.username,
                    student_id: u.student_id,
                    email: u.email,
                    name: u.name,
                    password: u.password,
                    phone: u.phone,
                    role: u.role,
                };
                show(client.users().create(&new_user).await?)?
            }
        },
        Command::Announcements(c) => match c {
            AnnouncementsCmd::List(p) => show(client.announcements().get_all(&p).await?)?,
            AnnouncementsCmd::Show(id) => show(client.announcements().get_by_id(id).await?)?,
            AnnouncementsCmd::Create(input) => show(client.announcements().create(&input).await?)?,
            AnnouncementsCmd::Update { id, input } => show(client.announcements().update(id, &input).await?)?,
            AnnouncementsCmd::Delete(id) => show(client.announcements().delete(id).await?.map(|a| a.message))?,
        },
        Command::Notifications(c) => match c {
            NotificationsCmd::List(p) => show(client.notifications().get_all(&p).await?)?,
            NotificationsCmd::Read(id) => show(client.notifications().mark_as_read(id).await?)?,
            NotificationsCmd::ReadAll => show(client.notifications().mark_all_as_read().await?.map(|a| a.message))?,
        },
        Command::Reports(c) => match c {
            ReportsCmd::Stats(p) => show(client.reports().get_stats(&p).await?)?,
            ReportsCmd::Categories => show(client.reports().get_categories().await?.map(|r| r.categories))?,
            ReportsCmd::Trends(p) => show(client.reports().get_trends(&p).await?)?,
        },
    }
    Ok(())
}

async fn run_complaints(client: &ApiClient, command: ComplaintsCmd) -> Result<()> {
    match command {
        ComplaintsCmd::List(p) => show(client.complaints().get_all(&p).await?),
        ComplaintsCmd::Show(id) => show(client.complaints().get_by_id(id).await?),
        ComplaintsCmd::Stats => show(client.complaints().get_stats().await?),
        ComplaintsCmd::Create { category_id, title, description, evidence } => {
            let evidence = match evidence {
                Some(path) => Some(Evidence::from_path(&path).with_context(|| format!("reading {}", path.display()))?),
                None => None,
            };
            let form = ComplaintForm { category_id, title, description, evidence };
            let created = client.complaints().create(form).await?;
            if let Some(c) = &created {
                info!(target: "cli", ticket = %c.ticket_id, "complaint submitted");
            }
            show(created)
        }
        ComplaintsCmd::Update { id, fields } => show(client.complaints().update(id, &fields).await?),
        ComplaintsCmd::Delete(id) => show(client.complaints().delete(id).await?.map(|a| a.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> { s.split_whitespace().map(str::to_string).collect() }

    #[test]
    fn parses_list_filters_into_params() {
        let cmd = parse(&args("complaints list --status pending --page 2 --search wifi")).unwrap();
        let Command::Complaints(ComplaintsCmd::List(p)) = cmd else { panic!("unexpected {:?}", cmd) };
        assert_eq!(p.to_query_string(), "page=2&search=wifi&status=pending");
    }

    #[test]
    fn list_commands_get_the_configured_limit() {
        let config = ClientConfig::default().with_page_limit(25);
        let cmd = parse(&args("users list --page 3")).unwrap().with_default_limits(&config);
        let Command::Users(UsersCmd::List(p)) = cmd else { panic!("unexpected {:?}", cmd) };
        assert_eq!(p.to_query_string(), "page=3&limit=25");

        let cmd = parse(&args("complaints list --limit 5")).unwrap().with_default_limits(&config);
        let Command::Complaints(ComplaintsCmd::List(p)) = cmd else { panic!("unexpected {:?}", cmd) };
        assert_eq!(p.to_query_string(), "limit=5");

        let cmd = parse(&args("notifications")).unwrap().with_default_limits(&config);
        assert_eq!(cmd, Command::Notifications(NotificationsCmd::List(QueryParams::new().limit(20))));
        assert_eq!(parse(&args("categories")).unwrap().with_default_limits(&config), Command::Categories);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(parse(&args("complaints list --status lost")).is_err());
        assert!(parse(&args("complaints update 3 --status lost")).is_err());
    }

    #[test]
    fn update_requires_a_field() {
        assert!(parse(&args("complaints update 3")).is_err());
        let cmd = parse(&args("complaints update 3 --status completed")).unwrap();
        assert_eq!(
            cmd,
            Command::Complaints(ComplaintsCmd::Update {
                id: 3,
                fields: ComplaintUpdate { status: Some(ComplaintStatus::Completed), admin_response: None }
            })
        );
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let err = parse(&args("users list --role")).unwrap_err();
        assert!(err.to_string().contains("--role requires a value"));
    }

    #[test]
    fn create_user_defaults_to_student() {
        let cmd = parse(&args("users create --username s1 --email s1@x.io --name S --password secret1")).unwrap();
        let Command::Users(UsersCmd::Create(u)) = cmd else { panic!("unexpected {:?}", cmd) };
        assert_eq!(u.role, Role::Student);
        assert_eq!(u.student_id, "");
    }

    #[test]
    fn theme_and_login() {
        assert_eq!(parse(&args("theme toggle")).unwrap(), Command::Theme { toggle: true });
        assert_eq!(
            parse(&args("login admin admin123")).unwrap(),
            Command::Login { username: "admin".into(), password: "admin123".into() }
        );
        assert!(parse(&args("frobnicate")).is_err());
    }
}
