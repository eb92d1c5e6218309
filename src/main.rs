use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use quizmanager::config::{ClientConfig, ConfigError};
use quizmanager::net::types::{Quiz, QuizDraft, QuizId, QuizPage, QuizQuery, QuizStatus, User};
use quizmanager::net::{ApiClient, ApiError, TracingNavigator};
use quizmanager::state::Store;
use quizmanager::util::time::relative_time_from_iso;
use quizmanager::util::toast::{Toast, success_toast, validation_toast};
use quizmanager::util::validate::{FieldError, validate_quiz};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing credentials; pass --username/--password or set QUIZ_USERNAME/QUIZ_PASSWORD")]
    MissingCredentials,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("quiz draft is invalid: {}", join_errors(.0))]
    InvalidDraft(Vec<FieldError>),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Parser, Debug)]
#[command(name = "quizctl", about = "QuizManager API CLI")]
struct Cli {
    /// Overrides `QUIZ_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "QUIZ_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "QUIZ_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, default_value_t = false)]
    remember: bool,

    #[arg(long, env = "QUIZ_SESSION_COOKIE", hide_env_values = true)]
    session_cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Whoami,
    Login,
    Logout,
    Quiz(QuizCommand),
}

#[derive(Args, Debug)]
struct QuizCommand {
    #[command(subcommand)]
    command: QuizSubcommand,
}

#[derive(Subcommand, Debug)]
enum QuizSubcommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long)]
        status: Option<QuizStatus>,
    },
    Get {
        id: QuizId,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: QuizId,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: QuizId,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = ClientConfig { base_url: ClientConfig::new(base_url)?.base_url, ..config };
    }
    if cli.session_cookie.is_some() {
        config = config.with_session_cookie(cli.session_cookie.clone());
    }

    let mut client = ApiClient::new(&config, Arc::new(TracingNavigator))?;
    let store = Store::new();

    let result = run(&cli, &mut client, &store).await;
    let failure_toast = match &result {
        Err(CliError::Api(err)) => Some(Toast::from(err)),
        Err(CliError::InvalidDraft(_)) => Some(validation_toast()),
        _ => None,
    };
    if let Some(toast) = failure_toast {
        store.toasts.push(toast);
    }
    flush_toasts(&store);
    result
}

async fn run(cli: &Cli, client: &mut ApiClient, store: &Store) -> Result<(), CliError> {
    let logged_in = login(cli, client).await?;
    if let Some(user) = &logged_in {
        store.session.set_current_user(Some(user.clone()));
    }

    match &cli.command {
        Command::Login => {
            let user = logged_in.ok_or(CliError::MissingCredentials)?;
            print_json(&user)
        }
        Command::Whoami => {
            let user = client.get_user().await.into_result()?;
            store.session.set_current_user(Some(user.clone()));
            print_json(&user)
        }
        Command::Logout => {
            client.logout_user().await.into_result()?;
            store.session.set_current_user(None);
            tracing::info!("logged out");
            Ok(())
        }
        Command::Quiz(quiz) => run_quiz(client, store, &quiz.command).await,
    }
}

/// Log in when credentials were supplied. The session cookie lands in the
/// client's cookie store for the rest of the process.
async fn login(cli: &Cli, client: &ApiClient) -> Result<Option<User>, CliError> {
    let (Some(username), Some(password)) = (&cli.username, &cli.password) else {
        return Ok(None);
    };
    let user = client.login_user(username, password, cli.remember).await.into_result()?;
    Ok(Some(user))
}

async fn run_quiz(client: &mut ApiClient, store: &Store, command: &QuizSubcommand) -> Result<(), CliError> {
    match command {
        QuizSubcommand::List { query, limit, offset, status } => {
            client.set_current_path("/quizzes")?;
            let query = QuizQuery::search(query.clone()).page(*limit, *offset).status(*status);
            let page = client.get_quizzes(&query).await.into_result()?;
            print_json(&page_json(&page)?)
        }
        QuizSubcommand::Get { id } => {
            client.set_current_path(format!("/quizzes/{id}"))?;
            let quiz = client.get_quiz_by_id(*id).await.into_result()?;
            print_json(&quiz)
        }
        QuizSubcommand::Create { data } => {
            client.set_current_path("/quizzes/new")?;
            let draft = parse_draft(data)?;
            let quiz = client.create_quiz(&draft).await.into_result()?;
            store.toasts.push(success_toast());
            print_json(&quiz)
        }
        QuizSubcommand::Update { id, data } => {
            client.set_current_path(format!("/quizzes/{id}"))?;
            let draft = parse_draft(data)?;
            let quiz = client.update_quiz(*id, &draft).await.into_result()?;
            store.toasts.push(success_toast());
            print_json(&quiz)
        }
        QuizSubcommand::Delete { id } => {
            client.set_current_path(format!("/quizzes/{id}"))?;
            client.delete_quiz(*id).await.into_result()?;
            store.toasts.push(success_toast());
            Ok(())
        }
    }
}

fn parse_draft(data: &str) -> Result<QuizDraft, CliError> {
    let draft = serde_json::from_str::<QuizDraft>(data)?;
    let errors = validate_quiz(&draft);
    if errors.is_empty() { Ok(draft) } else { Err(CliError::InvalidDraft(errors)) }
}

fn page_json(page: &QuizPage) -> Result<Value, CliError> {
    let quizzes = page.quizzes.iter().map(quiz_row).collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::json!({ "count": page.count, "quizzes": quizzes }))
}

fn quiz_row(quiz: &Quiz) -> Result<Value, CliError> {
    let mut row = serde_json::to_value(quiz)?;
    if let (Some(updated_at), Value::Object(map)) = (&quiz.updated_at, &mut row) {
        map.insert("updated".to_owned(), Value::String(relative_time_from_iso(updated_at)));
    }
    Ok(row)
}

fn flush_toasts(store: &Store) {
    for shown in store.toasts.snapshot() {
        eprintln!("{}", shown.toast.title);
    }
    store.toasts.clear();
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
