use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpNewsApi, NewsApi};
use newsdesk::{
    config::{load_settings, Settings},
    context::{AdminContext, UserContext},
    controller::{
        admin::AdminOrchestrator,
        events::{AdminAction, FormSubmission, UserAction},
        orchestration::{dispatch_admin, dispatch_user, Dispatched},
        user::{UserOrchestrator, SAVE_BUTTON_CLASS},
    },
    ui::{
        document::{admin_document, delete_user_form, user_document},
        Element, MemoryPage, Page, TerminalDialogs,
    },
};
use shared::domain::{NewsId, NewsItem};
use tracing_subscriber::EnvFilter;

const DELETE_USER_FORM_ID: &str = "delete-user";

#[derive(Parser, Debug)]
#[command(name = "newsdesk", about = "Admin panel and user dashboard for the news site")]
struct Cli {
    /// Overrides the admin news service address.
    #[arg(long, global = true)]
    admin_url: Option<String>,
    /// Overrides the site API address.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Admin(AdminCommand),
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    List,
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
    Update {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    DeleteUser {
        /// Form target, e.g. `/admin/delete_user/3`.
        #[arg(long)]
        action: String,
        #[arg(long)]
        name: Option<String>,
        /// Answer the confirmation with yes.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    News {
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "publishedAt")]
        sort: String,
        #[arg(long)]
        logged_out: bool,
        /// Saves the N-th result (1-based) after rendering.
        #[arg(long)]
        save: Option<usize>,
    },
    Videos {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        logged_out: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(url) = cli.admin_url {
        settings.admin_base_url = url;
    }
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }
    let api = build_api(&settings)?;

    match cli.command {
        Command::Admin(cmd) => run_admin(cmd, api).await,
        Command::User(cmd) => run_user(cmd, api, &settings).await,
    }
}

fn build_api(settings: &Settings) -> Result<Arc<dyn NewsApi>> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().context("failed to build http client")?;
    let api = HttpNewsApi::with_client(http, &settings.admin_base_url, &settings.api_base_url)
        .context("invalid service address")?;
    tracing::info!(
        admin = api.admin_base_url(),
        site = api.api_base_url(),
        "newsdesk client ready"
    );
    Ok(Arc::new(api))
}

fn terminal_page(root: Element, assume_yes: bool) -> Arc<MemoryPage> {
    Arc::new(MemoryPage::new(root, Arc::new(TerminalDialogs::new(assume_yes))))
}

async fn run_admin(cmd: AdminCommand, api: Arc<dyn NewsApi>) -> Result<()> {
    let (root, assume_yes) = match &cmd {
        AdminCommand::DeleteUser { action, name, yes } => (
            admin_document().child(delete_user_form(DELETE_USER_FORM_ID, action, name.as_deref())),
            *yes,
        ),
        _ => (admin_document(), false),
    };
    let page = terminal_page(root, assume_yes);
    let admin = AdminOrchestrator::new(AdminContext::new(page.clone(), api));
    let list_id = admin.context().elements.news_list.clone();

    let actions = match cmd {
        AdminCommand::List => vec![AdminAction::PageLoaded],
        AdminCommand::Add { title, description } => {
            let els = &admin.context().elements;
            page.set_value(&els.title, &title);
            page.set_value(&els.description, &description);
            vec![AdminAction::AddNews]
        }
        AdminCommand::Delete { id } => vec![AdminAction::DeleteNews(NewsId(id))],
        AdminCommand::Update {
            id,
            title,
            description,
        } => vec![
            AdminAction::EditNews(NewsItem {
                id: NewsId(id),
                title,
                description,
            }),
            AdminAction::UpdateNews,
        ],
        AdminCommand::DeleteUser { .. } => vec![AdminAction::SubmitDeleteUserForm {
            form_id: DELETE_USER_FORM_ID.to_string(),
        }],
    };

    for action in actions {
        if let Dispatched::Form(outcome) = dispatch_admin(&admin, action).await {
            return match outcome {
                FormSubmission::Submitted { status } => {
                    println!("delete-user form submitted (status {status})");
                    Ok(())
                }
                FormSubmission::Suppressed => {
                    println!("delete-user form not submitted");
                    Ok(())
                }
                FormSubmission::Failed => bail!("delete-user form submission failed"),
            };
        }
    }

    println!("{}", page.inner_html(&list_id).unwrap_or_default());
    Ok(())
}

async fn run_user(cmd: UserCommand, api: Arc<dyn NewsApi>, settings: &Settings) -> Result<()> {
    let logged_out = match &cmd {
        UserCommand::News { logged_out, .. } | UserCommand::Videos { logged_out, .. } => {
            *logged_out
        }
    };
    let page = terminal_page(user_document(!logged_out), false);
    let user = UserOrchestrator::new(
        UserContext::new(page.clone(), api).with_save_reset_delay(settings.save_reset_delay()),
    );
    let els = user.context().elements.clone();

    match cmd {
        UserCommand::News {
            topic, sort, save, ..
        } => {
            page.set_value(&els.topic, &topic);
            page.set_value(&els.sort, &sort);
            dispatch_user(&user, UserAction::SearchNews).await;

            if let Some(n) = save {
                let buttons = page.ids_with_class(SAVE_BUTTON_CLASS);
                let Some(button_id) = n.checked_sub(1).and_then(|i| buttons.get(i)) else {
                    bail!("no result #{n} to save ({} rendered)", buttons.len());
                };
                let action = UserAction::SaveArticle {
                    button_id: button_id.clone(),
                };
                if let Dispatched::SaveTimer(timer) = dispatch_user(&user, action).await {
                    timer.await.context("save button reset task failed")?;
                }
            }
            println!("{}", page.inner_html(&els.news_container).unwrap_or_default());
        }
        UserCommand::Videos { query, .. } => {
            page.set_value(&els.video_topic, &query);
            dispatch_user(&user, UserAction::SearchVideos).await;
            println!("{}", page.inner_html(&els.video_container).unwrap_or_default());
        }
    }
    Ok(())
}
