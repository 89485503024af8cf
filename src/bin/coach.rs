// Terminal dashboard - profile form, daily tips, care plan and the AI coach
use std::sync::Arc;

use baby_coach::application::agent_view::AgentView;
use baby_coach::application::coach_gateway::{CoachGateway, GatewayError};
use baby_coach::application::dashboard_view::{DashboardView, QueryTicket};
use baby_coach::domain::agent::{AgentAnswer, AskAgentInput};
use baby_coach::domain::care_profile::CareProfile;
use baby_coach::domain::dashboard::DashboardData;
use baby_coach::infrastructure::config::load_client_settings;
use baby_coach::infrastructure::graphql_client::GraphqlClient;
use baby_coach::infrastructure::logging::init_logging;
use baby_coach::presentation::console::{help, join_words, parse_line, Command};
use baby_coach::presentation::render::render_page;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Network results delivered back to the event loop
enum Completion {
    Dashboard(QueryTicket, Result<DashboardData, GatewayError>),
    Agent(Result<Option<AgentAnswer>, GatewayError>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = load_client_settings()?;
    let endpoint = settings.endpoint()?;
    tracing::info!(%endpoint, development = settings.is_development(), "Using GraphQL endpoint");

    let client = Arc::new(GraphqlClient::new(endpoint));
    let (tx, mut rx) = mpsc::channel::<Completion>(32);

    let (mut dashboard, ticket) = DashboardView::mount(CareProfile::default());
    let mut agent = AgentView::default();
    let mut dashboard_changes = dashboard.subscribe();
    let mut agent_changes = agent.subscribe();

    spawn_dashboard_query(&client, &tx, ticket);
    println!("{}", render_page(&dashboard, &agent));
    println!("{}", help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{}", help()),
                    Ok(Some(Command::Show)) => println!("{}", render_page(&dashboard, &agent)),
                    Ok(Some(command)) => apply(command, &mut dashboard, &mut agent, &client, &tx),
                    Err(e) => println!("{}", e),
                }
            }
            Some(completion) = rx.recv() => match completion {
                Completion::Dashboard(ticket, result) => {
                    dashboard.complete(&ticket, result);
                }
                Completion::Agent(result) => agent.complete(result),
            },
        }

        let dashboard_changed = dashboard_changes.has_changed().unwrap_or(false);
        let agent_changed = agent_changes.has_changed().unwrap_or(false);
        if dashboard_changed || agent_changed {
            let _ = dashboard_changes.borrow_and_update();
            let _ = agent_changes.borrow_and_update();
            println!("{}", render_page(&dashboard, &agent));
        }
    }

    Ok(())
}

fn apply(
    command: Command,
    dashboard: &mut DashboardView,
    agent: &mut AgentView,
    client: &Arc<GraphqlClient>,
    tx: &mpsc::Sender<Completion>,
) {
    let ticket = match command {
        Command::Name { words } => dashboard.set_name(join_words(words)),
        Command::Age { weeks } => dashboard.set_age_weeks(weeks),
        Command::Stage { stage } => dashboard.set_stage(stage),
        Command::Focus { area } => dashboard.toggle_focus(&area),
        Command::Refresh => {
            let ticket = dashboard.refresh();
            if ticket.is_none() {
                println!("still loading");
            }
            ticket
        }
        Command::Question { words } => {
            agent.set_question(join_words(words));
            None
        }
        Command::Ask { words } => {
            if !words.is_empty() {
                agent.set_question(join_words(words));
            }
            if let Some(input) = agent.begin_submit(dashboard.profile()) {
                spawn_ask_agent(client, tx, input);
            }
            None
        }
        Command::Show | Command::Help | Command::Quit => None,
    };

    if let Some(ticket) = ticket {
        spawn_dashboard_query(client, tx, ticket);
    }
}

// superseded queries still run to completion and fill the cache
fn spawn_dashboard_query(client: &Arc<GraphqlClient>, tx: &mpsc::Sender<Completion>, ticket: QueryTicket) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.dashboard(&ticket.profile, ticket.policy).await;
        let _ = tx.send(Completion::Dashboard(ticket, result)).await;
    });
}

fn spawn_ask_agent(client: &Arc<GraphqlClient>, tx: &mpsc::Sender<Completion>, input: AskAgentInput) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.ask_agent(&input).await;
        let _ = tx.send(Completion::Agent(result)).await;
    });
}
