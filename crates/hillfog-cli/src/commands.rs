//! Command execution
//!
//! Every command resolves to a JSON value which `main` renders in the
//! requested output format.

use anyhow::{Context, Result};
use hillfog_client::{HillfogClient, SessionStore};
use hillfog_core::{MeasureDataQuery, Page};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::cli::{Command, EntityKind, OutputFormat};

macro_rules! with_entity_api {
    ($client:expr, $kind:expr, |$api:ident| $body:expr) => {
        match $kind {
            EntityKind::Scorecard => {
                let $api = $client.scorecards();
                $body
            }
            EntityKind::Kpi => {
                let $api = $client.kpis();
                $body
            }
            EntityKind::Employee => {
                let $api = $client.employees();
                $body
            }
            EntityKind::Objective => {
                let $api = $client.objectives();
                $body
            }
            EntityKind::Organization => {
                let $api = $client.organizations();
                $body
            }
            EntityKind::Pdca => {
                let $api = $client.pdca_cycles();
                $body
            }
        }
    };
}

pub async fn run(command: &Command, client: &HillfogClient, store: Arc<dyn SessionStore>) -> Result<Value> {
    match command {
        Command::List(args) => {
            let params = args.query(client.config().default_page_size);
            with_entity_api!(client, args.entity, |api| page_value(api.list(&params).await?))
        }
        Command::Get { entity, id } => {
            with_entity_api!(client, *entity, |api| to_value(&api.get(id).await?))
        }
        Command::Delete { entity, id } => {
            with_entity_api!(client, *entity, |api| api.delete(id).await?);
            tracing::info!("Deleted {:?} {}", entity, id);
            Ok(json!({ "deleted": id }))
        }
        Command::Measures(args) => {
            let mut query = MeasureDataQuery::new(args.kpi.clone(), args.date.clone(), args.frequency);
            if let Some(employee) = &args.employee {
                query = query.employee(employee.clone());
            }
            if let Some(organization) = &args.organization {
                query = query.organization(organization.clone());
            }
            page_value(client.measure_data().query(&query).await?)
        }
        Command::Whoami => {
            let auth = client.auth(store);
            let user = match auth.current_user().await? {
                Some(user) => Some(user),
                None => auth.check_session().await?,
            };
            Ok(match user {
                Some(user) => to_value(&user)?,
                None => Value::Null,
            })
        }
        Command::Logout => {
            client.auth(store).logout().await?;
            Ok(json!({ "loggedOut": true }))
        }
    }
}

fn to_value(value: &impl Serialize) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize result")
}

fn page_value<T: Serialize>(page: Page<T>) -> Result<Value> {
    to_value(&page)
}

pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to render JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
    }
}
