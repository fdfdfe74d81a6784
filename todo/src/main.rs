//! Command-line walkthrough of the to-do lists.
//!
//! Loads lists from `TODO_DATA_DIR`, makes a few changes, persists them and
//! prints the result. Running it twice shows the data surviving restarts.

use anyhow::Context;
use std::sync::Arc;
use tasklist_core::environment::{ClockIds, SystemClock};
use tasklist_runtime::Store;
use tasklist_storage::FileStore;
use todo::{TodoAction, TodoConfig, TodoEnvironment, TodoFields, TodoReducer, TodoState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TodoConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "starting");

    let files = FileStore::open(&config.data_dir)
        .await
        .with_context(|| format!("cannot open {}", config.data_dir.display()))?;
    let ids = Arc::new(ClockIds::new(Arc::new(SystemClock)));
    let env = TodoEnvironment::new(ids, Arc::new(files))
        .with_default_list_name(config.default_list_name.clone());
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    println!("=== To-Do Lists ===\n");
    store.send(TodoAction::LoadLists).await.wait().await?;
    print_lists(&store.state(Clone::clone).await);

    println!("\nAdding a Groceries list...");
    store
        .send(TodoAction::AddList {
            name: "Groceries".to_string(),
        })
        .await
        .wait()
        .await?;

    for fields in [
        TodoFields::titled("Buy milk").with_description("2 liters, semi-skimmed"),
        TodoFields::titled("Bread"),
        TodoFields::titled(""),
    ] {
        store
            .send(TodoAction::AddTodo { fields })
            .await
            .wait()
            .await?;
        let outcome = store
            .state(|s| {
                s.last_error
                    .map(|e| format!("rejected: {e}"))
                    .or_else(|| s.last_notice.map(|n| n.to_string()))
            })
            .await;
        if let Some(outcome) = outcome {
            println!("  {outcome}");
        }
    }

    if let Some(first) = store.state(|s| s.visible.first().map(|t| t.id)).await {
        store
            .send(TodoAction::ToggleComplete { id: first })
            .await
            .wait()
            .await?;
    }

    println!("\nSearching for \"milk\"...");
    store
        .send(TodoAction::Search {
            query: "milk".to_string(),
        })
        .await
        .wait()
        .await?;
    for todo in store.state(|s| s.visible.clone()).await {
        println!("  found: {}", todo.title);
    }
    store
        .send(TodoAction::Search {
            query: String::new(),
        })
        .await
        .wait()
        .await?;

    store.send(TodoAction::Persist).await.wait().await?;

    println!();
    print_lists(&store.state(Clone::clone).await);
    println!("\nSaved to {}", config.data_dir.display());

    Ok(())
}

fn print_lists(state: &TodoState) {
    for list in &state.lists {
        let marker = if Some(list.id) == state.current_list_id {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {} ({}/{} done)",
            list.name,
            list.completed_count(),
            list.todos.len()
        );
        for todo in &list.todos {
            let status = if todo.completed { "✓" } else { " " };
            println!("    [{status}] {}", todo.title);
        }
    }
}
