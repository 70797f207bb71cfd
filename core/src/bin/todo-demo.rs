use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_client::{ClientConfig, Credentials, TodoServiceClient};

/// Create a todo, delete one by id, then print every todo on the service.
#[derive(Debug, Parser)]
#[command(name = "todo-demo", version)]
struct Args {
    /// Root URL the REST endpoints live under.
    #[arg(
        long,
        env = "TODO_BASE_URL",
        default_value = "http://todo.eastus.cloudapp.azure.com/todo-android"
    )]
    base_url: String,

    #[arg(long, env = "TODO_USERNAME", default_value = "test")]
    username: String,

    #[arg(long, env = "TODO_PASSWORD", default_value = "test", hide_env_values = true)]
    password: String,

    /// Id of the todo to delete.
    #[arg(long, default_value_t = 2)]
    delete_id: i64,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_client=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ClientConfig::new(&args.base_url, Credentials::new(args.username, args.password));
    let client = TodoServiceClient::new(config);

    match client.create_todo("Class", "Finish class", 6) {
        Some(todo) => match todo.id() {
            Some(id) => println!("New ID: {id}"),
            None => println!("New ID: null"),
        },
        None => println!("Unable to create todo"),
    }

    println!("Removing todo");
    client.delete_todo(args.delete_id);

    println!("ALL TODOS");
    if let Some(todos) = client.list_todos() {
        for todo in &todos {
            println!("{todo}");
        }
    }
}
