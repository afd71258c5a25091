use clap::Parser;
use refire::prelude::*;
use std::fs;
use std::process;

/// Replay a saved generation workflow with new field values
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow document JSON file (a saved workflow or a
    /// captured submission request)
    document_path: String,

    /// Update list: an inline JSON array of single-key objects, or
    /// @path/to/updates.json
    #[arg(short, long, default_value = "")]
    updates: String,

    /// List the form's exposed fields and exit
    #[arg(short, long)]
    describe: bool,

    /// Submit the compiled payload instead of printing it
    #[arg(short, long)]
    submit: bool,

    /// Backend base URL
    #[arg(long, default_value = "http://localhost:9090")]
    url: String,

    /// Target queue id
    #[arg(long, default_value = "default")]
    queue: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let document = WorkflowDocument::from_file(&cli.document_path)?;
    let resolver = Resolver::new(&document);

    if cli.describe {
        let summary = resolver.describe();
        if summary.is_empty() {
            println!("The form exposes no fields.");
        } else {
            println!("{summary}");
        }
        return Ok(());
    }

    let updates = load_updates(&cli.updates)?;
    let overrides = resolver.apply(&updates)?;
    let payload = compile(&document, &overrides)?;

    if cli.submit {
        let client = HttpQueueClient::new(cli.url).with_queue(cli.queue);
        let outcome = SubmitOutcome::from_result(client.enqueue(&payload));
        println!("{}: {}", outcome.status, outcome.message);
        if outcome.status == SubmitStatus::Failed {
            process::exit(1);
        }
    } else {
        println!("{}", payload.to_pretty_string());
    }

    Ok(())
}

/// Reads the update list from the CLI argument, following an `@` prefix
/// to a file.
fn load_updates(raw: &str) -> Result<UpdateList> {
    if let Some(path) = raw.strip_prefix('@') {
        let content = fs::read_to_string(path)?;
        Ok(UpdateList::from_json(&content)?)
    } else {
        Ok(UpdateList::from_json(raw)?)
    }
}
