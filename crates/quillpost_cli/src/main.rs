//! Command-line client for the QuillPost API.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use quillpost_core::constants::DEFAULT_SERVER_URL;
use quillpost_core::models::blog::{Blog, BlogStatus};
use quillpost_editor::{
    Author, BlogBackend, DraftEditor, EditorOptions, HttpBackend, SaveOutcome, SharedSurface,
    StaticIdentity,
};
use std::fmt::Display;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "quill", about = "QuillPost CLI", version)]
struct Cli {
    /// Server URL (can also be set via QUILL_SERVER env var)
    #[arg(short, long, env = "QUILL_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List an author's drafts and posts, newest first
    List {
        #[arg(short, long, env = "QUILL_AUTHOR_ID")]
        author: String,
        /// Only `draft` or `published`
        #[arg(long)]
        status: Option<BlogStatus>,
    },
    /// Print one post (published row first, then draft)
    Get { id: String },
    /// Count one view of a published post
    Views { id: String },
    /// Delete a draft
    Delete { id: String },
    /// Delete several drafts and posts
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Save a draft from a file or stdin, optionally publishing it
    Compose {
        #[arg(long)]
        title: String,
        #[arg(short, long)]
        file: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Continue an existing draft or published post
        #[arg(long)]
        draft_id: Option<String>,
        #[arg(long, env = "QUILL_AUTHOR_ID")]
        author_id: Option<String>,
        #[arg(long, env = "QUILL_AUTHOR_NAME")]
        author_name: Option<String>,
        #[arg(long)]
        publish: bool,
    },
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn fail(action: &str, err: impl Display) -> ! {
    eprintln!("{} failed: {}", action, err);
    std::process::exit(1);
}

fn encode_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn format_summary_output(blogs: &[Blog], json: bool) -> Result<String, String> {
    if json {
        return encode_json(blogs);
    }

    let rows: Vec<String> = blogs
        .iter()
        .map(|blog| {
            format!(
                "{:<36} {:<10} {:>6} {}",
                blog.id, blog.status, blog.views, blog.title
            )
        })
        .collect();
    Ok(rows.join("\n"))
}

fn format_get_output(blog: &Blog, json: bool) -> Result<String, String> {
    if json {
        return encode_json(blog);
    }
    Ok(format!(
        "{} [{}] by {}\n\n{}",
        blog.title, blog.status, blog.author_name, blog.content
    ))
}

fn identity_for(author_id: Option<String>, author_name: Option<String>) -> StaticIdentity {
    match author_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let name = author_name.unwrap_or_else(|| id.clone());
            StaticIdentity::new(Author::new(id.trim(), name))
        }
        None => StaticIdentity::anonymous(),
    }
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn resolve_server(server: Option<String>) -> String {
    server
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

fn read_content(file: Option<String>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let server = normalize_server(resolve_server(server));
    let backend = match HttpBackend::new(&server, Duration::from_secs(timeout)) {
        Ok(backend) => Arc::new(backend),
        Err(err) => fail("Connect", err),
    };

    match command {
        Commands::Completions { .. } => {}
        Commands::List { author, status } => {
            let start = Instant::now();
            let blogs = backend
                .get_user_blogs(&author, status)
                .await
                .unwrap_or_else(|err| fail("List", err));
            log_timing(timing, "list", start.elapsed());
            let output = format_summary_output(&blogs, json).unwrap_or_else(|err| fail("List", err));
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Get { id } => {
            let start = Instant::now();
            let blog = match backend.get_blog(&id).await {
                Ok(Some(blog)) => blog,
                Ok(None) => fail("Get", format!("no post or draft with id '{}'", id)),
                Err(err) => fail("Get", err),
            };
            log_timing(timing, "get", start.elapsed());
            println!(
                "{}",
                format_get_output(&blog, json).unwrap_or_else(|err| fail("Get", err))
            );
        }
        Commands::Views { id } => {
            let start = Instant::now();
            let views = match backend.increment_views(&id).await {
                Ok(Some(views)) => views,
                Ok(None) => fail("Views", format!("no published post with id '{}'", id)),
                Err(err) => fail("Views", err),
            };
            log_timing(timing, "views", start.elapsed());
            if json {
                println!("{}", serde_json::json!({ "id": id, "views": views }));
            } else {
                println!("{}: {} view(s)", id, views);
            }
        }
        Commands::Delete { id } => {
            let start = Instant::now();
            let deleted = backend
                .delete_draft(&id)
                .await
                .unwrap_or_else(|err| fail("Delete", err));
            log_timing(timing, "delete", start.elapsed());
            if !deleted {
                fail("Delete", format!("no draft with id '{}'", id));
            }
            println!("Deleted draft: {}", id);
        }
        Commands::BulkDelete { ids } => {
            let start = Instant::now();
            let deleted = backend
                .bulk_delete_blogs(&ids)
                .await
                .unwrap_or_else(|err| fail("Bulk delete", err));
            log_timing(timing, "bulk-delete", start.elapsed());
            println!("Deleted {} of {} id(s)", deleted, ids.len());
        }
        Commands::Compose {
            title,
            file,
            tags,
            draft_id,
            author_id,
            author_name,
            publish,
        } => {
            let content = read_content(file)?;
            let editor = DraftEditor::start(
                backend,
                Arc::new(SharedSurface::new(&content)),
                Arc::new(identity_for(author_id, author_name)),
                draft_id.as_deref(),
                EditorOptions::default(),
            );
            editor.title_changed(&title);
            editor.tags_changed(&tags);

            let start = Instant::now();
            match editor.save_now().await {
                SaveOutcome::Saved { at } => {
                    println!("Saved draft {} at {}", editor.draft_id(), at.to_rfc3339());
                }
                SaveOutcome::Rejected(err) => fail("Save", err),
                SaveOutcome::Failed { message } => fail("Save", message),
                SaveOutcome::Skipped(reason) => fail("Save", format!("{:?}", reason)),
            }
            log_timing(timing, "save", start.elapsed());

            if publish {
                let start = Instant::now();
                let receipt = editor
                    .publish()
                    .await
                    .unwrap_or_else(|err| fail("Publish", err));
                log_timing(timing, "publish", start.elapsed());
                println!("Published: {}", receipt.post_id);
                if !receipt.draft_deleted {
                    eprintln!("Draft {} was not removed", receipt.retired_draft_id);
                }
            }
        }
    }

    Ok(())
}
