//! gh-digest CLI - email a digest of unread GitHub notifications.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gh_digest::config::DigestConfig;
use gh_digest::digest::DigestMessage;
use gh_digest::github::GitHubClient;
use gh_digest::mail::EmailSender;
use gh_digest::pipeline::Pipeline;

/// gh-digest - Group unread GitHub notifications into one email.
#[derive(Parser)]
#[command(name = "gh-digest")]
#[command(about = "Email a digest of unread GitHub notifications")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, send the digest, and mark notifications read (for cron use)
    Run {
        /// Leave notifications unread after sending
        #[arg(long)]
        no_mark_read: bool,
    },

    /// Print the digest without sending or marking anything read
    Preview {
        /// Print the HTML alternative instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Send a test email to verify SMTP settings
    TestEmail,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    let config = DigestConfig::from_env()?;

    match cli.command {
        Commands::Run { no_mark_read } => run(config, !no_mark_read).await,
        Commands::Preview { html } => run_preview(config, html).await,
        Commands::TestEmail => run_test_email(config).await,
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "gh_digest=debug,info"
    } else {
        "gh_digest=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

async fn run(config: DigestConfig, mark_read: bool) -> Result<()> {
    let source = GitHubClient::new(config.github)?;
    let mailer = EmailSender::new(config.mail);
    let pipeline = Pipeline::new(source, mailer).with_mark_read(mark_read);

    match pipeline.run().await {
        Ok(report) => {
            if !report.failed_acknowledgements.is_empty() {
                tracing::warn!(
                    threads = ?report.failed_acknowledgements,
                    "Some notifications could not be marked as read"
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Digest run failed");
            Err(e.into())
        }
    }
}

async fn run_preview(config: DigestConfig, html: bool) -> Result<()> {
    let source = GitHubClient::new(config.github)?;
    let mailer = EmailSender::new(config.mail);
    let pipeline = Pipeline::new(source, mailer).with_mark_read(false);

    let (_, digest) = pipeline.preview().await.inspect_err(|e| {
        tracing::error!(error = %e, "Preview failed");
    })?;

    if digest.is_empty() {
        println!("🎉 No unread notifications!");
        return Ok(());
    }

    let message = DigestMessage::from_digest(&digest);
    if html {
        println!("{}", message.html_body);
    } else {
        println!("{}", message.text_body);
    }

    Ok(())
}

async fn run_test_email(config: DigestConfig) -> Result<()> {
    let sender = EmailSender::new(config.mail);
    sender.send_test().await.inspect_err(|e| {
        tracing::error!(error = %e, "Test email failed");
    })?;
    println!("✅ Test email sent");
    Ok(())
}
