//! qg-form - terminal waitlist signup
//!
//! Walks through the same three steps as the landing page form: email,
//! optional profile, confirmation.

use anyhow::{Context, Result};
use clap::Parser;
use qg_common::ProfileField;
use qg_form::{FormController, FormError, HttpIntakeClient, WorkflowStep};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::error;

/// Command-line arguments for qg-form
#[derive(Parser, Debug)]
#[command(name = "qg-form")]
#[command(about = "Join the Quickgage waitlist from the terminal")]
#[command(version)]
struct Args {
    /// Base URL of the intake service
    #[arg(long, default_value = "http://localhost:3001", env = "QG_API_URL")]
    api_url: String,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qg_form=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = HttpIntakeClient::new(&args.api_url).context("Failed to build HTTP client")?;
    let mut form = FormController::new(client);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match form.step() {
            WorkflowStep::EmailEntry => {
                if let Some(error) = form.error() {
                    println!("! {}", error);
                }
                let Some(email) = prompt(&mut input, "Enter your email: ").await? else {
                    break;
                };
                form.set_email(email);
                form.submit_email_step();
            }
            WorkflowStep::ProfileEntry => {
                println!();
                println!("Help us prioritize your access (optional).");
                let Some(answer) =
                    prompt(&mut input, "Add details? [y/N] (N skips straight to the list): ").await?
                else {
                    break;
                };

                let skip = !answer.trim().eq_ignore_ascii_case("y");
                if !skip {
                    for field in ProfileField::ALL {
                        let label = format!("{} (optional): ", field.label());
                        let Some(value) = prompt(&mut input, &label).await? else {
                            return Ok(());
                        };
                        if !value.is_empty() {
                            form.set_profile_field(field, value);
                        }
                    }
                }

                match form.submit_final(skip).await {
                    Ok(_) => {}
                    // Reflected in the form state and shown on the next loop
                    Err(FormError::Client(_)) => {}
                    Err(e @ FormError::InvalidStep { .. }) => {
                        error!(error = %e, "Form left the profile step unexpectedly");
                        form.reset();
                    }
                }
            }
            WorkflowStep::Confirmation => {
                if let Some(position) = form.position() {
                    println!();
                    println!("You're on the list!");
                    println!("You're {} on the waitlist", position);
                    println!(
                        "We'll email you at {} when it's your turn.",
                        form.draft().email
                    );
                }
                if prompt(&mut input, "Press Enter to start over (Ctrl-D to quit) ")
                    .await?
                    .is_none()
                {
                    break;
                }
                form.reset();
            }
        }
    }

    Ok(())
}

/// Print `label` and read one line; `None` on end of input
async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let line = input.next_line().await.context("Failed to read stdin")?;
    Ok(line.map(|l| l.trim_end_matches(['\r', '\n']).to_string()))
}
