use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::agent::Agent;
use crate::cli::Platform;
use crate::config::Config;
use crate::output;
use crate::Result;

/// Run the interactive form: video id, platform choice, query, then
/// render the generated post (or the error) and offer to save it.
/// `quiet` disables the progress spinner.
pub async fn run(config: &Config, quiet: bool) -> Result<()> {
    let agent = Agent::from_config(config, Agent::policy_from(config, None, None))?;
    let term = Term::stdout();

    term.write_line(&format!(
        "{}",
        style("Social Media Post Generator").cyan().bold()
    ))?;
    term.write_line(
        "Generate posts for LinkedIn, Instagram, Facebook, or Twitter(X) from a YouTube video.",
    )?;
    term.write_line("")?;

    loop {
        let video_id = prompt_line(&term, "YouTube video ID (e.g. VJgdOMXhEj0)")?;
        let platform = prompt_platform(&term)?;
        let query = prompt_line(&term, "Your query (e.g. \"Summarize the key takeaways\")")?;

        if video_id.is_empty() || query.is_empty() {
            term.write_line(&format!(
                "{}",
                style("Please enter both a video ID and a query.").yellow()
            ))?;
            continue;
        }

        let spinner = (!quiet).then(|| spinner("Generating your post..."));
        let result = agent.run(&video_id, platform.as_str(), &query).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(post) => {
                term.write_line(&format!(
                    "{}",
                    style(format!("Generated post for {platform}")).green().bold()
                ))?;
                term.write_line("")?;
                term.write_line(&post.content)?;
                term.write_line("")?;

                if confirm(&term, "Save post to file?")? {
                    let path = output::default_path(config, platform.as_str());
                    output::save_to_file(&post, &path).await?;
                    term.write_line(&format!("Saved to: {}", path.display()))?;
                }
            }
            Err(e) => {
                term.write_line(&format!("{}", style(format!("Error: {e}")).red()))?;
            }
        }

        term.write_line("")?;
        if !confirm(&term, "Generate another post?")? {
            break;
        }
        term.write_line("")?;
    }

    Ok(())
}

fn prompt_line(term: &Term, prompt: &str) -> Result<String> {
    term.write_str(&format!("{}: ", style(prompt).bold()))?;
    Ok(term.read_line()?.trim().to_string())
}

fn prompt_platform(term: &Term) -> Result<Platform> {
    term.write_line(&format!("{}:", style("Choose a platform").bold()))?;
    for (i, platform) in Platform::ALL.iter().enumerate() {
        term.write_line(&format!("  {}. {}", i + 1, platform))?;
    }

    loop {
        term.write_str("Selection [1]: ")?;
        let input = term.read_line()?;
        let input = input.trim();

        if input.is_empty() {
            return Ok(Platform::ALL[0]);
        }

        match input.parse::<usize>() {
            Ok(n) if (1..=Platform::ALL.len()).contains(&n) => return Ok(Platform::ALL[n - 1]),
            _ => {
                term.write_line(&format!(
                    "{}",
                    style(format!("Enter a number from 1 to {}.", Platform::ALL.len())).yellow()
                ))?;
            }
        }
    }
}

fn confirm(term: &Term, prompt: &str) -> Result<bool> {
    term.write_str(&format!("{} [y/N]: ", style(prompt).bold()))?;
    let input = term.read_line()?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    progress.set_message(message.to_string());
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress
}
