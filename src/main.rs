use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Locale, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podcastr::{
    BuildEvent, DateFormatter, NoopReporter, PageOptions, Player, ProgressReporter, ReqwestClient,
    RetryPolicy, Section, SharedProgressReporter, StaticPage, build_home_page,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static RETRY: Emoji<'_, '_> = Emoji("🔁 ", "[r] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static PLAY: Emoji<'_, '_> = Emoji("▶️  ", "> ");
static CLOCK: Emoji<'_, '_> = Emoji("⏰ ", "[t] ");

/// Build the podcastr home page from the episodes API
#[derive(Parser, Debug)]
#[command(name = "podcastr")]
#[command(about = "Build the podcastr home page from the episodes API")]
#[command(version)]
struct Args {
    /// Base URL of the episodes API
    #[arg(long, env = "PODCASTR_API_URL", default_value = "http://localhost:3333")]
    api_url: String,

    /// Locale used for publish dates
    #[arg(long, value_enum, default_value_t = DisplayLocale::PtBr)]
    locale: DisplayLocale,

    /// Maximum number of fetch attempts
    #[arg(long, default_value = "3")]
    attempts: u32,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch episodes and print the home page
    Build {
        /// Write the page props as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep running and rebuild every revalidation interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Select an episode and print the resulting playback queue
    Play {
        /// Section the episode is picked from
        #[arg(value_enum)]
        section: SectionArg,

        /// Index of the episode within that section
        index: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DisplayLocale {
    PtBr,
    EnUs,
}

impl From<DisplayLocale> for Locale {
    fn from(locale: DisplayLocale) -> Self {
        match locale {
            DisplayLocale::PtBr => Locale::pt_BR,
            DisplayLocale::EnUs => Locale::en_US,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SectionArg {
    Latest,
    All,
}

impl From<SectionArg> for Section {
    fn from(section: SectionArg) -> Self {
        match section {
            SectionArg::Latest => Section::Latest,
            SectionArg::All => Section::All,
        }
    }
}

/// Progress reporter using an indicatif spinner for terminal output
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: BuildEvent) {
        match event {
            BuildEvent::FetchingEpisodes { url } => {
                self.bar
                    .set_message(format!("{SEARCH}Fetching episodes: {}", url.cyan()));
            }

            BuildEvent::FetchRetrying {
                attempt,
                max_attempts,
                delay,
                error,
            } => {
                self.bar.println(format!(
                    "{RETRY}Attempt {}/{} failed: {} (retrying in {:?})",
                    attempt.to_string().yellow(),
                    max_attempts,
                    error.red(),
                    delay
                ));
            }

            BuildEvent::EpisodesFetched { count } => {
                self.bar.set_message(format!(
                    "{HEADPHONES}{} episodes fetched",
                    count.to_string().cyan()
                ));
            }

            BuildEvent::PageBuilt {
                latest_count,
                all_count,
            } => {
                self.bar.finish_and_clear();
                println!(
                    "{SUCCESS}{} {} latest, {} in table",
                    "Page built:".bold().green(),
                    latest_count.to_string().green().bold(),
                    all_count.to_string().cyan()
                );
            }

            BuildEvent::PropsWritten { path } => {
                println!(
                    "{SUCCESS}Props written to {}",
                    path.display().to_string().cyan()
                );
            }
        }
    }
}

fn make_reporter(quiet: bool) -> SharedProgressReporter {
    if quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    }
}

async fn build_once(
    client: &ReqwestClient,
    args: &Args,
    options: &PageOptions,
    reporter: &SharedProgressReporter,
) -> Result<StaticPage> {
    build_home_page(client, &args.api_url, options, reporter)
        .await
        .context("Failed to build home page")
}

fn print_page(
    page: &StaticPage,
    args: &Args,
    output: Option<&PathBuf>,
    reporter: &SharedProgressReporter,
) -> Result<()> {
    if let Some(path) = output {
        page.write_props(path, reporter)
            .with_context(|| format!("Failed to write props to {}", path.display()))?;
    }

    if !args.quiet {
        println!("\n{}", page.render_text());
    }
    Ok(())
}

fn print_queue(player: &Player) {
    for (index, episode) in player.queue().iter().enumerate() {
        let line = format!(
            "{:>3}. {} ({})",
            index,
            episode.title,
            episode.duration_as_string.dimmed()
        );
        if index == player.current_index() {
            println!("{PLAY}{}", line.bold().green());
        } else {
            println!("   {line}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podcastr".bold().magenta(),
            "- Home page builder".dimmed()
        );
    }

    let client = ReqwestClient::with_timeout(Duration::from_secs(args.timeout))
        .context("Failed to create HTTP client")?;

    let options = PageOptions {
        formatter: DateFormatter::new(args.locale.into()),
        retry: RetryPolicy {
            attempts: args.attempts,
            ..Default::default()
        },
        ..Default::default()
    };

    match &args.command {
        Command::Build { output, watch } => loop {
            let reporter = make_reporter(args.quiet);
            let page = build_once(&client, &args, &options, &reporter).await?;
            print_page(&page, &args, output.as_ref(), &reporter)?;

            if !*watch {
                break;
            }

            if let Some(next) = page.next_revalidation() {
                println!(
                    "{CLOCK}Next rebuild at {}",
                    next.to_rfc3339().cyan()
                );
            }
            while !page.is_stale(Utc::now()) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
        },

        Command::Play { section, index } => {
            let reporter = make_reporter(args.quiet);
            let page = build_once(&client, &args, &options, &reporter).await?;
            let section = Section::from(*section);
            let section_len = match section {
                Section::Latest => page.props.latest_episodes.len(),
                Section::All => page.props.all_episodes.len(),
            };
            if *index >= section_len {
                bail!("{section:?} section only has {section_len} episode(s), no index {index}");
            }

            let mut player = Player::new();
            player.play_list(page.props.select(section, *index));
            print_queue(&player);
        }
    }

    Ok(())
}
