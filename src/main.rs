use clap::{ArgGroup, Parser, Subcommand};
use merit_board::{
    config::Settings,
    dashboard::BoardState,
    models::ScoreCategory,
    scoring::{
        award::{find_log_row, items_for, AwardRequest, AwardTarget, EditLogRequest, ScoreChoice},
        board,
        compute_ranks, GroupFilter, History, LogFilter, MonthlyStatus,
    },
    source::{JsonFileSource, SnapshotSource},
};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "merit-board")]
#[clap(about = "Rankings, titles and rewards for a classroom points board", long_about = None)]
struct Cli {
    /// Snapshot JSON exported from the spreadsheet web app
    #[clap(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Settings file (TOML, YAML or JSON)
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List student cards
    Students {
        /// Only show one group
        #[clap(short, long)]
        group: Option<String>,

        /// Sort by cumulative score
        #[clap(long)]
        sorted: bool,
    },

    /// Dense rank of every student inside their group
    Ranks,

    /// Title progress, monthly standing and history for one student
    Student {
        name: String,

        /// History page to show
        #[clap(short, long, default_value = "1")]
        page: usize,
    },

    /// Groups and their members
    Groups,

    /// Link to the e-learning review site
    Link,

    /// Title catalogue with current holders
    Titles,

    /// Gifts by tier, in-stock first
    Gifts,

    /// Point log, optionally filtered
    Logs {
        #[clap(short, long)]
        group: Option<String>,

        #[clap(long)]
        student: Option<String>,
    },

    /// Newest log entries for the ticker
    Marquee,

    /// This week's verse and the archive
    Verse {
        /// Day to evaluate (YYYY-MM-DD), defaults to today
        #[clap(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Prepare an award or deduction request
    #[clap(group(ArgGroup::new("target").args(["student", "group"]).required(true)))]
    #[clap(group(ArgGroup::new("amount").args(["points", "custom"]).required(true)))]
    Award {
        /// Acting teacher account
        #[clap(long)]
        teacher: String,

        #[clap(long)]
        student: Option<String>,

        #[clap(long)]
        group: Option<String>,

        /// Group members to leave out
        #[clap(long, value_delimiter = ',')]
        exclude: Vec<String>,

        #[clap(long)]
        item: String,

        /// One of the preset point values
        #[clap(long)]
        points: Option<u32>,

        /// Any positive point value
        #[clap(long)]
        custom: Option<f64>,

        /// Deduct instead of award
        #[clap(long)]
        deduct: bool,
    },

    /// Prepare a correction to one logged entry
    EditLog {
        /// Spreadsheet row of the entry
        row: u64,

        /// New student name, defaults to the current one
        #[clap(long)]
        name: Option<String>,

        /// New point value, defaults to the current one
        #[clap(long, allow_hyphen_values = true)]
        score: Option<f64>,

        /// New item, defaults to the current one
        #[clap(long)]
        item: Option<String>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fmt_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let (settings, load_error) = match &cli.config {
        Some(path) => (Settings::from_file(path)?, None),
        None => Settings::load_or_default(),
    };
    init_logging(&settings.app.log_level);
    if let Some(e) = load_error {
        warn!("Could not load settings, using defaults: {}", e);
    }

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.source.snapshot_path));
    let source = JsonFileSource::new(&path);
    info!("Loading board data from {}", source.describe());

    let mut state = BoardState::new(Default::default(), settings.board.clone());
    state.refresh(&source).await?;

    match cli.command {
        Commands::Students { group, sorted } => {
            state.set_filter(GroupFilter::from_option(group.as_deref()));
            if sorted {
                state.toggle_sort();
            }
            let cards = state.student_cards();
            if cli.json {
                return print_json(&cards);
            }
            for card in cards {
                let medal = card.medal.map(|m| format!(" [{:?}]", m)).unwrap_or_default();
                let title = card.title.map(|t| format!(" ({}) {}", fmt_score(t.score), t.title)).unwrap_or_default();
                let king = if card.monthly_king { " 👑" } else { "" };
                println!(
                    "{:<12} {:<10} 🌟 {:>5}  💡 {:>5}{}{}{}",
                    card.name,
                    settings.group_label(card.group),
                    fmt_score(card.total_score),
                    fmt_score(card.cumulative_score),
                    medal,
                    title,
                    king
                );
            }
        }

        Commands::Ranks => {
            let ranks = compute_ranks(&state.snapshot.students);
            if cli.json {
                return print_json(&ranks);
            }
            for (name, rank) in ranks {
                println!("{:<12} #{}", name, rank);
            }
        }

        Commands::Student { name, page } => {
            state.open_student(&name);
            state.history.page = page.max(1);
            let detail = state
                .student_detail()
                .ok_or_else(|| anyhow::anyhow!("No student named {}", name))?;
            if cli.json {
                return print_json(&detail);
            }

            println!("\n=== {} ({}) ===", detail.name, settings.group_label(detail.group));
            if let Some(rank) = detail.rank {
                println!("Group rank: #{}", rank);
            }
            match &detail.progress {
                Some(progress) if progress.is_max_tier() => {
                    println!("Title: {} (top tier reached)", progress.current.title)
                }
                Some(progress) => match (&progress.next, progress.points_to_next) {
                    (Some(next), Some(gap)) => println!(
                        "Title: {} ({:.0}%), {} more points to {}",
                        progress.current.title,
                        progress.percent,
                        fmt_score(gap),
                        next.title
                    ),
                    _ => println!("Title: {}", progress.current.title),
                },
                None => println!("Titles are not enabled"),
            }

            let monthly = &detail.monthly;
            match &monthly.status {
                MonthlyStatus::NoActivity => println!("This month: {} (no activity in group yet)", fmt_score(monthly.monthly_score)),
                MonthlyStatus::Leading => println!("This month: {} 👑 group leader", fmt_score(monthly.monthly_score)),
                MonthlyStatus::Trailing { gap } => println!(
                    "This month: {} ({} behind {})",
                    fmt_score(monthly.monthly_score),
                    fmt_score(*gap),
                    monthly.leader_name.as_deref().unwrap_or("?")
                ),
            }

            match &detail.history {
                History::NoHistory => println!("\nNo history yet"),
                History::Page(page) => {
                    let prev = if page.has_previous() { "◀ " } else { "" };
                    let next = if page.has_next() { " ▶" } else { "" };
                    println!("\nHistory {}{}/{}{}", prev, page.current_page, page.total_pages, next);
                    for log in &page.logs {
                        let when = log.time.map(|t| t.format("%m/%d").to_string()).unwrap_or_default();
                        let sign = if log.is_award() { "+" } else { "" };
                        println!("  {:<6} {:<20} {}{}", when, log.item, sign, fmt_score(log.score));
                    }
                }
            }
        }

        Commands::Groups => {
            let mut roster = Vec::new();
            for group in state.group_names() {
                let filter = GroupFilter::Group(group.to_string());
                let members = board::student_options(&state.snapshot.students, &filter);
                roster.push((group, members));
            }
            if cli.json {
                return print_json(&roster);
            }
            for (group, members) in roster {
                println!("{:<10} {}", settings.group_label(group), members.join(", "));
            }
        }

        Commands::Link => match state.e_learning_link() {
            Some(url) => println!("{}", url),
            None => println!("No e-learning link configured"),
        },

        Commands::Titles => {
            let catalogue = state.title_catalogue();
            if cli.json {
                return print_json(&catalogue);
            }
            if catalogue.is_empty() {
                println!("No titles configured");
            }
            for entry in catalogue {
                println!("🏆 {:>5}  {:<12} {}", fmt_score(entry.rule.score), entry.rule.title, entry.holders.join(", "));
            }
        }

        Commands::Gifts => {
            let shelves = state.gift_shelves();
            if cli.json {
                return print_json(&shelves);
            }
            for shelf in shelves {
                println!("\n{} ({})", shelf.tier.name, shelf.tier.range);
                if shelf.gifts.is_empty() {
                    println!("  (no gifts)");
                }
                for gift in shelf.gifts {
                    let stock = if gift.is_sold_out() { "  SOLD OUT" } else { "" };
                    println!("  {:<20} {:>4} pts{}", gift.name, fmt_score(gift.required_score), stock);
                }
            }
        }

        Commands::Logs { group, student } => {
            let filter = LogFilter {
                group: GroupFilter::from_option(group.as_deref()),
                student,
            };
            let lines = state.logs(&filter);
            if cli.json {
                return print_json(&lines);
            }
            if lines.is_empty() {
                println!("No matching records");
            }
            for line in lines {
                let when = line.entry.time.map(|t| t.format("%m/%d %H:%M").to_string()).unwrap_or_default();
                let sign = if line.entry.is_award() { "+" } else { "" };
                println!(
                    "{:<12} {:<12} {:<12} {:<20} {}{}",
                    when,
                    line.entry.student,
                    line.teacher_name,
                    line.entry.item,
                    sign,
                    fmt_score(line.entry.score)
                );
            }
        }

        Commands::Marquee => {
            let recent = state.marquee();
            if cli.json {
                return print_json(&recent);
            }
            for log in recent {
                let when = log.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default();
                let sign = if log.is_award() { "+" } else { "" };
                println!("[{}] {} {}{} ({})", when, log.student, sign, fmt_score(log.score), log.item);
            }
        }

        Commands::Verse { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let verses = state.verses(today);
            if cli.json {
                return print_json(&verses);
            }
            match verses.current {
                Some(v) => println!("{} ~ {}\n{}\n  {}", v.start_date, v.end_date, v.text, v.reference),
                None => println!("No verse for this week"),
            }
            for v in verses.others {
                println!("\n{} ~ {}  {} ({})", v.start_date, v.end_date, v.text, v.reference);
            }
        }

        Commands::Award { teacher, student, group, exclude, item, points, custom, deduct } => {
            let category = if deduct { ScoreCategory::Deduct } else { ScoreCategory::Add };
            let known = items_for(&state.snapshot.items, category);
            if !known.is_empty() && !known.iter().any(|it| it.name == item) {
                return Err(anyhow::anyhow!("Item {} is not a {} item", item, category.as_str()));
            }

            let choice = match (points, custom) {
                (Some(p), _) => {
                    if !category.presets().contains(&p) {
                        return Err(anyhow::anyhow!(
                            "{} is not a preset for {}; use --custom",
                            p,
                            category.as_str()
                        ));
                    }
                    ScoreChoice::Preset(p)
                }
                (None, Some(c)) => ScoreChoice::Custom(c),
                (None, None) => unreachable!("clap enforces an amount"),
            };
            let target = match (student, group) {
                (Some(s), _) => AwardTarget::Student(s),
                (None, Some(g)) => AwardTarget::Group(g),
                (None, None) => unreachable!("clap enforces a target"),
            };
            let excluded: HashSet<String> = exclude.into_iter().collect();

            let request = AwardRequest::build(&teacher, &target, &item, choice, &excluded, &state.snapshot.students)?;
            print_json(&request)?;
        }

        Commands::EditLog { row, name, score, item } => {
            let entry = find_log_row(&state.snapshot.logs, row)?;
            let request = EditLogRequest::build(
                entry,
                name.as_deref().unwrap_or(&entry.student),
                score.unwrap_or(entry.score),
                item.as_deref().unwrap_or(&entry.item),
            )?;
            print_json(&request)?;
        }
    }

    Ok(())
}
