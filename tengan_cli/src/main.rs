use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tengan_core::*;

#[derive(Parser)]
#[command(name = "tengan")]
#[command(about = "ICL post-op eye-drop schedule tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current schedule, countdown and precautions (default)
    Status,

    /// Set the surgery date and day-0 dosing start time
    Setup {
        /// Surgery date (YYYY-MM-DD)
        date: NaiveDate,

        /// Day-0 start time (HH:MM)
        #[arg(value_parser = parse_time)]
        time: NaiveTime,
    },

    /// Mark the current dose as completed
    Done,

    /// Restart today's rotation at DEX (keeps the dose history)
    ResetToday,

    /// Wipe everything back to onboarding defaults
    ResetAll {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Live countdown that alerts once when the next dose is due
    Watch {
        /// Stop after this many ticks (for testing)
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Print calendar and timer deep links for the next dose
    Links {
        /// User-agent to sniff the timer-link platform from
        #[arg(long)]
        user_agent: Option<String>,
    },
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| Error::Config(format!("invalid time '{}': {}", s, e)))
}

fn main() -> Result<()> {
    // Initialize logging
    tengan_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let state_path = data_dir.join("schedule.json");

    match cli.command {
        Some(Commands::Setup { date, time }) => cmd_setup(&state_path, date, time),
        Some(Commands::Done) => cmd_done(&state_path),
        Some(Commands::ResetToday) => cmd_reset_today(&state_path),
        Some(Commands::ResetAll { yes }) => cmd_reset_all(&state_path, yes),
        Some(Commands::Watch { ticks }) => cmd_watch(&state_path, ticks),
        Some(Commands::Links { user_agent }) => cmd_links(&state_path, user_agent, &config),
        // Default to "status"
        Some(Commands::Status) | None => cmd_status(&state_path),
    }
}

fn cmd_status(state_path: &Path) -> Result<()> {
    let state = ScheduleState::load(state_path)?;
    let now = Local::now();
    let derived = derive_schedule(&state, now);

    if derived.status == ScheduleStatus::Onboarding {
        print_onboarding_hint();
        return Ok(());
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", header_text(&derived));
    println!("╰─────────────────────────────────────────╯");
    println!();

    match derived.next_drop_time {
        Some(next) => {
            let remaining = remaining_seconds(next, now);
            println!("  NEXT DROP IN  {}", format_countdown(remaining));
            println!("  予定: {}", next.format("%H:%M"));
        }
        None => println!("  点眼開始時刻が未設定です (setup で設定してください)"),
    }

    if !derived.current_medicines.is_empty() {
        println!();
        println!("  ▼ 次にさす目薬");
        for id in &derived.current_medicines {
            let medicine = catalog().get(*id);
            println!("    {} — {}", medicine.name, medicine.description);
        }
    }

    println!();
    println!("  生活の注意事項");
    for item in precautions_for(derived.days_post_op) {
        println!(
            "    {} {}: {}",
            status_mark(item.status),
            item.label,
            item.note
        );
    }
    println!();

    Ok(())
}

fn cmd_setup(state_path: &Path, date: NaiveDate, time: NaiveTime) -> Result<()> {
    // Setting the surgery info starts a fresh protocol timeline
    set_surgery_info(date, time).save(state_path)?;

    println!("✓ 設定を保存しました");
    println!("  手術日: {}", date);
    println!("  点眼開始: {}", time.format("%H:%M"));
    Ok(())
}

fn cmd_done(state_path: &Path) -> Result<()> {
    let now = Local::now();
    let state = ScheduleState::load(state_path)?;
    let derived = derive_schedule(&state, now);

    if derived.status == ScheduleStatus::Onboarding {
        print_onboarding_hint();
        return Ok(());
    }

    let next_state = mark_complete(&state, now);
    next_state.save(state_path)?;

    println!("✓ 点眼完了");

    let derived = derive_schedule(&next_state, now);
    if let Some(next) = derived.next_drop_time {
        let names: Vec<_> = derived
            .current_medicines
            .iter()
            .map(|id| catalog().get(*id).name.clone())
            .collect();
        println!("  次回: {} ({})", next.format("%H:%M"), names.join(", "));
    }
    Ok(())
}

fn cmd_reset_today(state_path: &Path) -> Result<()> {
    ScheduleState::update(state_path, |state| {
        *state = reset_today(state);
        Ok(())
    })?;

    println!("✓ 朝リセット: ローテーションを DEX から再開します");
    Ok(())
}

fn cmd_reset_all(state_path: &Path, yes: bool) -> Result<()> {
    if !yes {
        println!("本当にデータをリセットしますか？この操作は取り消せません。");
        println!("実行するには --yes を付けてください。");
        return Ok(());
    }

    reset_all_data().save(state_path)?;
    println!("✓ アプリを初期化しました");
    Ok(())
}

fn cmd_watch(state_path: &Path, ticks: Option<u64>) -> Result<()> {
    // Re-derive from freshly loaded state every tick; nothing is cached,
    // so a mutation from another invocation shows up within a second.
    let mut alerted_for: Option<DateTime<Local>> = None;
    let mut tick: u64 = 0;

    loop {
        let state = ScheduleState::load(state_path)?;
        let now = Local::now();
        let derived = derive_schedule(&state, now);

        let Some(next) = derived.next_drop_time else {
            println!();
            print_nothing_due_hint(derived.status);
            return Ok(());
        };

        let remaining = remaining_seconds(next, now);
        let names: Vec<_> = derived
            .current_medicines
            .iter()
            .map(|id| catalog().get(*id).name.clone())
            .collect();

        print!(
            "\r⏱ {:<10} 次: {}    ",
            format_countdown(remaining),
            names.join(", ")
        );
        io::stdout().flush()?;

        // One-shot alert on the transition to due; re-arms when the
        // next-drop time moves (e.g. after `done` elsewhere)
        if remaining <= 0 && alerted_for != Some(next) {
            println!();
            println!("\x07点眼の時間です: {}", names.join(", "));
            alerted_for = Some(next);
        }

        tick += 1;
        if let Some(limit) = ticks {
            if tick >= limit {
                println!();
                return Ok(());
            }
        }

        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}

fn cmd_links(state_path: &Path, user_agent: Option<String>, config: &Config) -> Result<()> {
    let state = ScheduleState::load(state_path)?;
    let now = Local::now();
    let derived = derive_schedule(&state, now);

    let Some(next) = derived.next_drop_time else {
        print_nothing_due_hint(derived.status);
        return Ok(());
    };

    println!(
        "カレンダー: {}",
        google_calendar_link(next, &derived.current_medicines)
    );

    let ua = user_agent.or_else(|| config.links.user_agent.clone());
    let platform = ua
        .as_deref()
        .map(Platform::from_user_agent)
        .unwrap_or(Platform::Other);

    match timer_link(
        platform,
        remaining_seconds(next, now),
        &derived.current_medicines,
    ) {
        Some(link) => println!("タイマー: {}", link),
        None => tracing::debug!("No timer link for platform {:?}", platform),
    }

    Ok(())
}

fn header_text(derived: &DerivedSchedule) -> String {
    match derived.status {
        ScheduleStatus::Day0 => "手術当日".to_string(),
        ScheduleStatus::Day1Plus => format!("術後 {}日目", derived.days_post_op),
        ScheduleStatus::Onboarding => "onboarding".to_string(),
    }
}

fn status_mark(status: PrecautionStatus) -> &'static str {
    match status {
        PrecautionStatus::Ok => "○",
        PrecautionStatus::Caution => "△",
        PrecautionStatus::Ng => "×",
    }
}

fn print_onboarding_hint() {
    println!("手術日が未設定です。");
    println!("  tengan setup <YYYY-MM-DD> <HH:MM> で手術日と点眼開始時刻を設定してください。");
}

fn print_nothing_due_hint(status: ScheduleStatus) {
    if status == ScheduleStatus::Onboarding {
        print_onboarding_hint();
    } else {
        println!("点眼開始時刻が未設定です (setup で設定してください)");
    }
}
