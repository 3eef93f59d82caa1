use async_drills::app::{countdown, dates, file_info, posts, sunrise};
use async_drills::config::{CliConfig, Command};
use async_drills::core::file_info::inspect;
use async_drills::utils::error::{AppError, ErrorSeverity};
use async_drills::utils::logger;
use async_drills::ConsoleRenderer;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting async-drills CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(Failure { error: e, rendered }) = run(cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        // renderer 已經顯示過錯誤訊息的就只補上建議
        if !rendered {
            eprintln!("❌ {}", e.user_friendly_message());
        }
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

/// 指令失敗的原因，`rendered` 表示 renderer 已經把錯誤顯示給使用者
struct Failure {
    error: AppError,
    rendered: bool,
}

impl Failure {
    fn rendered(error: AppError) -> Self {
        Self {
            error,
            rendered: true,
        }
    }
}

impl From<AppError> for Failure {
    fn from(error: AppError) -> Self {
        Self {
            error,
            rendered: false,
        }
    }
}

async fn run(cli: CliConfig) -> Result<(), Failure> {
    let config = cli.app_config()?;

    match &cli.command {
        Command::Sunrise(args) => {
            sunrise::run_sunrise(&config, args.date.as_deref(), ConsoleRenderer::new())
                .await
                .map_err(Failure::rendered)?;
        }
        Command::Posts(args) => {
            let request = posts::PostsRequest {
                post_id: args.post_id,
                missing_post_id: args.missing_post_id,
                user_id: args.user_id,
                create: args.create,
            };
            let report = posts::run_posts(&config, &request).await?;
            print_posts_report(&report);
        }
        Command::Dates(args) => {
            let base = match &args.base {
                Some(raw) => dates::parse_timestamp("base", raw)?,
                None => chrono::Local::now().fixed_offset(),
            };
            let compare = args
                .compare
                .as_deref()
                .map(|raw| dates::parse_timestamp("compare", raw))
                .transpose()?;
            let request = dates::DatesRequest {
                amount: args.amount,
                unit: args.unit,
                pattern: args.pattern.clone(),
                compare,
            };
            print_lines(&dates::date_report(&base, &request)?);
        }
        Command::FileInfo(args) => {
            let info = inspect(&args.path)?;
            print_lines(&file_info::describe(&info));
        }
        Command::Countdown(_) => {
            let ticks = countdown::run_countdown(&config.countdown).await?;
            tracing::info!("✅ Countdown stopped after {} ticks", ticks);
        }
    }

    Ok(())
}

fn print_lines(lines: &[(String, String)]) {
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in lines {
        println!("{:<width$} : {}", label, value, width = width);
    }
}

fn print_posts_report(report: &posts::PostsReport) {
    let stats = &report.stats;
    println!("📊 Posts: {}", stats.total_posts);
    println!("👥 Authors: {}", stats.distinct_users);
    println!("📝 Average title length: {:.1} chars", stats.average_title_length);
    println!("📝 Average body length: {:.1} chars", stats.average_body_length);
    println!("📝 Average body words: {:.1}", stats.average_body_words);
    if let Some((user, count)) = stats.most_active_user() {
        println!("🏆 Most active user: {} ({} posts)", user, count);
    }
    if let Some(title) = &stats.longest_title {
        println!("📏 Longest title: {}", title);
    }
    if let Some(post) = &report.post {
        println!("📄 Post {} by user {}: {}", post.id, post.user_id, post.title);
    }
    println!("🔍 Missing post returned 404: {}", report.missing_post_absent);
    if let Some(user_posts) = &report.user_posts {
        println!("👤 Posts by selected user: {}", user_posts.len());
    }
    println!(
        "👥 Users: {} ({:.2} posts per user)",
        report.user_count, report.average_posts_per_user
    );
    println!("📧 Email domains: {}", report.email_domains.join(", "));
    if let Some(created) = &report.created {
        println!("✅ Created post {}: {}", created.id, created.title);
    }
}
