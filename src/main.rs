// ==========================================
// 法规条文语料库 - 命令行入口
// ==========================================
// 子命令: init-db / template / validate / import
// 输出: 报告写 stdout（JSON），日志写 stderr
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use legal_corpus_import::config::{
    get_default_db_path, ConfigManager, ImportConfigReader, DEFAULT_LOCALE,
};
use legal_corpus_import::db::{init_schema, open_sqlite_connection, read_schema_version};
use legal_corpus_import::importer::{write_csv_template, LoggingProgressListener};
use legal_corpus_import::repository::{ArticleImportRepositoryImpl, RepositoryError};
use legal_corpus_import::{i18n, logging, ImportApi, APP_NAME, VERSION};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "legal-corpus-import")]
#[command(about = "Bulk import of legal articles with cross-reference resolution")]
#[command(version)]
struct Args {
    /// SQLite database path
    #[arg(long, global = true, env = "LEGAL_CORPUS_DB_PATH")]
    db: Option<String>,

    /// Message language (id / en / zh-CN)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create tables, optionally registering law codes (CODE or CODE=Name)
    InitDb {
        #[arg(long = "law-code")]
        law_codes: Vec<String>,
    },

    /// Write the CSV import template
    Template {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse and validate a file without writing anything
    Validate { file: PathBuf },

    /// Import a file into the selected law code
    Import {
        file: PathBuf,

        /// Target law code, e.g. KUHP
        #[arg(long)]
        law_code: String,

        /// Acting user id
        #[arg(long, env = "LEGAL_CORPUS_ACTOR")]
        actor: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.json_log);

    let db_path = args.db.clone().unwrap_or_else(get_default_db_path);
    info!(app = APP_NAME, version = VERSION, db_path = %db_path, "启动");

    apply_locale(args.locale.as_deref(), &db_path).await;

    match args.command {
        Command::InitDb { law_codes } => init_db(&db_path, &law_codes),
        Command::Template { output } => template(output),
        Command::Validate { file } => {
            let summary = ImportApi::new(db_path)
                .validate_file(&file.to_string_lossy())
                .await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Command::Import {
            file,
            law_code,
            actor,
        } => {
            let response = ImportApi::new(db_path)
                .import_file(
                    &file.to_string_lossy(),
                    &law_code,
                    &actor,
                    &LoggingProgressListener,
                )
                .await?;

            if response.result.partial {
                warn!(
                    primary_failed = response.result.primary.failed,
                    links_failed = response.result.links.failed,
                    "导入部分失败"
                );
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

/// 语言: 命令行参数 > 数据库配置 > 默认
async fn apply_locale(cli_locale: Option<&str>, db_path: &str) {
    if let Some(locale) = cli_locale {
        if !i18n::set_locale(locale) {
            warn!(locale, "不支持的语言，使用默认语言");
            i18n::set_locale(DEFAULT_LOCALE);
        }
        return;
    }

    i18n::set_locale(DEFAULT_LOCALE);
    if !Path::new(db_path).exists() {
        return;
    }
    let Ok(manager) = ConfigManager::new(db_path) else {
        return;
    };
    match manager.get_default_locale().await {
        Ok(locale) => {
            if !i18n::set_locale(&locale) {
                warn!(locale = %locale, "配置的语言不受支持");
            }
        }
        Err(e) => warn!(error = %e, "读取语言配置失败"),
    }
}

fn init_db(db_path: &str, law_codes: &[String]) -> Result<()> {
    let conn = open_sqlite_connection(db_path).context("无法打开数据库")?;
    init_schema(&conn).context("建表失败")?;
    let version = read_schema_version(&conn)?;
    info!(?version, "数据库已就绪");

    if law_codes.is_empty() {
        return Ok(());
    }

    let repo = ArticleImportRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))?;
    for entry in law_codes {
        let (code, name) = match entry.split_once('=') {
            Some((code, name)) => (code.trim(), Some(name.trim())),
            None => (entry.trim(), None),
        };
        match repo.insert_law_code(code, name, true) {
            Ok(id) => info!(code, id = %id, "法规已登记"),
            Err(RepositoryError::UniqueConstraintViolation(_)) => {
                warn!(code, "法规已存在，跳过")
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn template(output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("无法创建文件: {}", path.display()))?;
            write_csv_template(file)?;
            info!(path = %path.display(), "模板已生成");
        }
        None => write_csv_template(std::io::stdout().lock())?,
    }
    Ok(())
}
