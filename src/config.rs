// src/config.rs

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    common::{error::ReportError, i18n::ReportLocale},
    db::{SalesRepository, SchemaRepository},
    models::report::PageSize,
    services::{ChartService, DocumentService, ReportService},
};

pub const DEFAULT_FONTS_DIR: &str = "./fonts";
pub const DEFAULT_CHART_PATH: &str = "grafico_mensual.png";
pub const DEFAULT_LOCALE: &str = "es_ES";
pub const DEFAULT_FALLBACK_LOCALE: &str = "es_VE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub fonts_dir: PathBuf,
    pub chart_path: PathBuf,
    pub locale: String,
    pub fallback_locale: String,
    pub page_size: PageSize,
}

impl AppConfig {
    // Lê o .env (se existir) e as variáveis de ambiente
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let page_size = match env::var("REPORT_PAGE_SIZE")
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            Some(name) => PageSize::from_name(&name).ok_or_else(|| {
                anyhow::anyhow!("REPORT_PAGE_SIZE inválido: '{}' (use A4 ou Letter)", name)
            })?,
            None => PageSize::default(),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            fonts_dir: env_or("REPORT_FONTS_DIR", DEFAULT_FONTS_DIR).into(),
            chart_path: env_or("REPORT_CHART_PATH", DEFAULT_CHART_PATH).into(),
            locale: env_or("REPORT_LOCALE", DEFAULT_LOCALE),
            fallback_locale: env_or("REPORT_FALLBACK_LOCALE", DEFAULT_FALLBACK_LOCALE),
            page_size,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            fonts_dir: DEFAULT_FONTS_DIR.into(),
            chart_path: DEFAULT_CHART_PATH.into(),
            locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
            page_size: PageSize::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

// O estado da execução: pool com uma única conexão + serviço montado
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(config: &AppConfig, database_url: &str) -> Result<Self, ReportError> {
        let db_pool = connect(database_url).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let report_service = build_report_service(config)?;

        Ok(Self {
            db_pool,
            report_service,
        })
    }
}

/// Abre o banco em modo somente leitura; nunca cria um arquivo novo.
pub async fn connect(database_url: &str) -> Result<SqlitePool, ReportError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(ReportError::Connection)?
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
        .map_err(ReportError::Connection)
}

// --- Monta o gráfico de dependências ---
pub fn build_report_service(config: &AppConfig) -> Result<ReportService, ReportError> {
    let locale = ReportLocale::resolve(&config.locale, &config.fallback_locale)?;

    Ok(ReportService::new(
        SchemaRepository::new(),
        SalesRepository::new(),
        ChartService::new(config.fonts_dir.clone()),
        DocumentService::new(config.fonts_dir.clone()).with_page_size(config.page_size),
        locale,
        config.chart_path.clone(),
    ))
}
