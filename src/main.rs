//src/main.rs

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sales_report::{
    config::{AppConfig, AppState},
    handlers::report::{generate_report, normalize_output_path},
    services::ReportRequest,
};

/// Gera o relatório mensal de vendas (tabela diária + gráfico por mês) em PDF.
#[derive(Parser)]
#[command(author, version, about = "Reporte de ventas mensual en PDF")]
struct Cli {
    /// Nome da tabela de vendas (colunas date, unit_price, quantity).
    #[arg(long, short = 't')]
    table: String,

    /// Mês do relatório diário (1-12).
    #[arg(long, short = 'm', allow_negative_numbers = true)]
    month: i64,

    /// Arquivo SQLite; sobrescreve DATABASE_URL.
    #[arg(long, short = 'd')]
    database: Option<String>,

    /// Onde salvar o PDF. Sem ele nada é gravado.
    #[arg(long, short = 'o')]
    output: Option<String>,

    /// Imprime também os dados agregados em JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!("{}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;

    let Some(database_url) = cli.database.clone().or_else(|| config.database_url.clone()) else {
        eprintln!("❌ Indique la base de datos con --database o DATABASE_URL");
        return Err("DATABASE_URL não definida".into());
    };

    let request = ReportRequest {
        table: cli.table,
        month: cli.month,
        output_path: normalize_output_path(cli.output),
    };

    let app_state = match AppState::new(&config, &database_url).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let result = generate_report(&app_state, request, cli.json).await;

    // Fecha a pool antes de sair, com ou sem erro
    app_state.db_pool.close().await;

    match result {
        Ok(output) => {
            if let Some(data) = output.data {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            println!("{}", output.message);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        tracing::debug!("  causado por: {}", source);
        error = source;
    }
}
