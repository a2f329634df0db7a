use tracing::debug;
use twfx_core::{ClientConfig, FxClient, HistoricalRates, HistoryQuery, TwBankScraper};

use crate::cli::{Cli, QueryType};
use crate::error::CliError;
use crate::output;

/// Run the query described by the command line and return the rendered
/// output.
pub async fn run(cli: &Cli) -> Result<String, CliError> {
    let client = FxClient::with_config(ClientConfig::with_timeout(cli.timeout))?;
    let scraper = TwBankScraper::with_client(client);

    match cli.query_type {
        QueryType::Current => {
            let snapshot = scraper.current_rate(&cli.currency).await?;
            output::render_current(&snapshot, cli.output)
        }
        QueryType::Historical => {
            let query = history_query(cli)?;
            debug!(?query, "historical query");

            let mut rates = scraper.historical_rates(&query).await?;
            apply_limit(&mut rates, cli.limit);
            output::render_history(&rates, &query.currency, cli.output)
        }
    }
}

/// Keep the first `limit` records. Zero means no limit.
pub fn apply_limit(rates: &mut HistoricalRates, limit: Option<usize>) {
    if let Some(limit) = limit.filter(|n| *n > 0) {
        rates.truncate(limit);
    }
}

pub fn history_query(cli: &Cli) -> Result<HistoryQuery, CliError> {
    let query = HistoryQuery::build(
        &cli.currency,
        cli.period.into(),
        cli.date.clone(),
        Some(cli.rate_type.into()),
    )?;
    Ok(query)
}
